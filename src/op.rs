//! Boolean operators and the per-band winding classifier.

use crate::curve::{Curve, CurveDirection};
use crate::edge::{Edge, EdgeId};
use crate::sweep;

/// A boolean or winding operation on curve lists.
///
/// The four binary operators require both operands to be *resolved*
/// curve lists (see [`crate::resolve`]): lists whose interior is the
/// region with odd crossing parity, with no self-intersections. The two
/// winding operators take a single raw curve list and produce such a
/// resolved list.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AreaOp {
    /// Union of the two operands.
    Add,
    /// Left operand minus the right operand.
    Subtract,
    /// Intersection of the two operands.
    Intersect,
    /// Symmetric difference of the two operands.
    Xor,
    /// Resolves a single raw curve list under the non-zero winding
    /// rule.
    NonZeroWinding,
    /// Resolves a single raw curve list under the even-odd rule.
    EvenOddWinding,
}

/// Which operand an edge came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Operand {
    Left,
    Right,
}

/// The classification of one edge within one band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EdgeTag {
    /// Crossing this edge left-to-right enters the result region.
    Enter,
    /// Crossing this edge left-to-right exits the result region.
    Exit,
    /// This edge does not bound the result region in this band.
    Ignore,
}

impl EdgeTag {
    /// The traversal direction a kept piece gets, so that resolved
    /// outlines always have the result region to the right of the
    /// traversal (interior has odd crossing parity and winding +1).
    pub fn direction(self) -> CurveDirection {
        match self {
            EdgeTag::Enter => CurveDirection::Increasing,
            EdgeTag::Exit => CurveDirection::Decreasing,
            EdgeTag::Ignore => panic!("ignored edges have no output direction"),
        }
    }
}

/// Whether the classifier is inside or outside the result region at the
/// current x position of a band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RegionState {
    Inside,
    Outside,
}

/// The left-to-right classification state for one band.
#[derive(Clone, Debug)]
pub(crate) enum OpState {
    /// The four set operators track inside-ness of each operand
    /// separately and combine them.
    Cag {
        op: AreaOp,
        in_left: bool,
        in_right: bool,
        in_result: bool,
    },
    /// Signed winding count.
    NonZero { count: i32 },
    /// Crossing parity.
    EvenOdd { inside: bool },
}

impl AreaOp {
    /// Whether this is one of the two single-operand winding operators.
    pub fn is_winding(self) -> bool {
        matches!(self, AreaOp::NonZeroWinding | AreaOp::EvenOddWinding)
    }

    pub(crate) fn state(self) -> OpState {
        match self {
            AreaOp::Add | AreaOp::Subtract | AreaOp::Intersect | AreaOp::Xor => OpState::Cag {
                op: self,
                in_left: false,
                in_right: false,
                in_result: false,
            },
            AreaOp::NonZeroWinding => OpState::NonZero { count: 0 },
            AreaOp::EvenOddWinding => OpState::EvenOdd { inside: false },
        }
    }

    /// Runs this operation over the given curve lists and returns the
    /// resolved result. For the winding operators, `right` must be
    /// empty.
    ///
    /// # Panics
    ///
    /// Panics if the inputs are not geometrically consistent; in
    /// particular the binary operators require both inputs to already
    /// be resolved.
    pub fn calculate(self, left: Vec<Curve>, right: Vec<Curve>) -> Vec<Curve> {
        debug_assert!(
            !self.is_winding() || right.is_empty(),
            "winding operators take a single operand",
        );
        let mut edges = Vec::with_capacity(left.len() + right.len());
        let mut push = |curves: Vec<Curve>, operand| {
            for c in curves {
                // Contour markers take no part in the sweep.
                if c.order() > 0 {
                    let id = EdgeId(edges.len());
                    edges.push(Edge::new(c, operand, id));
                }
            }
        };
        push(left, Operand::Left);
        push(right, Operand::Right);
        let mut state = self.state();
        sweep::prune_edges(edges, &mut state)
    }
}

impl OpState {
    /// Resets per-band state before classifying a band left to right.
    pub fn new_row(&mut self) {
        match self {
            OpState::Cag {
                in_left,
                in_right,
                in_result,
                ..
            } => {
                *in_left = false;
                *in_right = false;
                *in_result = false;
            }
            OpState::NonZero { count } => *count = 0,
            OpState::EvenOdd { inside } => *inside = false,
        }
    }

    /// Crosses `edge` moving left to right and classifies it.
    pub fn classify(&mut self, edge: &Edge) -> EdgeTag {
        match self {
            OpState::Cag {
                op,
                in_left,
                in_right,
                in_result,
            } => {
                match edge.operand() {
                    Operand::Left => *in_left = !*in_left,
                    Operand::Right => *in_right = !*in_right,
                }
                let new_result = match op {
                    AreaOp::Add => *in_left || *in_right,
                    AreaOp::Subtract => *in_left && !*in_right,
                    AreaOp::Intersect => *in_left && *in_right,
                    AreaOp::Xor => *in_left != *in_right,
                    _ => unreachable!(),
                };
                if new_result == *in_result {
                    EdgeTag::Ignore
                } else {
                    *in_result = new_result;
                    if new_result {
                        EdgeTag::Enter
                    } else {
                        EdgeTag::Exit
                    }
                }
            }
            OpState::NonZero { count } => {
                let newcount = *count + edge.curve().direction().winding();
                let tag = if newcount == 0 {
                    EdgeTag::Exit
                } else if *count == 0 {
                    EdgeTag::Enter
                } else {
                    EdgeTag::Ignore
                };
                *count = newcount;
                tag
            }
            OpState::EvenOdd { inside } => {
                *inside = !*inside;
                if *inside {
                    EdgeTag::Enter
                } else {
                    EdgeTag::Exit
                }
            }
        }
    }

    /// The classifier's current side of the result region.
    pub fn state(&self) -> RegionState {
        let inside = match self {
            OpState::Cag { in_result, .. } => *in_result,
            OpState::NonZero { count } => *count != 0,
            OpState::EvenOdd { inside } => *inside,
        };
        if inside {
            RegionState::Inside
        } else {
            RegionState::Outside
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn edge(operand: Operand, dir: CurveDirection) -> Edge {
        let (p0, p1) = match dir {
            CurveDirection::Increasing => (Point::new(0.0, 0.0), Point::new(0.0, 1.0)),
            CurveDirection::Decreasing => (Point::new(0.0, 1.0), Point::new(0.0, 0.0)),
        };
        Edge::new(Curve::line(p0, p1).unwrap(), operand, EdgeId(0))
    }

    fn tags(op: AreaOp, operands: &[Operand]) -> Vec<EdgeTag> {
        let mut st = op.state();
        st.new_row();
        operands
            .iter()
            .map(|o| st.classify(&edge(*o, CurveDirection::Increasing)))
            .collect()
    }

    #[test]
    fn cag_intersect() {
        use EdgeTag::*;
        use Operand::*;
        // Overlapping spans: only the overlap bounds the result.
        assert_eq!(tags(AreaOp::Intersect, &[Left, Right, Left, Right]), vec![
            Ignore, Enter, Exit, Ignore
        ]);
    }

    #[test]
    fn cag_add_merges_overlap() {
        use EdgeTag::*;
        use Operand::*;
        assert_eq!(tags(AreaOp::Add, &[Left, Right, Left, Right]), vec![
            Enter, Ignore, Ignore, Exit
        ]);
    }

    #[test]
    fn cag_subtract() {
        use EdgeTag::*;
        use Operand::*;
        assert_eq!(tags(AreaOp::Subtract, &[Left, Right, Left, Right]), vec![
            Enter, Exit, Ignore, Ignore
        ]);
    }

    #[test]
    fn cag_xor_keeps_everything() {
        use EdgeTag::*;
        use Operand::*;
        assert_eq!(tags(AreaOp::Xor, &[Left, Right, Left, Right]), vec![
            Enter, Exit, Enter, Exit
        ]);
    }

    #[test]
    fn non_zero_interior_edges_ignored() {
        use CurveDirection::*;
        use EdgeTag::*;
        let mut st = AreaOp::NonZeroWinding.state();
        st.new_row();
        // Two nested clockwise contours: the inner pair of edges does
        // not change inside-ness.
        let seq = [Increasing, Increasing, Decreasing, Decreasing];
        let got: Vec<_> = seq
            .iter()
            .map(|d| st.classify(&edge(Operand::Left, *d)))
            .collect();
        assert_eq!(got, vec![Enter, Ignore, Ignore, Exit]);
        assert_eq!(st.state(), RegionState::Outside);
    }

    #[test]
    fn non_zero_cancelling_edges() {
        use CurveDirection::*;
        use EdgeTag::*;
        let mut st = AreaOp::NonZeroWinding.state();
        st.new_row();
        let seq = [Increasing, Decreasing, Increasing, Decreasing];
        let got: Vec<_> = seq
            .iter()
            .map(|d| st.classify(&edge(Operand::Left, *d)))
            .collect();
        assert_eq!(got, vec![Enter, Exit, Enter, Exit]);
    }

    #[test]
    fn even_odd_alternates() {
        use EdgeTag::*;
        let mut st = AreaOp::EvenOddWinding.state();
        st.new_row();
        let got: Vec<_> = (0..4)
            .map(|_| st.classify(&edge(Operand::Left, CurveDirection::Decreasing)))
            .collect();
        assert_eq!(got, vec![Enter, Exit, Enter, Exit]);
        assert_eq!(st.state(), RegionState::Outside);
    }
}
