#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod typed_vec;

pub mod crossings;
pub mod curve;
mod edge;
mod op;
pub mod path;
mod stitch;
mod sweep;

pub use crossings::{
    find_crossings, point_crossings_for_path, rect_crossings_for_path, Crossings, RectCrossings,
};
pub use curve::{Curve, CurveDirection};
pub use op::AreaOp;
pub use path::{curves_to_path, path_to_curves};

/// A fill rule tells us how to decide whether a point is "inside" an
/// outline.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FillRule {
    /// The point is "inside" if its winding number is odd.
    EvenOdd,
    /// The point is "inside" if its winding number is non-zero.
    NonZero,
}

/// The input path was faulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The path had a drawing element before any move.
    InvalidPath,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidPath => write!(f, "path does not start with a move"),
        }
    }
}

impl std::error::Error for Error {}

/// Resolves a path against a fill rule.
///
/// The result is a canonical curve list: non-self-intersecting, with
/// the even-odd and non-zero readings of its interior agreeing. All of
/// the binary operators expect their operands in this form.
pub fn resolve(path: &kurbo::BezPath, fill_rule: FillRule) -> Result<Vec<Curve>, Error> {
    let curves = path_to_curves(path)?;
    let op = match fill_rule {
        FillRule::EvenOdd => AreaOp::EvenOddWinding,
        FillRule::NonZero => AreaOp::NonZeroWinding,
    };
    Ok(op.calculate(curves, Vec::new()))
}

/// Computes a boolean operation between two closed paths, reading each
/// one's interior under `fill_rule`.
pub fn binary_op(
    set_a: &kurbo::BezPath,
    set_b: &kurbo::BezPath,
    fill_rule: FillRule,
    op: AreaOp,
) -> Result<Vec<Curve>, Error> {
    debug_assert!(!op.is_winding(), "winding operators take a single operand");
    let left = resolve(set_a, fill_rule)?;
    let right = resolve(set_b, fill_rule)?;
    Ok(op.calculate(left, right))
}

/// Integrates `f` over `[0, 1]` with the three-point Gauss-Legendre
/// rule, which is exact through degree five. The area integrand of a
/// cubic piece has degree five.
fn gauss3(f: impl Fn(f64) -> f64) -> f64 {
    // sqrt(3/5) / 2
    const OFFSET: f64 = 0.387_298_334_620_741_7;
    (5.0 * f(0.5 - OFFSET) + 8.0 * f(0.5) + 5.0 * f(0.5 + OFFSET)) / 18.0
}

/// The signed area enclosed by a curve list, as the contour integral of
/// `x dy`. With y growing downward, clockwise contours come out
/// positive. Exact for lines, quadratics, and cubics up to rounding.
pub fn signed_area(curves: &[Curve]) -> f64 {
    let mut total = 0.0;
    for c in curves {
        let piece = match c {
            Curve::Point { .. } => 0.0,
            Curve::Line(l) => (l.x0 + l.x1) / 2.0 * (l.y1 - l.y0),
            Curve::Quad(q) => {
                let [x0, x1, x2] = q.xcoeff;
                let [_, y1, y2] = q.ycoeff;
                gauss3(|t| ((x2 * t + x1) * t + x0) * (2.0 * y2 * t + y1))
            }
            Curve::Cubic(cb) => {
                let [x0, x1, x2, x3] = cb.xcoeff;
                let [_, y1, y2, y3] = cb.ycoeff;
                gauss3(|t| {
                    (((x3 * t + x2) * t + x1) * t + x0) * ((3.0 * y3 * t + 2.0 * y2) * t + y1)
                })
            }
        };
        total += match c.direction() {
            CurveDirection::Increasing => piece,
            CurveDirection::Decreasing => -piece,
        };
    }
    total
}

/// Whether a resolved curve list contains the point `(x, y)`.
///
/// Resolved lists have odd-parity interiors, so a plain even-odd ray
/// cast suffices whatever rule produced them.
pub fn contains_point(curves: &[Curve], x: f64, y: f64) -> bool {
    let mut crossings = 0;
    for c in curves {
        crossings += c.crossings_for(x, y);
    }
    crossings % 2 != 0
}

/// Whether a resolved curve list wholly contains the rectangle.
pub fn contains_rect(curves: &[Curve], rect: kurbo::Rect) -> bool {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return false;
    }
    match find_crossings(curves, rect.min_x(), rect.min_y(), rect.max_x(), rect.max_y()) {
        Some(cross) => cross.covers(rect.min_y(), rect.max_y()),
        None => false,
    }
}

/// Whether a resolved curve list touches the rectangle's interior.
pub fn intersects_rect(curves: &[Curve], rect: kurbo::Rect) -> bool {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return false;
    }
    match find_crossings(curves, rect.min_x(), rect.min_y(), rect.max_x(), rect.max_y()) {
        Some(cross) => !cross.is_empty(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{BezPath, Rect};

    use super::*;

    fn to_bez(mut points: impl Iterator<Item = (f64, f64)>) -> BezPath {
        let p = points.next().unwrap();
        let mut ret = BezPath::default();
        ret.move_to(p);
        for q in points {
            ret.line_to(q);
        }
        ret.close_path();
        ret
    }

    #[test]
    fn two_squares() {
        let a = to_bez([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)].into_iter());
        let b = to_bez(
            [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)].into_iter(),
        );
        let out = binary_op(&a, &b, FillRule::EvenOdd, AreaOp::Intersect).unwrap();
        assert!((signed_area(&out).abs() - 0.25).abs() < 1e-12);
        let markers = out.iter().filter(|c| c.order() == 0).count();
        assert_eq!(markers, 1);
        assert!(contains_point(&out, 0.25, 0.25));
        assert!(!contains_point(&out, 0.75, 0.75));
    }

    #[test]
    fn self_intersecting_bowtie_resolves() {
        // A bowtie crosses itself at the origin; non-zero and even-odd
        // agree on its interior.
        let bowtie = to_bez([(-1.0, -1.0), (1.0, 1.0), (1.0, -1.0), (-1.0, 1.0)].into_iter());
        let out = resolve(&bowtie, FillRule::EvenOdd).unwrap();
        assert!((signed_area(&out).abs() - 2.0).abs() < 1e-12);
        let markers = out.iter().filter(|c| c.order() == 0).count();
        assert_eq!(markers, 2);
        assert!(contains_point(&out, -0.9, 0.0));
        assert!(contains_point(&out, 0.9, 0.0));
        assert!(!contains_point(&out, 0.0, 0.5));
    }

    #[test]
    fn fill_rules_disagree_on_double_wound_square() {
        let mut path = BezPath::new();
        for _ in 0..2 {
            path.move_to((0.0, 0.0));
            path.line_to((1.0, 0.0));
            path.line_to((1.0, 1.0));
            path.line_to((0.0, 1.0));
            path.close_path();
        }
        let non_zero = resolve(&path, FillRule::NonZero).unwrap();
        assert!((signed_area(&non_zero).abs() - 1.0).abs() < 1e-12);
        let even_odd = resolve(&path, FillRule::EvenOdd).unwrap();
        assert!(signed_area(&even_odd).abs() < 1e-12);
    }

    #[test]
    fn rect_queries() {
        let square = to_bez([(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)].into_iter());
        let curves = resolve(&square, FillRule::NonZero).unwrap();
        assert!(contains_rect(&curves, Rect::new(1.0, 1.0, 3.0, 3.0)));
        assert!(!contains_rect(&curves, Rect::new(3.0, 3.0, 5.0, 5.0)));
        assert!(intersects_rect(&curves, Rect::new(3.0, 3.0, 5.0, 5.0)));
        assert!(!intersects_rect(&curves, Rect::new(5.0, 5.0, 6.0, 6.0)));
        assert!(!contains_rect(&curves, Rect::new(1.0, 1.0, 1.0, 3.0)));
    }

    #[test]
    fn empty_inputs() {
        let empty = BezPath::new();
        assert!(resolve(&empty, FillRule::NonZero).unwrap().is_empty());
        let out = binary_op(&empty, &empty, FillRule::NonZero, AreaOp::Add).unwrap();
        assert!(out.is_empty());
    }
}
