//! Sweep edges: a curve piece plus per-sweep bookkeeping.

use std::cmp::Ordering;

use crate::curve::Curve;
use crate::op::{EdgeTag, Operand};

/// A typed identity for an edge, unique within one sweep. Comparison
/// memos and stitch links refer to edges by id rather than by position,
/// since the sweep reorders its edge list constantly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EdgeId(pub usize);

/// One curve piece participating in a sweep.
#[derive(Clone, Debug)]
pub(crate) struct Edge {
    curve: Curve,
    operand: Operand,
    id: EdgeId,
    /// Classification most recently recorded for this edge.
    etag: EdgeTag,
    /// The bottom of the band for which `etag` was recorded.
    active_y: f64,
    /// Nonzero id shared by a run of coincident edges in the current
    /// band; 0 outside such a run.
    equivalence: usize,
    // One-entry memo for compare_to. Bands shrink in small steps, so
    // the same pair of edges is usually compared many times over
    // overlapping ranges.
    memo_partner: Option<EdgeId>,
    memo_limit: f64,
    memo_result: Ordering,
}

impl Edge {
    pub fn new(curve: Curve, operand: Operand, id: EdgeId) -> Edge {
        Edge {
            curve,
            operand,
            id,
            etag: EdgeTag::Ignore,
            active_y: 0.0,
            equivalence: 0,
            memo_partner: None,
            memo_limit: 0.0,
            memo_result: Ordering::Equal,
        }
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn operand(&self) -> Operand {
        self.operand
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn equivalence(&self) -> usize {
        self.equivalence
    }

    pub fn set_equivalence(&mut self, eq: usize) {
        self.equivalence = eq;
    }

    /// Orders this edge against `other` over `yrange`, memoizing the
    /// result. A memo hit in either direction is reused (reversed, for
    /// the partner's memo) as long as the requested band starts above
    /// the memoized limit; the band is clipped to that limit.
    pub fn compare_to(&mut self, other: &Edge, yrange: &mut [f64; 2]) -> Ordering {
        if self.memo_partner == Some(other.id) && yrange[0] < self.memo_limit {
            if yrange[1] > self.memo_limit {
                yrange[1] = self.memo_limit;
            }
            return self.memo_result;
        }
        if other.memo_partner == Some(self.id) && yrange[0] < other.memo_limit {
            if yrange[1] > other.memo_limit {
                yrange[1] = other.memo_limit;
            }
            return other.memo_result.reverse();
        }
        let ret = self.curve.compare_to(&other.curve, yrange);
        self.memo_partner = Some(other.id);
        self.memo_limit = yrange[1];
        self.memo_result = ret;
        ret
    }

    /// Records the classification chosen for this edge down to `yend`.
    pub fn record(&mut self, yend: f64, etag: EdgeTag) {
        self.active_y = yend;
        self.etag = etag;
    }

    /// Whether this edge was recorded as `etag` for a band reaching at
    /// least down to `y`.
    pub fn is_active_for(&self, y: f64, etag: EdgeTag) -> bool {
        self.etag == etag && self.active_y >= y
    }
}
