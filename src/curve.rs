//! Y-monotonic curve pieces.
//!
//! Everything in this crate operates on lists of [`Curve`]s: pieces of
//! lines, quadratics, and cubics that are monotonic in `y`. A piece is
//! always *stored* top-to-bottom (smallest `y` first) and carries a
//! [`CurveDirection`] flag recording which way the original outline
//! traversed it. A zero-length `Point` piece marks the start of each
//! closed contour in a resolved curve list.

use arrayvec::ArrayVec;
use kurbo::common::{solve_cubic, solve_quadratic};
use kurbo::{CubicBez, ParamCurve as _, Point, QuadBez};

use crate::crossings::Crossings;

mod compare;

pub(crate) use compare::order_of;

/// Parametric span below which pairwise comparison stops subdividing
/// and intersects the chords of the two pieces instead.
pub(crate) const TMIN: f64 = 1e-3;

/// The traversal direction of a curve piece, relative to its stored
/// top-to-bottom geometry.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CurveDirection {
    /// Traversed with increasing `y`.
    Increasing,
    /// Traversed with decreasing `y`.
    Decreasing,
}

impl CurveDirection {
    /// The opposite direction.
    pub fn flip(self) -> CurveDirection {
        match self {
            CurveDirection::Increasing => CurveDirection::Decreasing,
            CurveDirection::Decreasing => CurveDirection::Increasing,
        }
    }

    /// The winding contribution of an edge traversed in this direction:
    /// `+1` downwards, `-1` upwards.
    pub fn winding(self) -> i32 {
        match self {
            CurveDirection::Increasing => 1,
            CurveDirection::Decreasing => -1,
        }
    }
}

/// A line piece, stored with `y0 <= y1`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineCurve {
    pub(crate) x0: f64,
    pub(crate) y0: f64,
    pub(crate) x1: f64,
    pub(crate) y1: f64,
    pub(crate) direction: CurveDirection,
}

/// A y-monotonic quadratic piece, stored top-to-bottom, with its
/// power-basis coefficients and x extent cached.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuadCurve {
    pub(crate) x0: f64,
    pub(crate) y0: f64,
    pub(crate) cx: f64,
    pub(crate) cy: f64,
    pub(crate) x1: f64,
    pub(crate) y1: f64,
    pub(crate) xmin: f64,
    pub(crate) xmax: f64,
    pub(crate) xcoeff: [f64; 3],
    pub(crate) ycoeff: [f64; 3],
    pub(crate) direction: CurveDirection,
}

/// A y-monotonic cubic piece, stored top-to-bottom, with its
/// power-basis coefficients and x extent cached.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CubicCurve {
    pub(crate) x0: f64,
    pub(crate) y0: f64,
    pub(crate) cx0: f64,
    pub(crate) cy0: f64,
    pub(crate) cx1: f64,
    pub(crate) cy1: f64,
    pub(crate) x1: f64,
    pub(crate) y1: f64,
    pub(crate) xmin: f64,
    pub(crate) xmax: f64,
    pub(crate) xcoeff: [f64; 4],
    pub(crate) ycoeff: [f64; 4],
    pub(crate) direction: CurveDirection,
}

/// One y-monotonic piece of an outline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Curve {
    /// A zero-length marker; every contour in a resolved curve list
    /// starts with one.
    Point {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// A line piece.
    Line(LineCurve),
    /// A quadratic piece.
    Quad(QuadCurve),
    /// A cubic piece.
    Cubic(CubicCurve),
}

impl QuadCurve {
    fn from_points(
        x0: f64,
        y0: f64,
        cx: f64,
        mut cy: f64,
        x1: f64,
        y1: f64,
        direction: CurveDirection,
    ) -> QuadCurve {
        // Root finding can leave the control point a hair outside the
        // y range of a monotonic piece.
        cy = cy.clamp(y0, y1);
        QuadCurve {
            x0,
            y0,
            cx,
            cy,
            x1,
            y1,
            xmin: x0.min(cx).min(x1),
            xmax: x0.max(cx).max(x1),
            xcoeff: [x0, cx + cx - x0 - x0, x0 - cx - cx + x1],
            ycoeff: [y0, cy + cy - y0 - y0, y0 - cy - cy + y1],
            direction,
        }
    }

    fn t_for_y(&self, y: f64) -> f64 {
        if y <= self.y0 {
            return 0.0;
        }
        if y >= self.y1 {
            return 1.0;
        }
        quad_t_for_y(y, self.ycoeff)
    }
}

/// Solves `c0 + c1 t + c2 t^2 = y` for a `t` in `[0, 1]`, using the
/// numerically stable form of the quadratic formula. The coefficients
/// must be monotonic over `[0, 1]`.
fn quad_t_for_y(y: f64, [c0, c1, c2]: [f64; 3]) -> f64 {
    let c0 = c0 - y;
    if c2 == 0.0 {
        let root = -c0 / c1;
        if (0.0..=1.0).contains(&root) {
            return root;
        }
    } else {
        let d = c1 * c1 - 4.0 * c2 * c0;
        if d >= 0.0 {
            let mut d = d.sqrt();
            if c1 < 0.0 {
                d = -d;
            }
            let q = (c1 + d) / -2.0;
            let root = q / c2;
            if (0.0..=1.0).contains(&root) {
                return root;
            }
            if q != 0.0 {
                let root = c0 / q;
                if (0.0..=1.0).contains(&root) {
                    return root;
                }
            }
        }
    }
    // No root in range, so the target must be within rounding error of
    // an endpoint. Pick the closer one by the midpoint sign.
    let y0 = c0;
    let y1 = c0 + c1 + c2;
    if 0.0 < (y0 + y1) / 2.0 {
        0.0
    } else {
        1.0
    }
}

impl CubicCurve {
    #[allow(clippy::too_many_arguments)]
    fn from_points(
        x0: f64,
        y0: f64,
        cx0: f64,
        mut cy0: f64,
        cx1: f64,
        mut cy1: f64,
        x1: f64,
        y1: f64,
        direction: CurveDirection,
    ) -> CubicCurve {
        cy0 = cy0.clamp(y0, y1);
        cy1 = cy1.clamp(y0, y1);
        CubicCurve {
            x0,
            y0,
            cx0,
            cy0,
            cx1,
            cy1,
            x1,
            y1,
            xmin: x0.min(cx0).min(cx1).min(x1),
            xmax: x0.max(cx0).max(cx1).max(x1),
            xcoeff: [
                x0,
                (cx0 - x0) * 3.0,
                (cx1 - cx0 - cx0 + x0) * 3.0,
                x1 - (cx1 - cx0) * 3.0 - x0,
            ],
            ycoeff: [
                y0,
                (cy0 - y0) * 3.0,
                (cy1 - cy0 - cy0 + y0) * 3.0,
                y1 - (cy1 - cy0) * 3.0 - y0,
            ],
            direction,
        }
    }

    fn t_for_y(&self, y: f64) -> f64 {
        if y <= self.y0 {
            return 0.0;
        }
        if y >= self.y1 {
            return 1.0;
        }
        let [c0, c1, c2, c3] = self.ycoeff;
        let c0 = c0 - y;
        let mut found = None;
        for root in solve_cubic(c0, c1, c2, c3) {
            if (-1e-6..=1.0 + 1e-6).contains(&root) {
                found = Some(root.clamp(0.0, 1.0));
                break;
            }
        }
        let Some(mut t) = found else {
            return self.bisect_t_for_y(y);
        };
        // A couple of Newton steps to polish the root.
        for _ in 0..3 {
            let val = ((c3 * t + c2) * t + c1) * t + c0;
            if val == 0.0 {
                break;
            }
            let deriv = (3.0 * c3 * t + 2.0 * c2) * t + c1;
            if deriv == 0.0 {
                break;
            }
            t = (t - val / deriv).clamp(0.0, 1.0);
        }
        t
    }

    fn bisect_t_for_y(&self, y: f64) -> f64 {
        let [c0, c1, c2, c3] = self.ycoeff;
        let mut lo = 0.0f64;
        let mut hi = 1.0f64;
        loop {
            let mid = (lo + hi) / 2.0;
            if mid == lo || mid == hi {
                return mid;
            }
            let ymid = ((c3 * mid + c2) * mid + c1) * mid + c0;
            if ymid < y {
                lo = mid;
            } else if ymid > y {
                hi = mid;
            } else {
                return mid;
            }
        }
    }
}

impl Curve {
    /// A contour-start marker at `(x, y)`.
    pub fn point(x: f64, y: f64) -> Curve {
        Curve::Point { x, y }
    }

    /// A line piece from `p0` to `p1`, or `None` if the line is
    /// horizontal. Horizontal pieces never change a winding count and
    /// are dropped on input.
    pub fn line(p0: Point, p1: Point) -> Option<Curve> {
        use std::cmp::Ordering::*;
        let (x0, y0, x1, y1, direction) = match p0.y.partial_cmp(&p1.y)? {
            Less => (p0.x, p0.y, p1.x, p1.y, CurveDirection::Increasing),
            Greater => (p1.x, p1.y, p0.x, p0.y, CurveDirection::Decreasing),
            Equal => return None,
        };
        Some(Curve::Line(LineCurve {
            x0,
            y0,
            x1,
            y1,
            direction,
        }))
    }

    /// A y-monotonic quadratic piece traversed `p0 -> p1`, or `None` if
    /// it is horizontal. The control height is clamped into the
    /// endpoint range, so callers must have already split at interior
    /// horizontal tangents.
    pub fn quad(p0: Point, ctrl: Point, p1: Point) -> Option<Curve> {
        use std::cmp::Ordering::*;
        Some(Curve::Quad(match p0.y.partial_cmp(&p1.y)? {
            Less => QuadCurve::from_points(
                p0.x,
                p0.y,
                ctrl.x,
                ctrl.y,
                p1.x,
                p1.y,
                CurveDirection::Increasing,
            ),
            Greater => QuadCurve::from_points(
                p1.x,
                p1.y,
                ctrl.x,
                ctrl.y,
                p0.x,
                p0.y,
                CurveDirection::Decreasing,
            ),
            Equal => return None,
        }))
    }

    /// A y-monotonic cubic piece traversed `p0 -> p1`, or `None` if it
    /// is horizontal. Control heights are clamped into the endpoint
    /// range, so callers must have already split at interior horizontal
    /// tangents.
    pub fn cubic(p0: Point, c0: Point, c1: Point, p1: Point) -> Option<Curve> {
        use std::cmp::Ordering::*;
        Some(Curve::Cubic(match p0.y.partial_cmp(&p1.y)? {
            Less => CubicCurve::from_points(
                p0.x,
                p0.y,
                c0.x,
                c0.y,
                c1.x,
                c1.y,
                p1.x,
                p1.y,
                CurveDirection::Increasing,
            ),
            Greater => CubicCurve::from_points(
                p1.x,
                p1.y,
                c1.x,
                c1.y,
                c0.x,
                c0.y,
                p0.x,
                p0.y,
                CurveDirection::Decreasing,
            ),
            Equal => return None,
        }))
    }

    /// The polynomial order: 0 for points, 1 for lines, 2 for
    /// quadratics, 3 for cubics.
    pub fn order(&self) -> usize {
        match self {
            Curve::Point { .. } => 0,
            Curve::Line(_) => 1,
            Curve::Quad(_) => 2,
            Curve::Cubic(_) => 3,
        }
    }

    /// The traversal direction.
    pub fn direction(&self) -> CurveDirection {
        match self {
            Curve::Point { .. } => CurveDirection::Increasing,
            Curve::Line(l) => l.direction,
            Curve::Quad(q) => q.direction,
            Curve::Cubic(c) => c.direction,
        }
    }

    /// The same geometry with the opposite traversal direction.
    pub fn reversed(&self) -> Curve {
        let mut ret = self.clone();
        match &mut ret {
            Curve::Point { .. } => {}
            Curve::Line(l) => l.direction = l.direction.flip(),
            Curve::Quad(q) => q.direction = q.direction.flip(),
            Curve::Cubic(c) => c.direction = c.direction.flip(),
        }
        ret
    }

    /// The same geometry traversed in `dir`.
    pub fn with_direction(&self, dir: CurveDirection) -> Curve {
        if self.direction() == dir {
            self.clone()
        } else {
            self.reversed()
        }
    }

    /// The smallest `y` on the piece.
    pub fn ytop(&self) -> f64 {
        match self {
            Curve::Point { y, .. } => *y,
            Curve::Line(l) => l.y0,
            Curve::Quad(q) => q.y0,
            Curve::Cubic(c) => c.y0,
        }
    }

    /// The largest `y` on the piece.
    pub fn ybot(&self) -> f64 {
        match self {
            Curve::Point { y, .. } => *y,
            Curve::Line(l) => l.y1,
            Curve::Quad(q) => q.y1,
            Curve::Cubic(c) => c.y1,
        }
    }

    /// The `x` at the top endpoint.
    pub fn xtop(&self) -> f64 {
        match self {
            Curve::Point { x, .. } => *x,
            Curve::Line(l) => l.x0,
            Curve::Quad(q) => q.x0,
            Curve::Cubic(c) => c.x0,
        }
    }

    /// The `x` at the bottom endpoint.
    pub fn xbot(&self) -> f64 {
        match self {
            Curve::Point { x, .. } => *x,
            Curve::Line(l) => l.x1,
            Curve::Quad(q) => q.x1,
            Curve::Cubic(c) => c.x1,
        }
    }

    /// A lower bound on `x` over the whole piece (from the control
    /// polygon, for quadratics and cubics).
    pub fn xmin(&self) -> f64 {
        match self {
            Curve::Point { x, .. } => *x,
            Curve::Line(l) => l.x0.min(l.x1),
            Curve::Quad(q) => q.xmin,
            Curve::Cubic(c) => c.xmin,
        }
    }

    /// An upper bound on `x` over the whole piece.
    pub fn xmax(&self) -> f64 {
        match self {
            Curve::Point { x, .. } => *x,
            Curve::Line(l) => l.x0.max(l.x1),
            Curve::Quad(q) => q.xmax,
            Curve::Cubic(c) => c.xmax,
        }
    }

    /// The parameter at which the piece reaches height `y`, clamped to
    /// `[0, 1]`.
    pub fn t_for_y(&self, y: f64) -> f64 {
        match self {
            Curve::Point { .. } => 0.0,
            Curve::Line(l) => {
                if y <= l.y0 {
                    0.0
                } else if y >= l.y1 {
                    1.0
                } else {
                    (y - l.y0) / (l.y1 - l.y0)
                }
            }
            Curve::Quad(q) => q.t_for_y(y),
            Curve::Cubic(c) => c.t_for_y(y),
        }
    }

    /// `t_for_y` can return a parameter that evaluates to a height just
    /// below the requested one. This bisects upwards from `t0` until
    /// the evaluated height is at least `y0` again.
    pub(crate) fn refine_t_for_y(&self, mut t0: f64, y0: f64) -> f64 {
        let mut t1 = 1.0f64;
        loop {
            let th = (t0 + t1) / 2.0;
            if th == t0 || th == t1 {
                return t1;
            }
            let y = self.y_for_t(th);
            if y < y0 {
                t0 = th;
            } else if y > y0 {
                t1 = th;
            } else {
                return th;
            }
        }
    }

    /// The `x` coordinate at parameter `t`.
    pub fn x_for_t(&self, t: f64) -> f64 {
        match self {
            Curve::Point { x, .. } => *x,
            Curve::Line(l) => l.x0 + t * (l.x1 - l.x0),
            Curve::Quad(q) => (q.xcoeff[2] * t + q.xcoeff[1]) * t + q.xcoeff[0],
            Curve::Cubic(c) => {
                ((c.xcoeff[3] * t + c.xcoeff[2]) * t + c.xcoeff[1]) * t + c.xcoeff[0]
            }
        }
    }

    /// The `y` coordinate at parameter `t`.
    pub fn y_for_t(&self, t: f64) -> f64 {
        match self {
            Curve::Point { y, .. } => *y,
            Curve::Line(l) => l.y0 + t * (l.y1 - l.y0),
            Curve::Quad(q) => (q.ycoeff[2] * t + q.ycoeff[1]) * t + q.ycoeff[0],
            Curve::Cubic(c) => {
                ((c.ycoeff[3] * t + c.ycoeff[2]) * t + c.ycoeff[1]) * t + c.ycoeff[0]
            }
        }
    }

    /// The `deriv`-th derivative of `x` with respect to `t`, evaluated
    /// at `t`. `deriv == 0` is the coordinate itself.
    pub fn dx_for_t(&self, t: f64, deriv: usize) -> f64 {
        match self {
            Curve::Point { x, .. } => match deriv {
                0 => *x,
                _ => 0.0,
            },
            Curve::Line(l) => match deriv {
                0 => l.x0 + t * (l.x1 - l.x0),
                1 => l.x1 - l.x0,
                _ => 0.0,
            },
            Curve::Quad(q) => poly_deriv(&q.xcoeff, t, deriv),
            Curve::Cubic(c) => poly_deriv(&c.xcoeff, t, deriv),
        }
    }

    /// The `deriv`-th derivative of `y` with respect to `t`, evaluated
    /// at `t`.
    pub fn dy_for_t(&self, t: f64, deriv: usize) -> f64 {
        match self {
            Curve::Point { y, .. } => match deriv {
                0 => *y,
                _ => 0.0,
            },
            Curve::Line(l) => match deriv {
                0 => l.y0 + t * (l.y1 - l.y0),
                1 => l.y1 - l.y0,
                _ => 0.0,
            },
            Curve::Quad(q) => poly_deriv(&q.ycoeff, t, deriv),
            Curve::Cubic(c) => poly_deriv(&c.ycoeff, t, deriv),
        }
    }

    /// The `x` coordinate at height `y`, clamped to the endpoints
    /// outside the piece's y range.
    pub fn x_for_y(&self, y: f64) -> f64 {
        match self {
            Curve::Point { x, .. } => *x,
            Curve::Line(l) => {
                if l.x0 == l.x1 || y <= l.y0 {
                    l.x0
                } else if y >= l.y1 {
                    l.x1
                } else {
                    l.x0 + (y - l.y0) * (l.x1 - l.x0) / (l.y1 - l.y0)
                }
            }
            Curve::Quad(q) => {
                if y <= q.y0 {
                    q.x0
                } else if y >= q.y1 {
                    q.x1
                } else {
                    self.x_for_t(q.t_for_y(y))
                }
            }
            Curve::Cubic(c) => {
                if y <= c.y0 {
                    c.x0
                } else if y >= c.y1 {
                    c.x1
                } else {
                    self.x_for_t(c.t_for_y(y))
                }
            }
        }
    }

    /// The next parameter after `t0` (up to `t1`) at which `dx/dt` can
    /// change sign. Pairwise comparison and crossings accumulation walk
    /// these breakpoints so that each sampled span is x-monotonic.
    pub(crate) fn next_vertical(&self, t0: f64, t1: f64) -> f64 {
        match self {
            Curve::Point { .. } | Curve::Line(_) => t1,
            Curve::Quad(q) => {
                if q.xcoeff[2] != 0.0 {
                    let t = -q.xcoeff[1] / (2.0 * q.xcoeff[2]);
                    if t > t0 && t < t1 {
                        return t;
                    }
                }
                t1
            }
            Curve::Cubic(c) => {
                let mut next = t1;
                for root in solve_quadratic(c.xcoeff[1], 2.0 * c.xcoeff[2], 3.0 * c.xcoeff[3]) {
                    if root > t0 && root < next {
                        next = root;
                    }
                }
                next
            }
        }
    }

    /// The sub-piece between heights `ystart` and `yend`, traversed in
    /// `dir`. The caller guarantees `ytop() <= ystart < yend <= ybot()`.
    pub fn sub_curve(&self, ystart: f64, yend: f64, dir: CurveDirection) -> Curve {
        match self {
            Curve::Point { .. } => self.clone(),
            Curve::Line(l) => {
                if ystart == l.y0 && yend == l.y1 {
                    return self.with_direction(dir);
                }
                let (xstart, xend) = if l.x0 == l.x1 {
                    (l.x0, l.x1)
                } else {
                    let slope = (l.x1 - l.x0) / (l.y1 - l.y0);
                    (l.x0 + (ystart - l.y0) * slope, l.x0 + (yend - l.y0) * slope)
                };
                Curve::Line(LineCurve {
                    x0: xstart,
                    y0: ystart,
                    x1: xend,
                    y1: yend,
                    direction: dir,
                })
            }
            Curve::Quad(q) => {
                if ystart <= q.y0 && yend >= q.y1 {
                    return self.with_direction(dir);
                }
                let t0 = q.t_for_y(ystart);
                let t1 = q.t_for_y(yend);
                let sub = QuadBez::new(
                    Point::new(q.x0, q.y0),
                    Point::new(q.cx, q.cy),
                    Point::new(q.x1, q.y1),
                )
                .subsegment(t0..t1);
                // Pin the endpoint heights so adjacent bands share them
                // exactly.
                Curve::Quad(QuadCurve::from_points(
                    sub.p0.x, ystart, sub.p1.x, sub.p1.y, sub.p2.x, yend, dir,
                ))
            }
            Curve::Cubic(c) => {
                if ystart <= c.y0 && yend >= c.y1 {
                    return self.with_direction(dir);
                }
                let t0 = c.t_for_y(ystart);
                let t1 = c.t_for_y(yend);
                let sub = CubicBez::new(
                    Point::new(c.x0, c.y0),
                    Point::new(c.cx0, c.cy0),
                    Point::new(c.cx1, c.cy1),
                    Point::new(c.x1, c.y1),
                )
                .subsegment(t0..t1);
                Curve::Cubic(CubicCurve::from_points(
                    sub.p0.x, ystart, sub.p1.x, sub.p1.y, sub.p2.x, sub.p2.y, sub.p3.x, yend, dir,
                ))
            }
        }
    }

    /// Counts the crossing (0 or 1) of the leftward ray from `(x, y)`
    /// with this piece, using half-open y intervals so that a height
    /// shared by two adjacent pieces is counted exactly once.
    pub fn crossings_for(&self, x: f64, y: f64) -> i32 {
        if y >= self.ytop()
            && y < self.ybot()
            && x < self.xmax()
            && (x < self.xmin() || x < self.x_for_y(y))
        {
            1
        } else {
            0
        }
    }

    /// Feeds this piece into a [`Crossings`] accumulator. Returns
    /// `true` if the piece enters the accumulator's window, in which
    /// case accumulation stops.
    pub fn accumulate_crossings(&self, c: &mut Crossings) -> bool {
        if self.xmin() >= c.xhi() {
            return false;
        }
        let y0 = self.ytop();
        let y1 = self.ybot();
        let (tstart, ystart) = if y0 < c.ylo() {
            if y1 <= c.ylo() {
                return false;
            }
            (self.t_for_y(c.ylo()), c.ylo())
        } else {
            if y0 >= c.yhi() {
                return false;
            }
            (0.0, y0)
        };
        let (tend, yend) = if y1 > c.yhi() {
            (self.t_for_y(c.yhi()), c.yhi())
        } else {
            (1.0, y1)
        };
        // Sample x at every x-monotonic breakpoint. Any sample inside
        // the window, or samples on both sides of it, means the piece
        // crosses the window.
        let mut hit_lo = false;
        let mut hit_hi = false;
        let mut t = tstart;
        loop {
            let x = self.x_for_t(t);
            if x < c.xhi() {
                if x > c.xlo() {
                    return true;
                }
                hit_lo = true;
                if hit_hi {
                    return true;
                }
            } else {
                hit_hi = true;
                if hit_lo {
                    return true;
                }
            }
            if t >= tend {
                break;
            }
            t = self.next_vertical(t, tend);
        }
        if hit_lo {
            c.record(ystart, yend, self.direction().winding());
        }
        false
    }
}

/// Evaluates the `deriv`-th derivative of a power-basis polynomial
/// `coeff[0] + coeff[1] t + ...` at `t`.
fn poly_deriv(coeff: &[f64], t: f64, deriv: usize) -> f64 {
    if deriv >= coeff.len() {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in (deriv..coeff.len()).rev() {
        let mut k = 1.0;
        for j in 0..deriv {
            k *= (i - j) as f64;
        }
        acc = acc * t + k * coeff[i];
    }
    acc
}

/// The parameters in `(0, 1)`, ascending, at which a cubic's y
/// derivative vanishes.
pub(crate) fn cubic_horizontals(c: CubicBez) -> ArrayVec<f64, 2> {
    let c1 = 3.0 * (c.p1.y - c.p0.y);
    let c2 = 6.0 * (c.p2.y - 2.0 * c.p1.y + c.p0.y);
    let c3 = 3.0 * (c.p3.y - 3.0 * c.p2.y + 3.0 * c.p1.y - c.p0.y);
    let mut out: ArrayVec<f64, 2> = solve_quadratic(c1, c2, c3)
        .into_iter()
        .filter(|t| *t > 0.0 && *t < 1.0)
        .collect();
    out.sort_by(f64::total_cmp);
    out
}
