//! Conversion between [`kurbo::BezPath`] and y-monotonic curve lists.
//!
//! [`path_to_curves`] flattens a path into the sorted-piece form the
//! boolean operators consume: every subpath gets a contour-start
//! marker, every segment is split at its interior horizontal tangents,
//! and every subpath is closed. [`curves_to_path`] goes the other way,
//! re-traversing each piece in its stored direction.

use kurbo::{BezPath, CubicBez, ParamCurve as _, PathEl, PathSeg, Point, QuadBez};

use crate::curve::{cubic_horizontals, Curve, CurveDirection};
use crate::Error;

/// Converts a path to a curve list, closing every subpath implicitly.
///
/// Elements with a non-finite coordinate are dropped; the current point
/// stays where it was, so the surrounding segments still connect.
/// Returns [`Error::InvalidPath`] if a drawing element has no finite
/// move before it.
pub fn path_to_curves(path: &BezPath) -> Result<Vec<Curve>, Error> {
    let mut out = Vec::new();
    let mut mov: Option<Point> = None;
    let mut cur = Point::ZERO;
    for el in path.elements() {
        if !element_is_finite(el) {
            continue;
        }
        match *el {
            PathEl::MoveTo(p) => {
                if let Some(m) = mov {
                    append_line(&mut out, cur, m);
                }
                out.push(Curve::point(p.x, p.y));
                mov = Some(p);
                cur = p;
            }
            PathEl::LineTo(p) => {
                if mov.is_none() {
                    return Err(Error::InvalidPath);
                }
                append_line(&mut out, cur, p);
                cur = p;
            }
            PathEl::QuadTo(c, p) => {
                if mov.is_none() {
                    return Err(Error::InvalidPath);
                }
                append_monotonic_quad(&mut out, QuadBez::new(cur, c, p));
                cur = p;
            }
            PathEl::CurveTo(c0, c1, p) => {
                if mov.is_none() {
                    return Err(Error::InvalidPath);
                }
                append_monotonic_cubic(&mut out, CubicBez::new(cur, c0, c1, p));
                cur = p;
            }
            PathEl::ClosePath => {
                if let Some(m) = mov {
                    append_line(&mut out, cur, m);
                    cur = m;
                }
            }
        }
    }
    if let Some(m) = mov {
        append_line(&mut out, cur, m);
    }
    Ok(out)
}

pub(crate) fn element_is_finite(el: &PathEl) -> bool {
    let finite = |p: Point| p.x.is_finite() && p.y.is_finite();
    match *el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => finite(p),
        PathEl::QuadTo(c, p) => finite(c) && finite(p),
        PathEl::CurveTo(c0, c1, p) => finite(c0) && finite(c1) && finite(p),
        PathEl::ClosePath => true,
    }
}

fn append_line(out: &mut Vec<Curve>, p0: Point, p1: Point) {
    out.extend(Curve::line(p0, p1));
}

fn append_monotonic_quad(out: &mut Vec<Curve>, q: QuadBez) {
    // dy/dt vanishes at t = (y0 - cy) / (y0 - 2 cy + y1).
    let denom = q.p0.y - 2.0 * q.p1.y + q.p2.y;
    if denom != 0.0 {
        let t = (q.p0.y - q.p1.y) / denom;
        if t > 0.0 && t < 1.0 {
            let a = q.subsegment(0.0..t);
            let b = q.subsegment(t..1.0);
            out.extend(Curve::quad(a.p0, a.p1, a.p2));
            out.extend(Curve::quad(b.p0, b.p1, b.p2));
            return;
        }
    }
    out.extend(Curve::quad(q.p0, q.p1, q.p2));
}

fn append_monotonic_cubic(out: &mut Vec<Curve>, c: CubicBez) {
    let mut t0 = 0.0;
    for t in cubic_horizontals(c) {
        let piece = c.subsegment(t0..t);
        out.extend(Curve::cubic(piece.p0, piece.p1, piece.p2, piece.p3));
        t0 = t;
    }
    let piece = c.subsegment(t0..1.0);
    out.extend(Curve::cubic(piece.p0, piece.p1, piece.p2, piece.p3));
}

/// Splits one path segment into y-monotonic pieces.
pub(crate) fn monotonic_pieces(seg: PathSeg) -> Vec<Curve> {
    let mut out = Vec::new();
    match seg {
        PathSeg::Line(l) => append_line(&mut out, l.p0, l.p1),
        PathSeg::Quad(q) => append_monotonic_quad(&mut out, q),
        PathSeg::Cubic(c) => append_monotonic_cubic(&mut out, c),
    }
    out
}

/// Converts a curve list back to a path.
///
/// Each contour-start marker opens a new closed subpath. Pieces are
/// emitted in their stored traversal direction, with bridging lines
/// wherever consecutive pieces do not touch.
pub fn curves_to_path(curves: &[Curve]) -> BezPath {
    let mut path = BezPath::new();
    let mut cur: Option<Point> = None;
    for c in curves {
        let (start, rest) = traverse(c);
        match rest {
            None => {
                if cur.is_some() {
                    path.close_path();
                }
                path.move_to(start);
            }
            Some(el) => {
                match cur {
                    Some(p) if p != start => path.line_to(start),
                    None => path.move_to(start),
                    _ => {}
                }
                path.push(el);
            }
        }
        cur = Some(end_point(c));
    }
    if cur.is_some() {
        path.close_path();
    }
    path
}

/// The start point of a piece in its traversal direction, and the path
/// element that draws the rest of it. Markers have no element.
fn traverse(c: &Curve) -> (Point, Option<PathEl>) {
    match c {
        Curve::Point { x, y } => (Point::new(*x, *y), None),
        Curve::Line(l) => match l.direction {
            CurveDirection::Increasing => (
                Point::new(l.x0, l.y0),
                Some(PathEl::LineTo(Point::new(l.x1, l.y1))),
            ),
            CurveDirection::Decreasing => (
                Point::new(l.x1, l.y1),
                Some(PathEl::LineTo(Point::new(l.x0, l.y0))),
            ),
        },
        Curve::Quad(q) => match q.direction {
            CurveDirection::Increasing => (
                Point::new(q.x0, q.y0),
                Some(PathEl::QuadTo(
                    Point::new(q.cx, q.cy),
                    Point::new(q.x1, q.y1),
                )),
            ),
            CurveDirection::Decreasing => (
                Point::new(q.x1, q.y1),
                Some(PathEl::QuadTo(
                    Point::new(q.cx, q.cy),
                    Point::new(q.x0, q.y0),
                )),
            ),
        },
        Curve::Cubic(c) => match c.direction {
            CurveDirection::Increasing => (
                Point::new(c.x0, c.y0),
                Some(PathEl::CurveTo(
                    Point::new(c.cx0, c.cy0),
                    Point::new(c.cx1, c.cy1),
                    Point::new(c.x1, c.y1),
                )),
            ),
            CurveDirection::Decreasing => (
                Point::new(c.x1, c.y1),
                Some(PathEl::CurveTo(
                    Point::new(c.cx1, c.cy1),
                    Point::new(c.cx0, c.cy0),
                    Point::new(c.x0, c.y0),
                )),
            ),
        },
    }
}

fn end_point(c: &Curve) -> Point {
    match c {
        Curve::Point { x, y } => Point::new(*x, *y),
        Curve::Line(l) => match l.direction {
            CurveDirection::Increasing => Point::new(l.x1, l.y1),
            CurveDirection::Decreasing => Point::new(l.x0, l.y0),
        },
        Curve::Quad(q) => match q.direction {
            CurveDirection::Increasing => Point::new(q.x1, q.y1),
            CurveDirection::Decreasing => Point::new(q.x0, q.y0),
        },
        Curve::Cubic(c) => match c.direction {
            CurveDirection::Increasing => Point::new(c.x1, c.y1),
            CurveDirection::Decreasing => Point::new(c.x0, c.y0),
        },
    }
}
