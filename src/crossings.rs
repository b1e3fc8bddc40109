//! Point and rectangle queries against outlines.
//!
//! [`Crossings`] accumulates, for a fixed axis-aligned window, the y
//! intervals over which the left edge of the window sits inside an
//! outline. Accumulation either completes (and [`Crossings::covers`]
//! answers containment questions) or aborts early because some piece
//! passes through the window, which answers intersection questions by
//! itself.
//!
//! The module also provides direct ray casts against a raw
//! [`kurbo::BezPath`]: [`point_crossings_for_path`] and
//! [`rect_crossings_for_path`], which do not require resolving the path
//! first.

use kurbo::{BezPath, CubicBez, Line, ParamCurve as _, PathEl, Point, QuadBez, Rect};

use crate::curve::Curve;
use crate::path::monotonic_pieces;
use crate::{Error, FillRule};

/// One y interval along the window's left edge, with the winding count
/// accumulated over it.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CrossRange {
    lo: f64,
    hi: f64,
    count: i32,
}

/// Crossing intervals accumulated against one rectangular window.
#[derive(Clone, Debug)]
pub struct Crossings {
    rule: FillRule,
    xlo: f64,
    ylo: f64,
    xhi: f64,
    yhi: f64,
    /// Disjoint, ascending in y.
    ranges: Vec<CrossRange>,
}

impl Crossings {
    /// An empty accumulator for the window `[xlo, xhi] x [ylo, yhi]`,
    /// merging crossings under `rule`.
    pub fn new(rule: FillRule, xlo: f64, ylo: f64, xhi: f64, yhi: f64) -> Crossings {
        Crossings {
            rule,
            xlo,
            ylo,
            xhi,
            yhi,
            ranges: Vec::new(),
        }
    }

    pub(crate) fn xlo(&self) -> f64 {
        self.xlo
    }

    pub(crate) fn ylo(&self) -> f64 {
        self.ylo
    }

    pub(crate) fn xhi(&self) -> f64 {
        self.xhi
    }

    pub(crate) fn yhi(&self) -> f64 {
        self.yhi
    }

    /// Whether nothing crossed left of the window.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Whether the window's left edge is inside the outline for all of
    /// `[ystart, yend]`.
    pub fn covers(&self, ystart: f64, yend: f64) -> bool {
        match self.rule {
            FillRule::EvenOdd => {
                self.ranges.len() == 1 && self.ranges[0].lo <= ystart && self.ranges[0].hi >= yend
            }
            FillRule::NonZero => {
                // Walk the (disjoint, sorted) ranges, consuming the
                // query interval from the top.
                let mut ystart = ystart;
                for r in &self.ranges {
                    if ystart >= yend {
                        return true;
                    }
                    if ystart < r.lo {
                        return false;
                    }
                    if ystart >= r.hi {
                        continue;
                    }
                    ystart = r.hi;
                }
                ystart >= yend
            }
        }
    }

    /// Records a crossing of `[ystart, yend)` in `direction`.
    pub fn record(&mut self, ystart: f64, yend: f64, direction: i32) {
        if ystart >= yend {
            return;
        }
        match self.rule {
            FillRule::EvenOdd => self.record_even_odd(ystart, yend),
            FillRule::NonZero => self.record_non_zero(ystart, yend, direction),
        }
    }

    /// Even-odd accumulation is a symmetric difference of intervals.
    fn record_even_odd(&mut self, mut ystart: f64, mut yend: f64) {
        let old = std::mem::take(&mut self.ranges);
        let mut out = Vec::with_capacity(old.len() + 1);
        let mut it = old.into_iter().peekable();
        // Ranges entirely above the new one pass through untouched.
        while let Some(&r) = it.peek() {
            if ystart > r.hi {
                out.push(r);
                it.next();
            } else {
                break;
            }
        }
        while let Some(&r) = it.peek() {
            if ystart >= yend {
                break;
            }
            if yend < r.lo {
                // The pending interval sits wholly above this range;
                // emit it and carry the range as the new pending one.
                out.push(CrossRange {
                    lo: ystart,
                    hi: yend,
                    count: 0,
                });
                ystart = r.lo;
                yend = r.hi;
                it.next();
                continue;
            }
            it.next();
            // Overlap (or touch): sort the four endpoints; the outer
            // gaps survive, the shared middle cancels.
            let (yll, ylh) = if ystart < r.lo {
                (ystart, r.lo)
            } else {
                (r.lo, ystart)
            };
            let (yhl, yhh) = if yend < r.hi { (yend, r.hi) } else { (r.hi, yend) };
            if ylh == yhl {
                ystart = yll;
                yend = yhh;
            } else {
                let (ylh, yhl) = if ylh > yhl { (yhl, ylh) } else { (ylh, yhl) };
                if yll != ylh {
                    out.push(CrossRange {
                        lo: yll,
                        hi: ylh,
                        count: 0,
                    });
                }
                ystart = yhl;
                yend = yhh;
            }
        }
        out.extend(it);
        if ystart < yend {
            out.push(CrossRange {
                lo: ystart,
                hi: yend,
                count: 0,
            });
        }
        self.ranges = out;
    }

    /// Non-zero accumulation sums directed counts, merging abutting
    /// ranges with equal counts and dropping ranges that cancel to
    /// zero.
    fn record_non_zero(&mut self, mut ystart: f64, yend: f64, direction: i32) {
        // A range we only touch at its top gets skipped unless it can
        // absorb us; stopping on it would leave an empty overlap and
        // make no progress.
        let mut cur = 0;
        while cur < self.ranges.len() {
            let r = self.ranges[cur];
            if ystart > r.hi || (ystart == r.hi && r.count != direction) {
                cur += 1;
            } else {
                break;
            }
        }
        if cur >= self.ranges.len() {
            self.ranges.push(CrossRange {
                lo: ystart,
                hi: yend,
                count: direction,
            });
            return;
        }
        let mut r = self.ranges[cur];
        if r.hi == ystart && r.count == direction {
            // Absorb an abutting same-direction range below us.
            if cur + 1 == self.ranges.len() {
                self.ranges[cur].hi = yend;
                return;
            }
            self.ranges.remove(cur);
            ystart = r.lo;
            r = self.ranges[cur];
        }
        if yend < r.lo {
            self.ranges.insert(
                cur,
                CrossRange {
                    lo: ystart,
                    hi: yend,
                    count: direction,
                },
            );
            return;
        }
        if yend == r.lo && r.count == direction {
            self.ranges[cur].lo = ystart;
            return;
        }
        // Overlap. Split off the non-overlapping top part, combine the
        // overlap, and recurse on whatever extends below.
        if ystart < r.lo {
            self.ranges.insert(
                cur,
                CrossRange {
                    lo: ystart,
                    hi: r.lo,
                    count: direction,
                },
            );
            cur += 1;
            ystart = r.lo;
        } else if r.lo < ystart {
            self.ranges.insert(
                cur,
                CrossRange {
                    lo: r.lo,
                    hi: ystart,
                    count: r.count,
                },
            );
            cur += 1;
        }
        let newcount = r.count + direction;
        let newend = yend.min(r.hi);
        if newcount == 0 {
            self.ranges.remove(cur);
        } else {
            self.ranges[cur] = CrossRange {
                lo: ystart,
                hi: newend,
                count: newcount,
            };
            cur += 1;
        }
        if newend < r.hi {
            self.ranges.insert(
                cur,
                CrossRange {
                    lo: newend,
                    hi: r.hi,
                    count: r.count,
                },
            );
        }
        if newend < yend {
            self.record_non_zero(newend, yend, direction);
        }
    }

    /// Accumulates a line. Returns `true` if the line passes through
    /// the window.
    pub fn accumulate_line(&mut self, line: Line) -> bool {
        if line.p0.y <= line.p1.y {
            self.accumulate_line_d(line.p0, line.p1, 1)
        } else {
            self.accumulate_line_d(line.p1, line.p0, -1)
        }
    }

    fn accumulate_line_d(&mut self, p0: Point, p1: Point, direction: i32) -> bool {
        if self.yhi <= p0.y || self.ylo >= p1.y {
            return false;
        }
        if p0.x >= self.xhi && p1.x >= self.xhi {
            return false;
        }
        if p0.y == p1.y {
            return p0.x >= self.xlo || p1.x >= self.xlo;
        }
        // Clip to the window's y span.
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let (xstart, ystart) = if p0.y < self.ylo {
            (p0.x + (self.ylo - p0.y) * dx / dy, self.ylo)
        } else {
            (p0.x, p0.y)
        };
        let (xend, yend) = if self.yhi < p1.y {
            (p0.x + (self.yhi - p0.y) * dx / dy, self.yhi)
        } else {
            (p1.x, p1.y)
        };
        if xstart >= self.xhi && xend >= self.xhi {
            return false;
        }
        if xstart > self.xlo || xend > self.xlo {
            return true;
        }
        self.record(ystart, yend, direction);
        false
    }

    /// Accumulates a quadratic. Returns `true` if it passes through the
    /// window.
    pub fn accumulate_quad(&mut self, q: QuadBez) -> bool {
        if q.p0.y < self.ylo && q.p1.y < self.ylo && q.p2.y < self.ylo {
            return false;
        }
        if q.p0.y > self.yhi && q.p1.y > self.yhi && q.p2.y > self.yhi {
            return false;
        }
        if q.p0.x > self.xhi && q.p1.x > self.xhi && q.p2.x > self.xhi {
            return false;
        }
        if q.p0.x < self.xlo && q.p1.x < self.xlo && q.p2.x < self.xlo {
            // Wholly left of the window: only the endpoint y span
            // matters.
            if q.p0.y < q.p2.y {
                self.record(q.p0.y.max(self.ylo), q.p2.y.min(self.yhi), 1);
            } else if q.p0.y > q.p2.y {
                self.record(q.p2.y.max(self.ylo), q.p0.y.min(self.yhi), -1);
            }
            return false;
        }
        for piece in monotonic_pieces(kurbo::PathSeg::Quad(q)) {
            if piece.accumulate_crossings(self) {
                return true;
            }
        }
        false
    }

    /// Accumulates a cubic. Returns `true` if it passes through the
    /// window.
    pub fn accumulate_cubic(&mut self, c: CubicBez) -> bool {
        if c.p0.y < self.ylo && c.p1.y < self.ylo && c.p2.y < self.ylo && c.p3.y < self.ylo {
            return false;
        }
        if c.p0.y > self.yhi && c.p1.y > self.yhi && c.p2.y > self.yhi && c.p3.y > self.yhi {
            return false;
        }
        if c.p0.x > self.xhi && c.p1.x > self.xhi && c.p2.x > self.xhi && c.p3.x > self.xhi {
            return false;
        }
        if c.p0.x < self.xlo && c.p1.x < self.xlo && c.p2.x < self.xlo && c.p3.x < self.xlo {
            if c.p0.y < c.p3.y {
                self.record(c.p0.y.max(self.ylo), c.p3.y.min(self.yhi), 1);
            } else if c.p0.y > c.p3.y {
                self.record(c.p3.y.max(self.ylo), c.p0.y.min(self.yhi), -1);
            }
            return false;
        }
        for piece in monotonic_pieces(kurbo::PathSeg::Cubic(c)) {
            if piece.accumulate_crossings(self) {
                return true;
            }
        }
        false
    }
}

/// Accumulates every piece of a resolved curve list against the given
/// window. Returns `None` if some piece passes through the window (the
/// outline boundary intersects it); otherwise the completed
/// accumulator.
///
/// Resolved curve lists always have odd-parity interiors, so the
/// even-odd rule is used regardless of how the list was produced.
pub fn find_crossings(curves: &[Curve], xlo: f64, ylo: f64, xhi: f64, yhi: f64) -> Option<Crossings> {
    let mut cross = Crossings::new(FillRule::EvenOdd, xlo, ylo, xhi, yhi);
    for c in curves {
        if c.accumulate_crossings(&mut cross) {
            return None;
        }
    }
    Some(cross)
}

/// The result of casting a rectangle against a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RectCrossings {
    /// The path boundary does not touch the rectangle. Crossings are
    /// summed over leftward rays from both the rectangle's top and
    /// bottom edges, so each contour winding around it contributes two.
    Count(i32),
    /// The path boundary intersects the rectangle.
    Intersects,
}

// Internal sentinel for "the boundary got into the rectangle".
const RECT_INTERSECTS: i32 = i32::MIN;

/// Maximum subdivision depth for the curve ray casts. Each level halves
/// the parameter interval, so 52 levels exhaust the mantissa.
const CROSSING_LEVEL_LIMIT: usize = 52;

/// Counts the crossings of the leftward ray from `(px, py)` with the
/// path, closing every subpath implicitly. Odd means inside under the
/// even-odd rule; nonzero means inside under the non-zero rule.
///
/// Elements with a non-finite coordinate are dropped, as in
/// [`crate::path::path_to_curves`]. Returns [`Error::InvalidPath`] if a
/// drawing element has no finite move before it.
pub fn point_crossings_for_path(path: &BezPath, px: f64, py: f64) -> Result<i32, Error> {
    let mut crossings = 0;
    let mut mov: Option<Point> = None;
    let mut cur = Point::ZERO;
    for el in path.elements() {
        if !crate::path::element_is_finite(el) {
            continue;
        }
        match *el {
            PathEl::MoveTo(p) => {
                if let Some(m) = mov {
                    crossings += point_crossings_for_line(px, py, cur, m);
                }
                mov = Some(p);
                cur = p;
            }
            PathEl::LineTo(p) => {
                if mov.is_none() {
                    return Err(Error::InvalidPath);
                }
                crossings += point_crossings_for_line(px, py, cur, p);
                cur = p;
            }
            PathEl::QuadTo(c, p) => {
                if mov.is_none() {
                    return Err(Error::InvalidPath);
                }
                crossings += point_crossings_for_quad(px, py, cur, c, p, 0);
                cur = p;
            }
            PathEl::CurveTo(c0, c1, p) => {
                if mov.is_none() {
                    return Err(Error::InvalidPath);
                }
                crossings += point_crossings_for_cubic(px, py, cur, c0, c1, p, 0);
                cur = p;
            }
            PathEl::ClosePath => {
                if let Some(m) = mov {
                    crossings += point_crossings_for_line(px, py, cur, m);
                    cur = m;
                }
            }
        }
    }
    if let Some(m) = mov {
        if cur != m {
            crossings += point_crossings_for_line(px, py, cur, m);
        }
    }
    Ok(crossings)
}

fn point_crossings_for_line(px: f64, py: f64, p0: Point, p1: Point) -> i32 {
    if py < p0.y && py < p1.y {
        return 0;
    }
    if py >= p0.y && py >= p1.y {
        return 0;
    }
    // The y coordinates straddle py; see where the segment is in x.
    if px >= p0.x && px >= p1.x {
        return 0;
    }
    if px < p0.x && px < p1.x {
        return if p0.y < p1.y { 1 } else { -1 };
    }
    let xint = p0.x + (py - p0.y) * (p1.x - p0.x) / (p1.y - p0.y);
    if px >= xint {
        return 0;
    }
    if p0.y < p1.y {
        1
    } else {
        -1
    }
}

fn point_crossings_for_quad(px: f64, py: f64, p0: Point, c: Point, p1: Point, level: usize) -> i32 {
    if py < p0.y && py < c.y && py < p1.y {
        return 0;
    }
    if py >= p0.y && py >= c.y && py >= p1.y {
        return 0;
    }
    if px >= p0.x && px >= c.x && px >= p1.x {
        return 0;
    }
    if px < p0.x && px < c.x && px < p1.x {
        if py >= p0.y {
            if py < p1.y {
                return 1;
            }
        } else if py >= p1.y {
            return -1;
        }
        // py outside the endpoint span; the curve doubles back and the
        // crossings cancel.
        return 0;
    }
    if level > CROSSING_LEVEL_LIMIT {
        // Subdivision exhausted; treat the hull as a chord.
        return point_crossings_for_line(px, py, p0, p1);
    }
    let q = QuadBez::new(p0, c, p1);
    let (a, b) = q.subdivide();
    point_crossings_for_quad(px, py, a.p0, a.p1, a.p2, level + 1)
        + point_crossings_for_quad(px, py, b.p0, b.p1, b.p2, level + 1)
}

fn point_crossings_for_cubic(
    px: f64,
    py: f64,
    p0: Point,
    c0: Point,
    c1: Point,
    p1: Point,
    level: usize,
) -> i32 {
    if py < p0.y && py < c0.y && py < c1.y && py < p1.y {
        return 0;
    }
    if py >= p0.y && py >= c0.y && py >= c1.y && py >= p1.y {
        return 0;
    }
    if px >= p0.x && px >= c0.x && px >= c1.x && px >= p1.x {
        return 0;
    }
    if px < p0.x && px < c0.x && px < c1.x && px < p1.x {
        if py >= p0.y {
            if py < p1.y {
                return 1;
            }
        } else if py >= p1.y {
            return -1;
        }
        return 0;
    }
    if level > CROSSING_LEVEL_LIMIT {
        return point_crossings_for_line(px, py, p0, p1);
    }
    let c = CubicBez::new(p0, c0, c1, p1);
    let (a, b) = c.subdivide();
    point_crossings_for_cubic(px, py, a.p0, a.p1, a.p2, a.p3, level + 1)
        + point_crossings_for_cubic(px, py, b.p0, b.p1, b.p2, b.p3, level + 1)
}

/// Casts the rectangle `rect` against the path, closing every subpath
/// implicitly.
///
/// On [`RectCrossings::Count`], the count sums the directed boundary
/// crossings of leftward rays from the rectangle's top and bottom
/// edges, two per winding of an enclosing contour: nonzero means the
/// rectangle is wholly inside under the non-zero rule, zero means
/// wholly outside or inside a hole.
///
/// Elements with a non-finite coordinate are dropped, as in
/// [`crate::path::path_to_curves`]. Returns [`Error::InvalidPath`] if a
/// drawing element has no finite move before it.
pub fn rect_crossings_for_path(path: &BezPath, rect: Rect) -> Result<RectCrossings, Error> {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Ok(RectCrossings::Count(0));
    }
    let (rxmin, rymin, rxmax, rymax) = (rect.min_x(), rect.min_y(), rect.max_x(), rect.max_y());
    let mut crossings = 0i32;
    let mut mov: Option<Point> = None;
    let mut cur = Point::ZERO;
    for el in path.elements() {
        if crossings == RECT_INTERSECTS {
            break;
        }
        if !crate::path::element_is_finite(el) {
            continue;
        }
        match *el {
            PathEl::MoveTo(p) => {
                if let Some(m) = mov {
                    if cur != m {
                        crossings =
                            rect_crossings_for_line(crossings, rxmin, rymin, rxmax, rymax, cur, m);
                    }
                }
                mov = Some(p);
                cur = p;
            }
            PathEl::LineTo(p) => {
                if mov.is_none() {
                    return Err(Error::InvalidPath);
                }
                crossings = rect_crossings_for_line(crossings, rxmin, rymin, rxmax, rymax, cur, p);
                cur = p;
            }
            PathEl::QuadTo(c, p) => {
                if mov.is_none() {
                    return Err(Error::InvalidPath);
                }
                crossings =
                    rect_crossings_for_quad(crossings, rxmin, rymin, rxmax, rymax, cur, c, p, 0);
                cur = p;
            }
            PathEl::CurveTo(c0, c1, p) => {
                if mov.is_none() {
                    return Err(Error::InvalidPath);
                }
                crossings = rect_crossings_for_cubic(
                    crossings, rxmin, rymin, rxmax, rymax, cur, c0, c1, p, 0,
                );
                cur = p;
            }
            PathEl::ClosePath => {
                if let Some(m) = mov {
                    if cur != m {
                        crossings =
                            rect_crossings_for_line(crossings, rxmin, rymin, rxmax, rymax, cur, m);
                    }
                    cur = m;
                }
            }
        }
    }
    if crossings != RECT_INTERSECTS {
        if let Some(m) = mov {
            if cur != m {
                crossings = rect_crossings_for_line(crossings, rxmin, rymin, rxmax, rymax, cur, m);
            }
        }
    }
    Ok(if crossings == RECT_INTERSECTS {
        RectCrossings::Intersects
    } else {
        RectCrossings::Count(crossings)
    })
}

#[allow(clippy::too_many_arguments)]
fn rect_crossings_for_line(
    crossings: i32,
    rxmin: f64,
    rymin: f64,
    rxmax: f64,
    rymax: f64,
    p0: Point,
    p1: Point,
) -> i32 {
    if p0.y >= rymax && p1.y >= rymax {
        return crossings;
    }
    if p0.y <= rymin && p1.y <= rymin {
        return crossings;
    }
    if p0.x <= rxmin && p1.x <= rxmin {
        return crossings;
    }
    if p0.x >= rxmax && p1.x >= rxmax {
        // The line is entirely to the right of the rectangle in x:
        // count its crossings of the full [rymin, rymax] shadow.
        let mut crossings = crossings;
        if p0.y < p1.y {
            if p0.y <= rymin {
                crossings += 1;
            }
            if p1.y >= rymax {
                crossings += 1;
            }
        } else {
            if p1.y <= rymin {
                crossings -= 1;
            }
            if p0.y >= rymax {
                crossings -= 1;
            }
        }
        return crossings;
    }
    // Straddling in both axes; find where the segment crosses the
    // rectangle's y span.
    if (p0.x > rxmin && p0.x < rxmax && p0.y > rymin && p0.y < rymax)
        || (p1.x > rxmin && p1.x < rxmax && p1.y > rymin && p1.y < rymax)
    {
        return RECT_INTERSECTS;
    }
    let dx = p1.x - p0.x;
    let dy = p1.y - p0.y;
    let clip_x = |pt: Point| {
        if pt.y < rymin {
            p0.x + (rymin - p0.y) * dx / dy
        } else if pt.y > rymax {
            p0.x + (rymax - p0.y) * dx / dy
        } else {
            pt.x
        }
    };
    let xc0 = clip_x(p0);
    let xc1 = clip_x(p1);
    if xc0 <= rxmin && xc1 <= rxmin {
        return crossings;
    }
    if xc0 >= rxmax && xc1 >= rxmax {
        let mut crossings = crossings;
        if p0.y < p1.y {
            if p0.y <= rymin {
                crossings += 1;
            }
            if p1.y >= rymax {
                crossings += 1;
            }
        } else {
            if p1.y <= rymin {
                crossings -= 1;
            }
            if p0.y >= rymax {
                crossings -= 1;
            }
        }
        return crossings;
    }
    RECT_INTERSECTS
}

#[allow(clippy::too_many_arguments)]
fn rect_crossings_for_quad(
    crossings: i32,
    rxmin: f64,
    rymin: f64,
    rxmax: f64,
    rymax: f64,
    p0: Point,
    c: Point,
    p1: Point,
    level: usize,
) -> i32 {
    if p0.y >= rymax && c.y >= rymax && p1.y >= rymax {
        return crossings;
    }
    if p0.y <= rymin && c.y <= rymin && p1.y <= rymin {
        return crossings;
    }
    if p0.x <= rxmin && c.x <= rxmin && p1.x <= rxmin {
        return crossings;
    }
    if p0.x >= rxmax && c.x >= rxmax && p1.x >= rxmax {
        // Entirely right of the rectangle: the endpoints decide the
        // crossings of the y shadow, like a line would.
        let mut crossings = crossings;
        if p0.y < p1.y {
            if p0.y <= rymin {
                crossings += 1;
            }
            if p1.y >= rymax {
                crossings += 1;
            }
        } else if p1.y < p0.y {
            if p1.y <= rymin {
                crossings -= 1;
            }
            if p0.y >= rymax {
                crossings -= 1;
            }
        }
        return crossings;
    }
    if (p0.x > rxmin && p0.x < rxmax && p0.y > rymin && p0.y < rymax)
        || (p1.x > rxmin && p1.x < rxmax && p1.y > rymin && p1.y < rymax)
    {
        return RECT_INTERSECTS;
    }
    if level > CROSSING_LEVEL_LIMIT {
        return rect_crossings_for_line(crossings, rxmin, rymin, rxmax, rymax, p0, p1);
    }
    let q = QuadBez::new(p0, c, p1);
    let (a, b) = q.subdivide();
    let crossings =
        rect_crossings_for_quad(crossings, rxmin, rymin, rxmax, rymax, a.p0, a.p1, a.p2, level + 1);
    if crossings == RECT_INTERSECTS {
        return crossings;
    }
    rect_crossings_for_quad(crossings, rxmin, rymin, rxmax, rymax, b.p0, b.p1, b.p2, level + 1)
}

#[allow(clippy::too_many_arguments)]
fn rect_crossings_for_cubic(
    crossings: i32,
    rxmin: f64,
    rymin: f64,
    rxmax: f64,
    rymax: f64,
    p0: Point,
    c0: Point,
    c1: Point,
    p1: Point,
    level: usize,
) -> i32 {
    if p0.y >= rymax && c0.y >= rymax && c1.y >= rymax && p1.y >= rymax {
        return crossings;
    }
    if p0.y <= rymin && c0.y <= rymin && c1.y <= rymin && p1.y <= rymin {
        return crossings;
    }
    if p0.x <= rxmin && c0.x <= rxmin && c1.x <= rxmin && p1.x <= rxmin {
        return crossings;
    }
    if p0.x >= rxmax && c0.x >= rxmax && c1.x >= rxmax && p1.x >= rxmax {
        let mut crossings = crossings;
        if p0.y < p1.y {
            if p0.y <= rymin {
                crossings += 1;
            }
            if p1.y >= rymax {
                crossings += 1;
            }
        } else if p1.y < p0.y {
            if p1.y <= rymin {
                crossings -= 1;
            }
            if p0.y >= rymax {
                crossings -= 1;
            }
        }
        return crossings;
    }
    if (p0.x > rxmin && p0.x < rxmax && p0.y > rymin && p0.y < rymax)
        || (p1.x > rxmin && p1.x < rxmax && p1.y > rymin && p1.y < rymax)
    {
        return RECT_INTERSECTS;
    }
    if level > CROSSING_LEVEL_LIMIT {
        return rect_crossings_for_line(crossings, rxmin, rymin, rxmax, rymax, p0, p1);
    }
    let c = CubicBez::new(p0, c0, c1, p1);
    let (a, b) = c.subdivide();
    let crossings = rect_crossings_for_cubic(
        crossings, rxmin, rymin, rxmax, rymax, a.p0, a.p1, a.p2, a.p3, level + 1,
    );
    if crossings == RECT_INTERSECTS {
        return crossings;
    }
    rect_crossings_for_cubic(
        crossings, rxmin, rymin, rxmax, rymax, b.p0, b.p1, b.p2, b.p3, level + 1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn square(x0: f64, y0: f64, size: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((x0, y0));
        path.line_to((x0 + size, y0));
        path.line_to((x0 + size, y0 + size));
        path.line_to((x0, y0 + size));
        path.close_path();
        path
    }

    #[test]
    fn even_odd_ranges_xor() {
        let mut c = Crossings::new(FillRule::EvenOdd, 0.0, 0.0, 1.0, 1.0);
        c.record(0.0, 1.0, 1);
        c.record(0.25, 0.75, 1);
        // [0, 0.25) xor'd with (0.75, 1]: not a single covering range.
        assert!(!c.covers(0.0, 1.0));
        assert!(!c.is_empty());
        c.record(0.25, 0.75, 1);
        assert!(c.covers(0.0, 1.0));
    }

    #[test]
    fn even_odd_adjacent_ranges_coalesce() {
        let mut c = Crossings::new(FillRule::EvenOdd, 0.0, 0.0, 1.0, 1.0);
        c.record(0.0, 0.5, 1);
        c.record(0.5, 1.0, 1);
        assert!(c.covers(0.0, 1.0));
    }

    #[test]
    fn non_zero_cancellation() {
        let mut c = Crossings::new(FillRule::NonZero, 0.0, 0.0, 1.0, 1.0);
        c.record(0.0, 1.0, 1);
        assert!(c.covers(0.0, 1.0));
        c.record(0.25, 0.75, -1);
        assert!(!c.covers(0.0, 1.0));
        assert!(c.covers(0.0, 0.25));
        assert!(c.covers(0.75, 1.0));
        // Put it back.
        c.record(0.25, 0.75, 1);
        assert!(c.covers(0.0, 1.0));
    }

    #[test]
    fn non_zero_double_cover() {
        let mut c = Crossings::new(FillRule::NonZero, 0.0, 0.0, 1.0, 1.0);
        c.record(0.0, 1.0, 1);
        c.record(0.25, 0.75, 1);
        // Counts 1/2/1; still covered everywhere.
        assert!(c.covers(0.0, 1.0));
        c.record(0.0, 1.0, -1);
        assert!(!c.covers(0.0, 1.0));
        assert!(c.covers(0.25, 0.75));
    }

    #[test]
    fn accumulate_line_through_window() {
        let mut c = Crossings::new(FillRule::EvenOdd, 0.0, 0.0, 1.0, 1.0);
        assert!(c.accumulate_line(Line::new(p(0.5, -1.0), p(0.5, 2.0))));
        // Fully left: recorded, not intersecting.
        let mut c = Crossings::new(FillRule::EvenOdd, 0.0, 0.0, 1.0, 1.0);
        assert!(!c.accumulate_line(Line::new(p(-1.0, -1.0), p(-1.0, 2.0))));
        assert!(c.covers(0.0, 1.0));
        // Fully right: nothing recorded.
        let mut c = Crossings::new(FillRule::EvenOdd, 0.0, 0.0, 1.0, 1.0);
        assert!(!c.accumulate_line(Line::new(p(2.0, -1.0), p(2.0, 2.0))));
        assert!(c.is_empty());
    }

    #[test]
    fn point_crossings_square() {
        let path = square(0.0, 0.0, 1.0);
        assert_eq!(point_crossings_for_path(&path, 0.5, 0.5).unwrap(), 1);
        assert_eq!(point_crossings_for_path(&path, 1.5, 0.5).unwrap(), 0);
        assert_eq!(point_crossings_for_path(&path, 0.5, -0.5).unwrap(), 0);
    }

    #[test]
    fn point_crossings_direction() {
        // Counter-clockwise square: winding -1.
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((0.0, 1.0));
        path.line_to((1.0, 1.0));
        path.line_to((1.0, 0.0));
        path.close_path();
        assert_eq!(point_crossings_for_path(&path, 0.5, 0.5).unwrap(), -1);
    }

    #[test]
    fn point_crossings_open_subpath_closes() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((1.0, 0.0));
        path.line_to((1.0, 1.0));
        path.line_to((0.0, 1.0));
        // No close_path; the implicit closure still bounds the square.
        assert_eq!(point_crossings_for_path(&path, 0.5, 0.5).unwrap(), 1);
    }

    #[test]
    fn point_crossings_quad_blob() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.quad_to((2.0, 1.0), (0.0, 2.0));
        path.close_path();
        assert_eq!(point_crossings_for_path(&path, 0.5, 1.0).unwrap(), 1);
        assert_eq!(point_crossings_for_path(&path, 1.5, 1.0).unwrap(), 0);
        assert_eq!(point_crossings_for_path(&path, -0.5, 1.0).unwrap(), 0);
    }

    #[test]
    fn invalid_path_rejected() {
        // The only move is non-finite and gets dropped, leaving the
        // line with no subpath to belong to.
        let mut path = BezPath::new();
        path.move_to((f64::NAN, 0.0));
        path.line_to((1.0, 1.0));
        assert_matches!(point_crossings_for_path(&path, 0.0, 0.0), Err(Error::InvalidPath));
        assert_matches!(
            rect_crossings_for_path(&path, Rect::new(0.0, 0.0, 1.0, 1.0)),
            Err(Error::InvalidPath)
        );
    }

    #[test]
    fn rect_crossings_containment() {
        let path = square(0.0, 0.0, 4.0);
        // The enclosing square crosses both of the rectangle's rays
        // once each.
        let inside = rect_crossings_for_path(&path, Rect::new(1.0, 1.0, 2.0, 2.0)).unwrap();
        assert_eq!(inside, RectCrossings::Count(2));
        let outside = rect_crossings_for_path(&path, Rect::new(5.0, 5.0, 6.0, 6.0)).unwrap();
        assert_eq!(outside, RectCrossings::Count(0));
        let straddling = rect_crossings_for_path(&path, Rect::new(3.0, 3.0, 5.0, 5.0)).unwrap();
        assert_eq!(straddling, RectCrossings::Intersects);
    }

    #[test]
    fn rect_crossings_cubic_boundary() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.curve_to((4.0, 0.0), (4.0, 4.0), (0.0, 4.0));
        path.close_path();
        let inside = rect_crossings_for_path(&path, Rect::new(0.5, 1.5, 1.5, 2.5)).unwrap();
        assert_eq!(inside, RectCrossings::Count(2));
        let poked = rect_crossings_for_path(&path, Rect::new(2.0, 1.5, 4.0, 2.5)).unwrap();
        assert_eq!(poked, RectCrossings::Intersects);
    }

    #[test]
    fn find_crossings_on_resolved_list() {
        let curves = vec![
            Curve::point(0.0, 0.0),
            Curve::line(p(0.0, 0.0), p(0.0, 2.0)).unwrap(),
            Curve::line(p(2.0, 2.0), p(2.0, 0.0)).unwrap(),
        ];
        // Window inside the column.
        let c = find_crossings(&curves, 0.5, 0.5, 1.5, 1.5).unwrap();
        assert!(c.covers(0.5, 1.5));
        // Window crossing the left boundary.
        assert!(find_crossings(&curves, -0.5, 0.5, 0.5, 1.5).is_none());
        // Window wholly right.
        let c = find_crossings(&curves, 3.0, 0.5, 4.0, 1.5).unwrap();
        assert!(c.is_empty());
    }
}
