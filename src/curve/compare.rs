//! Left/right ordering of two y-monotonic pieces over a shared band.
//!
//! [`Curve::compare_to`] answers "which piece is on the left over
//! `yrange`?", shrinking `yrange[1]` when the honest answer is "it
//! changes partway down". A band that survives comparison against every
//! pair of active pieces therefore has a single consistent left-to-right
//! order, which is what the sweep needs to classify it.

use std::cmp::Ordering;

use super::{Curve, TMIN};

/// Relative tolerance under which two x coordinates are treated as the
/// same horizontal position.
fn fairly_close(v1: f64, v2: f64) -> bool {
    (v1 - v2).abs() < v1.abs().max(v2.abs()) * 1e-10
}

/// Total order on plain floats. The sweep never produces NaN here; if
/// it did, the error would already have happened upstream.
pub(crate) fn order_of(x1: f64, x2: f64) -> Ordering {
    if x1 < x2 {
        Ordering::Less
    } else if x1 > x2 {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

impl Curve {
    /// Orders `self` against `that` over `yrange = [y0, y1)`.
    ///
    /// On return `yrange[1]` may have shrunk: the returned ordering is
    /// then only claimed over the shrunken band, and the bands below it
    /// get re-examined on a later sweep iteration. Returns `Equal` when
    /// the two pieces are indistinguishable (within a relative 1e-10)
    /// over the whole returned band.
    ///
    /// Panics if the band is empty after clipping to both pieces, since
    /// that means the caller tried to sweep backwards.
    pub fn compare_to(&self, that: &Curve, yrange: &mut [f64; 2]) -> Ordering {
        let y0 = yrange[0];
        let mut y1 = yrange[1];
        y1 = y1.min(self.ybot()).min(that.ybot());
        if y1 <= y0 {
            panic!("backstepping from y = {y0} to y = {y1}");
        }
        yrange[1] = y1;
        if self.xmax() <= that.xmin() {
            return if self.xmin() == that.xmax() {
                Ordering::Equal
            } else {
                Ordering::Less
            };
        }
        if self.xmin() >= that.xmax() {
            return Ordering::Greater;
        }

        let mut s0 = self.t_for_y(y0);
        let mut ys0 = self.y_for_t(s0);
        if ys0 < y0 {
            s0 = self.refine_t_for_y(s0, y0);
            ys0 = self.y_for_t(s0);
        }
        let mut s1 = self.t_for_y(y1);
        if self.y_for_t(s1) < y0 {
            s1 = self.refine_t_for_y(s1, y0);
        }
        let mut t0 = that.t_for_y(y0);
        let mut yt0 = that.y_for_t(t0);
        if yt0 < y0 {
            t0 = that.refine_t_for_y(t0, y0);
            yt0 = that.y_for_t(t0);
        }
        let mut t1 = that.t_for_y(y1);
        if that.y_for_t(t1) < y0 {
            t1 = that.refine_t_for_y(t1, y0);
        }

        let mut xs0 = self.x_for_t(s0);
        let mut xt0 = that.x_for_t(t0);
        let scale = y0.abs().max(y1.abs());
        let ymin = (scale * 1e-14).max(1e-300);
        if fairly_close(xs0, xt0) {
            // The pieces start out coincident. Walk down with a doubling
            // step to find how far the coincidence extends, then refine
            // the boundary with a halving search.
            let mut bump = ymin;
            let maxbump = (ymin * 1e13).min((y1 - y0) * 0.1);
            let mut y = y0 + bump;
            while y <= y1 {
                if fairly_close(self.x_for_y(y), that.x_for_y(y)) {
                    bump *= 2.0;
                    if bump > maxbump {
                        bump = maxbump;
                    }
                } else {
                    y -= bump;
                    loop {
                        bump /= 2.0;
                        let newy = y + bump;
                        if newy <= y {
                            break;
                        }
                        if fairly_close(self.x_for_y(newy), that.x_for_y(newy)) {
                            y = newy;
                        }
                    }
                    break;
                }
                y += bump;
            }
            if y > y0 {
                if y < y1 {
                    yrange[1] = y;
                }
                return Ordering::Equal;
            }
        }

        // Walk matching x-monotonic spans of the two pieces, shrinking
        // the band at the first intersection found.
        while s0 < s1 && t0 < t1 {
            let sh = self.next_vertical(s0, s1);
            let xsh = self.x_for_t(sh);
            let ysh = self.y_for_t(sh);
            let th = that.next_vertical(t0, t1);
            let xth = that.x_for_t(th);
            let yth = that.y_for_t(th);
            if find_intersect(
                self, that, yrange, s0, xs0, ys0, sh, xsh, ysh, t0, xt0, yt0, th, xth, yth,
            ) {
                break;
            }
            if ysh < yth {
                if ysh > yrange[0] {
                    if ysh < yrange[1] {
                        yrange[1] = ysh;
                    }
                    break;
                }
                s0 = sh;
                xs0 = xsh;
                ys0 = ysh;
            } else {
                if yth > yrange[0] {
                    if yth < yrange[1] {
                        yrange[1] = yth;
                    }
                    break;
                }
                t0 = th;
                xt0 = xth;
                yt0 = yth;
            }
        }

        let ymid = (yrange[0] + yrange[1]) / 2.0;
        order_of(self.x_for_y(ymid), that.x_for_y(ymid))
    }
}

/// Searches for an intersection of `this` over `[s0, s1]` with `that`
/// over `[t0, t1]` by recursive bisection, stopping once both
/// parametric spans are below [`TMIN`] and intersecting the two chords
/// instead. On a hit strictly inside the band, shrinks `yrange[1]` to
/// the intersection height and returns `true`.
#[allow(clippy::too_many_arguments)]
fn find_intersect(
    this: &Curve,
    that: &Curve,
    yrange: &mut [f64; 2],
    s0: f64,
    xs0: f64,
    ys0: f64,
    s1: f64,
    xs1: f64,
    ys1: f64,
    t0: f64,
    xt0: f64,
    yt0: f64,
    t1: f64,
    xt1: f64,
    yt1: f64,
) -> bool {
    if ys0 > yt1 || yt0 > ys1 {
        return false;
    }
    if xs0.min(xs1) > xt0.max(xt1) || xs0.max(xs1) < xt0.min(xt1) {
        return false;
    }
    if s1 - s0 > TMIN {
        let s = (s0 + s1) / 2.0;
        let xs = this.x_for_t(s);
        let ys = this.y_for_t(s);
        if s == s0 || s == s1 {
            panic!("no parametric progress splitting the first piece");
        }
        if t1 - t0 > TMIN {
            let t = (t0 + t1) / 2.0;
            let xt = that.x_for_t(t);
            let yt = that.y_for_t(t);
            if t == t0 || t == t1 {
                panic!("no parametric progress splitting the second piece");
            }
            if ys >= yt0
                && yt >= ys0
                && find_intersect(
                    this, that, yrange, s0, xs0, ys0, s, xs, ys, t0, xt0, yt0, t, xt, yt,
                )
            {
                return true;
            }
            if ys >= yt
                && find_intersect(
                    this, that, yrange, s0, xs0, ys0, s, xs, ys, t, xt, yt, t1, xt1, yt1,
                )
            {
                return true;
            }
            if yt >= ys
                && find_intersect(
                    this, that, yrange, s, xs, ys, s1, xs1, ys1, t0, xt0, yt0, t, xt, yt,
                )
            {
                return true;
            }
            if ys1 >= yt
                && yt1 >= ys
                && find_intersect(
                    this, that, yrange, s, xs, ys, s1, xs1, ys1, t, xt, yt, t1, xt1, yt1,
                )
            {
                return true;
            }
        } else {
            if ys >= yt0
                && find_intersect(
                    this, that, yrange, s0, xs0, ys0, s, xs, ys, t0, xt0, yt0, t1, xt1, yt1,
                )
            {
                return true;
            }
            if yt1 >= ys
                && find_intersect(
                    this, that, yrange, s, xs, ys, s1, xs1, ys1, t0, xt0, yt0, t1, xt1, yt1,
                )
            {
                return true;
            }
        }
    } else if t1 - t0 > TMIN {
        let t = (t0 + t1) / 2.0;
        let xt = that.x_for_t(t);
        let yt = that.y_for_t(t);
        if t == t0 || t == t1 {
            panic!("no parametric progress splitting the second piece");
        }
        if yt >= ys0
            && find_intersect(
                this, that, yrange, s0, xs0, ys0, s1, xs1, ys1, t0, xt0, yt0, t, xt, yt,
            )
        {
            return true;
        }
        if ys1 >= yt
            && find_intersect(
                this, that, yrange, s0, xs0, ys0, s1, xs1, ys1, t, xt, yt, t1, xt1, yt1,
            )
        {
            return true;
        }
    } else {
        // Both spans are tiny; intersect the chords.
        let xlk = xs1 - xs0;
        let ylk = ys1 - ys0;
        let xnm = xt1 - xt0;
        let ynm = yt1 - yt0;
        let xmk = xt0 - xs0;
        let ymk = yt0 - ys0;
        let det = xnm * ylk - ynm * xlk;
        if det != 0.0 {
            let detinv = 1.0 / det;
            let s = (xnm * ymk - ynm * xmk) * detinv;
            let t = (xlk * ymk - ylk * xmk) * detinv;
            if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
                let s = s0 + s * (s1 - s0);
                let t = t0 + t * (t1 - t0);
                let y = (this.y_for_t(s) + that.y_for_t(t)) / 2.0;
                if y <= yrange[1] && y > yrange[0] {
                    yrange[1] = y;
                    return true;
                }
            }
        }
    }
    false
}
