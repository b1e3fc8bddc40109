//! The plane sweep: slicing edges into consistent horizontal bands.
//!
//! The sweep walks the edge list top to bottom. For each band it drops
//! expired edges, absorbs edges starting at the band top, orders the
//! active edges left to right (shrinking the band whenever two edges
//! cross or coincide partway down), classifies them against the
//! operator state, and hands the kept fragments to the stitcher.

use std::cmp::Ordering;

use crate::curve::{order_of, Curve};
use crate::edge::Edge;
use crate::op::{EdgeTag, OpState, RegionState};
use crate::stitch::{CurveLink, Stitcher};

/// Runs the sweep over `edges` under the classifier `op`, returning the
/// resolved curve list.
pub(crate) fn prune_edges(mut edges: Vec<Edge>, op: &mut OpState) -> Vec<Curve> {
    let numedges = edges.len();
    if numedges < 2 {
        return Vec::new();
    }
    // Stable, so edges sharing a top point keep their insertion order.
    edges.sort_by(|a, b| {
        order_of(a.curve().ytop(), b.curve().ytop())
            .then_with(|| order_of(a.curve().xtop(), b.curve().xtop()))
    });

    // edges[left..right] are the active edges of the current band.
    let mut left = 0usize;
    let mut right = 0usize;
    let mut yrange = [0.0f64; 2];
    let mut stitcher = Stitcher::new();

    while left < numedges {
        let mut y = yrange[0];
        // Drop edges that ended at or above y, compacting the
        // live ones toward the inactive prefix boundary.
        {
            let mut next = right as isize - 1;
            let mut cur = next;
            while cur >= left as isize {
                if edges[cur as usize].curve().ybot() > y {
                    if next > cur {
                        edges.swap(next as usize, cur as usize);
                    }
                    next -= 1;
                }
                cur -= 1;
            }
            left = (next + 1) as usize;
        }
        if left >= right {
            // Nothing active; jump to the next edge start. A gap in y
            // means every open contour must have closed.
            if right >= numedges {
                break;
            }
            y = edges[right].curve().ytop();
            if y > yrange[0] {
                stitcher.finalize_sub_curves();
            }
            yrange[0] = y;
        }
        while right < numedges {
            if edges[right].curve().ytop() > y {
                break;
            }
            right += 1;
        }
        yrange[1] = edges[left].curve().ybot();
        if right < numedges {
            let ynext = edges[right].curve().ytop();
            if yrange[1] > ynext {
                yrange[1] = ynext;
            }
        }

        // Insertion sort by x over the band. Every comparison may
        // shrink yrange[1]; coincident runs get a shared equivalence
        // id.
        let mut next_eq = 1usize;
        for cur in left..right {
            edges[cur].set_equivalence(0);
            let mut dst = cur;
            while dst > left {
                let ordering = {
                    let (lo, hi) = edges.split_at_mut(cur);
                    hi[0].compare_to(&lo[dst - 1], &mut yrange)
                };
                assert!(
                    yrange[1] > yrange[0],
                    "backstepping from y = {} to y = {}",
                    yrange[0],
                    yrange[1],
                );
                if ordering != Ordering::Less {
                    if ordering == Ordering::Equal {
                        let eq = if edges[dst - 1].equivalence() == 0 {
                            let eq = next_eq;
                            next_eq += 1;
                            edges[dst - 1].set_equivalence(eq);
                            eq
                        } else {
                            edges[dst - 1].equivalence()
                        };
                        edges[cur].set_equivalence(eq);
                    }
                    break;
                }
                dst -= 1;
            }
            edges[dst..=cur].rotate_right(1);
        }

        // Classify the band left to right.
        op.new_row();
        let ystart = yrange[0];
        let yend = yrange[1];
        let mut fragments: Vec<CurveLink> = Vec::new();
        let mut cur = left;
        while cur < right {
            let eq = edges[cur].equivalence();
            if eq != 0 {
                // A run of coincident edges. Classify every member (the
                // winding state must see them all), but emit at most
                // one fragment for the run, preferring an edge that was
                // already carrying the needed tag in the previous band,
                // and otherwise the one reaching furthest down.
                let orig_state = op.state();
                let want = if orig_state == RegionState::Inside {
                    EdgeTag::Exit
                } else {
                    EdgeTag::Enter
                };
                let mut active_match = None;
                let mut longest = cur;
                let mut furthest_y = yend;
                loop {
                    op.classify(&edges[cur]);
                    if active_match.is_none() && edges[cur].is_active_for(ystart, want) {
                        active_match = Some(cur);
                    }
                    let ybot = edges[cur].curve().ybot();
                    if ybot > furthest_y {
                        longest = cur;
                        furthest_y = ybot;
                    }
                    cur += 1;
                    if cur >= right || edges[cur].equivalence() != eq {
                        break;
                    }
                }
                if op.state() != orig_state {
                    let pick = active_match.unwrap_or(longest);
                    edges[pick].record(yend, want);
                    fragments.push(CurveLink::new(
                        edges[pick].curve().clone(),
                        edges[pick].id(),
                        ystart,
                        yend,
                        want,
                    ));
                }
            } else {
                let etag = op.classify(&edges[cur]);
                if etag != EdgeTag::Ignore {
                    edges[cur].record(yend, etag);
                    fragments.push(CurveLink::new(
                        edges[cur].curve().clone(),
                        edges[cur].id(),
                        ystart,
                        yend,
                        etag,
                    ));
                }
                cur += 1;
            }
        }

        if op.state() != RegionState::Outside {
            eprintln!(
                "curveops: still inside at the right of band [{ystart}, {yend}] \
                 with {} active edges and {} fragments",
                right - left,
                fragments.len(),
            );
            debug_assert!(false, "winding state open at the right of a band");
        }
        if !fragments.is_empty() {
            stitcher.resolve_links(fragments);
        }
        yrange[0] = yend;
    }
    stitcher.finalize_sub_curves();
    stitcher.into_curves()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveDirection;
    use crate::edge::EdgeId;
    use crate::op::{AreaOp, Operand};
    use kurbo::Point;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn edges_of(curves: Vec<Curve>) -> Vec<Edge> {
        curves
            .into_iter()
            .enumerate()
            .map(|(i, c)| Edge::new(c, Operand::Left, EdgeId(i)))
            .collect()
    }

    /// Both sides of a parallelogram with verticals at `x` and `x + 1`,
    /// traversed clockwise.
    fn slab(x: f64, y0: f64, y1: f64) -> Vec<Curve> {
        vec![
            Curve::line(p(x, y0), p(x + 1.0, y1)).unwrap().reversed(),
            Curve::line(p(x + 1.0, y0), p(x + 2.0, y1)).unwrap(),
        ]
    }

    #[test]
    fn fewer_than_two_edges_is_empty() {
        let mut st = AreaOp::NonZeroWinding.state();
        assert!(prune_edges(Vec::new(), &mut st).is_empty());
        let one = edges_of(vec![Curve::line(p(0.0, 0.0), p(0.0, 1.0)).unwrap()]);
        let mut st = AreaOp::NonZeroWinding.state();
        assert!(prune_edges(one, &mut st).is_empty());
    }

    #[test]
    fn single_square_survives() {
        let curves = vec![
            Curve::line(p(0.0, 1.0), p(0.0, 0.0)).unwrap(),
            Curve::line(p(1.0, 0.0), p(1.0, 1.0)).unwrap(),
        ];
        let mut st = AreaOp::NonZeroWinding.state();
        let out = prune_edges(edges_of(curves), &mut st);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], Curve::point(0.0, 0.0));
        assert_eq!(out[1].direction(), CurveDirection::Increasing);
        assert_eq!(out[1].xtop(), 0.0);
        assert_eq!(out[2].direction(), CurveDirection::Decreasing);
    }

    #[test]
    fn overlapping_slabs_merge() {
        // Two clockwise slabs overlapping halfway; under non-zero
        // winding the two interior edges disappear.
        let mut curves = slab(0.0, 0.0, 1.0);
        curves.extend(slab(0.5, 0.0, 1.0));
        let mut st = AreaOp::NonZeroWinding.state();
        let out = prune_edges(edges_of(curves), &mut st);
        let markers = out.iter().filter(|c| c.order() == 0).count();
        assert_eq!(markers, 1);
        for c in &out {
            if c.order() > 0 {
                assert!(c.xtop() == 0.0 || c.xtop() == 1.5);
            }
        }
    }

    #[test]
    fn even_odd_overlap_leaves_a_hole() {
        let mut curves = slab(0.0, 0.0, 1.0);
        curves.extend(slab(0.5, 0.0, 1.0));
        let mut st = AreaOp::EvenOddWinding.state();
        let out = prune_edges(edges_of(curves), &mut st);
        // The overlap has crossing parity 0, so all four edge lines
        // stay in the outline.
        let pieces = out.iter().filter(|c| c.order() > 0).count();
        assert_eq!(pieces, 4);
    }

    #[test]
    fn vertical_gap_splits_contours() {
        let mut curves = slab(0.0, 0.0, 1.0);
        curves.extend(slab(0.0, 2.0, 3.0));
        let mut st = AreaOp::NonZeroWinding.state();
        let out = prune_edges(edges_of(curves), &mut st);
        let markers = out.iter().filter(|c| c.order() == 0).count();
        assert_eq!(markers, 2);
    }

    #[test]
    fn coincident_opposite_edges_cancel() {
        // A slab and the same slab traversed the other way.
        let fwd = slab(0.0, 0.0, 1.0);
        let bwd: Vec<Curve> = fwd.iter().map(Curve::reversed).collect();
        let mut curves = fwd;
        curves.extend(bwd);
        let mut st = AreaOp::NonZeroWinding.state();
        let out = prune_edges(edges_of(curves), &mut st);
        assert!(out.is_empty());
    }
}
