//! Stitching band fragments back into closed contours.
//!
//! Each band of the sweep hands the stitcher an even, x-sorted list of
//! kept fragments ([`CurveLink`]s). Open contours reaching the bottom of
//! the previous band are tracked as [`ChainEnd`] pairs; matching decides,
//! pair by pair, whether to close two chains against each other or to
//! extend chains with new fragments. Fragments and chains live in typed
//! index arenas, and a chain is a singly linked list of fragment indices
//! from its `Enter` side to its `Exit` side.

use crate::curve::Curve;
use crate::edge::EdgeId;
use crate::op::EdgeTag;

/// Index of a [`CurveLink`] in the stitcher's arena.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct LinkIdx(pub usize);

/// Index of a [`ChainEnd`] in the stitcher's arena.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChainIdx(pub usize);

#[derive(Clone)]
pub(crate) struct LinkVec<T> {
    inner: Vec<T>,
}

#[derive(Clone)]
pub(crate) struct ChainVec<T> {
    inner: Vec<T>,
}

impl_typed_vec!(LinkVec, LinkIdx, "l");
impl_typed_vec!(ChainVec, ChainIdx, "c");

/// One kept fragment: a sub-range of an edge's curve, classified as
/// `Enter` or `Exit`.
#[derive(Clone, Debug)]
pub(crate) struct CurveLink {
    curve: Curve,
    /// The edge the curve came from; fragments of the same edge in
    /// adjacent bands can be merged.
    src: EdgeId,
    ytop: f64,
    ybot: f64,
    etag: EdgeTag,
    /// The fragment below this one on the same contour.
    next: Option<LinkIdx>,
}

impl CurveLink {
    pub fn new(curve: Curve, src: EdgeId, ystart: f64, yend: f64, etag: EdgeTag) -> CurveLink {
        debug_assert!(
            ystart >= curve.ytop() && yend <= curve.ybot() && ystart < yend,
            "bad fragment range [{ystart}, {yend}] of curve spanning [{}, {}]",
            curve.ytop(),
            curve.ybot(),
        );
        CurveLink {
            curve,
            src,
            ytop: ystart,
            ybot: yend,
            etag,
            next: None,
        }
    }

    /// Tries to widen this fragment to cover `other` as well. Only
    /// touching fragments of the same edge with the same classification
    /// merge.
    fn absorb(&mut self, other: &CurveLink) -> bool {
        if self.src != other.src
            || self.etag != other.etag
            || self.ybot < other.ytop
            || self.ytop > other.ybot
        {
            return false;
        }
        self.ytop = self.ytop.min(other.ytop);
        self.ybot = self.ybot.max(other.ybot);
        true
    }

    fn x_top(&self) -> f64 {
        self.curve.x_for_y(self.ytop)
    }

    fn x_bot(&self) -> f64 {
        self.curve.x_for_y(self.ybot)
    }

    /// The contour-start marker for a contour beginning at this
    /// fragment.
    fn moveto(&self) -> Curve {
        Curve::point(self.x_top(), self.ytop)
    }

    /// The output piece for this fragment, traversed according to its
    /// classification.
    fn sub_curve(&self) -> Curve {
        if self.ytop == self.curve.ytop() && self.ybot == self.curve.ybot() {
            self.curve.with_direction(self.etag.direction())
        } else {
            self.curve.sub_curve(self.ytop, self.ybot, self.etag.direction())
        }
    }
}

/// One open end of a partially stitched contour.
#[derive(Clone, Debug)]
pub(crate) struct ChainEnd {
    /// Topmost fragment of the chain.
    head: LinkIdx,
    /// Bottommost fragment; new fragments are appended here on the
    /// `Enter` side.
    tail: LinkIdx,
    /// The other open end of the same contour.
    partner: Option<ChainIdx>,
    /// `Enter` or `Exit` while open, `Ignore` once closed.
    etag: EdgeTag,
}

/// Whether `v1` blocks a connection across to `v2`. The tie-break
/// alternates with the phase (the parity of the current position in the
/// open-chain list) so that coincident verticals pair up consistently.
fn obstructs(v1: f64, v2: f64, phase: usize) -> bool {
    if phase % 2 == 0 {
        v1 <= v2
    } else {
        v1 < v2
    }
}

/// Accumulates fragments band by band and emits closed contours.
#[derive(Debug, Default)]
pub(crate) struct Stitcher {
    links: LinkVec<CurveLink>,
    chains: ChainVec<ChainEnd>,
    /// Open chain ends at the bottom of the last band, in x order.
    open: Vec<ChainIdx>,
    /// Head fragments of completed contours.
    subcurves: Vec<LinkIdx>,
}

impl Stitcher {
    pub fn new() -> Stitcher {
        Stitcher::default()
    }

    /// Matches one band's fragments against the open chain ends.
    ///
    /// # Panics
    ///
    /// Panics if the band produced an odd number of fragments; the
    /// classifier guarantees evenness for consistent input.
    pub fn resolve_links(&mut self, fragments: Vec<CurveLink>) {
        assert!(fragments.len() % 2 == 0, "odd number of new fragments");
        let linklist: Vec<LinkIdx> = fragments.into_iter().map(|l| self.links.push(l)).collect();
        let endlist = std::mem::take(&mut self.open);
        assert!(endlist.len() % 2 == 0, "odd number of chains");
        let mut cur_chain = 0;
        let mut cur_link = 0;
        loop {
            let chain = endlist.get(cur_chain).copied();
            let link = linklist.get(cur_link).copied();
            if chain.is_none() && link.is_none() {
                break;
            }
            let mut connect_chains = link.is_none();
            let mut connect_links = chain.is_none();
            if let (Some(chain), Some(link)) = (chain, link) {
                let next_chain = endlist.get(cur_chain + 1).copied();
                let next_link = linklist.get(cur_link + 1).copied();
                let cx = self.chain_x(chain);
                let lx = self.links[link].x_top();
                // A pair of chains or fragments sharing an x collapses
                // to nothing; prefer cancelling those out first.
                connect_chains = cur_chain % 2 == 0
                    && next_chain.is_some_and(|nc| cx == self.chain_x(nc));
                connect_links = cur_link % 2 == 0
                    && next_link.is_some_and(|nl| lx == self.links[nl].x_top());
                if !connect_chains && !connect_links {
                    if let Some(nc) = next_chain {
                        connect_chains = cx < lx && obstructs(self.chain_x(nc), lx, cur_chain);
                    }
                    if let Some(nl) = next_link {
                        connect_links =
                            lx < cx && obstructs(self.links[nl].x_top(), cx, cur_link);
                    }
                }
            }
            if connect_chains {
                if let Some(head) = self.link_chains(endlist[cur_chain], endlist[cur_chain + 1]) {
                    self.subcurves.push(head);
                }
                cur_chain += 2;
            }
            if connect_links {
                let open = self.chains.push(ChainEnd {
                    head: linklist[cur_link],
                    tail: linklist[cur_link],
                    partner: None,
                    etag: self.links[linklist[cur_link]].etag,
                });
                let close = self.chains.push(ChainEnd {
                    head: linklist[cur_link + 1],
                    tail: linklist[cur_link + 1],
                    partner: Some(open),
                    etag: self.links[linklist[cur_link + 1]].etag,
                });
                self.chains[open].partner = Some(close);
                self.open.push(open);
                self.open.push(close);
                cur_link += 2;
            }
            if !connect_chains && !connect_links {
                let chain = endlist[cur_chain];
                self.add_link(chain, linklist[cur_link]);
                self.open.push(chain);
                cur_chain += 1;
                cur_link += 1;
            }
        }
        if self.open.len() % 2 != 0 {
            eprintln!("curveops: odd number of open chains ({})", self.open.len());
        }
    }

    /// Closes all remaining open chains against each other, pairwise.
    /// Called when a band starts strictly below the previous band's
    /// bottom and at the end of the sweep.
    ///
    /// # Panics
    ///
    /// Panics if an odd number of chains remains open.
    pub fn finalize_sub_curves(&mut self) {
        let endlist = std::mem::take(&mut self.open);
        if endlist.is_empty() {
            return;
        }
        assert!(endlist.len() % 2 == 0, "odd number of chains");
        for pair in endlist.chunks(2) {
            if let Some(head) = self.link_chains(pair[0], pair[1]) {
                self.subcurves.push(head);
            }
        }
    }

    /// Joins two chains at their bottoms. If they were the two ends of
    /// the same contour, the contour is complete and its head fragment
    /// is returned. Otherwise two contours merge: their surviving ends
    /// become partners and the fragment run that just closed is handed
    /// to the surviving exit end, after its tail, so that the final
    /// close of the merged contour walks every fragment.
    fn link_chains(&mut self, a: ChainIdx, b: ChainIdx) -> Option<LinkIdx> {
        let a_tag = self.chains[a].etag;
        let b_tag = self.chains[b].etag;
        assert!(
            a_tag != EdgeTag::Ignore && b_tag != EdgeTag::Ignore,
            "linking a closed chain",
        );
        assert!(a_tag != b_tag, "linking two chains of the same type");
        let (enter, exit) = if a_tag == EdgeTag::Enter { (a, b) } else { (b, a) };
        self.chains[a].etag = EdgeTag::Ignore;
        self.chains[b].etag = EdgeTag::Ignore;
        // The contour runs down the enter side and back up the exit
        // side, so the exit chain is spliced after the enter tail.
        let enter_head = self.chains[enter].head;
        let enter_tail = self.chains[enter].tail;
        let exit_head = self.chains[exit].head;
        let exit_tail = self.chains[exit].tail;
        self.links[enter_tail].next = Some(exit_head);
        if self.chains[a].partner == Some(b) {
            return Some(enter_head);
        }
        let other_enter = self.chains[exit].partner.expect("open chain without a partner");
        let other_exit = self.chains[enter].partner.expect("open chain without a partner");
        self.chains[other_enter].partner = Some(other_exit);
        self.chains[other_exit].partner = Some(other_enter);
        // The spliced run `enter_head ..= exit_tail` would otherwise be
        // unreachable. Its two top seams become interior to the merged
        // contour; appending it after the surviving exit tail keeps the
        // emission order going down the enter sides and up the exit
        // sides. The open bottom ends of the survivors are untouched.
        let other_exit_tail = self.chains[other_exit].tail;
        self.links[other_exit_tail].next = Some(enter_head);
        self.chains[other_exit].tail = exit_tail;
        None
    }

    /// Extends a chain with a fragment from the current band: appended
    /// below the tail on the enter side, spliced above the head on the
    /// exit side.
    fn add_link(&mut self, chain: ChainIdx, link: LinkIdx) {
        if self.chains[chain].etag == EdgeTag::Enter {
            let tail = self.chains[chain].tail;
            self.links[tail].next = Some(link);
            self.chains[chain].tail = link;
        } else {
            let head = self.chains[chain].head;
            self.links[link].next = Some(head);
            self.chains[chain].head = link;
        }
    }

    /// The x position of a chain's open bottom end.
    fn chain_x(&self, chain: ChainIdx) -> f64 {
        let c = &self.chains[chain];
        if c.etag == EdgeTag::Enter {
            self.links[c.tail].x_bot()
        } else {
            self.links[c.head].x_bot()
        }
    }

    /// Emits all completed contours as a flat curve list, each contour
    /// starting with its marker point. Adjacent fragments of the same
    /// edge merge back into a single piece.
    pub fn into_curves(self) -> Vec<Curve> {
        let mut ret = Vec::new();
        for &head in &self.subcurves {
            let mut acc = self.links[head].clone();
            ret.push(acc.moveto());
            let mut next = acc.next;
            while let Some(idx) = next {
                let link = &self.links[idx];
                if !acc.absorb(link) {
                    ret.push(acc.sub_curve());
                    acc = link.clone();
                }
                next = link.next;
            }
            ret.push(acc.sub_curve());
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveDirection;
    use kurbo::Point;

    fn frag(x0: f64, x1: f64, ytop: f64, ybot: f64, src: usize, etag: EdgeTag) -> CurveLink {
        let c = Curve::line(Point::new(x0, ytop), Point::new(x1, ybot)).unwrap();
        CurveLink::new(c, EdgeId(src), ytop, ybot, etag)
    }

    fn vert(x: f64, ytop: f64, ybot: f64, src: usize, etag: EdgeTag) -> CurveLink {
        frag(x, x, ytop, ybot, src, etag)
    }

    #[test]
    fn single_band_rectangle() {
        let mut st = Stitcher::new();
        st.resolve_links(vec![
            vert(0.0, 0.0, 1.0, 0, EdgeTag::Enter),
            vert(1.0, 0.0, 1.0, 1, EdgeTag::Exit),
        ]);
        st.finalize_sub_curves();
        let out = st.into_curves();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], Curve::point(0.0, 0.0));
        assert_eq!(out[1].direction(), CurveDirection::Increasing);
        assert_eq!(out[2].direction(), CurveDirection::Decreasing);
        assert_eq!(out[2].xtop(), 1.0);
    }

    #[test]
    fn fragments_of_one_edge_merge() {
        // The same two edges split over two bands come back as one
        // piece per side.
        let mut st = Stitcher::new();
        st.resolve_links(vec![
            vert(0.0, 0.0, 0.5, 0, EdgeTag::Enter),
            vert(1.0, 0.0, 0.5, 1, EdgeTag::Exit),
        ]);
        st.resolve_links(vec![
            vert(0.0, 0.5, 1.0, 0, EdgeTag::Enter),
            vert(1.0, 0.5, 1.0, 1, EdgeTag::Exit),
        ]);
        st.finalize_sub_curves();
        let out = st.into_curves();
        assert_eq!(out.len(), 3);
        assert_eq!(out[1].ytop(), 0.0);
        assert_eq!(out[1].ybot(), 1.0);
        assert_eq!(out[2].ytop(), 0.0);
        assert_eq!(out[2].ybot(), 1.0);
    }

    #[test]
    fn two_disjoint_contours() {
        let mut st = Stitcher::new();
        st.resolve_links(vec![
            vert(0.0, 0.0, 1.0, 0, EdgeTag::Enter),
            vert(1.0, 0.0, 1.0, 1, EdgeTag::Exit),
            vert(2.0, 0.0, 1.0, 2, EdgeTag::Enter),
            vert(3.0, 0.0, 1.0, 3, EdgeTag::Exit),
        ]);
        st.finalize_sub_curves();
        let out = st.into_curves();
        let markers = out.iter().filter(|c| c.order() == 0).count();
        assert_eq!(markers, 2);
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn touching_columns_merge_into_one_contour() {
        // Two columns touching at x = 1 sit on a single wide band. The
        // inner chain ends close against each other mid-sweep and the
        // outer ends carry the merged contour. The closed seam at x = 1
        // stays in the emission as a retraced slit whose two pieces
        // cancel.
        let mut st = Stitcher::new();
        st.resolve_links(vec![
            vert(0.0, 0.0, 1.0, 0, EdgeTag::Enter),
            vert(1.0, 0.0, 1.0, 1, EdgeTag::Exit),
            vert(1.0, 0.0, 1.0, 2, EdgeTag::Enter),
            vert(3.0, 0.0, 1.0, 3, EdgeTag::Exit),
        ]);
        st.resolve_links(vec![
            vert(0.0, 1.0, 2.0, 4, EdgeTag::Enter),
            vert(3.0, 1.0, 2.0, 5, EdgeTag::Exit),
        ]);
        st.finalize_sub_curves();
        let out = st.into_curves();
        let markers = out.iter().filter(|c| c.order() == 0).count();
        assert_eq!(markers, 1);
        // Marker plus both sides of both bands plus the slit pair.
        assert_eq!(out.len(), 7);
        let slit: Vec<_> = out.iter().filter(|c| c.order() > 0 && c.xtop() == 1.0).collect();
        assert_eq!(slit.len(), 2);
        assert_ne!(slit[0].direction(), slit[1].direction());
    }

    #[test]
    fn merged_columns_keep_every_fragment() {
        // Three touching columns merge twice in one band; each merge
        // hands the closed run to the surviving exit end, so the final
        // close still reaches every fragment.
        let mut st = Stitcher::new();
        st.resolve_links(vec![
            vert(0.0, 0.0, 1.0, 0, EdgeTag::Enter),
            vert(1.0, 0.0, 1.0, 1, EdgeTag::Exit),
            vert(1.0, 0.0, 1.0, 2, EdgeTag::Enter),
            vert(2.0, 0.0, 1.0, 3, EdgeTag::Exit),
            vert(2.0, 0.0, 1.0, 4, EdgeTag::Enter),
            vert(3.0, 0.0, 1.0, 5, EdgeTag::Exit),
        ]);
        st.resolve_links(vec![
            vert(0.0, 1.0, 2.0, 6, EdgeTag::Enter),
            vert(3.0, 1.0, 2.0, 7, EdgeTag::Exit),
        ]);
        st.finalize_sub_curves();
        let out = st.into_curves();
        let markers = out.iter().filter(|c| c.order() == 0).count();
        assert_eq!(markers, 1);
        // One marker and all eight fragments, none absorbed.
        assert_eq!(out.len(), 9);
        for x in [0.0, 1.0, 2.0, 3.0] {
            assert!(out.iter().any(|c| c.order() > 0 && c.xtop() == x));
        }
    }

    #[test]
    #[should_panic(expected = "odd number of new fragments")]
    fn odd_fragment_count_panics() {
        let mut st = Stitcher::new();
        st.resolve_links(vec![vert(0.0, 0.0, 1.0, 0, EdgeTag::Enter)]);
    }

    #[test]
    fn obstructs_phase() {
        assert!(obstructs(1.0, 1.0, 0));
        assert!(!obstructs(1.0, 1.0, 1));
        assert!(obstructs(0.0, 1.0, 0));
        assert!(obstructs(0.0, 1.0, 1));
        assert!(!obstructs(2.0, 1.0, 0));
    }
}
