use crate::graph::*;

/// The single traversal mode guarding the dual-purpose tag word.
///
/// While `Marking` the tag is a visited stamp compared against the graph's
/// generation counter; while `Indexing` it is a caller-assigned dense id.
/// Sessions must not nest: opening one while another is active is a
/// calling-code bug and panics, it is not a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitMode {
    Free,
    Marking,
    Indexing,
}

impl<NM, LM> Graph<NM, LM>
where
    NM: PayloadManager,
    LM: PayloadManager,
{
    pub fn visit_mode(&self) -> VisitMode {
        self.mode
    }

    //------------------------------ marking --------------------------------

    /// Starts a marking session. Advancing the generation makes every
    /// stale tag unmarked at once; on wraparound all tags are normalized
    /// instead, the one O(n) cost marking ever pays.
    pub fn begin_marking(&mut self) {
        assert!(
            self.mode == VisitMode::Free,
            "begin_marking: a session is already active"
        );
        self.mode = VisitMode::Marking;
        if self.curmark == u64::MAX {
            self.normalize_tags();
        } else {
            self.curmark += 1;
        }
    }

    /// Ends the session leaving tags as they are.
    pub fn end_marking(&mut self) {
        self.mode = VisitMode::Free;
    }

    pub fn marked(&self, n: NodeId) -> bool {
        assert!(self.mode == VisitMode::Marking, "marked: marking is not active");
        self.node(n).tag == self.curmark
    }

    pub fn mark(&mut self, n: NodeId) {
        assert!(self.mode == VisitMode::Marking, "mark: marking is not active");
        let curmark = self.curmark;
        self.node_mut(n).tag = curmark;
    }

    pub fn unmark(&mut self, n: NodeId) {
        assert!(self.mode == VisitMode::Marking, "unmark: marking is not active");
        let curmark = self.curmark;
        self.node_mut(n).tag = curmark - 1;
    }

    pub fn link_marked(&self, n: NodeId, li: usize) -> bool {
        assert!(
            self.mode == VisitMode::Marking,
            "link_marked: marking is not active"
        );
        self.node(n).link(li).tag == self.curmark
    }

    pub fn mark_link(&mut self, n: NodeId, li: usize) {
        assert!(
            self.mode == VisitMode::Marking,
            "mark_link: marking is not active"
        );
        let curmark = self.curmark;
        self.node_mut(n).link_mut(li).tag = curmark;
    }

    pub fn unmark_link(&mut self, n: NodeId, li: usize) {
        assert!(
            self.mode == VisitMode::Marking,
            "unmark_link: marking is not active"
        );
        let curmark = self.curmark;
        self.node_mut(n).link_mut(li).tag = curmark - 1;
    }

    //------------------------------ indexing -------------------------------

    pub fn begin_indexing(&mut self) {
        assert!(
            self.mode == VisitMode::Free,
            "begin_indexing: a session is already active"
        );
        self.mode = VisitMode::Indexing;
    }

    /// Ends the session and normalizes every tag unconditionally, so a
    /// subsequent marking session starts from a clean slate.
    pub fn end_indexing(&mut self) {
        self.normalize_tags();
        self.mode = VisitMode::Free;
    }

    pub fn index(&self, n: NodeId) -> u64 {
        assert!(
            self.mode == VisitMode::Indexing,
            "index: indexing is not active"
        );
        self.node(n).tag
    }

    pub fn set_index(&mut self, n: NodeId, i: u64) {
        assert!(
            self.mode == VisitMode::Indexing,
            "set_index: indexing is not active"
        );
        self.node_mut(n).tag = i;
    }

    pub fn link_index(&self, n: NodeId, li: usize) -> u64 {
        assert!(
            self.mode == VisitMode::Indexing,
            "link_index: indexing is not active"
        );
        self.node(n).link(li).tag
    }

    pub fn set_link_index(&mut self, n: NodeId, li: usize, i: u64) {
        assert!(
            self.mode == VisitMode::Indexing,
            "set_link_index: indexing is not active"
        );
        self.node_mut(n).link_mut(li).tag = i;
    }

    // zero every node and link tag and restart the generation at 1
    pub(crate) fn normalize_tags(&mut self) {
        let ids: Vec<NodeId> = self.nodes().collect();
        for n in ids {
            let node = self.node_mut(n);
            node.tag = 0;
            for link in node.links.iter_mut() {
                link.tag = 0;
            }
        }
        self.curmark = 1;
    }
}
