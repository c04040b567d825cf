/// ID for nodes, which is essentially the `usize` index of the node's
/// storage slot in its graph.
///
/// Slots are stable while the node lives in the graph; a removed node's
/// slot may be reused by a later insertion.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn new(x: usize) -> Self {
        Self(x)
    }

    pub fn to_raw(&self) -> usize {
        self.0
    }
}

/// A directed edge record, owned by its source node.
///
/// The `tag` word doubles as the mark stamp during marking sessions and as
/// a caller-assigned dense id during indexing sessions; it is only
/// meaningful through the graph's visitation accessors.
pub struct Link<L> {
    pub(crate) target: NodeId,
    pub(crate) cost: f32,
    pub(crate) blocked: bool,
    pub(crate) tag: u64,
    pub(crate) payload: L,
}

impl<L> Link<L> {
    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn cost(&self) -> f32 {
        self.cost
    }

    pub fn set_cost(&mut self, cost: f32) {
        self.cost = cost;
    }

    pub fn blocked(&self) -> bool {
        self.blocked
    }

    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    pub fn payload(&self) -> &L {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut L {
        &mut self.payload
    }
}

/// A graph vertex: an ordered sequence of owned outgoing links, a blocked
/// flag, an opaque payload and the dual-purpose tag word.
pub struct Node<N, L> {
    pub(crate) links: Vec<Link<L>>,
    pub(crate) payload: N,
    pub(crate) blocked: bool,
    pub(crate) tag: u64,
}

impl<N, L> Node<N, L> {
    pub(crate) fn new(payload: N) -> Self {
        Self {
            links: Vec::new(),
            payload,
            blocked: false,
            tag: 0,
        }
    }

    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    pub fn links(&self) -> &[Link<L>] {
        &self.links
    }

    pub fn link(&self, i: usize) -> &Link<L> {
        &self.links[i]
    }

    pub fn link_mut(&mut self, i: usize) -> &mut Link<L> {
        &mut self.links[i]
    }

    pub fn blocked(&self) -> bool {
        self.blocked
    }

    pub fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    pub fn payload(&self) -> &N {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut N {
        &mut self.payload
    }
}
