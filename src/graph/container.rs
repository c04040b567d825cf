use crate::algorithm::PathTree;
use crate::graph::*;
use std::ops::Range;

/// A costed directed graph owning its nodes in a slab of stable slots.
///
/// Node identity is the storage slot ([NodeId]); container order is slot
/// order. The injected managers allocate, release and serialize the opaque
/// node and link payloads. All traversal calls run the visitation state
/// machine internally; topology must not be mutated while a marking or
/// indexing session (or an in-flight search) is active.
pub struct Graph<NM, LM>
where
    NM: PayloadManager,
    LM: PayloadManager,
{
    slots: Vec<Option<Node<NM::Payload, LM::Payload>>>,
    free: Vec<usize>,
    node_count: usize,
    pub(crate) nman: NM,
    pub(crate) lman: LM,
    pub(crate) mode: VisitMode,
    pub(crate) curmark: u64,
    pub(crate) pt: Option<PathTree>,
    pub(crate) bidirectional_block: bool,
    pub(crate) leave_indices_after_save: bool,
    buffer: Vec<NodeId>,
}

/// Teardown releases every remaining node and link payload through the
/// managers, same as [clear](Graph::clear).
impl<NM, LM> Drop for Graph<NM, LM>
where
    NM: PayloadManager,
    LM: PayloadManager,
{
    fn drop(&mut self) {
        self.clear();
    }
}

/// A graph whose nodes and links carry no payload.
pub type UnitGraph = Graph<UnitManager, UnitManager>;

impl Default for UnitGraph {
    fn default() -> Self {
        Self::new(UnitManager, UnitManager)
    }
}

impl<NM, LM> Graph<NM, LM>
where
    NM: PayloadManager,
    LM: PayloadManager,
{
    pub fn new(nman: NM, lman: LM) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            node_count: 0,
            nman,
            lman,
            mode: VisitMode::Free,
            curmark: 1,
            pt: None,
            bidirectional_block: false,
            leave_indices_after_save: false,
            buffer: Vec::new(),
        }
    }

    pub fn node_manager(&self) -> &NM {
        &self.nman
    }

    pub fn link_manager(&self) -> &LM {
        &self.lman
    }

    //------------------------------- access --------------------------------

    pub fn node(&self, n: NodeId) -> &Node<NM::Payload, LM::Payload> {
        self.slots[n.0].as_ref().expect("node: vacant slot")
    }

    pub fn node_mut(&mut self, n: NodeId) -> &mut Node<NM::Payload, LM::Payload> {
        self.slots[n.0].as_mut().expect("node_mut: vacant slot")
    }

    pub fn contains(&self, n: NodeId) -> bool {
        matches!(self.slots.get(n.0), Some(Some(_)))
    }

    /// Iterates over the nodes in container order.
    pub fn nodes(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        let it = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|_| NodeId(i)));
        Box::new(it)
    }

    pub fn num_nodes(&self) -> usize {
        self.node_count
    }

    /// Sums per-node link counts over the whole collection: O(n).
    pub fn num_links(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .map(|node| node.num_links())
            .sum()
    }

    /// Shrinks the backing storage of the slab and of every link sequence.
    pub fn compress(&mut self) {
        for node in self.slots.iter_mut().flatten() {
            node.links.shrink_to_fit();
        }
        self.slots.shrink_to_fit();
        self.free.shrink_to_fit();
        self.buffer.shrink_to_fit();
    }

    //---------------------------- construction -----------------------------

    /// Adopts a fresh node whose payload comes from the node manager.
    pub fn insert(&mut self) -> NodeId {
        let payload = self.nman.allocate();
        self.insert_node(Node::new(payload))
    }

    /// Adopts a caller-built node, reusing a vacant slot when one exists.
    pub fn insert_node(&mut self, node: Node<NM::Payload, LM::Payload>) -> NodeId {
        self.node_count += 1;
        if let Some(i) = self.free.pop() {
            self.slots[i] = Some(node);
            NodeId(i)
        } else {
            self.slots.push(Some(node));
            NodeId(self.slots.len() - 1)
        }
    }

    /// Removes the node and returns it to the caller without releasing any
    /// payload. Links held by other nodes that target `n` are untouched.
    pub fn extract(&mut self, n: NodeId) -> Node<NM::Payload, LM::Payload> {
        let node = self.slots[n.0].take().expect("extract: vacant slot");
        self.free.push(n.0);
        self.node_count -= 1;
        node
    }

    /// Removes the node and releases it and its outgoing links through the
    /// managers.
    pub fn remove_node(&mut self, n: NodeId) {
        let node = self.extract(n);
        self.release_node(node);
    }

    fn release_node(&mut self, mut node: Node<NM::Payload, LM::Payload>) {
        for link in node.links.drain(..) {
            self.lman.release(link.payload);
        }
        self.nman.release(node.payload);
    }

    /// Releases every node and link and resets the visitation state.
    pub fn clear(&mut self) {
        let slots = std::mem::take(&mut self.slots);
        for node in slots.into_iter().flatten() {
            self.release_node(node);
        }
        self.free.clear();
        self.node_count = 0;
        self.mode = VisitMode::Free;
        self.curmark = 1;
    }

    /// Appends a link `from -> to` and returns its index in `from`'s link
    /// sequence. No side effect on `to`.
    pub fn linkto(&mut self, from: NodeId, to: NodeId, cost: f32) -> usize {
        let payload = self.lman.allocate();
        let node = self.node_mut(from);
        node.links.push(Link {
            target: to,
            cost,
            blocked: false,
            tag: 0,
            payload,
        });
        node.links.len() - 1
    }

    /// Removes the link at `li`, swapping the last link into its place, so
    /// link order is not stable across removals.
    pub fn unlink(&mut self, n: NodeId, li: usize) {
        let link = self.node_mut(n).links.swap_remove(li);
        self.lman.release(link.payload);
    }

    /// Index of the first link of `a` targeting `b`; linear scan.
    pub fn search_link(&self, a: NodeId, b: NodeId) -> Option<usize> {
        self.node(a).links.iter().position(|l| l.target == b)
    }

    /// Removes every direct link `a -> b` and every direct link `b -> a`,
    /// duplicates included, and returns how many were removed.
    pub fn remove_link(&mut self, a: NodeId, b: NodeId) -> usize {
        let mut removed = 0;
        while let Some(i) = self.search_link(a, b) {
            self.unlink(a, i);
            removed += 1;
        }
        while let Some(i) = self.search_link(b, a) {
            self.unlink(b, i);
            removed += 1;
        }
        removed
    }

    /// Links `a` and `b` in both directions with two independent records.
    pub fn link(&mut self, a: NodeId, b: NodeId, cost: f32) {
        self.linkto(a, b, cost);
        self.linkto(b, a, cost);
    }

    //------------------------------- edges ---------------------------------

    /// Emits `(from, to)` for every link exactly once, in one pass.
    pub fn directed_edges(&self) -> Box<dyn Iterator<Item = (NodeId, NodeId)> + '_> {
        let it = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|node| (NodeId(i), node)))
            .flat_map(|(n, node)| node.links.iter().map(move |l| (n, l.target)));
        Box::new(it)
    }

    /// Emits each undirected pair exactly once by marking the reverse link
    /// (when present) as its forward link is emitted.
    pub fn undirected_edges(&mut self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::with_capacity(self.node_count);
        let ids: Vec<NodeId> = self.nodes().collect();
        self.begin_marking();
        for n in ids {
            for li in 0..self.node(n).num_links() {
                if !self.link_marked(n, li) {
                    let t = self.node(n).link(li).target();
                    edges.push((n, t));
                    self.mark_link(n, li);
                    if let Some(ri) = self.search_link(t, n) {
                        self.mark_link(t, ri);
                    }
                }
            }
        }
        self.end_marking();
        edges
    }

    //----------------------------- components ------------------------------

    fn traverse(&mut self, stack: &mut Vec<NodeId>, nodes: &mut Vec<NodeId>) {
        while let Some(n) = stack.pop() {
            if self.marked(n) {
                continue;
            }
            self.mark(n);
            nodes.push(n);
            for li in 0..self.node(n).num_links() {
                let t = self.node(n).link(li).target();
                if !self.marked(t) {
                    stack.push(t);
                }
            }
        }
    }

    /// Every node reachable from `source` (including it), iterative
    /// stack-based depth traversal, never revisiting.
    pub fn connected_nodes(&mut self, source: NodeId) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.node_count);
        let mut stack = std::mem::take(&mut self.buffer);
        stack.clear();
        self.begin_marking();
        stack.push(source);
        self.traverse(&mut stack, &mut nodes);
        self.end_marking();
        self.buffer = stack;
        nodes
    }

    /// Labels the connected components in discovery order. Each returned
    /// range indexes a component's span of the node list.
    pub fn disconnected_components(&mut self) -> (Vec<Range<usize>>, Vec<NodeId>) {
        let mut nodes = Vec::with_capacity(self.node_count);
        let mut components = Vec::new();
        let mut stack = std::mem::take(&mut self.buffer);
        stack.clear();
        let ids: Vec<NodeId> = self.nodes().collect();
        self.begin_marking();
        for n in ids {
            if !self.marked(n) {
                let start = nodes.len();
                stack.push(n);
                self.traverse(&mut stack, &mut nodes);
                components.push(start..nodes.len());
            }
        }
        self.end_marking();
        self.buffer = stack;
        (components, nodes)
    }
}
