use crate::graph::NodeId;
use keyed_priority_queue::KeyedPriorityQueue;
use std::cmp::Reverse;

/// Cumulative cost as a total order, so it can key the frontier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TotalCost(pub f32);

impl Eq for TotalCost {}

impl PartialOrd for TotalCost {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalCost {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

pub(crate) struct Entry {
    pub parent: isize,
    pub cost: f32,
    pub node: NodeId,
    pub depth: usize,
}

/// The reusable search tree behind shortest-path and local search: a
/// growable entry array and a min-frontier over entry indices.
///
/// Entry 0 is always the search root with parent -1 and cost 0. Frontier
/// priorities carry the entry index as tie-break, and entries are created
/// in insertion order, so equal costs pop first-inserted-first.
pub(crate) struct PathTree {
    pub entries: Vec<Entry>,
    frontier: KeyedPriorityQueue<usize, Reverse<(TotalCost, usize)>>,
    pub closest: Option<usize>,
    pub closest_dist: f32,
}

impl PathTree {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frontier: KeyedPriorityQueue::new(),
            closest: None,
            closest_dist: 0.0,
        }
    }

    /// Resets to a single root entry; no state survives from earlier calls.
    pub fn init(&mut self, root: NodeId) {
        self.entries.clear();
        while self.frontier.pop().is_some() {}
        self.entries.push(Entry {
            parent: -1,
            cost: 0.0,
            node: root,
            depth: 0,
        });
        self.frontier.push(0, Reverse((TotalCost(0.0), 0)));
        self.closest = None;
        self.closest_dist = 0.0;
    }

    pub fn push_entry(&mut self, parent: usize, cost: f32, node: NodeId) -> usize {
        let depth = self.entries[parent].depth + 1;
        self.entries.push(Entry {
            parent: parent as isize,
            cost,
            node,
            depth,
        });
        let idx = self.entries.len() - 1;
        self.frontier.push(idx, Reverse((TotalCost(cost), idx)));
        idx
    }

    pub fn pop_min(&mut self) -> Option<usize> {
        self.frontier.pop().map(|(idx, _)| idx)
    }

    /// Appends the chain root..=`i` to `out` in leaf-to-root order, which
    /// for a goal-rooted search is start-to-goal order.
    pub fn path_from(&self, i: usize, out: &mut Vec<NodeId>) {
        let mut i = i as isize;
        while i >= 0 {
            let entry = &self.entries[i as usize];
            out.push(entry.node);
            i = entry.parent;
        }
    }
}
