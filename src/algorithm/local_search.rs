use crate::algorithm::PathTree;
use crate::graph::*;

/// Outcome of a bounded reachability probe. `depth` and `dist` report the
/// last expanded frontier entry that was within bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalSearch {
    pub found: bool,
    pub depth: usize,
    pub dist: f32,
}

impl<NM, LM> Graph<NM, LM>
where
    NM: PayloadManager,
    LM: PayloadManager,
{
    /// Bounded frontier expansion from `start` toward `end`, without path
    /// reconstruction. A bound of 0 disables that bound. Reports not-found
    /// as soon as the cheapest remaining frontier entry exceeds
    /// `max_depth` links or `max_dist` accumulated cost.
    pub fn local_search(
        &mut self,
        start: NodeId,
        end: NodeId,
        max_depth: usize,
        max_dist: f32,
    ) -> LocalSearch {
        if start == end {
            return LocalSearch {
                found: true,
                depth: 0,
                dist: 0.0,
            };
        }

        self.begin_marking();
        let mut pt = self.pt.take().unwrap_or_else(PathTree::new);
        pt.init(start);

        let mut depth = 0;
        let mut dist = 0.0;
        let mut found = false;
        while let Some(top) = pt.pop_min() {
            let d = pt.entries[top].depth;
            let c = pt.entries[top].cost;
            if max_depth > 0 && d > max_depth {
                break;
            }
            if max_dist > 0.0 && c > max_dist {
                break;
            }
            depth = d;
            dist = c;
            if self.expand_entry(&mut pt, top, end, None) {
                found = true;
                break;
            }
        }

        self.end_marking();
        self.pt = Some(pt);
        LocalSearch { found, depth, dist }
    }
}
