use crate::algorithm::PathTree;
use crate::graph::*;

/// Outcome of a shortest-path query. An empty node list means no path was
/// found (and, without a heuristic, `cost` is 0).
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub cost: f32,
    pub nodes: Vec<NodeId>,
}

impl PathResult {
    pub fn found(&self) -> bool {
        !self.nodes.is_empty()
    }
}

impl<NM, LM> Graph<NM, LM>
where
    NM: PayloadManager,
    LM: PayloadManager,
{
    /// Requires both directions of an edge to be unblocked before search
    /// may expand it. A missing reverse link counts as blocked. Applies to
    /// subsequent [get_short_path](Self::get_short_path) and
    /// [local_search](Self::local_search) calls until toggled back.
    pub fn bidirectional_block_test(&mut self, enabled: bool) {
        self.bidirectional_block = enabled;
    }

    /// Uniform-cost search from `start` to `goal`.
    ///
    /// The search runs backward from `goal` so the emitted path comes out
    /// in start-to-goal order without reversal. Costs are assumed
    /// non-negative. When `goal` is unreachable the result is an empty
    /// path with cost 0.
    pub fn get_short_path(&mut self, start: NodeId, goal: NodeId) -> PathResult {
        self.short_path_impl(start, goal, None)
    }

    /// Like [get_short_path](Self::get_short_path), with a best-effort
    /// fallback: when `goal` is unreachable, returns the partial goal-side
    /// path to the expanded candidate minimizing
    /// `distfunc(candidate_payload, start_payload)`, with that candidate's
    /// accumulated cost. The fallback minimizes the heuristic, not the
    /// cost, and makes no optimality promise.
    pub fn get_short_path_with<F>(&mut self, start: NodeId, goal: NodeId, distfunc: F) -> PathResult
    where
        F: Fn(&NM::Payload, &NM::Payload) -> f32,
    {
        self.short_path_impl(start, goal, Some(&distfunc))
    }

    fn short_path_impl(
        &mut self,
        start: NodeId,
        goal: NodeId,
        distfunc: Option<&dyn Fn(&NM::Payload, &NM::Payload) -> f32>,
    ) -> PathResult {
        if start == goal {
            return PathResult {
                cost: 0.0,
                nodes: vec![start],
            };
        }

        self.begin_marking();
        let mut pt = self.pt.take().unwrap_or_else(PathTree::new);
        pt.init(goal);

        let result = loop {
            let Some(top) = pt.pop_min() else {
                // frontier exhausted without reaching start
                match distfunc {
                    None => {
                        break PathResult {
                            cost: 0.0,
                            nodes: Vec::new(),
                        }
                    }
                    Some(_) => {
                        let i = pt.closest.unwrap_or(0);
                        let cost = pt.entries[i].cost;
                        let mut nodes = Vec::new();
                        pt.path_from(i, &mut nodes);
                        break PathResult { cost, nodes };
                    }
                }
            };
            if self.expand_entry(&mut pt, top, start, distfunc) {
                // the entry pushed last is the one matching start
                let i = pt.entries.len() - 1;
                let cost = pt.entries[i].cost;
                let mut nodes = Vec::new();
                pt.path_from(i, &mut nodes);
                break PathResult { cost, nodes };
            }
        };

        self.end_marking();
        self.pt = Some(pt);
        result
    }

    /// Expands one popped entry: pushes a tree entry for every traversable
    /// outgoing link, marking links as traversed, and reports whether one
    /// of the pushed targets is `target`.
    pub(crate) fn expand_entry(
        &mut self,
        pt: &mut PathTree,
        n: usize,
        target: NodeId,
        distfunc: Option<&dyn Fn(&NM::Payload, &NM::Payload) -> f32>,
    ) -> bool {
        let node = pt.entries[n].node;
        for li in 0..self.node(node).num_links() {
            let (t, lcost, lblocked) = {
                let l = self.node(node).link(li);
                (l.target(), l.cost(), l.blocked())
            };
            if self.link_marked(node, li) || lblocked || self.node(t).blocked() {
                continue;
            }
            if self.bidirectional_block {
                match self.search_link(t, node) {
                    Some(ri) if !self.node(t).link(ri).blocked() => {}
                    _ => continue,
                }
            }
            let cost = pt.entries[n].cost + lcost;
            let idx = pt.push_entry(n, cost, t);
            self.mark_link(node, li);
            if let Some(f) = distfunc {
                let d = f(self.node(t).payload(), self.node(target).payload());
                if pt.closest.is_none() || d < pt.closest_dist {
                    pt.closest = Some(idx);
                    pt.closest_dist = d;
                }
            }
            if t == target {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::*;
    use quickcheck_macros::*;

    // A -- B -- C -- D with unit costs
    fn chain() -> (UnitGraph, [NodeId; 4]) {
        let mut g = UnitGraph::default();
        let a = g.insert();
        let b = g.insert();
        let c = g.insert();
        let d = g.insert();
        g.link(a, b, 1.0);
        g.link(b, c, 1.0);
        g.link(c, d, 1.0);
        (g, [a, b, c, d])
    }

    #[test]
    fn zero_length_query() {
        let (mut g, [a, ..]) = chain();
        let r = g.get_short_path(a, a);
        assert_eq!(r.cost, 0.0);
        assert_eq!(r.nodes, vec![a]);
    }

    #[test]
    fn chain_has_cost_three() {
        let (mut g, [a, b, c, d]) = chain();
        let r = g.get_short_path(a, d);
        assert_eq!(r.cost, 3.0);
        assert_eq!(r.nodes, vec![a, b, c, d]);
    }

    #[test]
    fn picks_the_cheap_detour() {
        let mut g = UnitGraph::default();
        let a = g.insert();
        let b = g.insert();
        let c = g.insert();
        g.link(a, c, 10.0);
        g.link(a, b, 1.0);
        g.link(b, c, 1.0);
        let r = g.get_short_path(a, c);
        assert_eq!(r.cost, 2.0);
        assert_eq!(r.nodes, vec![a, b, c]);
    }

    #[test]
    fn unreachable_without_heuristic() {
        let (mut g, [a, b, _c, d]) = chain();
        for li in 0..g.node(b).num_links() {
            g.node_mut(b).link_mut(li).set_blocked(true);
        }
        let r = g.get_short_path(a, d);
        assert_eq!(r.cost, 0.0);
        assert!(r.nodes.is_empty());
    }

    #[test]
    fn unreachable_with_heuristic_falls_back_to_closest() {
        let mut g = Graph::new(SeqManager::default(), UnitManager);
        let a = g.insert();
        let b = g.insert();
        let c = g.insert();
        let d = g.insert();
        g.link(a, b, 1.0);
        g.link(b, c, 1.0);
        g.link(c, d, 1.0);
        for li in 0..g.node(b).num_links() {
            g.node_mut(b).link_mut(li).set_blocked(true);
        }
        // payloads are slot numbers; heuristic = payload distance
        let r = g.get_short_path_with(a, d, |x: &u32, y: &u32| (*x as f32 - *y as f32).abs());
        // from d the search reaches c then b; b is closest to a
        assert_eq!(r.nodes, vec![b, c, d]);
        assert_eq!(r.cost, 2.0);
    }

    #[test]
    fn bidirectional_block_respects_the_reverse_link() {
        let mut g = UnitGraph::default();
        let a = g.insert();
        let b = g.insert();
        g.link(a, b, 1.0);
        let ri = g.search_link(a, b).unwrap();
        g.node_mut(a).link_mut(ri).set_blocked(true);

        // a->b blocked: backward search from b cannot leave through b->a
        g.bidirectional_block_test(true);
        assert!(!g.get_short_path(a, b).found());
        g.bidirectional_block_test(false);
        assert!(g.get_short_path(a, b).found());
    }

    #[test]
    fn reuses_the_search_tree_across_calls() {
        let (mut g, [a, _b, _c, d]) = chain();
        let first = g.get_short_path(a, d);
        let second = g.get_short_path(d, a);
        assert_eq!(first.cost, second.cost);
        let again = g.get_short_path(a, d);
        assert_eq!(again, first);
    }

    #[quickcheck]
    fn path_is_a_valid_unblocked_chain(t: SymmetricGraph) {
        let (mut g, live) = t.build();
        if live.len() < 2 {
            return;
        }
        let start = live[0];
        let goal = live[live.len() - 1];
        let r = g.get_short_path(start, goal);
        if !r.found() {
            return;
        }
        assert_eq!(*r.nodes.first().unwrap(), start);
        assert_eq!(*r.nodes.last().unwrap(), goal);
        // walk goal-side: the recorded tree follows links out of the later
        // node toward the earlier one
        let mut sum = 0.0;
        for w in r.nodes.windows(2) {
            let li = g
                .search_link(w[1], w[0])
                .expect("path uses a link that does not exist");
            sum += g.node(w[1]).link(li).cost();
        }
        assert!((sum - r.cost).abs() < 1e-3);
    }

    #[quickcheck]
    fn reachability_and_bound_agree_with_dijkstra(t: SymmetricGraph) {
        use petgraph::algo::dijkstra;
        use petgraph::graph::{NodeIndex, UnGraph};
        use petgraph::visit::EdgeRef;

        let (mut g, live) = t.build();
        if live.len() < 2 {
            return;
        }
        let start = live[0];
        let goal = live[live.len() - 1];

        let mut pg = UnGraph::<(), f32>::new_undirected();
        let mut map = std::collections::BTreeMap::new();
        for &n in &live {
            map.insert(n, pg.add_node(()));
        }
        for (a, b) in g.directed_edges().collect::<Vec<_>>() {
            if a <= b {
                let cost = {
                    let li = g.search_link(a, b).unwrap();
                    g.node(a).link(li).cost()
                };
                pg.add_edge(map[&a], map[&b], cost);
            }
        }
        let oracle: std::collections::HashMap<NodeIndex, f32> =
            dijkstra(&pg, map[&goal], Some(map[&start]), |e| *e.weight());

        let r = g.get_short_path(start, goal);
        match oracle.get(&map[&start]) {
            None => assert!(!r.found()),
            Some(best) => {
                assert!(r.found());
                // generation-time stop may return a longer route, never a
                // shorter one
                assert!(r.cost >= *best - 1e-3);
            }
        }
    }

    #[quickcheck]
    fn optimal_on_trees(t: SymmetricTree) {
        use petgraph::algo::dijkstra;
        use petgraph::graph::UnGraph;
        use petgraph::visit::EdgeRef;

        let (mut g, live) = t.build();
        if live.len() < 2 {
            return;
        }
        let start = live[0];
        let goal = live[live.len() - 1];

        let mut pg = UnGraph::<(), f32>::new_undirected();
        let mut map = std::collections::BTreeMap::new();
        for &n in &live {
            map.insert(n, pg.add_node(()));
        }
        for (a, b) in g.directed_edges().collect::<Vec<_>>() {
            if a <= b {
                let li = g.search_link(a, b).unwrap();
                let cost = g.node(a).link(li).cost();
                pg.add_edge(map[&a], map[&b], cost);
            }
        }
        let oracle = dijkstra(&pg, map[&goal], Some(map[&start]), |e| *e.weight());

        let r = g.get_short_path(start, goal);
        let best = oracle.get(&map[&start]).copied().unwrap();
        assert!(r.found());
        assert!((r.cost - best).abs() < 1e-3);
    }
}
