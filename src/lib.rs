//! A costed directed graph container for navigation-mesh and topology
//! consumers.
//!
//! Nodes own their outgoing links; both carry opaque payloads handled
//! through injected [PayloadManager](graph::PayloadManager)s, a blocked
//! flag, and a tag word shared between marking and indexing sessions.
//! On top of the container sit traversal queries (edge extraction,
//! connectivity, component labeling), a uniform-cost shortest-path search
//! with an optional closest-node fallback, a bounded local search, and an
//! exact round-trippable text format.
//!
//! ```rust
//! use navgraph::graph::UnitGraph;
//!
//! let mut g = UnitGraph::default();
//! let a = g.insert();
//! let b = g.insert();
//! let c = g.insert();
//! g.link(a, b, 1.0);
//! g.link(b, c, 2.0);
//! let path = g.get_short_path(a, c);
//! assert_eq!(path.cost, 3.0);
//! assert_eq!(path.nodes, vec![a, b, c]);
//! ```
//!
//! Everything is single-threaded and synchronous. Mutating topology while
//! a marking/indexing session or a search call is active gives undefined
//! traversal results; the visitation state machine panics on the nesting
//! mistakes it can detect.

pub mod algorithm;
pub mod graph;
pub mod io;
