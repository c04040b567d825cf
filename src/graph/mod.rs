//! The graph container and its collaborator-facing query surface.
//!
//! # Payload managers
//!
//! Nodes and links carry opaque payloads. The container never looks at
//! them: an injected [PayloadManager] allocates, releases and serializes
//! node payloads, a second one does the same for link payloads. Graphs
//! without payloads use [UnitManager] on both sides.
//!
//! # The tag word and visitation sessions
//!
//! Every node and link carries a single `u64` tag reused for two traversal
//! disciplines. Inside a marking session it is a visited stamp compared
//! against a shared generation counter, so a whole-graph reset costs
//! nothing per call; inside an indexing session it is a caller-assigned
//! dense id. The [VisitMode] state machine makes the two uses mutually
//! exclusive and panics on nested or mismatched sessions, which are bugs
//! in the calling code rather than data conditions.

mod node;
pub use self::node::*;
mod manager;
pub use self::manager::*;
mod container;
pub use self::container::*;
mod visit;
pub use self::visit::*;

#[cfg(test)]
pub(crate) use self::tests::*;
