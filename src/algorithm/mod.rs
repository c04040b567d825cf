//! Search over the graph container: shortest path and bounded local
//! search, sharing one lazily-allocated, reusable path tree.
mod path_tree;
pub(crate) use self::path_tree::*;
mod shortest_path;
pub use self::shortest_path::*;
mod local_search;
pub use self::local_search::*;
