//! Exact, round-trippable text serialization of a graph.
//!
//! The format is whitespace-tokenized:
//!
//! ```plain
//! Graph    := '[' Node* ']'
//! Node     := Index BlockedFlag Payload LinkList?
//! LinkList := '(' Link* ')'
//! Link     := BlockedFlag TargetIndex Cost Payload
//! ```
//!
//! Indices are dense, 0-based and assigned in container order on output;
//! on input a node's position in the file is its index, and link targets
//! are resolved from these integers in a second pass. Blocked flags accept
//! `b`/`f` letters or integers on input and are written as `0`/`1`. A cost
//! is written as an integer literal when it is exactly integral. Payload
//! tokens belong to the respective payload manager.
mod error;
pub use self::error::*;
mod tokenizer;
pub use self::tokenizer::*;
mod text;
pub use self::text::*;
