//! Entry Trees
//!
//! Both the scanned directory index and the diff result are trees of named
//! entries. Each node is tagged as a directory or a leaf when it is created.

pub mod node;
pub mod path;

pub use node::{Entry, EntryId, EntryKind, EntryTree};
