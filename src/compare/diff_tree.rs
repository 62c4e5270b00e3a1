//! Sparse tree of unmatched leaves

use crate::error::CompareError;
use crate::tree::{Entry, EntryId, EntryTree};
use std::borrow::Cow;
use std::ffi::OsStr;

/// Unmatched leaves of one comparison direction plus the directories needed
/// to reach them.
///
/// Every directory in a `DiffTree` has at least one leaf below it; leaves
/// carry no payload. Paths are root-relative and '/'-separated.
#[derive(Debug, Clone, Default)]
pub struct DiffTree {
    tree: EntryTree<()>,
}

impl DiffTree {
    pub(crate) fn new() -> Self {
        Self {
            tree: EntryTree::new(),
        }
    }

    /// Record an unmatched leaf by its raw path segments, creating
    /// intermediate directories
    pub(crate) fn insert_unmatched(&mut self, segments: &[&OsStr]) -> Result<EntryId, CompareError> {
        self.tree.insert_leaf_at_segments(segments, ())
    }

    pub fn root(&self) -> EntryId {
        self.tree.root()
    }

    pub fn entry(&self, id: EntryId) -> &Entry<()> {
        self.tree.get(id)
    }

    /// Child names of an entry for display, ordered
    pub fn list(&self, entry: EntryId) -> Vec<Cow<'_, str>> {
        self.tree.names(entry)
    }

    pub fn child(&self, entry: EntryId, name: impl AsRef<OsStr>) -> Option<EntryId> {
        self.tree.child(entry, name)
    }

    /// Root-relative path of an entry
    pub fn path(&self, entry: EntryId) -> String {
        self.tree.path(entry)
    }

    pub fn entry_at(&self, relative_path: &str) -> Option<EntryId> {
        self.tree.entry_at(relative_path)
    }

    /// Resolve raw path segments from the root
    pub fn find<'s, I>(&self, segments: I) -> Option<EntryId>
    where
        I: IntoIterator<Item = &'s OsStr>,
    {
        self.tree.find(segments)
    }

    /// True if every leaf matched
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of unmatched leaves
    pub fn leaf_count(&self) -> usize {
        self.tree.leaf_count()
    }

    /// Unmatched leaves at or below `entry`
    pub fn unmatched_under(&self, entry: EntryId) -> usize {
        self.tree.descendant_leaves(entry)
    }

    /// Paths of all unmatched leaves in depth-first name order
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::with_capacity(self.leaf_count());
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            if self.entry(node).is_leaf() {
                paths.push(self.path(node));
                continue;
            }
            let children: Vec<_> = self.tree.children(node).collect();
            stack.extend(children.into_iter().rev());
        }
        paths
    }
}
