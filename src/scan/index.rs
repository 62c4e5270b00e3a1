//! Frozen result of scanning one root

use crate::error::CompareError;
use crate::fingerprint::Fingerprint;
use crate::tree::{Entry, EntryId, EntryTree};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Entry tree of one scanned root plus its fingerprint buckets.
///
/// Built once by [`Scanner`](crate::scan::Scanner) and immutable afterwards:
/// nothing here hands out mutable access, so an index can be shared freely
/// between matcher threads and the presentation layer.
#[derive(Debug)]
pub struct DirectoryIndex {
    root_path: PathBuf,
    tree: EntryTree<Fingerprint>,
    buckets: HashMap<Fingerprint, Vec<EntryId>>,
}

impl DirectoryIndex {
    /// Freeze scan output into an index.
    ///
    /// Buckets holding several leaves are ordered by path so lookups are
    /// stable regardless of worker scheduling.
    pub(crate) fn new(
        root_path: PathBuf,
        tree: EntryTree<Fingerprint>,
        mut buckets: HashMap<Fingerprint, Vec<EntryId>>,
    ) -> Self {
        for leaves in buckets.values_mut().filter(|leaves| leaves.len() > 1) {
            leaves.sort_by_cached_key(|id| tree.segments(*id));
        }
        debug_assert!(buckets
            .values()
            .flatten()
            .all(|id| tree.get(*id).is_leaf()));
        Self {
            root_path,
            tree,
            buckets,
        }
    }

    /// Filesystem path of the scanned root
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn root(&self) -> EntryId {
        self.tree.root()
    }

    pub fn entry(&self, id: EntryId) -> &Entry<Fingerprint> {
        self.tree.get(id)
    }

    /// Leaves sharing `fingerprint`; empty if none
    pub fn lookup_by_fingerprint(&self, fingerprint: Fingerprint) -> &[EntryId] {
        self.buckets
            .get(&fingerprint)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Fingerprint of a leaf.
    ///
    /// Directories are never fingerprinted; asking for one is a caller bug.
    pub fn fingerprint_of(&self, leaf: EntryId) -> Result<Fingerprint, CompareError> {
        self.tree
            .get(leaf)
            .payload()
            .copied()
            .ok_or_else(|| CompareError::NotALeaf(self.tree.path(leaf)))
    }

    /// Resolve a root-relative '/'-separated path
    pub fn entry_at(&self, relative_path: &str) -> Option<EntryId> {
        self.tree.entry_at(relative_path)
    }

    /// Children of a directory ordered by name
    pub fn children(&self, entry: EntryId) -> impl Iterator<Item = EntryId> + '_ {
        self.tree.children(entry)
    }

    /// Root-relative path of an entry, rendered lossily for display
    pub fn path(&self, entry: EntryId) -> String {
        self.tree.path(entry)
    }

    /// Raw name segments from the root to `entry`
    pub fn segments(&self, entry: EntryId) -> Vec<&OsStr> {
        self.tree.segments(entry)
    }

    /// Read access to the underlying tree
    pub fn tree(&self) -> &EntryTree<Fingerprint> {
        &self.tree
    }

    /// Number of entries in the tree, root excluded
    pub fn entry_count(&self) -> usize {
        self.tree.len() - 1
    }

    pub fn leaf_count(&self) -> usize {
        self.tree.leaf_count()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total leaf memberships across all buckets
    pub fn bucketed_leaf_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Every leaf path with its fingerprint, ordered by path string
    pub fn leaves(&self) -> Vec<(String, Fingerprint)> {
        let mut leaves: Vec<_> = self
            .buckets
            .iter()
            .flat_map(|(fingerprint, ids)| ids.iter().map(move |id| (*id, *fingerprint)))
            .map(|(id, fingerprint)| (self.tree.path(id), fingerprint))
            .collect();
        leaves.sort();
        leaves
    }
}
