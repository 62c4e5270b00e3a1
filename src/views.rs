//! Annotated Views
//!
//! Read-only classification of a scanned tree against one diff result, for
//! presentation layers that show the whole tree with match status instead of
//! only the unmatched leaves.

use crate::compare::DiffTree;
use crate::scan::DirectoryIndex;
use crate::tree::EntryId;
use serde::Serialize;

/// Match status of one entry of a scanned tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Leaf with a counterpart on the other side
    Matched,
    /// Leaf without a counterpart
    Unmatched,
    /// Directory whose leaves all matched
    DirectoryClean,
    /// Directory with at least one unmatched leaf below it
    DirectoryWithUnmatched,
}

impl EntryStatus {
    pub fn is_dir(self) -> bool {
        matches!(
            self,
            EntryStatus::DirectoryClean | EntryStatus::DirectoryWithUnmatched
        )
    }
}

/// A child entry with its status and unmatched-leaf count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedEntry {
    #[serde(skip)]
    pub id: EntryId,
    pub name: String,
    pub path: String,
    pub status: EntryStatus,
    /// Unmatched leaves at or below this entry
    pub unmatched: usize,
}

/// Classify `entry` of `index` using the diff built from that index
pub fn classify(index: &DirectoryIndex, entry: EntryId, diff: &DiffTree) -> EntryStatus {
    let in_diff = unmatched_count(index, entry, diff) > 0;
    match (index.entry(entry).is_dir(), in_diff) {
        (true, true) => EntryStatus::DirectoryWithUnmatched,
        (true, false) => EntryStatus::DirectoryClean,
        (false, true) => EntryStatus::Unmatched,
        (false, false) => EntryStatus::Matched,
    }
}

/// Unmatched leaves at or below `entry`
pub fn unmatched_count(index: &DirectoryIndex, entry: EntryId, diff: &DiffTree) -> usize {
    diff.find(index.segments(entry))
        .map_or(0, |found| diff.unmatched_under(found))
}

/// Children of `entry` annotated with status: directories first, then
/// leaves, each group ordered by name
pub fn annotated_children(
    index: &DirectoryIndex,
    entry: EntryId,
    diff: &DiffTree,
) -> Vec<AnnotatedEntry> {
    let (mut dirs, leaves): (Vec<_>, Vec<_>) = index
        .children(entry)
        .map(|child| AnnotatedEntry {
            id: child,
            name: index.entry(child).display_name().into_owned(),
            path: index.path(child),
            status: classify(index, child, diff),
            unmatched: unmatched_count(index, child, diff),
        })
        .partition(|annotated| annotated.status.is_dir());
    dirs.extend(leaves);
    dirs
}
