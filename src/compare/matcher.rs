//! Cross-tree leaf matching

use crate::compare::diff_tree::DiffTree;
use crate::error::CompareError;
use crate::scan::DirectoryIndex;
use crate::tree::EntryId;
use tracing::{debug, instrument};

/// How a single source leaf resolved against the target index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafMatch {
    /// Exactly one target leaf shares the fingerprint
    Unique(EntryId),
    /// Several share it; this one has the same root-relative path
    SamePath(EntryId),
    /// Several share it, none at the same path
    Ambiguous,
    /// Nothing in the target shares the fingerprint
    Missing,
}

impl LeafMatch {
    pub fn is_match(self) -> bool {
        matches!(self, LeafMatch::Unique(_) | LeafMatch::SamePath(_))
    }
}

/// Resolve one source leaf against `target`.
///
/// A single candidate matches on attributes alone, which is what lets renamed
/// and moved files pair up. With several candidates only an exact path match
/// counts. That fallback assumes both roots share a comparable layout; when
/// they do not, the leaf ends up unmatched without any further diagnostic.
pub fn match_leaf(
    source: &DirectoryIndex,
    leaf: EntryId,
    target: &DirectoryIndex,
) -> Result<LeafMatch, CompareError> {
    let candidates = target.lookup_by_fingerprint(source.fingerprint_of(leaf)?);
    Ok(match candidates {
        [] => LeafMatch::Missing,
        [only] => LeafMatch::Unique(*only),
        several => {
            let segments = source.segments(leaf);
            several
                .iter()
                .find(|candidate| target.segments(**candidate) == segments)
                .map_or(LeafMatch::Ambiguous, |candidate| LeafMatch::SamePath(*candidate))
        }
    })
}

/// Build the tree of `source` leaves that have no match in `target`.
///
/// Directories are never tested themselves; they show up only as ancestors of
/// unmatched leaves. Reads both indexes and nothing else, so the two
/// directions of a comparison can run at the same time.
#[instrument(skip_all, fields(source = %source.root_path().display(), target = %target.root_path().display()))]
pub fn diff(source: &DirectoryIndex, target: &DirectoryIndex) -> Result<DiffTree, CompareError> {
    let mut result = DiffTree::new();
    let mut ambiguous = 0usize;
    let mut stack = vec![source.root()];

    while let Some(node) = stack.pop() {
        if source.entry(node).is_dir() {
            stack.extend(source.children(node));
            continue;
        }
        let outcome = match_leaf(source, node, target)?;
        if outcome.is_match() {
            continue;
        }
        if outcome == LeafMatch::Ambiguous {
            ambiguous += 1;
            debug!(path = %source.path(node), "Fingerprint collision without a same-path candidate");
        }
        result.insert_unmatched(&source.segments(node))?;
    }

    debug!(
        unmatched = result.leaf_count(),
        ambiguous,
        "Diff completed"
    );
    Ok(result)
}
