//! Directory Comparison
//!
//! Scans two roots concurrently, then diffs them in both directions
//! concurrently. Each direction yields a [`DiffTree`] of the leaves that have
//! no counterpart on the other side.

pub mod diff_tree;
pub mod matcher;

pub use diff_tree::DiffTree;
pub use matcher::{diff, match_leaf, LeafMatch};

use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::fingerprint::Seed;
use crate::scan::{CancelToken, DirectoryIndex, Scanner};
use std::thread;
use std::time::Instant;
use tracing::{info, instrument};

/// Outcome of comparing root A against root B
#[derive(Debug)]
pub struct Comparison {
    pub index_a: DirectoryIndex,
    pub index_b: DirectoryIndex,
    /// Leaves of A without a match in B
    pub only_in_a: DiffTree,
    /// Leaves of B without a match in A
    pub only_in_b: DiffTree,
}

impl Comparison {
    /// True if every leaf on both sides found a match
    pub fn is_identical(&self) -> bool {
        self.only_in_a.is_empty() && self.only_in_b.is_empty()
    }
}

/// Run a full comparison with a fresh random seed
pub fn compare(config: &CompareConfig) -> Result<Comparison, CompareError> {
    compare_with_seed(config, Seed::random())
}

/// Run a full comparison with an explicit seed.
///
/// Configuration is validated before any scanning starts. Both scans share
/// one cancellation token, so a filesystem error in either root stops both
/// and is returned as-is.
#[instrument(skip_all, fields(root_a = %config.root_a.display(), root_b = %config.root_b.display()))]
pub fn compare_with_seed(config: &CompareConfig, seed: Seed) -> Result<Comparison, CompareError> {
    config.validate()?;
    let start = Instant::now();
    info!(workers = config.workers, "Mapping directories");

    let token = CancelToken::new();
    let scanner_a = Scanner::new(&config.root_a, seed)
        .with_workers(config.workers)
        .with_selection(config.attributes);
    let scanner_b = Scanner::new(&config.root_b, seed)
        .with_workers(config.workers)
        .with_selection(config.attributes);

    let (result_a, result_b) = thread::scope(|scope| {
        let handle_a = scope.spawn(|| scanner_a.scan_with_token(&token));
        let result_b = scanner_b.scan_with_token(&token);
        (join_scoped(handle_a), result_b)
    });
    let (index_a, index_b) = match (result_a, result_b) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(CompareError::Cancelled), Err(err)) | (Err(err), _) | (_, Err(err)) => {
            return Err(err)
        }
    };

    info!("Comparing");
    let comparison = compare_indexes(index_a, index_b)?;
    info!(
        only_in_a = comparison.only_in_a.leaf_count(),
        only_in_b = comparison.only_in_b.leaf_count(),
        duration_ms = start.elapsed().as_millis(),
        "Done"
    );
    Ok(comparison)
}

/// Diff two finished indexes in both directions at once
pub fn compare_indexes(
    index_a: DirectoryIndex,
    index_b: DirectoryIndex,
) -> Result<Comparison, CompareError> {
    let (only_in_a, only_in_b) = thread::scope(|scope| {
        let forward = scope.spawn(|| diff(&index_a, &index_b));
        let backward = diff(&index_b, &index_a);
        (join_scoped(forward), backward)
    });
    Ok(Comparison {
        only_in_a: only_in_a?,
        only_in_b: only_in_b?,
        index_a,
        index_b,
    })
}

fn join_scoped<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
