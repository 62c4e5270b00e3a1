//! Error types for directory comparison.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring, scanning, or matching directory trees.
///
/// Configuration and filesystem errors abort the whole run: a partial index
/// would make every diff built from it wrong. The internal-consistency
/// variants indicate a bug in tree construction, not an external condition.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("Root directory does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("Root path is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("Invalid worker count: {0} (must be at least 1)")]
    InvalidWorkerCount(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to access {path}: {source}")]
    FilesystemAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scan cancelled")]
    Cancelled,

    #[error("Duplicate entry in tree: {0}")]
    DuplicateEntry(String),

    #[error("Entry is not a leaf: {0}")]
    NotALeaf(String),

    #[error("Entry kind conflict at {0}: expected a directory")]
    KindConflict(String),
}

impl CompareError {
    /// Build a filesystem error for `path`.
    pub fn access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompareError::FilesystemAccess {
            path: path.into(),
            source,
        }
    }

    /// True for errors reported before scanning starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CompareError::RootNotFound(_)
                | CompareError::RootNotDirectory(_)
                | CompareError::InvalidWorkerCount(_)
                | CompareError::Config(_)
        )
    }

    /// True for errors that indicate a defect in tree construction.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CompareError::DuplicateEntry(_)
                | CompareError::NotALeaf(_)
                | CompareError::KindConflict(_)
        )
    }
}

impl From<config::ConfigError> for CompareError {
    fn from(err: config::ConfigError) -> Self {
        CompareError::Config(err.to_string())
    }
}
