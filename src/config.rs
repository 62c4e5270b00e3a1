//! Configuration System
//!
//! Layered configuration for a comparison run: built-in defaults, an optional
//! user-level config file, an optional explicit file, then `NAIVECMP_*`
//! environment variables. Command-line flags are applied on top by the binary.

use crate::error::CompareError;
use crate::fingerprint::AttributeSelection;
use crate::logging::LoggingConfig;
use crate::scan::DEFAULT_WORKERS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Settings loadable from files and environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Attributes that feed each leaf's fingerprint
    #[serde(default)]
    pub attributes: AttributeSelection,

    /// Parallel workers per scanned root
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            attributes: AttributeSelection::default(),
            workers: default_workers(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Everything the core needs for one comparison
#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig {
    pub root_a: PathBuf,
    pub root_b: PathBuf,
    pub attributes: AttributeSelection,
    pub workers: usize,
}

impl CompareConfig {
    /// Config with default attributes and worker count
    pub fn new(root_a: impl Into<PathBuf>, root_b: impl Into<PathBuf>) -> Self {
        Self::from_settings(root_a, root_b, &Settings::default())
    }

    pub fn from_settings(
        root_a: impl Into<PathBuf>,
        root_b: impl Into<PathBuf>,
        settings: &Settings,
    ) -> Self {
        Self {
            root_a: root_a.into(),
            root_b: root_b.into(),
            attributes: settings.attributes,
            workers: settings.workers,
        }
    }

    /// Check roots and worker count before any scanning
    pub fn validate(&self) -> Result<(), CompareError> {
        if self.workers == 0 {
            return Err(CompareError::InvalidWorkerCount(self.workers));
        }
        validate_root(&self.root_a)?;
        validate_root(&self.root_b)
    }

    /// Validate, then resolve both roots to canonical absolute paths
    pub fn canonicalized(mut self) -> Result<Self, CompareError> {
        self.validate()?;
        self.root_a = dunce::canonicalize(&self.root_a)
            .map_err(|e| CompareError::access(&self.root_a, e))?;
        self.root_b = dunce::canonicalize(&self.root_b)
            .map_err(|e| CompareError::access(&self.root_b, e))?;
        Ok(self)
    }
}

fn validate_root(root: &Path) -> Result<(), CompareError> {
    match std::fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(CompareError::RootNotDirectory(root.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(CompareError::RootNotFound(root.to_path_buf()))
        }
        Err(e) => Err(CompareError::access(root, e)),
    }
}
