//! naivecmp: Attribute-Based Directory Comparison
//!
//! Compares two directory trees without reading file contents. Every regular
//! file, symlink, or other non-directory entry is reduced to a fingerprint of
//! selected attributes (modification time, size, mode, name, parent path).
//! Leaves of one tree are matched against the other by fingerprint, so renamed
//! or moved files still match when their name and path are left out of the
//! fingerprint. What remains unmatched on each side is reported.
//!
//! The pipeline is:
//! 1. [`scan::Scanner`] walks a root with a pool of workers and builds a
//!    [`scan::DirectoryIndex`].
//! 2. [`compare::diff`] matches one index against the other and produces a
//!    [`compare::DiffTree`] of unmatched leaves.
//! 3. [`report`] renders both diffs.

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod logging;
pub mod report;
pub mod scan;
pub mod tree;
pub mod views;
