//! Directory Scanning
//!
//! Walks one root with a pool of worker threads and freezes the result into a
//! [`DirectoryIndex`].

pub mod cancel;
pub mod index;
pub mod scanner;

pub use cancel::CancelToken;
pub use index::DirectoryIndex;
pub use scanner::{Scanner, DEFAULT_WORKERS, QUEUE_CAPACITY};
