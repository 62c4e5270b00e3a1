//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::CompareError;

/// Map an error chain to a single line for stderr.
pub fn map_error(e: &anyhow::Error) -> String {
    match e.downcast_ref::<CompareError>() {
        Some(CompareError::FilesystemAccess { path, source }) => {
            format!("error: cannot read {}: {}", path.display(), source)
        }
        Some(err) if err.is_internal() => format!("internal error: {}", err),
        _ => format!("error: {:#}", e),
    }
}
