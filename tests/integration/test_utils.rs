//! Shared fixtures for integration tests
//!
//! Directory builders with pinned modification times, plus an environment
//! guard for tests that touch `NAIVECMP_*` variables.

use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

/// Fixed timestamp used for most fixture files
pub const T0: i64 = 1_700_000_000;

/// Serializes environment variable access across tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Write `contents` at `root/relative` (creating parents) with mtime `secs`
pub fn write_file(root: &Path, relative: &str, contents: &[u8], secs: i64) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    set_file_mtime(&path, FileTime::from_unix_time(secs, 0)).unwrap();
}

/// A file of exactly `size` bytes
pub fn write_sized(root: &Path, relative: &str, size: usize, secs: i64) {
    write_file(root, relative, &vec![b'x'; size], secs);
}

/// Run `f` with the given variables set, restoring prior values afterwards
pub fn with_env<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();

    for (key, value) in vars {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }

    let result = f();

    for (key, value) in saved {
        match value {
            Some(value) => std::env::set_var(&key, value),
            None => std::env::remove_var(&key),
        }
    }
    result
}
