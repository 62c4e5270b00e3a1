//! Root-relative path helpers
//!
//! Tree paths always use '/' as the separator, whatever the host convention.

use std::ffi::{OsStr, OsString};
use std::path::{Component, Path};

/// Iterate the non-empty '/'-separated segments of a relative path
pub fn segments(relative_path: &str) -> impl Iterator<Item = &str> {
    relative_path.split('/').filter(|segment| !segment.is_empty())
}

/// Join a relative directory path and a child name
pub fn join(parent: &str, name: &str) -> String {
    let parent = normalize_path_string(parent);
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Join a raw relative directory path and a raw child name with '/'
pub fn join_os(parent: &OsStr, name: &OsStr) -> OsString {
    if parent.is_empty() {
        return name.to_os_string();
    }
    let mut joined = OsString::with_capacity(parent.len() + 1 + name.len());
    joined.push(parent);
    joined.push("/");
    joined.push(name);
    joined
}

/// Strip leading and trailing separators
pub fn normalize_path_string(path: &str) -> &str {
    path.trim_matches('/')
}

/// Convert a host path relative to a scan root into a '/'-separated string.
///
/// Non-UTF-8 segments are converted lossily.
pub fn to_relative_string(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
