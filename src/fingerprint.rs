//! Attribute fingerprints for leaf entries
//!
//! A fingerprint is an XXH3-64 digest of the selected metadata attributes of
//! a leaf. It stands in for file identity across two trees without reading
//! file contents, so it is only as discriminating as the attributes chosen.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::RandomState;
use std::ffi::OsStr;
use std::fmt;
use std::fs::Metadata;
use std::hash::{BuildHasher, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// 64-bit digest of a leaf's selected attributes.
///
/// Only comparable with fingerprints computed under the same seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u64);

impl Fingerprint {
    /// Little-endian hex rendering, used by debug output
    pub fn to_hex(self) -> String {
        hex::encode(self.0.to_le_bytes())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Run-scoped hash seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(u64);

impl Seed {
    /// Fixed seed, for reproducible runs and tests
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Fresh seed drawn from the process's random hasher keys
    pub fn random() -> Self {
        let mut hasher = RandomState::new().build_hasher();
        hasher.write_u64(0x6e61_6976_6563_6d70);
        Self(hasher.finish())
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Which leaf attributes feed the fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSelection {
    /// Modification time (default: true)
    #[serde(default = "default_true")]
    pub mod_time: bool,

    /// File size (default: true)
    #[serde(default = "default_true")]
    pub size: bool,

    /// Mode bits (default: false)
    #[serde(default)]
    pub mode: bool,

    /// File name, even without a collision (default: false)
    #[serde(default)]
    pub name: bool,

    /// Containing directory path (default: false)
    #[serde(default)]
    pub path: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AttributeSelection {
    fn default() -> Self {
        Self {
            mod_time: true,
            size: true,
            mode: false,
            name: false,
            path: false,
        }
    }
}

impl AttributeSelection {
    /// True if name and directory path are both excluded, so renamed or
    /// moved files can still match
    pub fn tracks_moves(&self) -> bool {
        !self.name && !self.path
    }
}

/// Metadata of one leaf, as consumed by [`fingerprint`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafAttributes<'a> {
    /// Raw entry name bytes
    pub name: &'a [u8],
    /// Raw root-relative path of the containing directory, '/'-separated
    /// (empty at the root)
    pub parent_path: &'a [u8],
    pub mode: u32,
    /// Modification time in nanoseconds since the Unix epoch
    pub modified_nanos: i64,
    pub size: u64,
}

impl<'a> LeafAttributes<'a> {
    /// Extract attributes from a `symlink_metadata` result
    pub fn from_metadata(name: &'a OsStr, parent_path: &'a OsStr, metadata: &Metadata) -> std::io::Result<Self> {
        Ok(Self {
            name: name.as_encoded_bytes(),
            parent_path: parent_path.as_encoded_bytes(),
            mode: mode_bits(metadata),
            modified_nanos: epoch_nanos(metadata.modified()?),
            size: metadata.len(),
        })
    }
}

/// Compute the fingerprint of a leaf.
///
/// Byte layout, each part present only when selected: mode (u32 LE),
/// modification time (i64 nanos as u64 LE), size (u64 LE), containing
/// directory path followed by '/', entry name.
pub fn fingerprint(attributes: &LeafAttributes<'_>, selection: &AttributeSelection, seed: Seed) -> Fingerprint {
    let mut data = Vec::with_capacity(20 + attributes.parent_path.len() + 1 + attributes.name.len());
    if selection.mode {
        data.extend_from_slice(&attributes.mode.to_le_bytes());
    }
    if selection.mod_time {
        data.extend_from_slice(&(attributes.modified_nanos as u64).to_le_bytes());
    }
    if selection.size {
        data.extend_from_slice(&attributes.size.to_le_bytes());
    }
    if selection.path {
        data.extend_from_slice(attributes.parent_path);
        data.push(b'/');
    }
    if selection.name {
        data.extend_from_slice(attributes.name);
    }
    Fingerprint(xxh3_64_with_seed(&data, seed.value()))
}

/// Nanoseconds since the Unix epoch, negative before it, saturating
pub fn epoch_nanos(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_nanos()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_nanos())
            .map(|nanos| -nanos)
            .unwrap_or(i64::MIN),
    }
}

#[cfg(unix)]
fn mode_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    metadata.mode()
}

#[cfg(not(unix))]
fn mode_bits(metadata: &Metadata) -> u32 {
    u32::from(metadata.permissions().readonly())
}
