//! Property-based tests for fingerprint determinism and attribute independence

use naivecmp::fingerprint::{fingerprint, AttributeSelection, LeafAttributes, Seed};
use proptest::prelude::*;
use xxhash_rust::xxh3::xxh3_64_with_seed;

fn selection_strategy() -> impl Strategy<Value = AttributeSelection> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(mod_time, size, mode, name, path)| AttributeSelection {
            mod_time,
            size,
            mode,
            name,
            path,
        },
    )
}

/// Fingerprints computed from separately built buffers agree, and both equal
/// XXH3-64 over the documented byte layout
#[test]
fn test_fingerprint_determinism_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                proptest::collection::vec(any::<u8>(), 1..16),
                "([a-z]{1,6}/){0,3}[a-z]{0,6}",
                any::<u32>(),
                any::<i64>(),
                any::<u64>(),
                selection_strategy(),
                any::<u64>(),
            ),
            |(name, parent, mode, modified_nanos, size, selection, seed)| {
                let name_owned = name.to_vec();
                let parent_owned = parent.split('/').collect::<Vec<_>>().join("/");
                let first = LeafAttributes {
                    name: &name,
                    parent_path: parent.as_bytes(),
                    mode,
                    modified_nanos,
                    size,
                };
                let second = LeafAttributes {
                    name: &name_owned,
                    parent_path: parent_owned.as_bytes(),
                    mode,
                    modified_nanos,
                    size,
                };

                let mut layout = Vec::new();
                if selection.mode {
                    layout.extend_from_slice(&mode.to_le_bytes());
                }
                if selection.mod_time {
                    layout.extend_from_slice(&(modified_nanos as u64).to_le_bytes());
                }
                if selection.size {
                    layout.extend_from_slice(&size.to_le_bytes());
                }
                if selection.path {
                    layout.extend_from_slice(parent.as_bytes());
                    layout.push(b'/');
                }
                if selection.name {
                    layout.extend_from_slice(&name);
                }
                let expected = hex::encode(xxh3_64_with_seed(&layout, seed).to_le_bytes());

                let seed = Seed::new(seed);
                let from_first = fingerprint(&first, &selection, seed);
                prop_assert_eq!(from_first, fingerprint(&second, &selection, seed));
                prop_assert_eq!(from_first.to_hex(), expected);
                Ok(())
            },
        )
        .unwrap();
}

proptest! {
    /// With only the name selected, every other attribute is ignored
    #[test]
    fn test_name_only_ignores_other_attributes(
        name in "[a-z]{1,12}\\.txt",
        parent_a in "[a-z]{0,8}",
        parent_b in "[a-z]{0,8}",
        mode_a in any::<u32>(),
        mode_b in any::<u32>(),
        mtime_a in any::<i64>(),
        mtime_b in any::<i64>(),
        size_a in any::<u64>(),
        size_b in any::<u64>(),
        seed in any::<u64>(),
    ) {
        let selection = AttributeSelection {
            mod_time: false,
            size: false,
            mode: false,
            name: true,
            path: false,
        };
        let a = LeafAttributes {
            name: name.as_bytes(),
            parent_path: parent_a.as_bytes(),
            mode: mode_a,
            modified_nanos: mtime_a,
            size: size_a,
        };
        let b = LeafAttributes {
            name: name.as_bytes(),
            parent_path: parent_b.as_bytes(),
            mode: mode_b,
            modified_nanos: mtime_b,
            size: size_b,
        };
        let seed = Seed::new(seed);
        prop_assert_eq!(fingerprint(&a, &selection, seed), fingerprint(&b, &selection, seed));
    }

    /// Default selection is blind to name and location, so moves keep their fingerprint
    #[test]
    fn test_default_selection_tracks_moves(
        name_a in "[a-z]{1,12}",
        name_b in "[a-z]{1,12}",
        parent_a in "([a-z]{1,4}/){0,2}[a-z]{0,4}",
        parent_b in "([a-z]{1,4}/){0,2}[a-z]{0,4}",
        mtime in any::<i64>(),
        size in any::<u64>(),
    ) {
        let selection = AttributeSelection::default();
        prop_assert!(selection.tracks_moves());
        let a = LeafAttributes {
            name: name_a.as_bytes(),
            parent_path: parent_a.as_bytes(),
            mode: 0o100644,
            modified_nanos: mtime,
            size,
        };
        let b = LeafAttributes {
            name: name_b.as_bytes(),
            parent_path: parent_b.as_bytes(),
            mode: 0o100644,
            modified_nanos: mtime,
            size,
        };
        prop_assert_eq!(
            fingerprint(&a, &selection, Seed::new(9)),
            fingerprint(&b, &selection, Seed::new(9))
        );
    }
}
