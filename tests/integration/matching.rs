//! Move tracking and collision fallback

use super::test_utils::{write_sized, T0};
use naivecmp::compare::{compare_with_seed, diff, match_leaf, LeafMatch};
use naivecmp::config::CompareConfig;
use naivecmp::fingerprint::{AttributeSelection, Seed};
use naivecmp::scan::Scanner;
use tempfile::TempDir;

#[test]
fn renamed_and_relocated_files_match_both_ways() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    write_sized(a.path(), "photos/2019/img_001.jpg", 2048, T0);
    write_sized(a.path(), "notes.txt", 12, T0 + 60);
    write_sized(b.path(), "archive/holiday.jpg", 2048, T0);
    write_sized(b.path(), "deep/er/notes-renamed.txt", 12, T0 + 60);

    let comparison =
        compare_with_seed(&CompareConfig::new(a.path(), b.path()), Seed::new(8)).unwrap();

    assert!(comparison.is_identical());
}

#[test]
fn including_path_stops_move_tracking() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    write_sized(a.path(), "x/data.bin", 64, T0);
    write_sized(b.path(), "y/data.bin", 64, T0);

    let mut config = CompareConfig::new(a.path(), b.path());
    config.attributes = AttributeSelection {
        path: true,
        ..AttributeSelection::default()
    };
    assert!(!config.attributes.tracks_moves());
    let comparison = compare_with_seed(&config, Seed::new(8)).unwrap();

    assert_eq!(comparison.only_in_a.leaf_paths(), vec!["x/data.bin"]);
    assert_eq!(comparison.only_in_b.leaf_paths(), vec!["y/data.bin"]);
}

#[test]
fn collision_resolves_to_the_same_path() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    write_sized(a.path(), "left/same.txt", 5, T0);
    write_sized(b.path(), "left/same.txt", 5, T0);
    write_sized(b.path(), "right/other.txt", 5, T0);

    let seed = Seed::new(21);
    let index_a = Scanner::new(a.path(), seed).scan().unwrap();
    let index_b = Scanner::new(b.path(), seed).scan().unwrap();

    let leaf = index_a.entry_at("left/same.txt").unwrap();
    let expected = index_b.entry_at("left/same.txt").unwrap();
    assert_eq!(
        match_leaf(&index_a, leaf, &index_b).unwrap(),
        LeafMatch::SamePath(expected)
    );
    assert!(diff(&index_a, &index_b).unwrap().is_empty());

    // The extra candidate on B has no partner in A
    let backward = diff(&index_b, &index_a).unwrap();
    assert!(backward.is_empty());
}

#[test]
fn collision_without_path_match_is_unmatched() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    write_sized(a.path(), "src/one.txt", 5, T0);
    write_sized(b.path(), "dst/one.txt", 5, T0);
    write_sized(b.path(), "dst/two.txt", 5, T0);

    let seed = Seed::new(21);
    let index_a = Scanner::new(a.path(), seed).scan().unwrap();
    let index_b = Scanner::new(b.path(), seed).scan().unwrap();

    let leaf = index_a.entry_at("src/one.txt").unwrap();
    assert_eq!(
        match_leaf(&index_a, leaf, &index_b).unwrap(),
        LeafMatch::Ambiguous
    );
    assert_eq!(diff(&index_a, &index_b).unwrap().leaf_paths(), vec!["src/one.txt"]);

    // Each B leaf finds the single A candidate
    assert!(diff(&index_b, &index_a).unwrap().is_empty());
}
