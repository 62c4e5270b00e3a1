//! Scanner completeness against an independent walk, and worker-count invariance

use super::test_utils::{write_sized, T0};
use filetime::{set_symlink_file_times, FileTime};
use naivecmp::compare::compare_with_seed;
use naivecmp::config::CompareConfig;
use naivecmp::fingerprint::Seed;
use naivecmp::scan::Scanner;
use naivecmp::tree::path::to_relative_string;
use std::collections::BTreeSet;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

fn build_fixture(root: &Path) {
    for dir in 0..6 {
        for file in 0..9 {
            let relative = format!("d{}/sub{}/f{}.dat", dir, file % 3, file);
            write_sized(root, &relative, dir * 10 + file, T0 + file as i64);
        }
    }
    write_sized(root, "top.txt", 1, T0);
    std::fs::create_dir_all(root.join("empty/nested")).unwrap();
    #[cfg(unix)]
    {
        let link = root.join("link");
        std::os::unix::fs::symlink("top.txt", &link).unwrap();
        let pinned = FileTime::from_unix_time(T0, 0);
        set_symlink_file_times(&link, pinned, pinned).unwrap();
    }
}

fn oracle(root: &Path) -> (BTreeSet<String>, BTreeSet<String>) {
    let mut all = BTreeSet::new();
    let mut leaves = BTreeSet::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.unwrap();
        let relative = to_relative_string(entry.path().strip_prefix(root).unwrap());
        if !entry.file_type().is_dir() {
            leaves.insert(relative.clone());
        }
        all.insert(relative);
    }
    (all, leaves)
}

#[test]
fn every_entry_is_indexed_exactly_once() {
    let dir = TempDir::new().unwrap();
    build_fixture(dir.path());
    let (all, leaves) = oracle(dir.path());

    let index = Scanner::new(dir.path(), Seed::new(2))
        .with_workers(4)
        .scan()
        .unwrap();

    assert_eq!(index.entry_count(), all.len());
    assert_eq!(index.leaf_count(), leaves.len());
    assert_eq!(index.bucketed_leaf_count(), leaves.len());
    for path in &all {
        let id = index
            .entry_at(path)
            .unwrap_or_else(|| panic!("missing {}", path));
        assert_eq!(index.entry(id).is_leaf(), leaves.contains(path), "{}", path);
        assert_eq!(&index.path(id), path);
    }

    let indexed: BTreeSet<String> = index.leaves().into_iter().map(|(path, _)| path).collect();
    assert_eq!(indexed, leaves);
}

#[test]
fn small_queue_still_indexes_everything() {
    let dir = TempDir::new().unwrap();
    build_fixture(dir.path());
    let (all, _) = oracle(dir.path());

    let index = Scanner::new(dir.path(), Seed::new(2))
        .with_workers(3)
        .with_queue_capacity(1)
        .scan()
        .unwrap();
    assert_eq!(index.entry_count(), all.len());
}

#[test]
fn worker_count_does_not_change_results() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    build_fixture(a.path());
    build_fixture(b.path());
    write_sized(b.path(), "d2/sub0/f0.dat", 999, T0);
    write_sized(b.path(), "extra/new.bin", 5, T0);
    std::fs::remove_file(a.path().join("d5/sub2/f8.dat")).unwrap();

    let seed = Seed::new(77);
    let runs: Vec<_> = [1, 2, 8]
        .into_iter()
        .map(|workers| {
            let mut config = CompareConfig::new(a.path(), b.path());
            config.workers = workers;
            let comparison = compare_with_seed(&config, seed).unwrap();
            (
                comparison.index_a.leaves(),
                comparison.index_b.leaves(),
                comparison.only_in_a.leaf_paths(),
                comparison.only_in_b.leaf_paths(),
            )
        })
        .collect();

    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[0], runs[2]);
    assert_eq!(runs[0].2, vec!["d2/sub0/f0.dat"]);
    assert_eq!(runs[0].3, vec!["d2/sub0/f0.dat", "d5/sub2/f8.dat", "extra/new.bin"]);
}
