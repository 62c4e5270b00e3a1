//! Layered settings: defaults, explicit file, environment

use super::test_utils::with_env;
use naivecmp::config::{ConfigLoader, Settings};
use naivecmp::error::CompareError;
use std::fs;
use tempfile::TempDir;

const CLEARED: [&str; 4] = [
    "NAIVECMP_WORKERS",
    "NAIVECMP_ATTRIBUTES__NAME",
    "NAIVECMP_ATTRIBUTES__SIZE",
    "NAIVECMP_LOGGING__LEVEL",
];

fn isolated<F, R>(home: &TempDir, extra: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let config_home = home.path().join("config");
    let config_home = config_home.to_string_lossy().into_owned();
    let home_dir = home.path().to_string_lossy().into_owned();
    let mut vars: Vec<(&str, Option<&str>)> = CLEARED.iter().map(|key| (*key, None)).collect();
    vars.push(("XDG_CONFIG_HOME", Some(config_home.as_str())));
    vars.push(("HOME", Some(home_dir.as_str())));
    vars.extend_from_slice(extra);
    with_env(&vars, f)
}

#[test]
fn defaults_without_any_source() {
    let home = TempDir::new().unwrap();
    let settings = isolated(&home, &[], ConfigLoader::load).unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn explicit_file_overrides_defaults() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("naivecmp.toml");
    fs::write(
        &file,
        "workers = 3\n\n[attributes]\nsize = false\nmode = true\n",
    )
    .unwrap();

    let settings = isolated(&home, &[], || ConfigLoader::load_from_file(&file)).unwrap();
    assert_eq!(settings.workers, 3);
    assert!(settings.attributes.mod_time);
    assert!(!settings.attributes.size);
    assert!(settings.attributes.mode);
    assert!(!settings.attributes.name);
}

#[test]
fn environment_overrides_file() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("naivecmp.toml");
    fs::write(&file, "workers = 3\n").unwrap();

    let settings = isolated(
        &home,
        &[
            ("NAIVECMP_WORKERS", Some("9")),
            ("NAIVECMP_ATTRIBUTES__NAME", Some("true")),
            ("NAIVECMP_LOGGING__LEVEL", Some("debug")),
        ],
        || ConfigLoader::load_from_file(&file),
    )
    .unwrap();
    assert_eq!(settings.workers, 9);
    assert!(settings.attributes.name);
    assert_eq!(settings.logging.level, "debug");
}

#[cfg(target_os = "linux")]
#[test]
fn user_config_file_is_picked_up() {
    let home = TempDir::new().unwrap();
    let dir = home.path().join("config").join("naivecmp");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "workers = 2\n").unwrap();

    let settings = isolated(&home, &[], ConfigLoader::load).unwrap();
    assert_eq!(settings.workers, 2);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.toml");
    let err = isolated(&home, &[], || ConfigLoader::load_from_file(&missing)).unwrap_err();
    assert!(matches!(err, CompareError::Config(_)));
}
