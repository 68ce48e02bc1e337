//! # appfs CLI Storage Integration Tests
//!
//! File: cli/tests/storage.rs
//!
//! ## Overview
//!
//! Integration tests for the `appfs storage` command group (`dir`, `media`).
//! Each test writes its own configuration file and passes it with
//! `APPFS_CONFIG` or `--config`.
//!

mod common;
use common::*;
use predicates::prelude::*;
use tempfile::tempdir;

/// # Test Storage Dir External (`test_storage_dir_prefers_mounted_media`)
///
/// With a present media root, `storage dir` prints `<media_root>/<app_id>`.
#[test]
fn test_storage_dir_prefers_mounted_media() {
    let temp = tempdir().expect("Failed to create temp dir");
    let media = temp.path().join("media");
    std::fs::create_dir(&media).unwrap();
    let config = write_config(temp.path(), &temp.path().join("internal"), Some(&media), true);

    appfs_cmd()
        .args(["storage", "dir"])
        .env("APPFS_CONFIG", &config)
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", media.join("demo").display())));
}

/// # Test Storage Dir Internal (`test_storage_dir_without_media_uses_internal`)
///
/// A removable media root that is not present falls back to the internal directory.
#[test]
fn test_storage_dir_without_media_uses_internal() {
    let temp = tempdir().expect("Failed to create temp dir");
    let internal = temp.path().join("internal");
    let config = write_config(
        temp.path(),
        &internal,
        Some(&temp.path().join("unplugged")),
        true,
    );

    appfs_cmd()
        .arg("--config")
        .arg(&config)
        .args(["storage", "dir", "--create"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", internal.display())));
    assert!(internal.is_dir());
}

/// # Test Storage Media (`test_storage_media_non_removable_counts_as_available`)
///
/// Non-removable storage is available even when not mounted; `dir` then logs
/// the missing external directory and falls back.
#[test]
fn test_storage_media_non_removable_counts_as_available() {
    let temp = tempdir().expect("Failed to create temp dir");
    let internal = temp.path().join("internal");
    let config = write_config(temp.path(), &internal, None, false);

    appfs_cmd()
        .args(["storage", "media"])
        .env("APPFS_CONFIG", &config)
        .assert()
        .success()
        .stdout("available: true\nstate: removed\nremovable: false\n");

    appfs_cmd()
        .args(["storage", "dir"])
        .env("APPFS_CONFIG", &config)
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n", internal.display())))
        .stderr(predicate::str::contains("External storage unavailable"));
}

/// # Test Storage Bad Config (`test_storage_invalid_config_fails`)
///
/// An invalid configuration file makes the command fail with a clear message.
#[test]
fn test_storage_invalid_config_fails() {
    let temp = tempdir().expect("Failed to create temp dir");
    let config = temp.path().join("appfs.toml");
    std::fs::write(&config, "[storage]\napp_id = \"a/b\"\n").unwrap();

    appfs_cmd()
        .args(["storage", "media"])
        .env("APPFS_CONFIG", &config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a single path component"));
}
