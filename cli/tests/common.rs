//! # appfs CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`files.rs`, `storage.rs`,
//! `main_tests.rs`). Each of those files is compiled as its own test crate and
//! runs the compiled `appfs` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// # Get appfs Command (`appfs_cmd`)
///
/// Returns an `assert_cmd::Command` for the `appfs` binary built for this test
/// run. `APPFS_CONFIG` and `RUST_LOG` are cleared so the caller's environment
/// cannot leak into the test.
///
/// ## Panics
/// Panics if the `appfs` binary cannot be found via `Command::cargo_bin`.
pub fn appfs_cmd() -> Command {
    let mut cmd = Command::cargo_bin("appfs").expect("Failed to find appfs binary for testing");
    cmd.env_remove("APPFS_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// Writes an `appfs.toml` into `dir` and returns its path.
///
/// `media_root` of `None` leaves external media unconfigured.
pub fn write_config(
    dir: &Path,
    internal_dir: &Path,
    media_root: Option<&Path>,
    removable: bool,
) -> std::path::PathBuf {
    let mut content = format!(
        "[storage]\napp_id = \"demo\"\ninternal_dir = \"{}\"\nremovable = {}\n",
        internal_dir.display(),
        removable
    );
    if let Some(root) = media_root {
        content.push_str(&format!("external_media_root = \"{}\"\n", root.display()));
    }
    let path = dir.join("appfs.toml");
    std::fs::write(&path, content).expect("Failed to write test config");
    path
}
