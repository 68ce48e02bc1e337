//! # appfs Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! This module is the home of `FileUtils`, the storage helper the rest of appfs
//! is built around. It resolves where an application keeps its files and performs
//! whole-file reads and line appends with absorb-and-log failure handling.
//!
//! ## Architecture
//!
//! - **`io`**: the `FileUtils` type itself plus existence checks, whole-file and
//!   whole-stream reads, and CRLF line appends.
//! - **`storage`**: the `AppContext` trait, `StorageState`, the config-driven
//!   `DesktopContext`, and the `FileUtils` methods that choose between external
//!   and internal storage.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::{DesktopContext, FileUtils};
//!
//! let utils: FileUtils = FileUtils::default();
//! let ctx = DesktopContext::from_config(&cfg.storage);
//! let dir = utils.get_files_dir(&ctx);
//! utils.write_txt_to_file("ready", &dir, "status.log");
//! ```
//!

/// `FileUtils` and its read, existence and append operations.
pub mod io;
/// Files-directory resolution and the `AppContext` abstraction.
pub mod storage;

pub use io::FileUtils;
pub use storage::{AppContext, DesktopContext};
