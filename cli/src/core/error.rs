//! # appfs Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout appfs. There are two
//! distinct consumers:
//!
//! - The storage utilities (`common::fs`) never return errors to their callers.
//!   They build an `AppfsError` only to hand it to the diagnostic sink, so the
//!   log line carries a typed, displayable cause.
//! - Configuration loading and the command handlers propagate errors with
//!   `anyhow`, adding context as they go.
//!
//! ## Architecture
//!
//! - `AppfsError`: A custom error enum using `thiserror`.
//! - `Result<T>`: A type alias for `anyhow::Result<T>`.
//!
//! ## Examples
//!
//! ```rust
//! // Wrap an I/O failure with the action and path that produced it.
//! let err = AppfsError::io("open", &path, io_error);
//! sink.error("read file exception", Some(&err));
//!
//! // Return a configuration problem from a loader.
//! return Err(anyhow!(AppfsError::Config("app_id cannot be empty".into())));
//! ```
//!
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Custom error type for appfs.
#[derive(Error, Debug)]
pub enum AppfsError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// External media was reported available but no external files directory exists.
    #[error("External storage unavailable: {reason}")]
    StorageUnavailable { reason: String },

    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file name that would leave its directory (absolute, `..`, or nested).
    #[error("Invalid file name {file_name:?}: must be a single path component")]
    InvalidFileName { file_name: String },

    /// A read produced no value (the cause was already logged).
    #[error("Could not read {source_name}")]
    EmptyRead { source_name: String },
}

impl AppfsError {
    /// Builds an `Io` variant from an action verb, the affected path and the underlying error.
    pub fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        AppfsError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
