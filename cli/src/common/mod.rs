//! # appfs Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers in `commands::`.
//!
//! - **`diagnostics`**: the `DiagnosticSink` capability that the storage
//!   utilities report absorbed failures to, and its `tracing`-backed default.
//! - **`fs`**: `FileUtils` and the storage-location resolution built on `AppContext`.
//!

/// Leveled diagnostic sink injected into `FileUtils`.
pub mod diagnostics;
/// Storage utilities: files-directory resolution, reads, appends.
pub mod fs;
