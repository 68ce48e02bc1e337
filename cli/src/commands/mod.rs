//! # appfs Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the commands of the `appfs` CLI. Each command is a thin
//! shell around one `FileUtils` operation: it parses arguments, calls the
//! operation, and prints the result.
//!
//! ## Commands
//!
//! - `exists`: Reports whether a path exists
//! - `read`: Prints a file (or stdin) as raw bytes or text
//! - `append`: Appends a CRLF-terminated line to a file
//! - `storage`: Command group for storage location queries (`dir`, `media`)
//!
//! Each command defines its own arguments structure and a handler taking the
//! shared `FileUtils` built in `main.rs`.
//!

/// `appfs append <DIRECTORY> <FILE_NAME> <CONTENT>`.
pub mod append;
/// `appfs exists <PATH>`.
pub mod exists;
/// `appfs read <PATH|-> [--text]`.
pub mod read;
/// Command group for storage locations. Includes subcommands `dir` and `media`.
pub mod storage;
