//! # appfs Append Command
//!
//! File: cli/src/commands/append.rs
//!
//! ## Overview
//!
//! Implements `appfs append`, which appends one CRLF-terminated line to
//! `<DIRECTORY>/<FILE_NAME>`, creating the directory and file when missing.
//!
//! The append is best effort. Failures are logged (run with `-vv` to see the
//! debug-level "Error on write File" entry) and the command still exits 0, the
//! same contract `FileUtils::write_txt_to_file` gives library callers.
//!
//! ## Usage
//!
//! ```bash
//! appfs append ./logs events.log "service started"
//! ```
//!
use crate::common::diagnostics::DiagnosticSink;
use crate::common::fs::FileUtils;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `appfs append`.
#[derive(Parser, Debug)]
pub struct AppendArgs {
    /// Directory holding the file. Created (one level) if missing.
    pub directory: PathBuf,

    /// Name of the file inside `directory`.
    pub file_name: String,

    /// Text of the line to append; CRLF is added.
    pub content: String,
}

pub fn handle_append<D: DiagnosticSink>(args: AppendArgs, utils: &FileUtils<D>) -> Result<()> {
    utils.write_txt_to_file(&args.content, &args.directory, &args.file_name);
    info!(
        "Append to {} finished (failures, if any, were logged)",
        args.directory.join(&args.file_name).display()
    );
    Ok(())
}
