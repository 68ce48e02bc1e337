//! # appfs Exists Command
//!
//! File: cli/src/commands/exists.rs
//!
//! Prints `true` or `false` depending on whether anything exists at the given
//! path. Always exits successfully; the answer is the output.
//!
//! ```bash
//! appfs exists ~/.local/share/appfs/events.log
//! ```
//!
use crate::common::diagnostics::DiagnosticSink;
use crate::common::fs::FileUtils;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

/// Arguments for `appfs exists`.
#[derive(Parser, Debug)]
pub struct ExistsArgs {
    /// Path to check.
    pub path: PathBuf,
}

pub fn handle_exists<D: DiagnosticSink>(args: ExistsArgs, utils: &FileUtils<D>) -> Result<()> {
    let exists = utils.is_exist(&args.path);
    debug!("{} exists: {}", args.path.display(), exists);
    println!("{exists}");
    Ok(())
}
