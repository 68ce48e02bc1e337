//! # appfs Storage Dir Subcommand
//!
//! File: cli/src/commands/storage/dir.rs
//!
//! Implements `appfs storage dir`: prints the absolute directory the application
//! should keep its files in. External media wins when it counts as available;
//! otherwise the internal directory is printed. With `--create`, the directory
//! is created (recursively) before printing.
//!
use crate::common::diagnostics::DiagnosticSink;
use crate::common::fs::{AppContext, FileUtils};
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use tracing::info;

/// Arguments for `appfs storage dir`.
#[derive(Parser, Debug)]
pub struct DirArgs {
    /// Create the directory if it does not exist yet.
    #[arg(long)]
    pub create: bool,
}

pub fn handle_dir<D: DiagnosticSink>(
    args: DirArgs,
    ctx: &impl AppContext,
    utils: &FileUtils<D>,
) -> Result<()> {
    let dir = utils.get_files_dir(ctx);
    if args.create && !utils.is_exist(&dir) {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        info!("Created files directory: {}", dir.display());
    }
    println!("{}", dir.display());
    Ok(())
}
