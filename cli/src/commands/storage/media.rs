//! # appfs Storage Media Subcommand
//!
//! File: cli/src/commands/storage/media.rs
//!
//! Implements `appfs storage media`. Prints one `key: value` line each for
//! availability, the checked state and removability:
//!
//! ```text
//! available: true
//! state: mounted
//! removable: true
//! ```
//!
use crate::common::diagnostics::DiagnosticSink;
use crate::common::fs::{AppContext, FileUtils};
use crate::core::error::Result;
use clap::Parser;

/// Arguments for `appfs storage media` (none yet).
#[derive(Parser, Debug)]
pub struct MediaArgs {}

pub fn handle_media<D: DiagnosticSink>(
    _args: MediaArgs,
    ctx: &impl AppContext,
    utils: &FileUtils<D>,
) -> Result<()> {
    println!("available: {}", utils.is_external_media_available(ctx));
    println!("state: {}", ctx.external_storage_state());
    println!("removable: {}", ctx.is_external_storage_removable());
    Ok(())
}
