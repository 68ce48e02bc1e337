//! # appfs Storage Command Group
//!
//! File: cli/src/commands/storage/mod.rs
//!
//! ## Overview
//!
//! Entry point and router for `appfs storage`. Both subcommands answer questions
//! about where the application's files live, based on the `[storage]` section of
//! the configuration:
//!
//! - `dir`: the resolved files directory (external media preferred)
//! - `media`: whether external media counts as available, and why
//!
//! ## Architecture
//!
//! - `StorageArgs`: Top-level arguments for the command group.
//! - `StorageCommand`: Enum of the subcommands.
//! - `handle_storage`: Loads the configuration once, builds a `DesktopContext`
//!   and dispatches to `dir::handle_dir` or `media::handle_media`.
//!
//! ## Examples
//!
//! ```bash
//! appfs storage dir
//! appfs --config ./appfs.toml storage media
//! ```
//!
use crate::common::diagnostics::DiagnosticSink;
use crate::common::fs::{DesktopContext, FileUtils};
use crate::core::config;
use crate::core::error::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

/// Contains the handler for `appfs storage dir`.
mod dir;
/// Contains the handler for `appfs storage media`.
mod media;

/// Arguments for the `appfs storage` command group.
#[derive(Parser, Debug)]
pub struct StorageArgs {
    #[command(subcommand)]
    command: StorageCommand,
}

/// Subcommands that can follow `appfs storage`.
#[derive(Subcommand, Debug)]
enum StorageCommand {
    /// Prints the directory the application should store its files in.
    Dir(dir::DirArgs),
    /// Shows whether external media is available, its state and removability.
    Media(media::MediaArgs),
}

/// Dispatches `appfs storage <subcommand>`.
///
/// `config_path` is the explicit configuration file from `--config` or
/// `APPFS_CONFIG`, if any.
pub fn handle_storage<D: DiagnosticSink>(
    args: StorageArgs,
    config_path: Option<&Path>,
    utils: &FileUtils<D>,
) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let ctx = DesktopContext::from_config(&cfg.storage);
    match args.command {
        StorageCommand::Dir(args) => dir::handle_dir(args, &ctx, utils),
        StorageCommand::Media(args) => media::handle_media(args, &ctx, utils),
    }
}
