//! # appfs Read Command
//!
//! File: cli/src/commands/read.rs
//!
//! ## Overview
//!
//! Implements `appfs read`. Reads a whole file, or standard input when the path
//! is `-`, and writes it to standard output. By default the raw bytes are copied
//! unchanged; `--text` decodes them as UTF-8 first (malformed sequences replaced).
//!
//! The read operations never fail loudly: an unreadable source is logged by the
//! `FileUtils` sink and reported here as "Could not read ...", exit code 1.
//!
//! ## Usage
//!
//! ```bash
//! appfs read ./notes/log.txt
//! cat blob.bin | appfs read - > copy.bin
//! appfs read --text ./notes/log.txt
//! ```
//!
use crate::common::diagnostics::DiagnosticSink;
use crate::common::fs::FileUtils;
use crate::core::error::{AppfsError, Result};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Arguments for `appfs read`.
#[derive(Parser, Debug)]
pub struct ReadArgs {
    /// File to read, or `-` for standard input.
    pub path: String,

    /// Decode the content as UTF-8 text before printing.
    #[arg(long, short)]
    pub text: bool,
}

pub fn handle_read<D: DiagnosticSink>(args: ReadArgs, utils: &FileUtils<D>) -> Result<()> {
    let from_stdin = args.path == "-";
    let source_name = if from_stdin {
        "stdin".to_string()
    } else {
        args.path.clone()
    };

    // Pick the overload matching the source and the requested representation.
    let output: Option<Vec<u8>> = match (from_stdin, args.text) {
        (true, false) => utils.read_stream(io::stdin().lock()),
        (true, true) => utils
            .read_string_stream(io::stdin().lock())
            .map(String::into_bytes),
        (false, false) => utils.read(Path::new(&args.path)),
        (false, true) => utils.read_string(Path::new(&args.path)).map(String::into_bytes),
    };

    let bytes = output.ok_or_else(|| {
        anyhow!(AppfsError::EmptyRead {
            source_name: source_name.clone()
        })
    })?;
    info!("Read {} bytes from {}", bytes.len(), source_name);

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&bytes)
        .and_then(|()| stdout.flush())
        .context("Failed to write to stdout")?;
    Ok(())
}
