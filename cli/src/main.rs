//! # appfs Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `appfs` CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Building the shared `FileUtils` and routing to the command handlers
//!
//! ## Architecture
//!
//! - Each command is a variant of the `Commands` enum
//! - Commands are mapped to handler functions in `commands::`
//! - All errors are propagated to this level, printed, and turned into exit code 1
//!
//! ## Examples
//!
//! ```bash
//! appfs --help
//! appfs -vv append ./logs events.log "hello"
//! appfs read --text ./logs/events.log
//! APPFS_CONFIG=./appfs.toml appfs storage dir
//! ```
//!
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (exists, read, append, storage).
mod common; // FileUtils, storage contexts, diagnostic sink.
mod core; // Configuration and error types.

use common::diagnostics::TracingSink;
use common::fs::FileUtils;

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "appfs",
    about = "Application storage utilities",
    long_about = "Resolve an application's files directory (external media preferred), \
                  check paths, read whole files and append log lines.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Configuration file to use instead of the user/project files.
    #[arg(long, global = true, env = "APPFS_CONFIG")]
    config: Option<PathBuf>,
}

/// All available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print whether a path exists.
    Exists(commands::exists::ExistsArgs),
    /// Print a file (or stdin with `-`) to stdout.
    #[command(alias = "cat")]
    Read(commands::read::ReadArgs),
    /// Append a CRLF-terminated line to a file.
    Append(commands::append::AppendArgs),
    /// Storage location queries.
    #[command(alias = "s")]
    Storage(commands::storage::StorageArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    // Reports absorbed storage failures through `tracing`.
    let utils = FileUtils::new(TracingSink);

    let command_result = match cli.command {
        Commands::Exists(args) => commands::exists::handle_exists(args, &utils),
        Commands::Read(args) => commands::read::handle_read(args, &utils),
        Commands::Append(args) => commands::append::handle_append(args, &utils),
        Commands::Storage(args) => {
            commands::storage::handle_storage(args, cli.config.as_deref(), &utils)
        }
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_counts_and_config_flag() {
        let cli = Cli::try_parse_from([
            "appfs",
            "-vv",
            "--config",
            "/tmp/appfs.toml",
            "storage",
            "dir",
        ])
        .expect("arguments should parse");
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/appfs.toml")));
        assert!(matches!(cli.command, Commands::Storage(_)));
    }

    #[test]
    fn test_append_requires_three_arguments() {
        assert!(Cli::try_parse_from(["appfs", "append", "dir", "file"]).is_err());
    }
}
