//! cachecarry - Selective build cache migration
//!
//! CLI entry point that dispatches to subcommands.

use cachecarry::cli::{Cli, Commands};
use cachecarry::config::{Config, ConfigManager};
use cachecarry::error::CarryResult;
use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> CarryResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load()?;

    init_logging(cli.verbose, &config);

    match cli.command {
        Commands::Copy(args) => cachecarry::cli::commands::copy(args, &config),
        Commands::Locate(args) => cachecarry::cli::commands::locate(args, &config),
        Commands::Config(args) => cachecarry::cli::commands::config(args, &config_manager, &config),
    }
}

/// Logging: 0 = warn (skipped entries), 1 = info, 2+ = debug (every copied file)
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("cachecarry=warn"),
        1 => EnvFilter::new("cachecarry=info"),
        _ => EnvFilter::new("cachecarry=debug"),
    };

    if config.general.json_logs() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init();
    }
}
