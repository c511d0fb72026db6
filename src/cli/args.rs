//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// cachecarry - Selective build cache migration
///
/// Copies only the build cache entries a build plan needs from one cache
/// root to another.
#[derive(Parser, Debug)]
#[command(name = "cachecarry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CACHECARRY_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy the cache entries named by a build plan
    Copy(CopyArgs),

    /// Resolve a single action ID in a cache root
    Locate(LocateArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Where a cache root comes from: a base directory or an explicit path
#[derive(Parser, Debug, Clone)]
pub struct SourceArgs {
    /// Copy files from the cache directory under this base directory
    #[arg(long, value_name = "DIR", required_unless_present = "from_cache")]
    pub from: Option<PathBuf>,

    /// Source cache root, overrides --from
    #[arg(long, value_name = "DIR")]
    pub from_cache: Option<PathBuf>,

    /// Build tool whose cache is copied (cache root is <tool>-build)
    #[arg(long)]
    pub tool: Option<String>,
}

/// Arguments for the copy command
#[derive(Parser, Debug)]
pub struct CopyArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Copy files to the cache directory under this base directory
    #[arg(long, value_name = "DIR", required_unless_present = "to_cache")]
    pub to: Option<PathBuf>,

    /// Destination cache root, overrides --to
    #[arg(long, value_name = "DIR")]
    pub to_cache: Option<PathBuf>,

    /// Build plan manifest (the -debug-actiongraph output of the build)
    #[arg(long, value_name = "FILE")]
    pub actiongraph: Option<PathBuf>,

    /// Summary format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the locate command
#[derive(Parser, Debug)]
pub struct LocateArgs {
    /// Base64 action ID, full or prefix
    pub action_id: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for the copy summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single human-readable line
    Text,
    /// JSON report
    Json,
}
