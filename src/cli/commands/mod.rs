//! CLI command implementations

pub mod config;
pub mod copy;
pub mod locate;

pub use config::execute as config;
pub use copy::execute as copy;
pub use locate::execute as locate;

use crate::cache::cache_root;
use crate::cli::args::SourceArgs;
use crate::config::Config;
use crate::error::{CarryError, CarryResult};
use std::path::{Path, PathBuf};

/// Pick an explicit cache root, or derive one from a base directory
fn resolve_root(
    explicit: Option<&Path>,
    base: Option<&Path>,
    tool: Option<&str>,
    config: &Config,
    flag: &str,
) -> CarryResult<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }

    let base = base.ok_or_else(|| CarryError::User(format!("--{} is required", flag)))?;
    let tool = tool.unwrap_or(&config.cache.tool);
    Ok(cache_root(base, &config.cache.cache_dir, tool))
}

/// Source cache root for commands that read a cache
fn source_root(args: &SourceArgs, config: &Config) -> CarryResult<PathBuf> {
    resolve_root(
        args.from_cache.as_deref(),
        args.from.as_deref(),
        args.tool.as_deref(),
        config,
        "from",
    )
}
