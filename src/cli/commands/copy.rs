//! Copy command - migrate the cache entries a build plan needs

use super::{resolve_root, source_root};
use crate::cli::args::{CopyArgs, OutputFormat};
use crate::config::Config;
use crate::error::CarryResult;
use crate::transfer::{carry, CarryOptions, TracingObserver, TransferReport};
use crate::ui::{TransferProgress, UiContext};
use indicatif::HumanBytes;
use std::path::PathBuf;
use tracing::debug;

/// Execute the copy command
pub fn execute(args: CopyArgs, config: &Config) -> CarryResult<()> {
    let options = resolve_options(&args, config)?;
    debug!("Resolved options: {:?}", options);

    let ctx = UiContext::detect();
    let progress = TransferProgress::new(&ctx, &TracingObserver);
    let report = carry(&options, &progress)?;

    match args.format {
        OutputFormat::Text => println!("{}", summary_line(&report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn resolve_options(args: &CopyArgs, config: &Config) -> CarryResult<CarryOptions> {
    let from_root = source_root(&args.source, config)?;
    let to_root = resolve_root(
        args.to_cache.as_deref(),
        args.to.as_deref(),
        args.source.tool.as_deref(),
        config,
        "to",
    )?;
    let manifest = args
        .actiongraph
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.cache.manifest));

    Ok(CarryOptions {
        from_root,
        to_root,
        manifest,
    })
}

fn summary_line(report: &TransferReport) -> String {
    format!(
        "Copied {} files ({}) for {}/{} entries, skipped {} (no action ID: {}, not found: {}, no output: {})",
        report.stats.files,
        HumanBytes(report.stats.bytes),
        report.copied,
        report.processed,
        report.skipped(),
        report.skipped_no_action_id,
        report.skipped_not_found,
        report.skipped_no_output,
    )
}
