//! Reporting hooks for the transfer engine
//!
//! The engine never logs directly. It reports through a `TransferObserver`
//! so callers decide where diagnostics go.

use super::report::{EntryOutcome, SkipReason, TransferReport};
use crate::plan::BuildPlanEntry;
use std::path::Path;
use tracing::{debug, info, warn};

/// Receives progress and diagnostics from a transfer run
pub trait TransferObserver {
    /// The plan was loaded and `total` entries are about to be processed
    fn started(&self, _total: usize) {}

    /// A file was copied into the destination root
    fn file_copied(&self, _entry: &BuildPlanEntry, _relative: &Path, _bytes: u64) {}

    /// An entry was skipped; called once per skipped entry
    fn entry_skipped(&self, entry: &BuildPlanEntry, reason: &SkipReason);

    /// An entry reached its terminal state
    fn entry_finished(&self, _entry: &BuildPlanEntry, _outcome: &EntryOutcome) {}

    /// The whole plan was consumed
    fn finished(&self, _report: &TransferReport) {}
}

/// Observer that forwards everything to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TransferObserver for TracingObserver {
    fn file_copied(&self, entry: &BuildPlanEntry, relative: &Path, bytes: u64) {
        debug!(
            "Copied {} for {} ({} bytes)",
            relative.display(),
            entry.package,
            bytes
        );
    }

    fn entry_skipped(&self, entry: &BuildPlanEntry, reason: &SkipReason) {
        warn!("Skipping {} [{}]: {}", entry.package, entry.mode, reason);
    }

    fn finished(&self, report: &TransferReport) {
        info!(
            "Processed {} entries, copied {} files ({} bytes)",
            report.processed, report.stats.files, report.stats.bytes
        );
    }
}
