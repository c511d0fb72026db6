//! Progress indicator for transfer runs with CI fallback

use super::context::UiContext;
use crate::plan::BuildPlanEntry;
use crate::transfer::{EntryOutcome, SkipReason, TransferObserver, TransferReport};
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::cell::Cell;
use std::path::Path;
use std::time::Duration;

/// Draws a progress bar over build plan entries and forwards diagnostics
///
/// In CI the bar is hidden and every event goes straight to the inner
/// observer. Interactively, log lines are printed above the bar.
pub struct TransferProgress<'a> {
    bar: ProgressBar,
    inner: &'a dyn TransferObserver,
    bytes: Cell<u64>,
}

impl<'a> TransferProgress<'a> {
    pub fn new(ctx: &UiContext, inner: &'a dyn TransferObserver) -> Self {
        let bar = if ctx.is_interactive() {
            let bar = ProgressBar::new(0);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("  {spinner:.cyan} Copying  {bar:20.cyan/dim} {pos}/{len} {msg:.dim}  {elapsed:.dim}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
                    .progress_chars("━╸─"),
            );
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        } else {
            ProgressBar::hidden()
        };

        Self {
            bar,
            inner,
            bytes: Cell::new(0),
        }
    }
}

impl TransferObserver for TransferProgress<'_> {
    fn started(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.inner.started(total);
    }

    fn file_copied(&self, entry: &BuildPlanEntry, relative: &Path, bytes: u64) {
        self.bytes.set(self.bytes.get() + bytes);
        self.bar.set_message(HumanBytes(self.bytes.get()).to_string());
        self.bar
            .suspend(|| self.inner.file_copied(entry, relative, bytes));
    }

    fn entry_skipped(&self, entry: &BuildPlanEntry, reason: &SkipReason) {
        self.bar.suspend(|| self.inner.entry_skipped(entry, reason));
    }

    fn entry_finished(&self, entry: &BuildPlanEntry, outcome: &EntryOutcome) {
        self.bar.inc(1);
        self.inner.entry_finished(entry, outcome);
    }

    fn finished(&self, report: &TransferReport) {
        self.bar.disable_steady_tick();
        self.bar.finish_and_clear();
        self.inner.finished(report);
    }
}

impl Drop for TransferProgress<'_> {
    /// Clears a bar left behind by a run that ended in an error
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
