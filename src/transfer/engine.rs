//! Per-entry copy state machine
//!
//! For every build plan entry the engine resolves the action record in the
//! source root, copies it, reads the copy to find the output id, then copies
//! the output blob. Lookup and parse problems skip the entry; I/O failures
//! end the run. Nothing already copied is rolled back.

use super::observer::TransferObserver;
use super::report::{EntryOutcome, SkipReason, TransferReport, TransferStats};
use crate::cache::{
    decode_key, decode_key_prefix, locate_by_exact_key, locate_by_prefix, read_index_record,
    EntryKind, KeyError,
};
use crate::error::{CarryError, CarryResult};
use crate::plan::BuildPlanEntry;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Copies the cache entries named by a build plan from one root to another
pub struct TransferEngine<'a> {
    from_root: PathBuf,
    to_root: PathBuf,
    observer: &'a dyn TransferObserver,
    stats: TransferStats,
}

impl<'a> TransferEngine<'a> {
    pub fn new(
        from_root: impl Into<PathBuf>,
        to_root: impl Into<PathBuf>,
        observer: &'a dyn TransferObserver,
    ) -> Self {
        Self {
            from_root: from_root.into(),
            to_root: to_root.into(),
            observer,
            stats: TransferStats::default(),
        }
    }

    /// Process every entry in manifest order
    pub fn run(mut self, plan: &[BuildPlanEntry]) -> CarryResult<TransferReport> {
        fs::create_dir_all(&self.to_root).map_err(|e| {
            CarryError::io(format!("creating cache root {}", self.to_root.display()), e)
        })?;
        self.ensure_distinct_roots()?;

        self.observer.started(plan.len());
        let mut report = TransferReport::default();
        for entry in plan {
            let outcome = self.transfer_entry(entry)?;
            if let EntryOutcome::Skipped(reason) = &outcome {
                self.observer.entry_skipped(entry, reason);
            }
            report.record(&outcome);
            self.observer.entry_finished(entry, &outcome);
        }

        report.stats = self.stats;
        self.observer.finished(&report);
        Ok(report)
    }

    /// Copying a root onto itself truncates every file it touches
    fn ensure_distinct_roots(&self) -> CarryResult<()> {
        let to = self.to_root.canonicalize().map_err(|e| {
            CarryError::io(format!("resolving cache root {}", self.to_root.display()), e)
        })?;
        // A missing source root cannot alias the destination
        let Ok(from) = self.from_root.canonicalize() else {
            return Ok(());
        };

        if from == to {
            return Err(CarryError::User(format!(
                "Source and destination are the same cache root: {}",
                to.display()
            )));
        }
        Ok(())
    }

    fn transfer_entry(&mut self, entry: &BuildPlanEntry) -> CarryResult<EntryOutcome> {
        if entry.action_id.is_empty() {
            return Ok(EntryOutcome::Skipped(SkipReason::NoActionId));
        }

        let action_file = match resolve_action(&self.from_root, &entry.action_id) {
            Ok(path) => path,
            Err(CarryError::NotFound(path)) => {
                return Ok(EntryOutcome::Skipped(SkipReason::NotFound(path)))
            }
            Err(CarryError::InvalidKey { source, .. }) => {
                return Ok(EntryOutcome::Skipped(SkipReason::InvalidActionId(
                    source.to_string(),
                )))
            }
            Err(e) => return Err(e),
        };

        let copied = self.copy_entry(entry, &action_file)?;
        let mut record = File::open(&copied)
            .map_err(|e| CarryError::io(format!("opening {}", copied.display()), e))?;

        let output = match read_index_record(&mut record) {
            Ok(index) => index.output,
            Err(CarryError::NoOutputId) => return Ok(EntryOutcome::Skipped(SkipReason::NoOutput)),
            Err(e) => return Err(e),
        };

        let output_file = match locate_by_exact_key(&self.from_root, &output, EntryKind::Data) {
            Ok(path) => path,
            Err(CarryError::NotFound(path)) => {
                return Ok(EntryOutcome::Skipped(SkipReason::OutputNotFound(path)))
            }
            Err(e) => return Err(e),
        };

        self.copy_entry(entry, &output_file)?;
        Ok(EntryOutcome::Copied)
    }

    /// Copy one relative cache path and return the destination path
    fn copy_entry(&mut self, entry: &BuildPlanEntry, relative: &Path) -> CarryResult<PathBuf> {
        let src = self.from_root.join(relative);
        let dest = self.to_root.join(relative);

        let bytes = copy_file(&src, &dest)?;
        self.stats.record(bytes);
        self.observer.file_copied(entry, relative, bytes);
        Ok(dest)
    }
}

/// Find the action record for a base64 action id, relative to `root`
///
/// Full 32-byte ids are looked up by exact name, shorter ones by prefix scan.
pub fn resolve_action(root: &Path, encoded: &str) -> CarryResult<PathBuf> {
    match decode_key(encoded) {
        Ok(key) => locate_by_exact_key(root, &key, EntryKind::Action),
        Err(KeyError::Length(_)) => {
            let prefix =
                decode_key_prefix(encoded).map_err(|e| CarryError::invalid_key(encoded, e))?;
            debug!("Resolving {} by prefix scan", hex::encode(&prefix));
            locate_by_prefix(root, &prefix, EntryKind::Action)
        }
        Err(e) => Err(CarryError::invalid_key(encoded, e)),
    }
}

/// Copy `src` to `dest`, creating parent directories, and return bytes written
pub fn copy_file(src: &Path, dest: &Path) -> CarryResult<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CarryError::io(format!("creating directory {}", parent.display()), e))?;
    }

    fs::copy(src, dest).map_err(|e| {
        CarryError::io(
            format!("copying {} to {}", src.display(), dest.display()),
            e,
        )
    })
}
