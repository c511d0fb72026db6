//! Per-entry outcomes and run totals

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Files and bytes copied during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransferStats {
    pub files: u64,
    pub bytes: u64,
}

impl TransferStats {
    pub fn record(&mut self, bytes: u64) {
        self.files += 1;
        self.bytes += bytes;
    }
}

/// Why a build plan entry was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry carries no action id
    NoActionId,
    /// The action id is not a usable base64 key
    InvalidActionId(String),
    /// No action record exists for the id
    NotFound(PathBuf),
    /// The action record does not name an output
    NoOutput,
    /// The action record was copied but its output blob is missing
    OutputNotFound(PathBuf),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActionId => write!(f, "no action ID"),
            Self::InvalidActionId(reason) => write!(f, "invalid action ID: {}", reason),
            Self::NotFound(path) => write!(f, "no file matched {}", path.display()),
            Self::NoOutput => write!(f, "no output ID in index record"),
            Self::OutputNotFound(path) => write!(f, "output file {} not found", path.display()),
        }
    }
}

/// Terminal state of a single build plan entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Copied,
    Skipped(SkipReason),
}

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    pub processed: u64,
    pub copied: u64,
    pub skipped_no_action_id: u64,
    pub skipped_not_found: u64,
    pub skipped_no_output: u64,
    pub stats: TransferStats,
}

impl TransferReport {
    /// Count an entry under its terminal state
    pub fn record(&mut self, outcome: &EntryOutcome) {
        self.processed += 1;
        match outcome {
            EntryOutcome::Copied => self.copied += 1,
            EntryOutcome::Skipped(SkipReason::NoActionId | SkipReason::InvalidActionId(_)) => {
                self.skipped_no_action_id += 1
            }
            EntryOutcome::Skipped(SkipReason::NotFound(_) | SkipReason::OutputNotFound(_)) => {
                self.skipped_not_found += 1
            }
            EntryOutcome::Skipped(SkipReason::NoOutput) => self.skipped_no_output += 1,
        }
    }

    pub fn skipped(&self) -> u64 {
        self.skipped_no_action_id + self.skipped_not_found + self.skipped_no_output
    }
}
