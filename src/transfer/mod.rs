//! Selective cache transfer
//!
//! Loads a build plan and copies the cache entries it names from a source
//! cache root into a destination cache root.
//!
//! # Entry States
//!
//! | State | Cause | Run continues |
//! |-------|-------|---------------|
//! | Copied | Action record and output blob copied | yes |
//! | Skipped (no action id) | Empty or undecodable action id | yes |
//! | Skipped (not found) | Action record or output blob missing | yes |
//! | Skipped (no output) | Index record unparsable | yes |
//! | Failed | I/O error | no |

pub mod engine;
pub mod observer;
pub mod report;

pub use engine::{copy_file, resolve_action, TransferEngine};
pub use observer::{TracingObserver, TransferObserver};
pub use report::{EntryOutcome, SkipReason, TransferReport, TransferStats};

use crate::error::CarryResult;
use crate::plan::load_plan;
use std::path::PathBuf;
use tracing::info;

/// Resolved inputs for a transfer run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarryOptions {
    /// Cache root to copy from
    pub from_root: PathBuf,
    /// Cache root to populate
    pub to_root: PathBuf,
    /// Build plan manifest
    pub manifest: PathBuf,
}

/// Load the manifest and copy every entry it needs
pub fn carry(options: &CarryOptions, observer: &dyn TransferObserver) -> CarryResult<TransferReport> {
    let plan = load_plan(&options.manifest)?;
    info!(
        "Copying {} build plan entries from {} to {}",
        plan.len(),
        options.from_root.display(),
        options.to_root.display()
    );

    TransferEngine::new(&options.from_root, &options.to_root, observer).run(&plan)
}
