//! Locate command - show where an action's cache entries live

use super::source_root;
use crate::cache::{locate_by_exact_key, read_index_record, EntryKind};
use crate::cli::args::LocateArgs;
use crate::config::Config;
use crate::error::{CarryError, CarryResult};
use crate::transfer::resolve_action;
use crate::ui::{self, UiContext};
use indicatif::HumanBytes;
use std::fs::File;

/// Execute the locate command
pub fn execute(args: LocateArgs, config: &Config) -> CarryResult<()> {
    let ctx = UiContext::detect();
    let root = source_root(&args.source, config)?;

    ui::section(&format!("Action {}", args.action_id));
    ui::key_value(&ctx, "Cache root", &root.display().to_string());

    let action_file = resolve_action(&root, &args.action_id)?;
    ui::key_value(&ctx, "Action record", &action_file.display().to_string());

    let path = root.join(&action_file);
    let mut record = File::open(&path)
        .map_err(|e| CarryError::io(format!("opening {}", path.display()), e))?;

    let index = match read_index_record(&mut record) {
        Ok(index) => index,
        Err(CarryError::NoOutputId) => {
            ui::step_warn_hint(
                "Index record has no output ID",
                "expected: v1 <action hex> <output hex> [size] [time]",
            );
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    ui::key_value(&ctx, "Output ID", &index.output.to_hex());
    if let Some(size) = index.size {
        ui::key_value(&ctx, "Output size", &HumanBytes(size).to_string());
    }
    if let Some(time) = index.time {
        ui::key_value(&ctx, "Written", &time.to_rfc3339());
    }

    match locate_by_exact_key(&root, &index.output, EntryKind::Data) {
        Ok(blob) => ui::key_value_status(&ctx, "Output blob", &blob.display().to_string(), true),
        Err(CarryError::NotFound(blob)) => ui::key_value_status(
            &ctx,
            "Output blob",
            &format!("{} (missing)", blob.display()),
            false,
        ),
        Err(e) => return Err(e),
    }

    Ok(())
}
