//! UI helpers for a consistent CLI experience
//!
//! Styled output goes to stdout; the transfer progress bar draws on stderr
//! and is hidden automatically in CI/non-interactive environments.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{key_value, key_value_status, section, step_ok_detail, step_warn_hint};
pub use progress::TransferProgress;
