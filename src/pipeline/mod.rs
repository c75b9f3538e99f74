//! Pipeline entry points for the notice bot.
//!
//! - `run_notifier`: Check the board once and notify new notices
//! - `calculate_diff`: Select notices newer than the watermark

pub mod diff;
pub mod run;

pub use diff::{DiffResult, calculate_diff, watermark_id};
pub use run::{RunOutcome, run_notifier};
