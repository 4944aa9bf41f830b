//! Counters and wording for fill-pass progress.

use crate::error::ImportError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counts accumulated during one fill pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillOutcome {
    /// Rows with a day label that were processed.
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl FillOutcome {
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

/// A progress snapshot emitted after every labelled row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub processed: usize,
    pub table_rows: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub percentage: u8,
    pub status: String,
}

impl Progress {
    pub fn new(outcome: &FillOutcome, table_rows: usize) -> Self {
        Self {
            processed: outcome.total,
            table_rows,
            succeeded: outcome.succeeded,
            failed: outcome.failed,
            percentage: percentage(outcome.total, table_rows),
            status: format!(
                "Import running... {} of {} rows processed. Succeeded: {}, Failed: {}",
                outcome.total, table_rows, outcome.succeeded, outcome.failed
            ),
        }
    }
}

/// The progress presentation of a pass.
///
/// `dismiss_after` is how long the presentation stays up; `None` means it
/// stays until the caller removes it.
pub trait ProgressSink {
    fn update(&mut self, progress: &Progress);

    fn finish(&mut self, _summary: &str, _dismiss_after: Option<Duration>) {}

    fn abort(&mut self, _error: &ImportError, _dismiss_after: Duration) {}
}

/// Discards progress.
impl ProgressSink for () {
    fn update(&mut self, _progress: &Progress) {}
}

/// Collects every update, in order.
impl ProgressSink for Vec<Progress> {
    fn update(&mut self, progress: &Progress) {
        self.push(progress.clone());
    }
}

/// `round(processed / total × 100)`, clamped to 0..=100. Zero rows is 100%.
pub fn percentage(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (processed as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Final human-readable summary of a pass.
pub fn report(outcome: &FillOutcome) -> String {
    if outcome.all_succeeded() {
        format!(
            "Import successful! {} of {} rows imported.",
            outcome.succeeded, outcome.total
        )
    } else {
        format!(
            "Import finished. {} of {} rows imported, {} failed.",
            outcome.succeeded, outcome.total, outcome.failed
        )
    }
}
