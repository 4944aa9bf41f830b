//! One fill pass over a timesheet table.

use crate::entry::TimeEntry;
use crate::error::ImportError;
use crate::fill::{RowFill, clear_highlight, fill_row};
use crate::import::validate;
use crate::matcher::{find_for_day, group};
use crate::page::PageSnapshot;
use crate::progress::{FillOutcome, Progress, ProgressSink, report};
use crate::row::TimesheetRow;
use crate::schedule::{Clock, Deferred, FAILURE_DISMISS_DELAY, SUCCESS_DISMISS_DELAY, Task};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    AllSucceeded,
    PartialFailure,
}

impl PassState {
    /// How long the progress presentation stays after the pass.
    pub fn dismiss_after(&self) -> Option<Duration> {
        match self {
            PassState::AllSucceeded => Some(SUCCESS_DISMISS_DELAY),
            PassState::PartialFailure => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillReport {
    pub outcome: FillOutcome,
    pub state: PassState,
    pub summary: String,
    /// Highlight removals still pending when the pass ended.
    pub deferred: Deferred,
}

/// Validates `raw` and fills the page's timesheet table with it.
///
/// Validation and table lookup errors abort before any row is touched. Row
/// failures never abort: they are counted and the pass moves on.
pub fn fill_timesheet(
    raw: &Value,
    page: &mut PageSnapshot,
    clock: &dyn Clock,
    sink: &mut dyn ProgressSink,
) -> Result<FillReport, ImportError> {
    let entries = validate(raw)?;
    fill_page(&entries, page, clock, sink)
}

/// Fills the page's timesheet table with already validated entries.
pub fn fill_page(
    entries: &[TimeEntry],
    page: &mut PageSnapshot,
    clock: &dyn Clock,
    sink: &mut dyn ProgressSink,
) -> Result<FillReport, ImportError> {
    if entries.is_empty() {
        return Err(ImportError::InvalidFormat);
    }
    let table = match page.timesheet_table_mut() {
        Ok(table) => table,
        Err(err) => {
            sink.abort(&err, FAILURE_DISMISS_DELAY);
            return Err(err);
        }
    };
    Ok(fill_rows(entries, &mut table.rows, clock, sink))
}

/// Runs the pass over `rows`, strictly in order.
pub fn fill_rows<R: TimesheetRow>(
    entries: &[TimeEntry],
    rows: &mut [R],
    clock: &dyn Clock,
    sink: &mut dyn ProgressSink,
) -> FillReport {
    let grouped = group(entries);
    let table_rows = rows.len();
    let mut outcome = FillOutcome::default();
    let mut deferred = Deferred::default();

    for index in 0..rows.len() {
        run_tasks(rows, deferred.take_due(clock.now()));

        let row = &mut rows[index];
        let Some(day) = row.day_label() else {
            continue;
        };

        if let Some(entry) = find_for_day(&grouped, &day).and_then(|found| found.first()) {
            match fill_row(row, index, entry, clock, &mut deferred) {
                Ok(RowFill::Written) => {
                    debug!(day = %day, date = %entry.date, "row filled");
                    outcome.succeeded += 1;
                }
                Ok(RowFill::Skipped) => debug!(day = %day, "locked row skipped"),
                Err(err) => {
                    warn!(day = %day, error = %err, "could not fill row");
                    outcome.failed += 1;
                }
            }
        }

        outcome.total += 1;
        sink.update(&Progress::new(&outcome, table_rows));
    }

    let state = if outcome.all_succeeded() {
        PassState::AllSucceeded
    } else {
        PassState::PartialFailure
    };
    let summary = report(&outcome);
    info!(
        total = outcome.total,
        succeeded = outcome.succeeded,
        failed = outcome.failed,
        "{summary}"
    );
    sink.finish(&summary, state.dismiss_after());

    FillReport {
        outcome,
        state,
        summary,
        deferred,
    }
}

/// Applies deferred tasks to the rows they target.
pub fn run_tasks<R: TimesheetRow>(rows: &mut [R], tasks: Vec<Task>) {
    for task in tasks {
        match task {
            Task::ClearHighlight { row } => {
                if let Some(row) = rows.get_mut(row) {
                    clear_highlight(row);
                }
            }
        }
    }
}

/// Runs every pending task against the page's timesheet table.
///
/// A written snapshot is a static artifact, so highlight removals still
/// pending when it is handed back are applied first.
pub fn settle(page: &mut PageSnapshot, deferred: &mut Deferred) {
    let tasks = deferred.take_all();
    if let Ok(table) = page.timesheet_table_mut() {
        run_tasks(&mut table.rows, tasks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Row;
    use crate::row::InputField;
    use crate::schedule::ManualClock;
    use crate::tests::{mk_page, mk_row};
    use serde_json::json;

    #[derive(Default)]
    struct Recorder {
        updates: Vec<Progress>,
        finished: Option<(String, Option<Duration>)>,
        aborted: Option<(ImportError, Duration)>,
    }

    impl ProgressSink for Recorder {
        fn update(&mut self, progress: &Progress) {
            self.updates.push(progress.clone());
        }

        fn finish(&mut self, summary: &str, dismiss_after: Option<Duration>) {
            self.finished = Some((summary.to_string(), dismiss_after));
        }

        fn abort(&mut self, error: &ImportError, dismiss_after: Duration) {
            self.aborted = Some((error.clone(), dismiss_after));
        }
    }

    fn rows(page: &PageSnapshot) -> &[Row] {
        &page.timesheet_table().unwrap().rows
    }

    fn values(row: &Row) -> (&str, &str) {
        (
            row.hours_input().map(|i| i.value()).unwrap_or(""),
            row.text_input().map(|i| i.value()).unwrap_or(""),
        )
    }

    #[test]
    fn fills_only_the_matching_row() {
        let mut page = mk_page(&["01 Sa", "02 So", "03 Mo"]);
        let raw = json!([{"date": "2024-06-02", "hours": "7.5", "text": "Standup"}]);
        let clock = ManualClock::new();
        let mut sink = Recorder::default();

        let report = fill_timesheet(&raw, &mut page, &clock, &mut sink).unwrap();

        assert_eq!(report.outcome, FillOutcome { total: 3, succeeded: 1, failed: 0 });
        assert_eq!(report.state, PassState::AllSucceeded);
        let rows = rows(&page);
        assert_eq!(values(&rows[0]), ("", ""));
        assert_eq!(values(&rows[1]), ("7.5", "Standup"));
        assert_eq!(values(&rows[2]), ("", ""));
        assert!(rows[0].events.is_empty());
        assert!(rows[2].events.is_empty());
        assert_eq!(
            sink.finished,
            Some((
                "Import successful! 1 of 3 rows imported.".to_string(),
                Some(SUCCESS_DISMISS_DELAY)
            ))
        );
    }

    #[test]
    fn rows_labelled_with_non_ascii_digits_are_not_counted() {
        let mut page = mk_page(&["01", "٠٢ So", "03"]);
        let raw = json!([{"date": "2024-06-01", "hours": "8", "text": "Review"}]);
        let clock = ManualClock::new();

        let report = fill_timesheet(&raw, &mut page, &clock, &mut ()).unwrap();

        assert_eq!(report.outcome, FillOutcome { total: 2, succeeded: 1, failed: 0 });
        assert_eq!(values(&rows(&page)[1]), ("", ""));
    }

    #[test]
    fn missing_inputs_count_as_failed_and_pass_continues() {
        let mut page = mk_page(&["01", "02", "03"]);
        page.tables[0].rows[1].inputs.clear();
        let raw = json!([
            {"date": "2024-06-01", "hours": "8", "text": "A"},
            {"date": "2024-06-02", "hours": "8", "text": "B"},
            {"date": "2024-06-03", "hours": "8", "text": "C"}
        ]);
        let clock = ManualClock::new();
        let mut sink = Recorder::default();

        let report = fill_timesheet(&raw, &mut page, &clock, &mut sink).unwrap();

        assert_eq!(report.outcome, FillOutcome { total: 3, succeeded: 2, failed: 1 });
        assert_eq!(report.state, PassState::PartialFailure);
        assert_eq!(report.summary, "Import finished. 2 of 3 rows imported, 1 failed.");
        let rows = rows(&page);
        assert_eq!(values(&rows[0]), ("8", "A"));
        assert_eq!(values(&rows[2]), ("8", "C"));
        assert_eq!(sink.finished.unwrap().1, None);
    }

    #[test]
    fn progress_is_reported_after_each_labelled_row() {
        let mut page = mk_page(&["01", "02"]);
        let mut footer = mk_row("Summe");
        footer.cells[0].classes.clear();
        page.tables[0].rows.push(footer);
        let raw = json!([{"date": "2024-06-02", "hours": "8", "text": "B"}]);
        let clock = ManualClock::new();
        let mut updates: Vec<Progress> = Vec::new();

        fill_timesheet(&raw, &mut page, &clock, &mut updates).unwrap();

        let pcts: Vec<u8> = updates.iter().map(|p| p.percentage).collect();
        assert_eq!(pcts, vec![33, 67]);
        assert_eq!(updates[1].succeeded, 1);
        assert_eq!(updates[1].table_rows, 3);
    }

    #[test]
    fn validation_errors_leave_page_untouched() {
        let mut page = mk_page(&["01"]);
        let before = page.clone();
        let clock = ManualClock::new();

        let err = fill_timesheet(&json!([]), &mut page, &clock, &mut ()).unwrap_err();
        assert_eq!(err, ImportError::InvalidFormat);

        let err = fill_timesheet(&json!([{"date": "2024-06-01"}]), &mut page, &clock, &mut ())
            .unwrap_err();
        assert_eq!(err, ImportError::InvalidStructure);
        assert_eq!(page, before);
    }

    #[test]
    fn missing_table_aborts_with_long_dismissal() {
        let mut page = mk_page(&["01"]);
        page.tables[0].classes.clear();
        let raw = json!([{"date": "2024-06-01", "hours": "8", "text": "A"}]);
        let clock = ManualClock::new();
        let mut sink = Recorder::default();

        let err = fill_timesheet(&raw, &mut page, &clock, &mut sink).unwrap_err();

        assert_eq!(err, ImportError::TableNotFound);
        assert_eq!(sink.aborted, Some((ImportError::TableNotFound, FAILURE_DISMISS_DELAY)));
        assert!(sink.updates.is_empty());
    }

    #[test]
    fn rows_are_filled_sequentially_with_feedback_pause() {
        let mut page = mk_page(&["01", "02", "03"]);
        let raw = json!([
            {"date": "2024-06-01", "hours": "8", "text": "A"},
            {"date": "2024-06-03", "hours": "8", "text": "C"}
        ]);
        let clock = ManualClock::new();

        let report = fill_timesheet(&raw, &mut page, &clock, &mut ()).unwrap();

        assert_eq!(clock.now(), Duration::from_millis(200));
        let due: Vec<Duration> = report.deferred.pending().iter().map(|s| s.due).collect();
        assert_eq!(due, vec![Duration::from_millis(2100), Duration::from_millis(2200)]);
    }

    #[test]
    fn expired_highlights_are_cleared_during_long_passes() {
        let labels: Vec<String> = (1..=25).map(|d| format!("{d:02}")).collect();
        let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
        let mut page = mk_page(&labels);
        let raw: Vec<Value> = (1..=25)
            .map(|d| json!({"date": format!("2024-06-{d:02}"), "hours": "8", "text": "x"}))
            .collect();
        let clock = ManualClock::new();

        let mut report = fill_timesheet(&Value::Array(raw), &mut page, &clock, &mut ()).unwrap();

        let table = page.timesheet_table().unwrap();
        assert!(!table.rows[0].hours_input().unwrap().is_highlighted());
        assert!(table.rows[24].hours_input().unwrap().is_highlighted());

        settle(&mut page, &mut report.deferred);
        let table = page.timesheet_table().unwrap();
        assert!(table.rows.iter().all(|r| !r.text_input().unwrap().is_highlighted()));
        assert!(report.deferred.is_empty());
    }

    #[test]
    fn locked_rows_are_processed_but_not_counted() {
        let mut page = mk_page(&["01", "02"]);
        let row = &mut page.tables[0].rows[0];
        row.classes.push("weekend".to_string());
        row.inputs[0].readonly = true;
        let raw = json!([
            {"date": "2024-06-01", "hours": "8", "text": "A"},
            {"date": "2024-06-02", "hours": "8", "text": "B"}
        ]);
        let clock = ManualClock::new();

        let report = fill_timesheet(&raw, &mut page, &clock, &mut ()).unwrap();

        assert_eq!(report.outcome, FillOutcome { total: 2, succeeded: 1, failed: 0 });
        assert_eq!(values(&rows(&page)[0]), ("", ""));
    }
}
