//! Writing one entry into one row.

use crate::entry::TimeEntry;
use crate::error::FillError;
use crate::row::{FieldKind, InputField, TimesheetRow};
use crate::schedule::{Clock, Deferred, FEEDBACK_DELAY, HIGHLIGHT_DURATION, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFill {
    Written,
    /// Locked row, nothing touched. Counts as neither success nor failure.
    Skipped,
}

/// Writes `entry` into the row at `index`.
///
/// Values are copied verbatim, both fields are highlighted and a change
/// notification is raised for each. The call then pauses for
/// [`FEEDBACK_DELAY`] and queues the highlight removal after
/// [`HIGHLIGHT_DURATION`] without waiting for it.
pub fn fill_row<R: TimesheetRow>(
    row: &mut R,
    index: usize,
    entry: &TimeEntry,
    clock: &dyn Clock,
    deferred: &mut Deferred,
) -> Result<RowFill, FillError> {
    if row.is_locked() {
        return Ok(RowFill::Skipped);
    }
    if !row.has_editable_fields() {
        return Err(FillError::FieldsNotFound);
    }

    {
        let fields = row.fields_mut().ok_or(FillError::FieldsNotFound)?;
        fields.hours.set_highlight(true);
        fields.text.set_highlight(true);
        fields.hours.set_value(&entry.hours);
        fields.text.set_value(&entry.text);
    }
    row.notify_change(FieldKind::Hours, &entry.hours);
    row.notify_change(FieldKind::Text, &entry.text);

    clock.sleep(FEEDBACK_DELAY);
    deferred.schedule(clock, HIGHLIGHT_DURATION, Task::ClearHighlight { row: index });
    Ok(RowFill::Written)
}

/// Removes the highlight set by [`fill_row`].
pub fn clear_highlight<R: TimesheetRow>(row: &mut R) {
    if let Some(fields) = row.fields_mut() {
        fields.hours.set_highlight(false);
        fields.text.set_highlight(false);
    }
}
