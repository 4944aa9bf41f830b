//! Capabilities the fill pass needs from a host-page table row.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Hours,
    Text,
}

/// An editable input owned by the host page.
pub trait InputField {
    fn value(&self) -> &str;
    fn set_value(&mut self, value: &str);
    fn is_readonly(&self) -> bool;
    fn set_highlight(&mut self, on: bool);
    fn is_highlighted(&self) -> bool;
}

/// Simultaneous mutable access to a row's two inputs.
pub struct RowFields<'a, F> {
    pub hours: &'a mut F,
    pub text: &'a mut F,
}

/// A table row on the host page. The fill pass never creates or removes rows.
pub trait TimesheetRow {
    type Field: InputField;

    /// Two-digit day of month shown in the row label, if the row has one.
    fn day_label(&self) -> Option<String>;

    /// Non-editable day (weekend, holiday) whose hours field is read-only.
    fn is_locked(&self) -> bool;

    /// Both the hours and the text input exist.
    fn has_editable_fields(&self) -> bool;

    fn fields_mut(&mut self) -> Option<RowFields<'_, Self::Field>>;

    /// Lets the host page react as if the user had typed `value`.
    fn notify_change(&mut self, field: FieldKind, value: &str);
}
