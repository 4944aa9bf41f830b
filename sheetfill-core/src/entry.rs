use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One date/hours/text record from an imported dataset.
///
/// Values are kept verbatim: `hours` is free-form notation (`8:30`, `8.5h`)
/// and is never parsed or converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub date: String,
    pub hours: String,
    pub text: String,
}

impl TimeEntry {
    pub fn new(date: &str, hours: &str, text: &str) -> Self {
        Self {
            date: date.to_string(),
            hours: hours.to_string(),
            text: text.to_string(),
        }
    }

    /// Day-of-month part of an ISO `YYYY-MM-DD` date (`"2024-03-05"` → `"05"`).
    pub fn day_of_month(&self) -> Option<&str> {
        self.date.split('-').nth(2)
    }

    /// The entry's date as a calendar date, if it is a real one.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}
