//! Grouping of entries by date and lookup of a group by day of month.

use crate::entry::TimeEntry;
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

/// Entries grouped by their exact `date` string, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedEntries {
    groups: Vec<(String, Vec<TimeEntry>)>,
}

impl GroupedEntries {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, date: &str) -> Option<&[TimeEntry]> {
        self.groups
            .iter()
            .find(|(d, _)| d == date)
            .map(|(_, entries)| entries.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TimeEntry])> {
        self.groups.iter().map(|(d, e)| (d.as_str(), e.as_slice()))
    }

    /// All grouped entries, group by group.
    pub fn flatten(&self) -> Vec<TimeEntry> {
        self.groups
            .iter()
            .flat_map(|(_, entries)| entries.iter().cloned())
            .collect()
    }

    fn push(&mut self, entry: &TimeEntry) {
        match self.groups.iter_mut().find(|(d, _)| *d == entry.date) {
            Some((_, entries)) => entries.push(entry.clone()),
            None => self.groups.push((entry.date.clone(), vec![entry.clone()])),
        }
    }
}

pub fn is_iso_date(date: &str) -> bool {
    ISO_DATE.is_match(date)
}

/// Partitions entries by exact date. Entries whose date is not `YYYY-MM-DD`
/// are dropped silently.
pub fn group(entries: &[TimeEntry]) -> GroupedEntries {
    let mut grouped = GroupedEntries::default();
    for entry in entries.iter().filter(|e| is_iso_date(&e.date)) {
        grouped.push(entry);
    }
    grouped
}

/// Returns the first group whose day of month equals `day` (two digits).
///
/// Month and year are ignored: if one import spans several months that share
/// a day of month, the group seen first wins for every row with that day.
pub fn find_for_day<'a>(grouped: &'a GroupedEntries, day: &str) -> Option<&'a [TimeEntry]> {
    grouped
        .iter()
        .find(|(date, _)| date.get(8..10) == Some(day))
        .map(|(_, entries)| entries)
}
