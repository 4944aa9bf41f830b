//! Plain-text rendering helpers for imported data.
//!
//! Preview line: `2024-06-02: 7.5 - Standup`

use crate::entry::TimeEntry;

pub const PREVIEW_ENTRIES: usize = 3;
pub const PREVIEW_TEXT_CHARS: usize = 50;

/// Up to `max` preview lines, then `...` if more entries exist.
pub fn format_preview(entries: &[TimeEntry], max: usize) -> Vec<String> {
    let mut lines: Vec<String> = entries.iter().take(max).map(format_entry_line).collect();
    if entries.len() > max {
        lines.push("...".to_string());
    }
    lines
}

pub fn format_entry_line(entry: &TimeEntry) -> String {
    format!(
        "{}: {} - {}",
        entry.date,
        entry.hours,
        truncate_text(&entry.text, PREVIEW_TEXT_CHARS)
    )
}

/// Shortens `text` to `max_chars` characters followed by `...`.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// The entry's date in the user's format, or the raw date if it is not a real one.
pub fn format_entry_date(entry: &TimeEntry, date_format: &str) -> String {
    entry
        .calendar_date()
        .map(|d| d.format(date_format).to_string())
        .unwrap_or_else(|| entry.date.clone())
}
