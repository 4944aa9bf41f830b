//! Validation of externally supplied time entry data.

use crate::entry::TimeEntry;
use crate::error::ImportError;
use serde_json::{Map, Value};

const REQUIRED_KEYS: [&str; 3] = ["date", "hours", "text"];

/// Validates a JSON-decoded payload and returns its entries.
///
/// - Non-array or empty input fails with [`ImportError::InvalidFormat`].
/// - Every element must be an object holding `date`, `hours` and `text`.
///   Only presence is checked; a missing key anywhere fails the whole input
///   with [`ImportError::InvalidStructure`].
///
/// Entries are returned in input order without normalization. String values
/// are taken verbatim; other JSON scalars keep their JSON spelling.
pub fn validate(raw: &Value) -> Result<Vec<TimeEntry>, ImportError> {
    let items = match raw {
        Value::Array(items) if !items.is_empty() => items,
        _ => return Err(ImportError::InvalidFormat),
    };

    items
        .iter()
        .map(|item| match item {
            Value::Object(map) if has_required_keys(map) => Ok(TimeEntry {
                date: value_text(&map["date"]),
                hours: value_text(&map["hours"]),
                text: value_text(&map["text"]),
            }),
            _ => Err(ImportError::InvalidStructure),
        })
        .collect()
}

/// Decodes clipboard text and validates it.
///
/// Blank text is [`ImportError::ClipboardEmpty`]; text that is not JSON is
/// [`ImportError::ClipboardParseError`].
pub fn parse_clipboard_text(text: &str) -> Result<Vec<TimeEntry>, ImportError> {
    if text.trim().is_empty() {
        return Err(ImportError::ClipboardEmpty);
    }
    let raw: Value = serde_json::from_str(text)
        .map_err(|e| ImportError::ClipboardParseError(e.to_string()))?;
    validate(&raw)
}

fn has_required_keys(map: &Map<String, Value>) -> bool {
    REQUIRED_KEYS.iter().all(|key| map.contains_key(*key))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
