//! Error taxonomy for imports and fill passes.
//!
//! Every variant is recovered at the boundary where it occurs and shown to the
//! user as a short message. None of them is fatal to the process.

use thiserror::Error;

/// Errors raised while reading, validating or applying imported time entries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// Input is not a JSON array, or the array is empty.
    #[error("No valid data to import. Please copy a non-empty JSON array.")]
    InvalidFormat,

    /// At least one element lacks `date`, `hours` or `text`.
    #[error("The data structure is invalid. Please check the format (date, hours, text).")]
    InvalidStructure,

    /// The host page has no timesheet table.
    #[error("Timesheet table not found. Are you on the right page?")]
    TableNotFound,

    /// A row is missing its hours or text input.
    #[error("Input fields not found in the row.")]
    FieldsNotFound,

    #[error("No data found in the clipboard.")]
    ClipboardEmpty,

    #[error("Could not parse the JSON data: {0}")]
    ClipboardParseError(String),
}

/// Row-level failure. Caught per row and aggregated into the failed count.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FillError {
    #[error("Input fields not found in the row.")]
    FieldsNotFound,
}

impl From<FillError> for ImportError {
    fn from(err: FillError) -> Self {
        match err {
            FillError::FieldsNotFound => ImportError::FieldsNotFound,
        }
    }
}

/// Settings that fail validation are never persisted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Please enter a valid {target} URL (got '{url}').")]
    InvalidUrl { target: String, url: String },
}
