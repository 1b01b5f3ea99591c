//! Calendar error types.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur when building or querying a working calendar.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// The date's year has no holiday table and the calendar rejects such years.
    #[error("year {year} is not covered by the working calendar (covered: {covered})")]
    UncoveredYear { year: i32, covered: String },

    /// Month outside 1..=12, or a year chrono cannot represent.
    #[error("invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    /// A table entry does not fall inside the table's year.
    #[error("{date} does not belong to the {year} holiday table")]
    YearMismatch { date: NaiveDate, year: i32 },

    /// The same date is listed both as a holiday and a transferred holiday.
    #[error("duplicate holiday entry: {0}")]
    DuplicateEntry(NaiveDate),

    /// Holiday table JSON could not be parsed.
    #[error("holiday table JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Holiday table file could not be read.
    #[error("failed to read holiday table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for calendar operations.
pub type Result<T> = std::result::Result<T, CalendarError>;
