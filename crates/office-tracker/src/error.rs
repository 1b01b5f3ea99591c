//! Error types for the command-line tracker.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("database error: {0}")]
    Database(#[from] database::DatabaseError),

    #[error("calendar error: {0}")]
    Calendar(#[from] work_calendar::CalendarError),

    #[error("report error: {0}")]
    Report(#[from] attendance_report::ReportError),

    /// Writing the PNG report failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for tracker commands.
pub type Result<T> = std::result::Result<T, TrackerError>;
