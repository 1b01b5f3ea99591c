//! Report error types.

use thiserror::Error;

/// Errors that can occur while building a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Reading attendance marks failed.
    #[error("database error: {0}")]
    Database(#[from] database::DatabaseError),

    /// The requested period is outside the working calendar.
    #[error("calendar error: {0}")]
    Calendar(#[from] work_calendar::CalendarError),

    /// PNG encoding failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
