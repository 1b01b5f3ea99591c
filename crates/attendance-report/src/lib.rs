//! Attendance reports for the office attendance tracker.
//!
//! The [`ReportEngine`] merges the working days of a period (from
//! [`work_calendar::WorkCalendar`]) with the user's marks (from the
//! [`database`] crate) and renders the result as text or as a PNG calendar.
//!
//! # Example
//!
//! ```no_run
//! use attendance_report::ReportEngine;
//! use database::Database;
//! use work_calendar::WorkCalendar;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("sqlite:office_visits.db?mode=rwc").await?;
//! db.migrate().await?;
//!
//! let engine = ReportEngine::new(db, WorkCalendar::russia_2026());
//! println!("{}", engine.generate_text_report(42, 2026, 1).await?);
//! let png = engine.generate_image_report(42, 2026, 1).await?;
//! std::fs::write("january.png", png)?;
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod render;
pub mod summary;
pub mod text;

pub use engine::ReportEngine;
pub use error::{ReportError, Result};
pub use render::{CalendarRenderer, FontKind};
pub use summary::{AttendancePolicy, DayEntry, DayStatus, MonthSummary, WeekSummary};
