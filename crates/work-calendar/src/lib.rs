//! Working-day calendar for the office attendance tracker.
//!
//! A [`WorkCalendar`] answers whether a date is a working day and lists the
//! working days of an ISO week or a calendar month. Holidays come from
//! year-scoped [`HolidayTable`] values injected at construction, so adding a
//! year or a jurisdiction is a configuration change.
//!
//! Only 2026 ships built in. Dates in other years fail with
//! [`CalendarError::UncoveredYear`] unless the calendar is configured with
//! [`UncoveredYear::WeekendsOnly`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use work_calendar::WorkCalendar;
//!
//! let calendar = WorkCalendar::russia_2026();
//! let new_year = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
//! assert!(!calendar.is_working_day(new_year).unwrap());
//!
//! let january = calendar.working_days_in_month(2026, 1).unwrap();
//! assert_eq!(january.len(), 15);
//! ```

pub mod calendar;
pub mod error;
pub mod format;
pub mod table;

pub use calendar::{
    days_in_month, iso_week_number, monday_of, month_bounds, UncoveredYear, WorkCalendar,
};
pub use error::{CalendarError, Result};
pub use format::{format_day_month, format_long_date, month_name, weekday_name, weekday_short};
pub use table::{Holiday, HolidayTable};
