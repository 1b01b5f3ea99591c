//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use attendance_report::AttendancePolicy;
use tracing::info;
use work_calendar::{CalendarError, HolidayTable, UncoveredYear, WorkCalendar};

/// Tracker configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL.
    pub database_url: String,
    /// Extra holiday table, replacing the built-in one for its year.
    pub holidays_file: Option<PathBuf>,
    /// Preferred TrueType font for image reports.
    pub report_font: Option<PathBuf>,
    /// Office days required per week.
    pub min_office_days: usize,
    /// Handling of dates outside the configured years.
    pub uncovered_years: UncoveredYear,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:office_visits.db?mode=rwc` |
    /// | `HOLIDAYS_FILE` | JSON holiday table | (built-in 2026 table only) |
    /// | `REPORT_FONT` | TrueType font for image reports | DejaVu Sans, else bitmap |
    /// | `MIN_OFFICE_DAYS` | Office days required per week | `1` |
    /// | `UNCOVERED_YEARS` | `reject` or `weekends-only` | `reject` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:office_visits.db?mode=rwc".to_string());

        let holidays_file = env::var("HOLIDAYS_FILE").ok().map(PathBuf::from);
        let report_font = env::var("REPORT_FONT").ok().map(PathBuf::from);

        let min_office_days = match env::var("MIN_OFFICE_DAYS") {
            Ok(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidMinOfficeDays(value))?,
            Err(_) => 1,
        };

        let uncovered_years = match env::var("UNCOVERED_YEARS") {
            Ok(value) => value.parse().map_err(ConfigError::InvalidUncoveredYears)?,
            Err(_) => UncoveredYear::default(),
        };

        Ok(Self {
            database_url,
            holidays_file,
            report_font,
            min_office_days,
            uncovered_years,
        })
    }

    /// Build the working calendar: the built-in table plus `HOLIDAYS_FILE`.
    pub fn calendar(&self) -> Result<WorkCalendar, ConfigError> {
        let mut calendar = WorkCalendar::russia_2026().with_uncovered_year(self.uncovered_years);
        if let Some(path) = &self.holidays_file {
            let table = HolidayTable::from_json_file(path)?;
            info!(
                year = table.year(),
                jurisdiction = table.jurisdiction(),
                "Loaded holiday table from {}",
                path.display()
            );
            calendar = calendar.with_table(table);
        }
        Ok(calendar)
    }

    pub fn policy(&self) -> AttendancePolicy {
        AttendancePolicy {
            min_office_days_per_week: self.min_office_days,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid MIN_OFFICE_DAYS value: {0}")]
    InvalidMinOfficeDays(String),

    #[error("Invalid UNCOVERED_YEARS value: {0}")]
    InvalidUncoveredYears(String),

    #[error("Invalid holiday table: {0}")]
    Holidays(#[from] CalendarError),
}
