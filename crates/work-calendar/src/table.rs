//! Year-scoped holiday tables.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// The 2026 Russian production calendar. Transferred days still need
/// official verification, so it ships as data rather than code.
const RUSSIA_2026: &str = include_str!("../data/russia_2026.json");

/// A named non-working date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

/// On-disk representation of a holiday table.
#[derive(Debug, Serialize, Deserialize)]
struct HolidayTableFile {
    year: i32,
    #[serde(default)]
    jurisdiction: String,
    #[serde(default)]
    holidays: Vec<Holiday>,
    #[serde(default)]
    transferred: Vec<Holiday>,
    #[serde(default)]
    shortened: Vec<NaiveDate>,
    #[serde(default = "default_weekend")]
    weekend: Vec<Weekday>,
}

fn default_weekend() -> Vec<Weekday> {
    vec![Weekday::Sat, Weekday::Sun]
}

/// Holidays, transferred holidays and shortened days for a single year.
///
/// Every entry is guaranteed to fall inside [`HolidayTable::year`]. Shortened
/// (pre-holiday) days are informational and never change working-day status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayTable {
    year: i32,
    jurisdiction: String,
    holidays: BTreeMap<NaiveDate, String>,
    transferred: BTreeMap<NaiveDate, String>,
    shortened: BTreeSet<NaiveDate>,
    weekend: Vec<Weekday>,
}

impl HolidayTable {
    /// Create an empty table: weekends only, Saturday and Sunday.
    pub fn new(year: i32, jurisdiction: impl Into<String>) -> Self {
        Self {
            year,
            jurisdiction: jurisdiction.into(),
            holidays: BTreeMap::new(),
            transferred: BTreeMap::new(),
            shortened: BTreeSet::new(),
            weekend: default_weekend(),
        }
    }

    /// The built-in 2026 Russian table.
    pub fn russia_2026() -> Self {
        Self::from_json_str(RUSSIA_2026).expect("embedded 2026 holiday table is valid")
    }

    /// Parse a table from JSON.
    ///
    /// ```
    /// let table = work_calendar::HolidayTable::from_json_str(
    ///     r#"{ "year": 2027, "holidays": [{ "date": "2027-01-01", "name": "New Year" }] }"#,
    /// ).unwrap();
    /// assert_eq!(table.year(), 2027);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: HolidayTableFile = serde_json::from_str(json)?;
        Self::try_from(file)
    }

    /// Read and parse a table from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CalendarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Serialize the table back to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&HolidayTableFile::from(self))?)
    }

    /// Add a named holiday.
    pub fn with_holiday(mut self, date: NaiveDate, name: impl Into<String>) -> Result<Self> {
        self.check_year(date)?;
        if self.transferred.contains_key(&date) || self.holidays.contains_key(&date) {
            return Err(CalendarError::DuplicateEntry(date));
        }
        self.holidays.insert(date, name.into());
        Ok(self)
    }

    /// Add a transferred holiday (a day off moved from a weekend).
    pub fn with_transferred(mut self, date: NaiveDate, name: impl Into<String>) -> Result<Self> {
        self.check_year(date)?;
        if self.holidays.contains_key(&date) || self.transferred.contains_key(&date) {
            return Err(CalendarError::DuplicateEntry(date));
        }
        self.transferred.insert(date, name.into());
        Ok(self)
    }

    /// Add a shortened pre-holiday day.
    pub fn with_shortened(mut self, date: NaiveDate) -> Result<Self> {
        self.check_year(date)?;
        self.shortened.insert(date);
        Ok(self)
    }

    /// Replace the weekend weekdays.
    pub fn with_weekend(mut self, weekend: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekend = weekend.into_iter().collect();
        self
    }

    fn check_year(&self, date: NaiveDate) -> Result<()> {
        if date.year() != self.year {
            return Err(CalendarError::YearMismatch {
                date,
                year: self.year,
            });
        }
        Ok(())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn jurisdiction(&self) -> &str {
        &self.jurisdiction
    }

    /// Whether the date is a holiday or a transferred holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date) || self.transferred.contains_key(&date)
    }

    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        self.weekend.contains(&weekday)
    }

    pub fn is_shortened(&self, date: NaiveDate) -> bool {
        self.shortened.contains(&date)
    }

    /// Name of the holiday on this date, if any.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.holidays
            .get(&date)
            .or_else(|| self.transferred.get(&date))
            .map(String::as_str)
    }

    /// All non-working dates (holidays and transfers), ascending.
    pub fn non_working_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let all: BTreeSet<NaiveDate> = self
            .holidays
            .keys()
            .chain(self.transferred.keys())
            .copied()
            .collect();
        all.into_iter()
    }

    pub fn shortened_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.shortened.iter().copied()
    }
}

impl TryFrom<HolidayTableFile> for HolidayTable {
    type Error = CalendarError;

    fn try_from(file: HolidayTableFile) -> Result<Self> {
        let mut table = HolidayTable::new(file.year, file.jurisdiction).with_weekend(file.weekend);
        for holiday in file.holidays {
            table = table.with_holiday(holiday.date, holiday.name)?;
        }
        for holiday in file.transferred {
            table = table.with_transferred(holiday.date, holiday.name)?;
        }
        for date in file.shortened {
            table = table.with_shortened(date)?;
        }
        Ok(table)
    }
}

impl From<&HolidayTable> for HolidayTableFile {
    fn from(table: &HolidayTable) -> Self {
        let named = |map: &BTreeMap<NaiveDate, String>| {
            map.iter()
                .map(|(date, name)| Holiday {
                    date: *date,
                    name: name.clone(),
                })
                .collect()
        };
        Self {
            year: table.year,
            jurisdiction: table.jurisdiction.clone(),
            holidays: named(&table.holidays),
            transferred: named(&table.transferred),
            shortened: table.shortened.iter().copied().collect(),
            weekend: table.weekend.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn russia_2026_contents() {
        let table = HolidayTable::russia_2026();
        assert_eq!(table.year(), 2026);
        assert_eq!(table.jurisdiction(), "RU");

        for day in 1..=9 {
            assert!(table.is_holiday(date(2026, 1, day)), "Jan {day}");
        }
        for (m, d) in [(2, 23), (3, 8), (5, 1), (5, 9), (5, 11), (6, 12), (11, 4)] {
            assert!(table.is_holiday(date(2026, m, d)), "{m}-{d}");
        }
        assert!(!table.is_holiday(date(2026, 1, 12)));
        assert_eq!(table.non_working_dates().count(), 16);
        assert_eq!(table.shortened_days().count(), 7);
        assert_eq!(table.holiday_name(date(2026, 6, 12)), Some("Russia Day"));
        assert!(table.holiday_name(date(2026, 5, 11)).is_some());
    }

    #[test]
    fn shortened_days_are_not_holidays() {
        let table = HolidayTable::russia_2026();
        assert!(table.is_shortened(date(2026, 4, 30)));
        assert!(!table.is_holiday(date(2026, 4, 30)));
    }

    #[test]
    fn rejects_entry_outside_year() {
        let json = r#"{ "year": 2027, "holidays": [{ "date": "2026-12-31", "name": "Eve" }] }"#;
        let result = HolidayTable::from_json_str(json);
        assert!(matches!(
            result,
            Err(CalendarError::YearMismatch { year: 2027, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_between_holidays_and_transfers() {
        let result = HolidayTable::new(2026, "RU")
            .with_holiday(date(2026, 5, 11), "A")
            .and_then(|t| t.with_transferred(date(2026, 5, 11), "B"));
        assert!(matches!(result, Err(CalendarError::DuplicateEntry(_))));
    }

    #[test]
    fn json_round_trip_preserves_table() {
        let table = HolidayTable::russia_2026();
        let json = table.to_json().unwrap();
        assert_eq!(HolidayTable::from_json_str(&json).unwrap(), table);
    }

    #[test]
    fn custom_weekend() {
        let table = HolidayTable::from_json_str(r#"{ "year": 2026, "weekend": ["Fri", "Sat"] }"#)
            .unwrap();
        assert!(table.is_weekend(Weekday::Fri));
        assert!(!table.is_weekend(Weekday::Sun));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = HolidayTable::from_json_file("/nonexistent/holidays.json");
        assert!(matches!(result, Err(CalendarError::Io { .. })));
    }
}
