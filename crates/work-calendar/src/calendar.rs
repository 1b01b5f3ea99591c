//! Working-day queries over one or more holiday tables.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use tracing::{debug, warn};

use crate::error::{CalendarError, Result};
use crate::table::HolidayTable;

/// What to do with dates whose year has no holiday table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UncoveredYear {
    /// Fail with [`CalendarError::UncoveredYear`].
    #[default]
    Reject,
    /// Apply the Saturday/Sunday rule only.
    WeekendsOnly,
}

impl std::str::FromStr for UncoveredYear {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "weekends-only" | "weekends_only" | "weekends" => Ok(Self::WeekendsOnly),
            other => Err(format!("unknown uncovered-year policy: {other}")),
        }
    }
}

/// Answers "is this a working day" for the years it has tables for.
///
/// A date is a working day iff its weekday is not a weekend day of its year's
/// table and it is not a holiday or transferred holiday in that table.
#[derive(Debug, Clone)]
pub struct WorkCalendar {
    tables: BTreeMap<i32, HolidayTable>,
    uncovered: UncoveredYear,
}

impl WorkCalendar {
    /// Create a calendar covering the table's year.
    pub fn new(table: HolidayTable) -> Self {
        Self {
            tables: BTreeMap::from([(table.year(), table)]),
            uncovered: UncoveredYear::default(),
        }
    }

    /// The built-in 2026 Russian calendar.
    pub fn russia_2026() -> Self {
        Self::new(HolidayTable::russia_2026())
    }

    /// Add a table, replacing any existing table for the same year.
    pub fn with_table(mut self, table: HolidayTable) -> Self {
        self.tables.insert(table.year(), table);
        self
    }

    pub fn with_uncovered_year(mut self, policy: UncoveredYear) -> Self {
        self.uncovered = policy;
        self
    }

    pub fn uncovered_year_policy(&self) -> UncoveredYear {
        self.uncovered
    }

    /// Years with a holiday table, ascending.
    pub fn covered_years(&self) -> impl Iterator<Item = i32> + '_ {
        self.tables.keys().copied()
    }

    pub fn table(&self, year: i32) -> Option<&HolidayTable> {
        self.tables.get(&year)
    }

    /// Whether the date is a working day.
    pub fn is_working_day(&self, date: NaiveDate) -> Result<bool> {
        match self.tables.get(&date.year()) {
            Some(table) => Ok(!table.is_weekend(date.weekday()) && !table.is_holiday(date)),
            None => {
                self.check_uncovered(date.year())?;
                debug!(%date, "No holiday table for year, using weekend rule only");
                Ok(weekend_rule(date))
            }
        }
    }

    /// Working days of the ISO week containing `date`, Monday first.
    ///
    /// When `date` itself is covered, days of the week that spill into an
    /// uncovered neighbouring year fall back to the weekend rule whatever
    /// the policy.
    pub fn working_days_in_week(&self, date: NaiveDate) -> Result<Vec<NaiveDate>> {
        let anchored = self.tables.contains_key(&date.year());
        let mut spilled = false;
        let mut days = Vec::with_capacity(7);
        for day in monday_of(date).iter_days().take(7) {
            let working = match self.tables.get(&day.year()) {
                Some(_) => self.is_working_day(day)?,
                None if anchored => {
                    spilled = true;
                    weekend_rule(day)
                }
                None => self.is_working_day(day)?,
            };
            if working {
                days.push(day);
            }
        }
        if spilled {
            warn!(%date, "Week runs into a year without a holiday table, using weekend rule there");
        }
        Ok(days)
    }

    /// Working days of the month, in order.
    pub fn working_days_in_month(&self, year: i32, month: u32) -> Result<Vec<NaiveDate>> {
        let (first, next) = month_bounds(year, month)?;
        if !self.tables.contains_key(&year) {
            self.check_uncovered(year)?;
            warn!(year, month, "No holiday table for year, using weekend rule only");
        }
        let mut days = Vec::with_capacity(23);
        for day in first.iter_days().take_while(|d| *d < next) {
            if self.is_working_day(day)? {
                days.push(day);
            }
        }
        Ok(days)
    }

    /// Holiday name for the date, if its year is covered and it is a holiday.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.tables.get(&date.year())?.holiday_name(date)
    }

    /// Whether the date is a shortened pre-holiday day. Informational only.
    pub fn is_shortened_day(&self, date: NaiveDate) -> bool {
        self.tables
            .get(&date.year())
            .is_some_and(|table| table.is_shortened(date))
    }

    /// Fails for an uncovered year unless the policy allows the weekend rule.
    fn check_uncovered(&self, year: i32) -> Result<()> {
        match self.uncovered {
            UncoveredYear::Reject => Err(CalendarError::UncoveredYear {
                year,
                covered: self.covered_list(),
            }),
            UncoveredYear::WeekendsOnly => Ok(()),
        }
    }

    fn covered_list(&self) -> String {
        if self.tables.is_empty() {
            return "none".to_string();
        }
        self.tables
            .keys()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn weekend_rule(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// ISO-8601 week number (1..=53).
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Monday of the ISO week containing `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// First day of the month and first day of the following month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || CalendarError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    Ok((first, next))
}

/// Number of calendar days in the month.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let (first, next) = month_bounds(year, month)?;
    Ok((next - first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar() -> WorkCalendar {
        WorkCalendar::russia_2026()
    }

    #[test]
    fn holidays_and_weekends_are_not_working_days() {
        let cal = calendar();
        assert!(!cal.is_working_day(date(2026, 1, 1)).unwrap());
        assert!(!cal.is_working_day(date(2026, 5, 11)).unwrap());
        // Saturday and Sunday
        assert!(!cal.is_working_day(date(2026, 1, 17)).unwrap());
        assert!(!cal.is_working_day(date(2026, 1, 18)).unwrap());
        // Monday, not listed
        assert!(cal.is_working_day(date(2026, 1, 12)).unwrap());
    }

    #[test]
    fn every_day_of_2026_follows_the_rule() {
        let cal = calendar();
        let table = HolidayTable::russia_2026();
        for day in date(2026, 1, 1).iter_days().take_while(|d| d.year() == 2026) {
            let weekend = matches!(day.weekday(), Weekday::Sat | Weekday::Sun);
            let expected = !weekend && !table.is_holiday(day);
            assert_eq!(cal.is_working_day(day).unwrap(), expected, "{day}");
        }
    }

    #[test]
    fn working_days_in_week_filters_monday_to_sunday() {
        let cal = calendar();
        // Wednesday 2026-01-14
        let week = cal.working_days_in_week(date(2026, 1, 14)).unwrap();
        assert_eq!(
            week,
            (12..=16).map(|d| date(2026, 1, d)).collect::<Vec<_>>()
        );

        // Week of 2026-05-11: Monday is a transferred holiday
        let week = cal.working_days_in_week(date(2026, 5, 15)).unwrap();
        assert_eq!(week.first(), Some(&date(2026, 5, 12)));
        assert_eq!(week.len(), 4);
    }

    #[test]
    fn new_year_holiday_week_has_no_working_days() {
        // 2026-01-05..09 are all holidays
        let week = calendar().working_days_in_week(date(2026, 1, 7)).unwrap();
        assert!(week.is_empty());
    }

    #[test]
    fn last_week_of_covered_year_spills_into_next_year() {
        // 2026-12-28 (Monday) .. 2027-01-03 (Sunday), 2027 has no table
        let cal = calendar();
        let week = cal.working_days_in_week(date(2026, 12, 30)).unwrap();
        let mut expected: Vec<_> = (28..=31).map(|d| date(2026, 12, d)).collect();
        expected.push(date(2027, 1, 1));
        assert_eq!(week, expected);

        // Asking from the uncovered side still fails
        assert!(matches!(
            cal.working_days_in_week(date(2027, 1, 1)),
            Err(CalendarError::UncoveredYear { year: 2027, .. })
        ));
    }

    #[test]
    fn uncovered_month_under_weekends_only() {
        let cal = calendar().with_uncovered_year(UncoveredYear::WeekendsOnly);
        // March 2027 has 23 weekdays
        assert_eq!(cal.working_days_in_month(2027, 3).unwrap().len(), 23);
        assert!(matches!(
            calendar().working_days_in_month(2027, 3),
            Err(CalendarError::UncoveredYear { year: 2027, .. })
        ));
    }

    #[test]
    fn week_of_sunday_starts_on_previous_monday() {
        let cal = calendar();
        let week = cal.working_days_in_week(date(2026, 1, 18)).unwrap();
        assert_eq!(week.first(), Some(&date(2026, 1, 12)));
    }

    #[test]
    fn working_days_in_month_partition() {
        let cal = calendar();
        let table = HolidayTable::russia_2026();
        for month in 1..=12 {
            let working = cal.working_days_in_month(2026, month).unwrap();
            let (first, next) = month_bounds(2026, month).unwrap();
            let rest: Vec<_> = first
                .iter_days()
                .take_while(|d| *d < next)
                .filter(|d| {
                    matches!(d.weekday(), Weekday::Sat | Weekday::Sun) || table.is_holiday(*d)
                })
                .collect();
            assert_eq!(
                working.len() + rest.len(),
                days_in_month(2026, month).unwrap() as usize
            );
            assert!(working.windows(2).all(|w| w[0] < w[1]));
            assert!(working.iter().all(|d| !rest.contains(d)));
        }
    }

    #[test]
    fn january_2026_has_fifteen_working_days() {
        let days = calendar().working_days_in_month(2026, 1).unwrap();
        assert_eq!(days.len(), 15);
        assert_eq!(days.first(), Some(&date(2026, 1, 12)));
    }

    #[test]
    fn uncovered_year_is_rejected_by_default() {
        let result = calendar().is_working_day(date(2027, 3, 1));
        assert!(matches!(
            result,
            Err(CalendarError::UncoveredYear { year: 2027, .. })
        ));
    }

    #[test]
    fn uncovered_year_weekends_only() {
        let cal = calendar().with_uncovered_year(UncoveredYear::WeekendsOnly);
        assert!(cal.is_working_day(date(2027, 1, 1)).unwrap());
        assert!(!cal.is_working_day(date(2027, 1, 2)).unwrap());
    }

    #[test]
    fn invalid_month() {
        assert!(matches!(
            calendar().working_days_in_month(2026, 13),
            Err(CalendarError::InvalidMonth { month: 13, .. })
        ));
    }

    #[test]
    fn iso_weeks() {
        assert_eq!(iso_week_number(date(2026, 1, 1)), 1);
        assert_eq!(iso_week_number(date(2026, 1, 12)), 3);
        assert_eq!(iso_week_number(date(2026, 12, 31)), 53);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2026, 2).unwrap(), 28);
        assert_eq!(days_in_month(2028, 2).unwrap(), 29);
        assert_eq!(days_in_month(2026, 12).unwrap(), 31);
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("reject".parse::<UncoveredYear>(), Ok(UncoveredYear::Reject));
        assert_eq!(
            "Weekends-Only".parse::<UncoveredYear>(),
            Ok(UncoveredYear::WeekendsOnly)
        );
        assert!("maybe".parse::<UncoveredYear>().is_err());
    }
}
