//! Merging working days with attendance marks.
//!
//! Everything here is pure: callers fetch working days from the calendar and
//! marks from the store, and these functions classify each working day.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use database::VisitRecord;
use serde::{Deserialize, Serialize};

/// The minimum-attendance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendancePolicy {
    /// Office days required in every week that has working days.
    pub min_office_days_per_week: usize,
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            min_office_days_per_week: 1,
        }
    }
}

/// Classification of a single working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    InOffice,
    Remote,
    /// No mark and the day is not in the future.
    Unmarked,
    /// No mark and the day is after today.
    Planned,
}

impl DayStatus {
    /// Emoji used in text reports.
    pub fn glyph(self) -> &'static str {
        match self {
            DayStatus::InOffice => "🏢",
            DayStatus::Remote => "🏠",
            DayStatus::Unmarked => "❓",
            DayStatus::Planned => "⏳",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayStatus::InOffice => "in office",
            DayStatus::Remote => "remote",
            DayStatus::Unmarked => "not marked",
            DayStatus::Planned => "planned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub status: DayStatus,
}

/// Working days of one ISO week with their classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub iso_year: i32,
    pub week: u32,
    pub days: Vec<DayEntry>,
    pub office_count: usize,
    /// Office days needed for compliance.
    pub required: usize,
}

impl WeekSummary {
    fn new(date: NaiveDate, policy: &AttendancePolicy) -> Self {
        let iso = date.iso_week();
        Self {
            iso_year: iso.year(),
            week: iso.week(),
            days: Vec::new(),
            office_count: 0,
            required: policy.min_office_days_per_week,
        }
    }

    fn contains(&self, date: NaiveDate) -> bool {
        let iso = date.iso_week();
        iso.year() == self.iso_year && iso.week() == self.week
    }

    fn push(&mut self, entry: DayEntry) {
        if entry.status == DayStatus::InOffice {
            self.office_count += 1;
        }
        self.days.push(entry);
    }

    pub fn is_compliant(&self) -> bool {
        self.office_count >= self.required
    }

    pub fn count(&self, status: DayStatus) -> usize {
        self.days.iter().filter(|d| d.status == status).count()
    }
}

/// A month of working days grouped by ISO week, with totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<WeekSummary>,
}

impl MonthSummary {
    pub fn working_days(&self) -> usize {
        self.weeks.iter().map(|w| w.days.len()).sum()
    }

    pub fn office_days(&self) -> usize {
        self.weeks.iter().map(|w| w.office_count).sum()
    }

    pub fn remote_days(&self) -> usize {
        self.weeks.iter().map(|w| w.count(DayStatus::Remote)).sum()
    }

    pub fn unmarked_days(&self) -> usize {
        self.weeks.iter().map(|w| w.count(DayStatus::Unmarked)).sum()
    }

    /// Share of working days spent in the office, rounded to one decimal.
    /// `None` when the month has no working days.
    pub fn office_percentage(&self) -> Option<f64> {
        let working = self.working_days();
        if working == 0 {
            return None;
        }
        let percent = self.office_days() as f64 / working as f64 * 100.0;
        Some((percent * 10.0).round() / 10.0)
    }

    pub fn compliant_weeks(&self) -> usize {
        self.weeks.iter().filter(|w| w.is_compliant()).count()
    }

    /// Status of every working day, keyed by date.
    pub fn statuses(&self) -> HashMap<NaiveDate, DayStatus> {
        self.weeks
            .iter()
            .flat_map(|w| w.days.iter())
            .map(|d| (d.date, d.status))
            .collect()
    }
}

fn index_visits(visits: &[VisitRecord]) -> HashMap<NaiveDate, &VisitRecord> {
    visits.iter().map(|v| (v.visit_date, v)).collect()
}

/// Classify a day. Without a mark it is `Planned` when after `today`,
/// otherwise `Unmarked`.
fn classify(
    date: NaiveDate,
    visits: &HashMap<NaiveDate, &VisitRecord>,
    today: Option<NaiveDate>,
) -> DayStatus {
    match visits.get(&date) {
        Some(visit) if visit.was_in_office => DayStatus::InOffice,
        Some(_) => DayStatus::Remote,
        None if today.is_some_and(|today| date > today) => DayStatus::Planned,
        None => DayStatus::Unmarked,
    }
}

/// Group `working_days` (chronological) into ISO-week buckets.
fn group_by_week(
    working_days: &[NaiveDate],
    visits: &[VisitRecord],
    today: Option<NaiveDate>,
    policy: &AttendancePolicy,
) -> Vec<WeekSummary> {
    let lookup = index_visits(visits);
    let mut weeks: Vec<WeekSummary> = Vec::new();

    for &date in working_days {
        let entry = DayEntry {
            date,
            status: classify(date, &lookup, today),
        };
        match weeks.last_mut() {
            Some(week) if week.contains(date) => week.push(entry),
            _ => {
                let mut week = WeekSummary::new(date, policy);
                week.push(entry);
                weeks.push(week);
            }
        }
    }

    weeks
}

/// Summarize a month. Days without a mark are `Unmarked` regardless of date.
pub fn summarize_month(
    year: i32,
    month: u32,
    working_days: &[NaiveDate],
    visits: &[VisitRecord],
    policy: &AttendancePolicy,
) -> MonthSummary {
    MonthSummary {
        year,
        month,
        weeks: group_by_week(working_days, visits, None, policy),
    }
}

/// Summarize the week containing `today`. Unmarked days after `today` are
/// `Planned`.
pub fn summarize_week(
    today: NaiveDate,
    working_days: &[NaiveDate],
    visits: &[VisitRecord],
    policy: &AttendancePolicy,
) -> WeekSummary {
    group_by_week(working_days, visits, Some(today), policy)
        .into_iter()
        .next()
        .unwrap_or_else(|| WeekSummary::new(today, policy))
}
