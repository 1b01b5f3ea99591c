//! Report generation over the calendar and the attendance store.

use chrono::{Local, NaiveDate};
use database::{visit, Database};
use tracing::debug;
use work_calendar::{month_bounds, WorkCalendar};

use crate::error::Result;
use crate::render::{CalendarRenderer, CellState, MonthGrid};
use crate::summary::{summarize_month, summarize_week, AttendancePolicy, MonthSummary, WeekSummary};
use crate::text;

/// Builds monthly and weekly reports. Never writes to the store.
#[derive(Debug)]
pub struct ReportEngine {
    db: Database,
    calendar: WorkCalendar,
    policy: AttendancePolicy,
    renderer: CalendarRenderer,
}

impl ReportEngine {
    /// Create an engine with the default policy and font lookup.
    pub fn new(db: Database, calendar: WorkCalendar) -> Self {
        Self {
            db,
            calendar,
            policy: AttendancePolicy::default(),
            renderer: CalendarRenderer::default(),
        }
    }

    pub fn with_policy(mut self, policy: AttendancePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_renderer(mut self, renderer: CalendarRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    /// Working days of the month merged with the user's marks.
    pub async fn month_summary(&self, user_id: i64, year: i32, month: u32) -> Result<MonthSummary> {
        let working_days = self.calendar.working_days_in_month(year, month)?;
        let visits = visit::get_month_visits(self.db.pool(), user_id, year, month).await?;
        debug!(
            user_id,
            year,
            month,
            working_days = working_days.len(),
            visits = visits.len(),
            "Building month summary"
        );
        Ok(summarize_month(year, month, &working_days, &visits, &self.policy))
    }

    /// Working days of the week containing `today`, with later days planned.
    pub async fn week_summary_on(&self, user_id: i64, today: NaiveDate) -> Result<WeekSummary> {
        let working_days = self.calendar.working_days_in_week(today)?;
        let visits = visit::get_week_visits(self.db.pool(), user_id, today).await?;
        Ok(summarize_week(today, &working_days, &visits, &self.policy))
    }

    pub async fn generate_text_report(&self, user_id: i64, year: i32, month: u32) -> Result<String> {
        let summary = self.month_summary(user_id, year, month).await?;
        Ok(text::render_month(&summary))
    }

    /// PNG calendar grid of the month.
    pub async fn generate_image_report(
        &self,
        user_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<u8>> {
        let summary = self.month_summary(user_id, year, month).await?;
        let grid = self.month_grid(&summary)?;
        self.renderer.render_png(&grid)
    }

    /// Status of the current week according to the local clock.
    pub async fn get_current_week_status(&self, user_id: i64) -> Result<String> {
        self.get_week_status_on(user_id, Local::now().date_naive()).await
    }

    pub async fn get_week_status_on(&self, user_id: i64, today: NaiveDate) -> Result<String> {
        let week = self.week_summary_on(user_id, today).await?;
        Ok(text::render_week_status(&week))
    }

    fn month_grid(&self, summary: &MonthSummary) -> Result<MonthGrid> {
        let (first, next) = month_bounds(summary.year, summary.month)?;
        let statuses = summary.statuses();
        let cells = first
            .iter_days()
            .take_while(|day| *day < next)
            .map(|day| match statuses.get(&day) {
                Some(status) => CellState::Working(*status),
                None => CellState::NonWorking,
            })
            .collect();
        Ok(MonthGrid::new(first, cells))
    }
}
