//! Plain-text report rendering.

use std::fmt::Write;

use chrono::Datelike;
use work_calendar::{format_day_month, month_name, weekday_name};

use crate::summary::{DayStatus, MonthSummary, WeekSummary};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━";

fn requirement_glyph(week: &WeekSummary) -> &'static str {
    if week.is_compliant() {
        "✅"
    } else {
        "⚠️"
    }
}

/// Render the monthly report: totals, one block per ISO week, legend.
pub fn render_month(summary: &MonthSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "📊 Office attendance report");
    let _ = writeln!(out, "📅 {} {}", month_name(summary.month), summary.year);
    out.push('\n');

    let _ = writeln!(out, "📈 Summary:");
    let _ = writeln!(out, "  • Working days: {}", summary.working_days());
    let _ = writeln!(out, "  • In office: {} days", summary.office_days());
    let _ = writeln!(out, "  • Remote: {} days", summary.remote_days());
    if let Some(percent) = summary.office_percentage() {
        let _ = writeln!(out, "  • Office attendance: {:.1}%", percent);
    }
    out.push('\n');

    let _ = writeln!(out, "📋 By week:");
    out.push('\n');

    for week in &summary.weeks {
        let _ = writeln!(out, "Week {} {}", week.week, requirement_glyph(week));
        let _ = writeln!(out, "  Office days: {}", week.office_count);
        for day in &week.days {
            let _ = writeln!(
                out,
                "  {} {}",
                format_day_month(day.date),
                day.status.glyph()
            );
        }
        out.push('\n');
    }

    let _ = writeln!(out, "{RULE}");
    for status in [DayStatus::InOffice, DayStatus::Remote, DayStatus::Unmarked] {
        let _ = writeln!(out, "{} - {}", status.glyph(), status.label());
    }
    let _ = writeln!(out, "✅ - requirement met");
    let _ = write!(out, "⚠️ - office visit required");

    out
}

/// Render the current-week status with the requirement line.
pub fn render_week_status(week: &WeekSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "📅 Current week (week {})", week.week);
    out.push('\n');

    if week.days.is_empty() {
        let _ = write!(out, "No working days this week.");
        return out;
    }

    for day in &week.days {
        let _ = writeln!(
            out,
            "{} {} ({}) - {}",
            day.status.glyph(),
            weekday_name(day.date.weekday()),
            format_day_month(day.date),
            day.status.label()
        );
    }
    out.push('\n');

    let _ = writeln!(out, "Office days: {}", week.office_count);
    if week.is_compliant() {
        let _ = write!(out, "✅ Requirement met!");
    } else {
        let remaining = week.required - week.office_count;
        let _ = write!(
            out,
            "⚠️ At least {} office day{} required ({} more to go)",
            week.required,
            if week.required == 1 { "" } else { "s" },
            remaining
        );
    }

    out
}
