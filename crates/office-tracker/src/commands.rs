//! Subcommand handlers.

use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use database::{user, visit, Database, UserProfile, VisitRecord};
use tracing::info;
use work_calendar::{format_long_date, WorkCalendar};

use attendance_report::render::DEFAULT_FONT_PATHS;
use attendance_report::{CalendarRenderer, ReportEngine};

use crate::config::Config;
use crate::error::{Result, TrackerError};
use crate::{Args, Command, Place};

pub async fn run(args: Args, config: &Config, db: Database, calendar: WorkCalendar) -> Result<()> {
    let today = Local::now().date_naive();
    let user_id = args.user;

    match args.command {
        Command::Register {
            username,
            first_name,
            last_name,
        } => {
            let profile = UserProfile {
                username,
                first_name,
                last_name,
            };
            user::upsert_user(db.pool(), user_id, &profile).await?;
            if let Some(stored) = user::get_user(db.pool(), user_id).await? {
                println!("👋 Registered {}", stored.display_name());
            }
        }

        Command::Mark { place, date, note } => {
            let date = date.unwrap_or(today);
            if !calendar.is_working_day(date)? {
                print_day_off(&calendar, date);
                return Ok(());
            }
            let record =
                visit::mark_visit(db.pool(), user_id, date, place == Place::Office, note.as_deref())
                    .await?;
            info!(user_id, %date, was_in_office = record.was_in_office, "Marked day");
            println!("✅ Saved.\n\n📅 {}\n{}", format_long_date(date), describe(&record));
        }

        Command::Unmark { date } => {
            let date = date.unwrap_or(today);
            if visit::delete_visit(db.pool(), user_id, date).await? {
                println!("🗑️ Removed the mark for {}", format_long_date(date));
            } else {
                println!("Nothing to remove for {}", format_long_date(date));
            }
        }

        Command::Today => {
            if !calendar.is_working_day(today)? {
                print_day_off(&calendar, today);
                return Ok(());
            }
            println!("📅 {}", format_long_date(today));
            if calendar.is_shortened_day(today) {
                println!("⏱️ Shortened pre-holiday day");
            }
            match visit::get_visit(db.pool(), user_id, today).await? {
                Some(record) => println!("\nCurrent status: {}", describe(&record)),
                None => println!("\nWhere are you working today? Not marked yet."),
            }
        }

        Command::Week { date } => {
            let engine = engine(config, db, calendar, false);
            let status = match date {
                Some(date) => engine.get_week_status_on(user_id, date).await?,
                None => engine.get_current_week_status(user_id).await?,
            };
            println!("{status}");
        }

        Command::Report {
            month,
            previous,
            png,
        } => {
            let (year, month) = match month {
                Some(year_month) => year_month,
                None if previous => previous_month(today.year(), today.month()),
                None => (today.year(), today.month()),
            };
            let engine = engine(config, db, calendar, png.is_some());
            println!("{}", engine.generate_text_report(user_id, year, month).await?);

            if let Some(path) = png {
                let bytes = engine.generate_image_report(user_id, year, month).await?;
                std::fs::write(&path, bytes).map_err(|source| TrackerError::Write {
                    path: path.clone(),
                    source,
                })?;
                info!(path = %path.display(), "Wrote calendar image");
                println!("\n📊 Calendar image saved to {}", path.display());
            }
        }

        Command::History { from, to } => {
            let records = visit::get_visits_in_range(db.pool(), user_id, from, to).await?;
            if records.is_empty() {
                println!("No marks between {from} and {to}");
            }
            for record in &records {
                println!("{} {}", record.visit_date, describe(record));
            }
        }
    }

    Ok(())
}

/// Build the report engine; the font is only resolved when an image is needed.
fn engine(config: &Config, db: Database, calendar: WorkCalendar, with_image: bool) -> ReportEngine {
    let renderer = match (&config.report_font, with_image) {
        (_, false) => CalendarRenderer::bitmap(),
        (Some(path), true) => {
            let mut candidates = vec![path.clone()];
            candidates.extend(DEFAULT_FONT_PATHS.iter().map(PathBuf::from));
            CalendarRenderer::with_font_paths(&candidates)
        }
        (None, true) => CalendarRenderer::default(),
    };
    ReportEngine::new(db, calendar)
        .with_policy(config.policy())
        .with_renderer(renderer)
}

fn print_day_off(calendar: &WorkCalendar, date: NaiveDate) {
    println!("📅 {}\n", format_long_date(date));
    match calendar.holiday_name(date) {
        Some(name) => println!("{name}: a day off, no mark needed. 😊"),
        None => println!("A day off, no mark needed. 😊"),
    }
}

fn describe(record: &VisitRecord) -> String {
    let place = if record.was_in_office {
        "🏢 in office"
    } else {
        "🏠 remote"
    };
    match &record.note {
        Some(note) => format!("{place} ({note})"),
        None => place.to_string(),
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}
