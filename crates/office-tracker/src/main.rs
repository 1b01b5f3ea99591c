//! Command-line office attendance tracker.
//!
//! Marks days as in-office or remote and prints weekly and monthly compliance
//! reports. Configuration comes from the environment (see [`config::Config`]).

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use database::Database;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "office-tracker")]
#[command(about = "Track office attendance against a weekly minimum")]
struct Args {
    /// User id assigned by the messaging platform
    #[arg(long, env = "OFFICE_USER_ID")]
    user: i64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Place {
    Office,
    Remote,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create or update the user's profile
    Register {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
    },

    /// Mark where you worked (defaults to today)
    Mark {
        place: Place,
        /// Date to mark (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        note: Option<String>,
    },

    /// Remove the mark for a day (defaults to today)
    Unmark {
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show today's date and mark
    Today,

    /// Show the current week's status
    Week {
        /// Evaluate the week as of this date instead of today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Monthly report (defaults to the current month)
    Report {
        /// Month to report (YYYY-MM)
        #[arg(long, value_parser = parse_year_month, conflicts_with = "previous")]
        month: Option<(i32, u32)>,
        /// Report the previous month
        #[arg(long)]
        previous: bool,
        /// Also write the calendar image to this PNG file
        #[arg(long)]
        png: Option<PathBuf>,
    },

    /// List marks in a date range
    History {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
}

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info";

fn parse_year_month(value: &str) -> Result<(i32, u32), String> {
    use chrono::Datelike;

    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d")
        .map(|date| (date.year(), date.month()))
        .map_err(|_| format!("expected YYYY-MM, got {value:?}"))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let calendar = config.calendar()?;

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let result = commands::run(args, &config, db.clone(), calendar).await;
    db.close().await;

    result?;
    Ok(())
}
