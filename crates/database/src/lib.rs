//! SQLite persistence layer for the office attendance tracker.
//!
//! This crate stores users and their per-day attendance marks using SQLx with
//! SQLite. A mark is keyed by (user, date) and written with upsert semantics,
//! so re-marking a day replaces the previous answer.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use database::{visit, user, Database, UserProfile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:office_visits.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Register a user and mark a day in the office
//!     user::upsert_user(db.pool(), 42, &UserProfile::default()).await?;
//!     let day = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
//!     visit::mark_visit(db.pool(), 42, day, true, None).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod user;
pub mod validation;
pub mod visit;

pub use error::{DatabaseError, Result};
pub use models::{User, UserProfile, VisitRecord, VisitStats};
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 5;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/office_visits.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing); every pooled connection is a
    /// // separate database, so keep the pool at one connection.
    /// let db = database::Database::connect_with_pool_size("sqlite::memory:", 1).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    async fn test_db() -> Database {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn register(db: &Database, user_id: i64) {
        user::upsert_user(db.pool(), user_id, &UserProfile::default())
            .await
            .unwrap();
    }

    async fn row_count(db: &Database, user_id: i64, day: NaiveDate) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM office_visits WHERE user_id = ? AND visit_date = ?",
        )
        .bind(user_id)
        .bind(day)
        .fetch_one(db.pool())
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_user_upsert() {
        let db = test_db().await;

        let profile = UserProfile {
            username: Some("alice".to_string()),
            first_name: Some("Alice".to_string()),
            last_name: None,
        };
        user::upsert_user(db.pool(), 7, &profile).await.unwrap();
        let first = user::get_user(db.pool(), 7).await.unwrap().unwrap();
        assert_eq!(first.username.as_deref(), Some("alice"));
        assert_eq!(first.display_name(), "Alice");

        // Update in place
        let renamed = UserProfile {
            username: Some("alice_w".to_string()),
            last_name: Some("Walker".to_string()),
            ..profile
        };
        user::upsert_user(db.pool(), 7, &renamed).await.unwrap();
        let second = user::get_user(db.pool(), 7).await.unwrap().unwrap();
        assert_eq!(second.username.as_deref(), Some("alice_w"));
        assert_eq!(second.display_name(), "Alice Walker");
        assert_eq!(second.created_at, first.created_at);

        assert_eq!(user::count_users(db.pool()).await.unwrap(), 1);
        assert!(user::get_user(db.pool(), 8).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mark_visit_is_idempotent() {
        let db = test_db().await;
        register(&db, 1).await;
        let day = date(2026, 1, 12);

        visit::mark_visit(db.pool(), 1, day, true, None).await.unwrap();
        visit::mark_visit(db.pool(), 1, day, true, None).await.unwrap();

        assert_eq!(row_count(&db, 1, day).await, 1);
        let record = visit::get_visit(db.pool(), 1, day).await.unwrap().unwrap();
        assert!(record.was_in_office);
        assert_eq!(record.visit_date, day);
    }

    #[tokio::test]
    async fn test_mark_visit_round_trip_with_note() {
        let db = test_db().await;
        register(&db, 1).await;
        let day = date(2026, 1, 13);

        visit::mark_visit(db.pool(), 1, day, false, Some("note"))
            .await
            .unwrap();

        let record = visit::get_visit(db.pool(), 1, day).await.unwrap().unwrap();
        assert!(!record.was_in_office);
        assert_eq!(record.note.as_deref(), Some("note"));
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let db = test_db().await;
        register(&db, 1).await;
        let day = date(2026, 1, 14);

        let first = visit::mark_visit(db.pool(), 1, day, true, Some("desk 4"))
            .await
            .unwrap();
        let second = visit::mark_visit(db.pool(), 1, day, false, None)
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        let record = visit::get_visit(db.pool(), 1, day).await.unwrap().unwrap();
        assert!(!record.was_in_office);
        assert_eq!(record.note, None);
        assert_eq!(row_count(&db, 1, day).await, 1);
    }

    #[tokio::test]
    async fn test_mark_visit_registers_unknown_user() {
        let db = test_db().await;
        let day = date(2026, 1, 12);

        let record = visit::mark_visit(db.pool(), 99, day, true, None).await.unwrap();
        assert_eq!(record.user_id, 99);

        let stored = visit::get_visit(db.pool(), 99, day).await.unwrap().unwrap();
        assert!(stored.was_in_office);

        let user = user::get_user(db.pool(), 99).await.unwrap().unwrap();
        assert!(user.username.is_none());
        assert!(user.first_name.is_none());
    }

    #[tokio::test]
    async fn test_mark_visit_keeps_existing_profile() {
        let db = test_db().await;
        let profile = UserProfile {
            username: Some("bob".to_string()),
            ..Default::default()
        };
        user::upsert_user(db.pool(), 5, &profile).await.unwrap();

        visit::mark_visit(db.pool(), 5, date(2026, 1, 12), false, None)
            .await
            .unwrap();

        let user = user::get_user(db.pool(), 5).await.unwrap().unwrap();
        assert_eq!(user.username.as_deref(), Some("bob"));
        assert_eq!(user::count_users(db.pool()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rejected_note_leaves_state_unchanged() {
        let db = test_db().await;
        register(&db, 1).await;
        let day = date(2026, 1, 15);
        visit::mark_visit(db.pool(), 1, day, true, None).await.unwrap();

        let long = "x".repeat(validation::MAX_NOTE_LENGTH + 1);
        let result = visit::mark_visit(db.pool(), 1, day, false, Some(&long)).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));

        let record = visit::get_visit(db.pool(), 1, day).await.unwrap().unwrap();
        assert!(record.was_in_office);
    }

    #[tokio::test]
    async fn test_range_queries() {
        let db = test_db().await;
        register(&db, 1).await;
        register(&db, 2).await;

        for (day, office) in [
            (date(2026, 1, 30), true),
            (date(2026, 2, 2), false),
            (date(2026, 2, 3), true),
            (date(2026, 2, 27), true),
            (date(2026, 3, 2), false),
        ] {
            visit::mark_visit(db.pool(), 1, day, office, None).await.unwrap();
        }
        // Another user's mark must not leak into user 1's results
        visit::mark_visit(db.pool(), 2, date(2026, 2, 4), true, None)
            .await
            .unwrap();

        let february = visit::get_month_visits(db.pool(), 1, 2026, 2).await.unwrap();
        let days: Vec<_> = february.iter().map(|v| v.visit_date).collect();
        assert_eq!(days, vec![date(2026, 2, 2), date(2026, 2, 3), date(2026, 2, 27)]);

        // Wednesday 2026-02-04 belongs to the week of Monday 02-02
        let week = visit::get_week_visits(db.pool(), 1, date(2026, 2, 4)).await.unwrap();
        assert_eq!(week.len(), 2);

        let range = visit::get_visits_in_range(db.pool(), 1, date(2026, 1, 30), date(2026, 2, 2))
            .await
            .unwrap();
        assert_eq!(range.len(), 2);
        assert!(range[0].visit_date < range[1].visit_date);

        let stats = visit::get_visit_stats(db.pool(), 1, 2026, 2).await.unwrap();
        assert_eq!(stats, VisitStats { in_office: 2, recorded: 3 });
        assert_eq!(stats.remote(), 1);
    }

    #[tokio::test]
    async fn test_delete_visit() {
        let db = test_db().await;
        register(&db, 1).await;
        let day = date(2026, 1, 16);

        // Absent record: no-op
        assert!(!visit::delete_visit(db.pool(), 1, day).await.unwrap());

        visit::mark_visit(db.pool(), 1, day, true, None).await.unwrap();
        assert!(visit::delete_visit(db.pool(), 1, day).await.unwrap());
        assert!(visit::get_visit(db.pool(), 1, day).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_month() {
        let db = test_db().await;
        register(&db, 1).await;
        let visits = visit::get_month_visits(db.pool(), 1, 2026, 1).await.unwrap();
        assert!(visits.is_empty());
        let stats = visit::get_visit_stats(db.pool(), 1, 2026, 1).await.unwrap();
        assert_eq!(stats, VisitStats::default());
    }
}
