//! Attendance marks keyed by (user, date).
//!
//! Every write runs in its own transaction: the guard rolls back when dropped
//! on an error path and is committed only after the statement succeeds.

use chrono::{Duration, NaiveDate};
use sqlx::SqlitePool;
use tracing::debug;
use work_calendar::{month_bounds, monday_of};

use crate::error::Result;
use crate::models::{VisitRecord, VisitStats};
use crate::validation::{normalize_note, validate_user_id};

/// Record where the user worked on `date`.
///
/// Writing the same (user, date) again replaces the office flag, note and
/// timestamp; it never creates a second row. An unknown user gets an empty
/// profile row in the same transaction.
pub async fn mark_visit(
    pool: &SqlitePool,
    user_id: i64,
    date: NaiveDate,
    was_in_office: bool,
    note: Option<&str>,
) -> Result<VisitRecord> {
    validate_user_id(user_id)?;
    let note = normalize_note(note)?;

    let mut tx = pool.begin().await?;
    sqlx::query("INSERT INTO users (user_id) VALUES (?) ON CONFLICT(user_id) DO NOTHING")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    let record = sqlx::query_as::<_, VisitRecord>(
        r#"
        INSERT INTO office_visits (user_id, visit_date, was_in_office, note)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(user_id, visit_date) DO UPDATE SET
            was_in_office = excluded.was_in_office,
            note = excluded.note,
            created_at = CURRENT_TIMESTAMP
        RETURNING id, user_id, visit_date, was_in_office, note, created_at
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(was_in_office)
    .bind(note)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;

    debug!(user_id, %date, was_in_office, "Marked visit");
    Ok(record)
}

/// Get the mark for a single day.
pub async fn get_visit(
    pool: &SqlitePool,
    user_id: i64,
    date: NaiveDate,
) -> Result<Option<VisitRecord>> {
    let record = sqlx::query_as::<_, VisitRecord>(
        r#"
        SELECT id, user_id, visit_date, was_in_office, note, created_at
        FROM office_visits
        WHERE user_id = ? AND visit_date = ?
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Marks between `start` and `end`, both inclusive, ordered by date.
pub async fn get_visits_in_range(
    pool: &SqlitePool,
    user_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<VisitRecord>> {
    let rows = sqlx::query_as::<_, VisitRecord>(
        r#"
        SELECT id, user_id, visit_date, was_in_office, note, created_at
        FROM office_visits
        WHERE user_id = ? AND visit_date BETWEEN ? AND ?
        ORDER BY visit_date
        "#,
    )
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Marks within the calendar month.
pub async fn get_month_visits(
    pool: &SqlitePool,
    user_id: i64,
    year: i32,
    month: u32,
) -> Result<Vec<VisitRecord>> {
    let (first, next) = month_bounds(year, month)?;
    get_visits_in_range(pool, user_id, first, next - Duration::days(1)).await
}

/// Marks within the Monday..Sunday week containing `date`.
pub async fn get_week_visits(
    pool: &SqlitePool,
    user_id: i64,
    date: NaiveDate,
) -> Result<Vec<VisitRecord>> {
    let monday = monday_of(date);
    get_visits_in_range(pool, user_id, monday, monday + Duration::days(6)).await
}

/// Office and total mark counts for the month.
pub async fn get_visit_stats(
    pool: &SqlitePool,
    user_id: i64,
    year: i32,
    month: u32,
) -> Result<VisitStats> {
    let (first, next) = month_bounds(year, month)?;
    let (in_office, recorded) = sqlx::query_as::<_, (i64, i64)>(
        r#"
        SELECT COALESCE(SUM(was_in_office), 0), COUNT(*)
        FROM office_visits
        WHERE user_id = ? AND visit_date >= ? AND visit_date < ?
        "#,
    )
    .bind(user_id)
    .bind(first)
    .bind(next)
    .fetch_one(pool)
    .await?;

    Ok(VisitStats {
        in_office,
        recorded,
    })
}

/// Delete the mark for a day.
///
/// Returns whether a row was removed; deleting an absent mark is not an error.
pub async fn delete_visit(pool: &SqlitePool, user_id: i64, date: NaiveDate) -> Result<bool> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query(
        r#"
        DELETE FROM office_visits
        WHERE user_id = ? AND visit_date = ?
        "#,
    )
    .bind(user_id)
    .bind(date)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    let deleted = result.rows_affected() > 0;
    debug!(user_id, %date, deleted, "Deleted visit");
    Ok(deleted)
}
