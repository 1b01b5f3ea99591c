//! User registration and lookup.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::Result;
use crate::models::{User, UserProfile};
use crate::validation::{normalize_name, validate_user_id};

/// Insert a user, or overwrite the metadata of an existing one.
///
/// `created_at` is kept from the first insert.
pub async fn upsert_user(pool: &SqlitePool, user_id: i64, profile: &UserProfile) -> Result<()> {
    validate_user_id(user_id)?;
    let username = normalize_name("username", profile.username.as_deref())?;
    let first_name = normalize_name("first_name", profile.first_name.as_deref())?;
    let last_name = normalize_name("last_name", profile.last_name.as_deref())?;

    let mut tx = pool.begin().await?;
    sqlx::query(
        r#"
        INSERT INTO users (user_id, username, first_name, last_name)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            username = excluded.username,
            first_name = excluded.first_name,
            last_name = excluded.last_name
        "#,
    )
    .bind(user_id)
    .bind(username)
    .bind(first_name)
    .bind(last_name)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    debug!(user_id, "Upserted user");
    Ok(())
}

/// Get a user by ID.
pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, username, first_name, last_name, created_at
        FROM users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Count total users.
pub async fn count_users(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM users
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
