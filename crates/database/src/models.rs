//! Database models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user, identified by the messaging platform's numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Platform-assigned id
    pub user_id: i64,
    /// Handle, if the user has one
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// First-seen timestamp
    pub created_at: String,
}

impl User {
    /// Best available display name: full name, then handle, then id.
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        match &self.username {
            Some(username) => format!("@{username}"),
            None => self.user_id.to_string(),
        }
    }
}

/// Metadata written by [`crate::user::upsert_user`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A stored attendance mark for one user on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct VisitRecord {
    /// Auto-incrementing ID.
    pub id: i64,
    pub user_id: i64,
    /// Stored as `YYYY-MM-DD`.
    pub visit_date: NaiveDate,
    /// `true` for in office, `false` for remote.
    pub was_in_office: bool,
    /// Optional free-text note.
    pub note: Option<String>,
    /// Time of the last write to this record.
    pub created_at: String,
}

/// Office and total mark counts for a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitStats {
    pub in_office: i64,
    pub recorded: i64,
}

impl VisitStats {
    pub fn remote(&self) -> i64 {
        self.recorded - self.in_office
    }
}
