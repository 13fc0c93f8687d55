//! Banned user model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Membership record in the ban set. Presence gates all authenticated access.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BannedUser {
    pub telegram_id: i64,
    pub reason: String,
    pub banned_at: DateTime<Utc>,
}

/// Outcome of recording a failed purchase attempt
#[derive(Debug, Clone, Serialize)]
pub struct FailedAttemptOutcome {
    pub attempts: i32,
    pub limit: i32,
    pub attempts_remaining: i32,
    /// True only when this call crossed the threshold and banned the user
    pub banned_now: bool,
}
