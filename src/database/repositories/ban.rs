//! Ban set repository implementation

use sqlx::PgPool;
use crate::models::ban::BannedUser;
use crate::utils::errors::StoreError;

#[derive(Debug, Clone)]
pub struct BanRepository {
    pool: PgPool,
}

impl BanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add to the ban set. Idempotent: banning an already-banned user keeps
    /// the original reason and timestamp. Returns whether the row was new.
    pub async fn ban(&self, telegram_id: i64, reason: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "INSERT INTO banned_users (telegram_id, reason) VALUES ($1, $2) \
             ON CONFLICT (telegram_id) DO NOTHING",
        )
        .bind(telegram_id)
        .bind(reason)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove from the ban set. Idempotent. Returns whether a row was removed.
    pub async fn unban(&self, telegram_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM banned_users WHERE telegram_id = $1")
            .bind(telegram_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Membership lookup with the ban reason
    pub async fn find(&self, telegram_id: i64) -> Result<Option<BannedUser>, StoreError> {
        let banned = sqlx::query_as::<_, BannedUser>(
            "SELECT telegram_id, reason, banned_at FROM banned_users WHERE telegram_id = $1",
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(banned)
    }

    pub async fn is_banned(&self, telegram_id: i64) -> Result<bool, StoreError> {
        Ok(self.find(telegram_id).await?.is_some())
    }

    /// List the full ban set
    pub async fn list(&self) -> Result<Vec<BannedUser>, StoreError> {
        let banned = sqlx::query_as::<_, BannedUser>(
            "SELECT telegram_id, reason, banned_at FROM banned_users ORDER BY banned_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(banned)
    }
}
