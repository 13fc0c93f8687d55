//! User repository implementation
//!
//! The sole mutator of `users.balance`. Every balance change happens in a
//! single guarded SQL statement (or a transaction owned by the order/deposit
//! repository), never as a read-modify-write round trip in application code.

use sqlx::PgPool;
use chrono::{NaiveDate, Utc};
use crate::models::user::{UpsertUserRequest, User};
use crate::services::balance::BalanceOp;
use crate::utils::errors::StoreError;

const USER_COLUMNS: &str = "id, telegram_id, username, first_name, last_name, balance, \
     total_deposits, total_spent, total_orders, approved_orders, rejected_orders, \
     pending_orders, daily_failed_attempts, last_failed_date, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the user on first login, refresh profile fields afterwards
    pub async fn upsert(&self, request: UpsertUserRequest) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (telegram_id, username, first_name, last_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (telegram_id) DO UPDATE
            SET username = EXCLUDED.username,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                updated_at = EXCLUDED.updated_at
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(request.telegram_id)
        .bind(request.username)
        .bind(request.first_name)
        .bind(request.last_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by Telegram ID
    pub async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE telegram_id = $1"
        ))
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List all users with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    /// All telegram ids, for broadcast fan-out
    pub async fn all_telegram_ids(&self) -> Result<Vec<i64>, StoreError> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT telegram_id FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Apply an admin balance adjustment.
    ///
    /// `Add` does not touch `total_deposits`; only deposit approval does.
    /// `Subtract` floors the balance at zero and bumps `total_spent` by the
    /// requested amount. `Set` writes the balance directly with no counter
    /// change.
    pub async fn admin_adjust_balance(
        &self,
        telegram_id: i64,
        op: BalanceOp,
    ) -> Result<User, StoreError> {
        let sql = match op {
            BalanceOp::Add(_) => format!(
                "UPDATE users SET balance = balance + $2, updated_at = now() \
                 WHERE telegram_id = $1 RETURNING {USER_COLUMNS}"
            ),
            BalanceOp::Subtract(_) => format!(
                "UPDATE users SET balance = GREATEST(balance - $2, 0), \
                 total_spent = total_spent + $2, updated_at = now() \
                 WHERE telegram_id = $1 RETURNING {USER_COLUMNS}"
            ),
            BalanceOp::Set(_) => format!(
                "UPDATE users SET balance = $2, updated_at = now() \
                 WHERE telegram_id = $1 RETURNING {USER_COLUMNS}"
            ),
        };

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(telegram_id)
            .bind(op.amount())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::UserNotFound { telegram_id })?;

        Ok(user)
    }

    /// Record a failed purchase attempt, resetting the daily counter when the
    /// calendar date has changed. Returns the post-increment attempt count.
    ///
    /// The row lock keeps two racing attempts from reading the same counter.
    pub async fn record_failed_attempt(
        &self,
        telegram_id: i64,
        today: NaiveDate,
    ) -> Result<i32, StoreError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<(i32, Option<NaiveDate>)> = sqlx::query_as(
            "SELECT daily_failed_attempts, last_failed_date FROM users \
             WHERE telegram_id = $1 FOR UPDATE",
        )
        .bind(telegram_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (current, last_date) = row.ok_or(StoreError::UserNotFound { telegram_id })?;
        let attempts = crate::services::ban::next_attempt_count(last_date, today, current);

        sqlx::query(
            "UPDATE users SET daily_failed_attempts = $2, last_failed_date = $3, \
             updated_at = now() WHERE telegram_id = $1",
        )
        .bind(telegram_id)
        .bind(attempts)
        .bind(today)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(attempts)
    }
}
