//! Deposit repository implementation
//!
//! Same transactional pattern as orders. Creation is balance-neutral;
//! approval is the only path that credits the balance and `total_deposits`.

use sqlx::PgPool;
use crate::models::deposit::{Deposit, DepositStatus};
use crate::utils::errors::StoreError;

const DEPOSIT_COLUMNS: &str = "id, deposit_code, telegram_id, amount, payment_method_id, \
     payment_method_name, receipt_file_id, status, created_at, processed_at, processed_by, note";

/// Snapshot payload for inserting a pending deposit
#[derive(Debug, Clone)]
pub struct NewDeposit {
    pub deposit_code: String,
    pub telegram_id: i64,
    pub amount: i64,
    pub payment_method_id: i64,
    pub payment_method_name: String,
    pub receipt_file_id: String,
}

/// A processed deposit together with the buyer's balance after the operation
#[derive(Debug, Clone)]
pub struct ProcessedDeposit {
    pub deposit: Deposit,
    pub balance_after: i64,
}

#[derive(Debug, Clone)]
pub struct DepositRepository {
    pool: PgPool,
}

impl DepositRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a pending deposit; no balance effect
    pub async fn create_pending(&self, new_deposit: NewDeposit) -> Result<Deposit, StoreError> {
        let deposit = sqlx::query_as::<_, Deposit>(&format!(
            r#"
            INSERT INTO deposits (deposit_code, telegram_id, amount, payment_method_id,
                payment_method_name, receipt_file_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {DEPOSIT_COLUMNS}
            "#
        ))
        .bind(&new_deposit.deposit_code)
        .bind(new_deposit.telegram_id)
        .bind(new_deposit.amount)
        .bind(new_deposit.payment_method_id)
        .bind(&new_deposit.payment_method_name)
        .bind(&new_deposit.receipt_file_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(deposit)
    }

    /// Approve a pending deposit: flip the status and credit `amount` to the
    /// buyer's balance and `total_deposits`, atomically.
    pub async fn approve(&self, code: &str, admin_id: i64) -> Result<ProcessedDeposit, StoreError> {
        let mut tx = self.pool.begin().await?;

        let deposit = sqlx::query_as::<_, Deposit>(&format!(
            "UPDATE deposits SET status = 'approved', processed_at = now(), processed_by = $2 \
             WHERE deposit_code = $1 AND status = 'pending' RETURNING {DEPOSIT_COLUMNS}"
        ))
        .bind(code)
        .bind(admin_id)
        .fetch_optional(&mut *tx)
        .await?;

        let deposit = match deposit {
            Some(deposit) => deposit,
            None => {
                let existing = self.status_of(&mut tx, code).await?;
                tx.rollback().await?;
                return Err(Self::terminal_error(code, existing, DepositStatus::Approved));
            }
        };

        let balance: (i64,) = sqlx::query_as(
            "UPDATE users SET balance = balance + $2, \
             total_deposits = total_deposits + $2, updated_at = now() \
             WHERE telegram_id = $1 RETURNING balance",
        )
        .bind(deposit.telegram_id)
        .bind(deposit.amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ProcessedDeposit {
            deposit,
            balance_after: balance.0,
        })
    }

    /// Reject a pending deposit: balance-neutral, stores the reason
    pub async fn reject(
        &self,
        code: &str,
        admin_id: i64,
        reason: &str,
    ) -> Result<Deposit, StoreError> {
        let mut tx = self.pool.begin().await?;

        let deposit = sqlx::query_as::<_, Deposit>(&format!(
            "UPDATE deposits SET status = 'rejected', processed_at = now(), \
             processed_by = $2, note = $3 \
             WHERE deposit_code = $1 AND status = 'pending' RETURNING {DEPOSIT_COLUMNS}"
        ))
        .bind(code)
        .bind(admin_id)
        .bind(reason)
        .fetch_optional(&mut *tx)
        .await?;

        let deposit = match deposit {
            Some(deposit) => deposit,
            None => {
                let existing = self.status_of(&mut tx, code).await?;
                tx.rollback().await?;
                return Err(Self::terminal_error(code, existing, DepositStatus::Rejected));
            }
        };

        tx.commit().await?;
        Ok(deposit)
    }

    /// Find deposit by display code
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Deposit>, StoreError> {
        let deposit = sqlx::query_as::<_, Deposit>(&format!(
            "SELECT {DEPOSIT_COLUMNS} FROM deposits WHERE deposit_code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deposit)
    }

    /// List deposits, optionally filtered by owner and/or status
    pub async fn list(
        &self,
        telegram_id: Option<i64>,
        status: Option<DepositStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Deposit>, StoreError> {
        let deposits = sqlx::query_as::<_, Deposit>(&format!(
            "SELECT {DEPOSIT_COLUMNS} FROM deposits \
             WHERE ($1::bigint IS NULL OR telegram_id = $1) \
               AND ($2::deposit_status IS NULL OR status = $2) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(telegram_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(deposits)
    }

    async fn status_of(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        code: &str,
    ) -> Result<Option<DepositStatus>, StoreError> {
        let row: Option<(DepositStatus,)> =
            sqlx::query_as("SELECT status FROM deposits WHERE deposit_code = $1")
                .bind(code)
                .fetch_optional(&mut **tx)
                .await?;

        Ok(row.map(|(status,)| status))
    }

    fn terminal_error(
        code: &str,
        existing: Option<DepositStatus>,
        wanted: DepositStatus,
    ) -> StoreError {
        match existing {
            Some(status) => StoreError::InvalidStateTransition {
                entity: "deposit",
                from: status.to_string(),
                to: wanted.to_string(),
            },
            None => StoreError::DepositNotFound {
                code: code.to_string(),
            },
        }
    }
}
