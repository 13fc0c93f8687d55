//! Order repository implementation
//!
//! Each lifecycle operation is a single database transaction: the status
//! flip, the balance change, and the counter updates commit together or not
//! at all. Terminal-state guards live in the SQL (`WHERE status = 'pending'`)
//! so a concurrent second approval loses the race and gets a conflict error
//! instead of re-applying balance and counter effects.

use sqlx::PgPool;
use crate::models::order::{Order, OrderStatus};
use crate::utils::errors::StoreError;

const ORDER_COLUMNS: &str = "id, order_code, telegram_id, product_id, product_name, \
     category_name, product_amount, price, currency, input_data, status, created_at, \
     processed_at, processed_by, note";

/// Snapshot payload for inserting a pending order
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_code: String,
    pub telegram_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub category_name: String,
    pub product_amount: String,
    pub price: i64,
    pub currency: String,
    pub input_data: serde_json::Value,
}

/// A processed order together with the buyer's balance after the operation
#[derive(Debug, Clone)]
pub struct ProcessedOrder {
    pub order: Order,
    pub balance_after: i64,
}

#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Debit the buyer and append a pending order, atomically.
    ///
    /// The debit is guarded by `balance >= price`; when the guard fails the
    /// transaction changes nothing and the caller gets
    /// `InsufficientBalance` carrying the current balance.
    pub async fn create_pending(&self, new_order: NewOrder) -> Result<Order, StoreError> {
        let mut tx = self.pool.begin().await?;

        let debited: Option<(i64,)> = sqlx::query_as(
            "UPDATE users SET balance = balance - $2, \
             total_orders = total_orders + 1, pending_orders = pending_orders + 1, \
             updated_at = now() \
             WHERE telegram_id = $1 AND balance >= $2 RETURNING balance",
        )
        .bind(new_order.telegram_id)
        .bind(new_order.price)
        .fetch_optional(&mut *tx)
        .await?;

        if debited.is_none() {
            let balance: Option<(i64,)> =
                sqlx::query_as("SELECT balance FROM users WHERE telegram_id = $1")
                    .bind(new_order.telegram_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            tx.rollback().await?;

            return match balance {
                Some((balance,)) => Err(StoreError::InsufficientBalance {
                    balance,
                    required: new_order.price,
                    attempts: 0,
                    attempts_remaining: 0,
                    banned: false,
                }),
                None => Err(StoreError::UserNotFound {
                    telegram_id: new_order.telegram_id,
                }),
            };
        }

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (order_code, telegram_id, product_id, product_name,
                category_name, product_amount, price, currency, input_data)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(&new_order.order_code)
        .bind(new_order.telegram_id)
        .bind(new_order.product_id)
        .bind(&new_order.product_name)
        .bind(&new_order.category_name)
        .bind(&new_order.product_amount)
        .bind(new_order.price)
        .bind(&new_order.currency)
        .bind(&new_order.input_data)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(order)
    }

    /// Approve a pending order: flip the status, stamp the processing fields,
    /// adjust the buyer's counters, and bump the product and category sold
    /// counters.
    pub async fn approve(&self, code: &str, admin_id: i64) -> Result<ProcessedOrder, StoreError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET status = 'approved', processed_at = now(), processed_by = $2 \
             WHERE order_code = $1 AND status = 'pending' RETURNING {ORDER_COLUMNS}"
        ))
        .bind(code)
        .bind(admin_id)
        .fetch_optional(&mut *tx)
        .await?;

        let order = match order {
            Some(order) => order,
            None => {
                let existing = self.status_of(&mut tx, code).await?;
                tx.rollback().await?;
                return Err(Self::terminal_error(code, existing, OrderStatus::Approved));
            }
        };

        let balance: (i64,) = sqlx::query_as(
            "UPDATE users SET approved_orders = approved_orders + 1, \
             pending_orders = GREATEST(pending_orders - 1, 0), updated_at = now() \
             WHERE telegram_id = $1 RETURNING balance",
        )
        .bind(order.telegram_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE products SET total_sold = total_sold + 1 WHERE id = $1")
            .bind(order.product_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE categories SET total_sold = total_sold + 1 \
             WHERE id = (SELECT category_id FROM products WHERE id = $1)",
        )
        .bind(order.product_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ProcessedOrder {
            order,
            balance_after: balance.0,
        })
    }

    /// Reject a pending order: flip the status, store the reason, and refund
    /// the debited price to the buyer.
    pub async fn reject(
        &self,
        code: &str,
        admin_id: i64,
        reason: &str,
    ) -> Result<ProcessedOrder, StoreError> {
        let mut tx = self.pool.begin().await?;

        let order = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET status = 'rejected', processed_at = now(), \
             processed_by = $2, note = $3 \
             WHERE order_code = $1 AND status = 'pending' RETURNING {ORDER_COLUMNS}"
        ))
        .bind(code)
        .bind(admin_id)
        .bind(reason)
        .fetch_optional(&mut *tx)
        .await?;

        let order = match order {
            Some(order) => order,
            None => {
                let existing = self.status_of(&mut tx, code).await?;
                tx.rollback().await?;
                return Err(Self::terminal_error(code, existing, OrderStatus::Rejected));
            }
        };

        let balance: (i64,) = sqlx::query_as(
            "UPDATE users SET balance = balance + $2, \
             rejected_orders = rejected_orders + 1, \
             pending_orders = GREATEST(pending_orders - 1, 0), updated_at = now() \
             WHERE telegram_id = $1 RETURNING balance",
        )
        .bind(order.telegram_id)
        .bind(order.price)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ProcessedOrder {
            order,
            balance_after: balance.0,
        })
    }

    /// Find order by display code
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Order>, StoreError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE order_code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// List orders, optionally filtered by owner and/or status
    pub async fn list(
        &self,
        telegram_id: Option<i64>,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>, StoreError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders \
             WHERE ($1::bigint IS NULL OR telegram_id = $1) \
               AND ($2::order_status IS NULL OR status = $2) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(telegram_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn status_of(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        code: &str,
    ) -> Result<Option<OrderStatus>, StoreError> {
        let row: Option<(OrderStatus,)> =
            sqlx::query_as("SELECT status FROM orders WHERE order_code = $1")
                .bind(code)
                .fetch_optional(&mut **tx)
                .await?;

        Ok(row.map(|(status,)| status))
    }

    fn terminal_error(code: &str, existing: Option<OrderStatus>, wanted: OrderStatus) -> StoreError {
        match existing {
            Some(status) => StoreError::InvalidStateTransition {
                entity: "order",
                from: status.to_string(),
                to: wanted.to_string(),
            },
            None => StoreError::OrderNotFound {
                code: code.to_string(),
            },
        }
    }
}
