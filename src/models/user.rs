//! User model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// A storefront user and the ledger state attached to them.
///
/// `balance` is a non-negative MMK amount; the counters are maintained in the
/// same transaction as the ledger operation that changes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub balance: i64,
    pub total_deposits: i64,
    pub total_spent: i64,
    pub total_orders: i32,
    pub approved_orders: i32,
    pub rejected_orders: i32,
    pub pending_orders: i32,
    pub daily_failed_attempts: i32,
    pub last_failed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.username) {
            (Some(first), _) => first.clone(),
            (None, Some(username)) => format!("@{}", username),
            (None, None) => self.telegram_id.to_string(),
        }
    }
}

/// Profile fields captured from validated Telegram init data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertUserRequest {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: Option<&str>, username: Option<&str>) -> User {
        User {
            id: 1,
            telegram_id: 99,
            username: username.map(String::from),
            first_name: first.map(String::from),
            last_name: None,
            balance: 0,
            total_deposits: 0,
            total_spent: 0,
            total_orders: 0,
            approved_orders: 0,
            rejected_orders: 0,
            pending_orders: 0,
            daily_failed_attempts: 0,
            last_failed_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_display_name_prefers_first_name() {
        assert_eq!(user(Some("Aung"), Some("aung99")).display_name(), "Aung");
        assert_eq!(user(None, Some("aung99")).display_name(), "@aung99");
        assert_eq!(user(None, None).display_name(), "99");
    }
}
