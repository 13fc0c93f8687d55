//! Order model and status state machine

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Order lifecycle status.
///
/// `Pending` is the only non-terminal state; `Approved` and `Rejected` are
/// terminal and no further transition is permitted out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }

    /// Whether this status may transition to `to`
    pub fn can_transition(&self, to: OrderStatus) -> bool {
        matches!(self, OrderStatus::Pending) && to.is_terminal()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A purchase attempt. Product and category fields are snapshots copied at
/// creation time so later catalog edits do not alter historical records.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub order_code: String,
    pub telegram_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub category_name: String,
    pub product_amount: String,
    pub price: i64,
    pub currency: String,
    pub input_data: serde_json::Value,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<i64>,
    pub note: Option<String>,
}

/// Payload for placing an order
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub product_id: i64,
    #[serde(default)]
    pub input_data: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_is_the_only_open_state() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Approved.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_transitions_out_of_terminal_states_are_rejected() {
        assert!(OrderStatus::Pending.can_transition(OrderStatus::Approved));
        assert!(OrderStatus::Pending.can_transition(OrderStatus::Rejected));

        assert!(!OrderStatus::Approved.can_transition(OrderStatus::Approved));
        assert!(!OrderStatus::Approved.can_transition(OrderStatus::Rejected));
        assert!(!OrderStatus::Rejected.can_transition(OrderStatus::Approved));
        assert!(!OrderStatus::Rejected.can_transition(OrderStatus::Rejected));
    }

    #[test]
    fn test_no_transition_back_to_pending() {
        assert!(!OrderStatus::Pending.can_transition(OrderStatus::Pending));
        assert!(!OrderStatus::Approved.can_transition(OrderStatus::Pending));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        let status: OrderStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(status, OrderStatus::Approved);
    }
}
