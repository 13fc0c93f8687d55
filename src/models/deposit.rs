//! Deposit model and status state machine

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Deposit lifecycle status. Same shape as orders: one open state, two
/// terminal states, no way back out of a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "deposit_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DepositStatus {
    Pending,
    Approved,
    Rejected,
}

impl DepositStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DepositStatus::Pending)
    }

    pub fn can_transition(&self, to: DepositStatus) -> bool {
        matches!(self, DepositStatus::Pending) && to.is_terminal()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DepositStatus::Pending => "pending",
            DepositStatus::Approved => "approved",
            DepositStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A top-up request. No balance effect until approval; the payment method
/// name is a snapshot taken at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Deposit {
    pub id: i64,
    pub deposit_code: String,
    pub telegram_id: i64,
    pub amount: i64,
    pub payment_method_id: i64,
    pub payment_method_name: String,
    /// Opaque Telegram file reference for the uploaded receipt
    pub receipt_file_id: String,
    pub status: DepositStatus,
    pub created_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<i64>,
    pub note: Option<String>,
}

/// Payload for creating a deposit request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepositRequest {
    pub amount: i64,
    pub payment_method_id: i64,
    pub receipt_file_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_transitions_rejected() {
        assert!(DepositStatus::Pending.can_transition(DepositStatus::Approved));
        assert!(DepositStatus::Pending.can_transition(DepositStatus::Rejected));
        assert!(!DepositStatus::Approved.can_transition(DepositStatus::Rejected));
        assert!(!DepositStatus::Rejected.can_transition(DepositStatus::Approved));
        assert!(!DepositStatus::Approved.can_transition(DepositStatus::Pending));
    }
}
