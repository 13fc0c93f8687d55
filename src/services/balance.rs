//! Balance ledger service
//!
//! `BalanceOp` is the single vocabulary for balance mutation. Admin
//! adjustments go through `BalanceService`; deposit credits and order
//! debits/refunds are applied by the order/deposit repositories inside
//! their own transactions, using the same arithmetic rules:
//! subtraction floors at zero, the balance is never negative.

use serde::Deserialize;
use tracing::info;
use crate::database::repositories::UserRepository;
use crate::models::User;
use crate::utils::errors::{Result, StoreError};
use crate::utils::logging;

/// A balance mutation requested by an admin.
///
/// `Add` is a generic credit and deliberately does not count toward
/// `total_deposits`; only deposit approval does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "operation", content = "amount", rename_all = "lowercase")]
pub enum BalanceOp {
    Add(i64),
    Subtract(i64),
    Set(i64),
}

impl BalanceOp {
    pub fn amount(&self) -> i64 {
        match *self {
            BalanceOp::Add(amount) | BalanceOp::Subtract(amount) | BalanceOp::Set(amount) => amount,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BalanceOp::Add(_) => "add",
            BalanceOp::Subtract(_) => "subtract",
            BalanceOp::Set(_) => "set",
        }
    }

    /// Resulting balance; subtraction floors at zero
    pub fn apply(&self, balance: i64) -> i64 {
        match *self {
            BalanceOp::Add(amount) => balance + amount,
            BalanceOp::Subtract(amount) => (balance - amount).max(0),
            BalanceOp::Set(amount) => amount,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            BalanceOp::Add(amount) | BalanceOp::Subtract(amount) if amount <= 0 => Err(
                StoreError::InvalidInput("amount must be positive".to_string()),
            ),
            BalanceOp::Set(amount) if amount < 0 => Err(StoreError::InvalidInput(
                "balance cannot be set negative".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Service for admin-driven balance adjustments
#[derive(Debug, Clone)]
pub struct BalanceService {
    users: UserRepository,
}

impl BalanceService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Apply an admin balance adjustment and log it as an admin action
    pub async fn adjust_by_admin(
        &self,
        telegram_id: i64,
        op: BalanceOp,
        admin_id: i64,
    ) -> Result<User> {
        op.validate()?;

        let user = self.users.admin_adjust_balance(telegram_id, op).await?;

        logging::log_admin_action(
            admin_id,
            "adjust_balance",
            Some(&telegram_id.to_string()),
            Some(&format!("{} {}", op.name(), op.amount())),
        );
        info!(
            telegram_id = telegram_id,
            operation = op.name(),
            amount = op.amount(),
            balance_after = user.balance,
            "Admin balance adjustment applied"
        );

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_set() {
        assert_eq!(BalanceOp::Add(4000).apply(6000), 10000);
        assert_eq!(BalanceOp::Set(2500).apply(99999), 2500);
    }

    #[test]
    fn test_subtract_floors_at_zero() {
        assert_eq!(BalanceOp::Subtract(4000).apply(10000), 6000);
        assert_eq!(BalanceOp::Subtract(4000).apply(3000), 0);
        assert_eq!(BalanceOp::Subtract(1).apply(0), 0);
    }

    #[test]
    fn test_balance_never_negative_over_any_sequence() {
        let ops = [
            BalanceOp::Subtract(500),
            BalanceOp::Add(200),
            BalanceOp::Subtract(10_000),
            BalanceOp::Set(0),
            BalanceOp::Subtract(1),
            BalanceOp::Add(750),
            BalanceOp::Subtract(751),
        ];

        let mut balance = 100;
        for op in ops {
            balance = op.apply(balance);
            assert!(balance >= 0, "balance went negative after {:?}", op);
        }
    }

    #[test]
    fn test_debit_then_refund_restores_balance() {
        // Order placement debits the price; rejection refunds it
        let start = 10_000;
        let price = 4_000;
        let after_debit = BalanceOp::Subtract(price).apply(start);
        assert_eq!(after_debit, 6_000);
        let after_refund = BalanceOp::Add(price).apply(after_debit);
        assert_eq!(after_refund, start);
    }

    #[test]
    fn test_validation_rejects_nonpositive_amounts() {
        assert!(BalanceOp::Add(0).validate().is_err());
        assert!(BalanceOp::Subtract(-5).validate().is_err());
        assert!(BalanceOp::Set(-1).validate().is_err());
        assert!(BalanceOp::Set(0).validate().is_ok());
        assert!(BalanceOp::Add(1).validate().is_ok());
    }

    #[test]
    fn test_deserialize_tagged_form() {
        let op: BalanceOp =
            serde_json::from_str(r#"{"operation":"add","amount":4000}"#).unwrap();
        assert_eq!(op, BalanceOp::Add(4000));
        let op: BalanceOp =
            serde_json::from_str(r#"{"operation":"set","amount":0}"#).unwrap();
        assert_eq!(op, BalanceOp::Set(0));
    }
}
