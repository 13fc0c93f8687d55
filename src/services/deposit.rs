//! Deposit service implementation
//!
//! Owns the top-up lifecycle. Creation is balance-neutral; approval is the
//! only operation that credits the buyer, and it is the only path that
//! counts toward `total_deposits`.

use tracing::{info, warn};
use crate::config::Settings;
use crate::database::repositories::{
    CatalogRepository, DepositRepository, NewDeposit, ProcessedDeposit,
};
use crate::models::deposit::{CreateDepositRequest, Deposit, DepositStatus};
use crate::services::notification::NotificationService;
use crate::utils::errors::{Result, StoreError};
use crate::utils::helpers::{escape_html, format_amount, generate_display_code};
use crate::utils::logging;

/// Deposit service for the top-up workflow
#[derive(Clone)]
pub struct DepositService {
    deposits: DepositRepository,
    catalog: CatalogRepository,
    notifications: NotificationService,
    settings: Settings,
}

impl DepositService {
    pub fn new(
        deposits: DepositRepository,
        catalog: CatalogRepository,
        notifications: NotificationService,
        settings: Settings,
    ) -> Self {
        Self {
            deposits,
            catalog,
            notifications,
            settings,
        }
    }

    /// Create a pending deposit and show the operator the receipt
    pub async fn create_deposit(
        &self,
        telegram_id: i64,
        request: CreateDepositRequest,
    ) -> Result<Deposit> {
        if request.amount <= 0 {
            return Err(StoreError::InvalidInput(
                "deposit amount must be positive".to_string(),
            ));
        }
        if request.receipt_file_id.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "receipt image is required".to_string(),
            ));
        }

        let method = self
            .catalog
            .find_payment_method(request.payment_method_id)
            .await?
            .filter(|m| m.active)
            .ok_or(StoreError::PaymentMethodNotFound {
                payment_method_id: request.payment_method_id,
            })?;

        let deposit = self
            .deposits
            .create_pending(NewDeposit {
                deposit_code: generate_display_code(&self.settings.store.deposit_code_prefix),
                telegram_id,
                amount: request.amount,
                payment_method_id: method.id,
                payment_method_name: method.name.clone(),
                receipt_file_id: request.receipt_file_id,
            })
            .await?;

        info!(
            deposit_code = %deposit.deposit_code,
            telegram_id = telegram_id,
            amount = deposit.amount,
            "Deposit created"
        );

        let caption = format!(
            "💰 <b>New deposit {}</b>\nUser: <code>{}</code>\nAmount: {}\nMethod: {}",
            deposit.deposit_code,
            deposit.telegram_id,
            format_amount(deposit.amount, &self.settings.store.currency),
            escape_html(&deposit.payment_method_name),
        );
        if let Err(e) = self
            .notifications
            .notify_operator_with_photo(&deposit.receipt_file_id, &caption)
            .await
        {
            warn!(deposit_code = %deposit.deposit_code, error = %e, "Failed to notify operator about deposit");
        }

        Ok(deposit)
    }

    /// Approve a pending deposit: credit the buyer and notify them
    pub async fn approve_deposit(&self, code: &str, admin_id: i64) -> Result<Deposit> {
        let ProcessedDeposit {
            deposit,
            balance_after,
        } = self.deposits.approve(code, admin_id).await?;

        info!(
            deposit_code = %deposit.deposit_code,
            admin_id = admin_id,
            "Deposit approved"
        );
        logging::log_ledger_operation(
            deposit.telegram_id,
            "deposit_credit",
            deposit.amount,
            balance_after,
        );

        let currency = &self.settings.store.currency;
        let text = format!(
            "✅ Your deposit <b>{}</b> has been approved!\nCredited: {}\nBalance: {}",
            deposit.deposit_code,
            format_amount(deposit.amount, currency),
            format_amount(balance_after, currency),
        );
        if let Err(e) = self.notifications.send_message(deposit.telegram_id, &text).await {
            warn!(deposit_code = %deposit.deposit_code, error = %e, "Failed to notify buyer of deposit approval");
        }

        Ok(deposit)
    }

    /// Reject a pending deposit: balance-neutral, notify with the reason
    pub async fn reject_deposit(&self, code: &str, admin_id: i64, reason: &str) -> Result<Deposit> {
        let deposit = self.deposits.reject(code, admin_id, reason).await?;

        info!(deposit_code = %deposit.deposit_code, admin_id = admin_id, "Deposit rejected");

        let text = format!(
            "❌ Your deposit <b>{}</b> was rejected.\nReason: {}",
            deposit.deposit_code,
            escape_html(reason),
        );
        if let Err(e) = self.notifications.send_message(deposit.telegram_id, &text).await {
            warn!(deposit_code = %deposit.deposit_code, error = %e, "Failed to notify buyer of deposit rejection");
        }

        Ok(deposit)
    }

    /// Fetch one deposit by display code
    pub async fn get_deposit(&self, code: &str) -> Result<Deposit> {
        self.deposits
            .find_by_code(code)
            .await?
            .ok_or_else(|| StoreError::DepositNotFound {
                code: code.to_string(),
            })
    }

    /// List deposits, optionally scoped to one buyer and/or one status
    pub async fn list_deposits(
        &self,
        telegram_id: Option<i64>,
        status: Option<DepositStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Deposit>> {
        self.deposits.list(telegram_id, status, limit, offset).await
    }
}
