//! Order service implementation
//!
//! Owns the order lifecycle: placement (debit + pending record), approval,
//! and rejection (refund). Every state change commits in one repository
//! transaction; the notification that follows is fire-and-forget.

use tracing::{info, warn};
use crate::config::Settings;
use crate::database::repositories::{CatalogRepository, NewOrder, OrderRepository, ProcessedOrder};
use crate::models::order::{CreateOrderRequest, Order, OrderStatus};
use crate::services::ban::BanService;
use crate::services::notification::NotificationService;
use crate::utils::errors::{Result, StoreError};
use crate::utils::helpers::{escape_html, format_amount, generate_display_code};
use crate::utils::logging;

/// Order service for the purchase workflow
#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    catalog: CatalogRepository,
    bans: BanService,
    notifications: NotificationService,
    settings: Settings,
}

impl OrderService {
    pub fn new(
        orders: OrderRepository,
        catalog: CatalogRepository,
        bans: BanService,
        notifications: NotificationService,
        settings: Settings,
    ) -> Self {
        Self {
            orders,
            catalog,
            bans,
            notifications,
            settings,
        }
    }

    /// Place an order: snapshot the product, debit the buyer, append the
    /// pending record, notify the operator.
    ///
    /// When the buyer cannot cover the price the failed-attempt policy runs
    /// and its outcome is folded into the returned error so the client can
    /// warn about remaining attempts.
    pub async fn place_order(
        &self,
        telegram_id: i64,
        request: CreateOrderRequest,
    ) -> Result<Order> {
        let product = self
            .catalog
            .find_product(request.product_id)
            .await?
            .filter(|p| p.active)
            .ok_or(StoreError::ProductNotFound {
                product_id: request.product_id,
            })?;

        let category = self
            .catalog
            .find_category(product.category_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("category {}", product.category_id)))?;

        self.check_required_fields(product.category_id, &request.input_data)
            .await?;

        let new_order = NewOrder {
            order_code: generate_display_code(&self.settings.store.order_code_prefix),
            telegram_id,
            product_id: product.id,
            product_name: product.name.clone(),
            category_name: category.name.clone(),
            product_amount: product.amount.clone(),
            price: product.price,
            currency: product.currency.clone(),
            input_data: serde_json::Value::Object(request.input_data),
        };

        let order = match self.orders.create_pending(new_order).await {
            Ok(order) => order,
            Err(StoreError::InsufficientBalance {
                balance, required, ..
            }) => {
                let outcome = self.bans.record_failed_attempt(telegram_id).await?;
                return Err(StoreError::InsufficientBalance {
                    balance,
                    required,
                    attempts: outcome.attempts,
                    attempts_remaining: outcome.attempts_remaining,
                    banned: outcome.banned_now,
                });
            }
            Err(e) => return Err(e),
        };

        info!(
            order_code = %order.order_code,
            telegram_id = telegram_id,
            price = order.price,
            "Order placed"
        );

        let text = self.operator_order_text(&order);
        if let Err(e) = self.notifications.notify_operator(&text).await {
            warn!(order_code = %order.order_code, error = %e, "Failed to notify operator about order");
        }

        Ok(order)
    }

    /// Approve a pending order and notify the buyer
    pub async fn approve_order(&self, code: &str, admin_id: i64) -> Result<Order> {
        let ProcessedOrder { order, .. } = self.orders.approve(code, admin_id).await?;

        info!(order_code = %order.order_code, admin_id = admin_id, "Order approved");

        let text = format!(
            "✅ Your order <b>{}</b> has been approved!\n{} — {}",
            order.order_code,
            escape_html(&order.product_name),
            escape_html(&order.product_amount),
        );
        if let Err(e) = self.notifications.send_message(order.telegram_id, &text).await {
            warn!(order_code = %order.order_code, error = %e, "Failed to notify buyer of approval");
        }

        Ok(order)
    }

    /// Reject a pending order, refund the buyer, and notify them with the
    /// reason and their restored balance
    pub async fn reject_order(&self, code: &str, admin_id: i64, reason: &str) -> Result<Order> {
        let ProcessedOrder {
            order,
            balance_after,
        } = self.orders.reject(code, admin_id, reason).await?;

        info!(
            order_code = %order.order_code,
            admin_id = admin_id,
            "Order rejected and refunded"
        );
        logging::log_ledger_operation(order.telegram_id, "order_refund", order.price, balance_after);

        let text = format!(
            "❌ Your order <b>{}</b> was rejected.\nReason: {}\nRefunded: {}\nBalance: {}",
            order.order_code,
            escape_html(reason),
            format_amount(order.price, &order.currency),
            format_amount(balance_after, &order.currency),
        );
        if let Err(e) = self.notifications.send_message(order.telegram_id, &text).await {
            warn!(order_code = %order.order_code, error = %e, "Failed to notify buyer of rejection");
        }

        Ok(order)
    }

    /// Fetch one order by display code
    pub async fn get_order(&self, code: &str) -> Result<Order> {
        self.orders
            .find_by_code(code)
            .await?
            .ok_or_else(|| StoreError::OrderNotFound {
                code: code.to_string(),
            })
    }

    /// List orders, optionally scoped to one buyer and/or one status
    pub async fn list_orders(
        &self,
        telegram_id: Option<i64>,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>> {
        self.orders.list(telegram_id, status, limit, offset).await
    }

    async fn check_required_fields(
        &self,
        category_id: i64,
        input_data: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<()> {
        let fields = self.catalog.list_input_fields(Some(category_id)).await?;

        for field in fields.iter().filter(|f| f.required) {
            let present = input_data
                .get(&field.field_key)
                .and_then(|v| v.as_str())
                .map(|s| !s.trim().is_empty())
                .unwrap_or(false);
            if !present {
                return Err(StoreError::InvalidInput(format!(
                    "missing required field: {}",
                    field.label
                )));
            }
        }

        Ok(())
    }

    fn operator_order_text(&self, order: &Order) -> String {
        let mut text = format!(
            "🛒 <b>New order {}</b>\nBuyer: <code>{}</code>\nProduct: {} — {}\nPrice: {}",
            order.order_code,
            order.telegram_id,
            escape_html(&order.product_name),
            escape_html(&order.product_amount),
            format_amount(order.price, &order.currency),
        );

        if let Some(map) = order.input_data.as_object() {
            for (key, value) in map {
                let value = value.as_str().map(String::from).unwrap_or_else(|| value.to_string());
                text.push_str(&format!("\n{}: {}", escape_html(key), escape_html(&value)));
            }
        }

        text
    }
}
