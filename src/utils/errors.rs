//! Error handling for TopupStore
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy, including the mapping
//! of errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Main error type for the TopupStore application
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("User is banned: {reason}")]
    Banned { reason: String },

    #[error("User not found: {telegram_id}")]
    UserNotFound { telegram_id: i64 },

    #[error("Order not found: {code}")]
    OrderNotFound { code: String },

    #[error("Deposit not found: {code}")]
    DepositNotFound { code: String },

    #[error("Product not found: {product_id}")]
    ProductNotFound { product_id: i64 },

    #[error("Payment method not found: {payment_method_id}")]
    PaymentMethodNotFound { payment_method_id: i64 },

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Invalid state transition: {entity} {from} -> {to}")]
    InvalidStateTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    #[error("Insufficient balance: have {balance}, need {required}")]
    InsufficientBalance {
        balance: i64,
        required: i64,
        attempts: i32,
        attempts_remaining: i32,
        banned: bool,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for TopupStore operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            StoreError::Database(_) => false,
            StoreError::Migration(_) => false,
            StoreError::Telegram(_) => true,
            StoreError::Config(_) => false,
            StoreError::Authentication(_) => false,
            StoreError::PermissionDenied(_) => false,
            StoreError::Banned { .. } => false,
            StoreError::UserNotFound { .. } => false,
            StoreError::OrderNotFound { .. } => false,
            StoreError::DepositNotFound { .. } => false,
            StoreError::ProductNotFound { .. } => false,
            StoreError::PaymentMethodNotFound { .. } => false,
            StoreError::NotFound(_) => false,
            StoreError::InvalidStateTransition { .. } => false,
            StoreError::InsufficientBalance { .. } => false,
            StoreError::InvalidInput(_) => false,
            StoreError::Serialization(_) => false,
            StoreError::Io(_) => true,
            StoreError::UrlParse(_) => false,
            StoreError::ServiceUnavailable(_) => true,
        }
    }

    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::Authentication(_) => StatusCode::UNAUTHORIZED,
            StoreError::PermissionDenied(_) | StoreError::Banned { .. } => StatusCode::FORBIDDEN,
            StoreError::UserNotFound { .. }
            | StoreError::OrderNotFound { .. }
            | StoreError::DepositNotFound { .. }
            | StoreError::ProductNotFound { .. }
            | StoreError::PaymentMethodNotFound { .. }
            | StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::InvalidStateTransition { .. } => StatusCode::CONFLICT,
            StoreError::InsufficientBalance { .. } | StoreError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            StoreError::Serialization(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StoreError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal failures keep their details in the logs, not the response
        let body = match &self {
            StoreError::InsufficientBalance {
                balance,
                required,
                attempts,
                attempts_remaining,
                banned,
            } => json!({
                "error": "insufficient_balance",
                "message": self.to_string(),
                "balance": balance,
                "required": required,
                "attempts": attempts,
                "attempts_remaining": attempts_remaining,
                "banned": banned,
            }),
            StoreError::InvalidStateTransition { entity, from, to } => json!({
                "error": "conflict",
                "message": format!("{} already processed: cannot go from {} to {}", entity, from, to),
            }),
            _ if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %self, "Internal error while handling request");
                json!({ "error": "internal", "message": "Internal server error" })
            }
            _ => json!({
                "error": status.canonical_reason().unwrap_or("error").to_lowercase().replace(' ', "_"),
                "message": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            StoreError::Authentication("bad hash".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            StoreError::Banned { reason: "spam".into() }.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            StoreError::OrderNotFound { code: "ORD-X".into() }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            StoreError::InvalidStateTransition {
                entity: "order",
                from: "approved".into(),
                to: "rejected".into()
            }
            .status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_recoverability() {
        assert!(!StoreError::Config("missing token".into()).is_recoverable());
        assert!(StoreError::ServiceUnavailable("telegram".into()).is_recoverable());
    }
}
