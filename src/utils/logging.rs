//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the TopupStore application.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer; the caller must hold it for
/// the life of the process or the rolling-file layer writes nothing.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "topupstore.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log ledger operations with structured data
pub fn log_ledger_operation(telegram_id: i64, operation: &str, amount: i64, balance_after: i64) {
    info!(
        telegram_id = telegram_id,
        operation = operation,
        amount = amount,
        balance_after = balance_after,
        "Ledger operation applied"
    );
}

/// Log admin actions
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log ban policy decisions
pub fn log_ban_event(telegram_id: i64, banned: bool, reason: Option<&str>) {
    if banned {
        warn!(telegram_id = telegram_id, reason = reason, "User banned");
    } else {
        debug!(telegram_id = telegram_id, "Ban check: user is clean");
    }
}

/// Log notification outcomes
pub fn log_notification(chat_id: i64, kind: &str, success: bool) {
    if success {
        debug!(chat_id = chat_id, kind = kind, "Notification delivered");
    } else {
        warn!(chat_id = chat_id, kind = kind, "Notification failed");
    }
}
