//! TopupStore Mini App backend
//!
//! A Telegram Mini App storefront for digital game top-ups. This library
//! provides the order and deposit ledger, balance accounting, ban policy,
//! catalog management, and the Telegram notification layer behind the
//! HTTP API served to the Mini App client and the admin panel.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, StoreError};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
