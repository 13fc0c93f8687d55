//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables. The
//! settings are resolved once at startup and passed into services at
//! construction; nothing mutates them at runtime.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub bot: BotConfig,
    pub database: DatabaseSettings,
    pub store: StoreConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    /// Override for the Bot API base URL (used by tests; None means api.telegram.org)
    pub api_url: Option<String>,
    pub admin_ids: Vec<i64>,
    /// Chat that receives new-order and new-deposit notifications
    pub operator_chat_id: i64,
    /// Init data older than this is rejected; 0 disables the check
    pub auth_max_age_seconds: u64,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Storefront configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub currency: String,
    pub order_code_prefix: String,
    pub deposit_code_prefix: String,
}

/// Policy limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Failed purchase attempts per calendar day before an automatic ban
    pub max_daily_failed_attempts: i32,
    /// Whether reaching the limit bans automatically
    pub auto_ban: bool,
    /// Fixed delay between broadcast messages
    pub broadcast_delay_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("TOPUPSTORE").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::StoreError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            bot: BotConfig {
                token: String::new(),
                api_url: None,
                admin_ids: vec![],
                operator_chat_id: 0,
                auth_max_age_seconds: 86400,
            },
            database: DatabaseSettings {
                url: "postgresql://localhost/topupstore".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            store: StoreConfig {
                currency: "MMK".to_string(),
                order_code_prefix: "ORD".to_string(),
                deposit_code_prefix: "DEP".to_string(),
            },
            limits: LimitsConfig {
                max_daily_failed_attempts: 5,
                auto_ban: true,
                broadcast_delay_ms: 100,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.store.currency, "MMK");
        assert_eq!(settings.limits.max_daily_failed_attempts, 5);
        assert!(settings.limits.auto_ban);
        assert_eq!(settings.server.port, 8080);
    }
}
