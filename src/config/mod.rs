//! Configuration module
//!
//! Typed application settings, loaded once at startup

pub mod settings;
pub mod validation;

pub use settings::{
    BotConfig, DatabaseSettings, LimitsConfig, LoggingConfig, ServerConfig, Settings, StoreConfig,
};
