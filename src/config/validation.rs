//! Configuration validation
//!
//! Startup-time checks so a misconfigured deployment fails fast instead of
//! failing on the first request.

use crate::utils::errors::StoreError;
use super::settings::Settings;

/// Validate the full settings tree
pub fn validate_settings(settings: &Settings) -> Result<(), StoreError> {
    if settings.bot.token.trim().is_empty() {
        return Err(StoreError::Config("bot.token must be set".to_string()));
    }

    if settings.bot.operator_chat_id == 0 {
        return Err(StoreError::Config(
            "bot.operator_chat_id must be set to the operator chat".to_string(),
        ));
    }

    if settings.bot.admin_ids.is_empty() {
        return Err(StoreError::Config(
            "bot.admin_ids must contain at least one admin identity".to_string(),
        ));
    }

    if settings.database.url.trim().is_empty() {
        return Err(StoreError::Config("database.url must be set".to_string()));
    }

    if settings.database.max_connections < settings.database.min_connections {
        return Err(StoreError::Config(
            "database.max_connections must be >= database.min_connections".to_string(),
        ));
    }

    if settings.server.port == 0 {
        return Err(StoreError::Config("server.port must be non-zero".to_string()));
    }

    if settings.store.currency.trim().is_empty() {
        return Err(StoreError::Config("store.currency must be set".to_string()));
    }

    if settings.limits.max_daily_failed_attempts < 1 {
        return Err(StoreError::Config(
            "limits.max_daily_failed_attempts must be at least 1".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.bot.token = "12345:test_token".to_string();
        settings.bot.operator_chat_id = -100123456;
        settings.bot.admin_ids = vec![42];
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_token_rejected() {
        let mut settings = valid_settings();
        settings.bot.token = "  ".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_missing_operator_rejected() {
        let mut settings = valid_settings();
        settings.bot.operator_chat_id = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_zero_attempt_limit_rejected() {
        let mut settings = valid_settings();
        settings.limits.max_daily_failed_attempts = 0;
        assert!(validate_settings(&settings).is_err());
    }
}
