//! Authentication service implementation
//!
//! Validates Telegram Mini App init data: the signed payload the WebApp
//! hands to the client. The signature is an HMAC-SHA256 over the sorted
//! key/value pairs, keyed with a secret derived from the bot token. The
//! embedded identity is trusted only when the recomputed digest matches
//! the supplied `hash` and the payload is fresh enough.

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;
use crate::config::Settings;
use crate::utils::errors::{Result, StoreError};

type HmacSha256 = Hmac<Sha256>;

/// Identity fields carried inside the `user` member of init data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebAppUser {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
}

/// Validated init data
#[derive(Debug, Clone)]
pub struct InitData {
    pub user: WebAppUser,
    pub auth_date: i64,
}

/// Identity attached to an authenticated request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_admin: bool,
}

/// Authentication service for init-data verification and admin checks
#[derive(Debug, Clone)]
pub struct AuthService {
    settings: Settings,
}

impl AuthService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Check if an identity is a configured admin
    pub fn is_admin(&self, telegram_id: i64) -> bool {
        self.settings.bot.admin_ids.contains(&telegram_id)
    }

    /// Validate raw init data and extract the embedded identity
    pub fn validate_init_data(&self, init_data: &str) -> Result<InitData> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        let mut provided_hash: Option<String> = None;

        for part in init_data.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| StoreError::Authentication("malformed init data".to_string()))?;
            let key = urlencoding::decode(key)
                .map_err(|_| StoreError::Authentication("malformed init data".to_string()))?
                .into_owned();
            let value = urlencoding::decode(value)
                .map_err(|_| StoreError::Authentication("malformed init data".to_string()))?
                .into_owned();

            if key == "hash" {
                provided_hash = Some(value);
            } else {
                pairs.push((key, value));
            }
        }

        let provided_hash = provided_hash
            .ok_or_else(|| StoreError::Authentication("init data has no hash".to_string()))?;

        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        let data_check_string = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("\n");

        self.verify_hash(&data_check_string, &provided_hash)?;

        let auth_date: i64 = pairs
            .iter()
            .find(|(k, _)| k == "auth_date")
            .and_then(|(_, v)| v.parse().ok())
            .ok_or_else(|| StoreError::Authentication("init data has no auth_date".to_string()))?;

        let max_age = self.settings.bot.auth_max_age_seconds;
        if max_age > 0 && Utc::now().timestamp() - auth_date > max_age as i64 {
            return Err(StoreError::Authentication("init data expired".to_string()));
        }

        let user_json = pairs
            .iter()
            .find(|(k, _)| k == "user")
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| StoreError::Authentication("init data has no user".to_string()))?;
        let user: WebAppUser = serde_json::from_str(user_json)
            .map_err(|_| StoreError::Authentication("malformed user in init data".to_string()))?;

        debug!(telegram_id = user.id, "Init data validated");
        Ok(InitData { user, auth_date })
    }

    /// Validate init data and build the request auth context
    pub fn authenticate(&self, init_data: &str) -> Result<AuthContext> {
        let data = self.validate_init_data(init_data)?;

        Ok(AuthContext {
            telegram_id: data.user.id,
            username: data.user.username,
            first_name: data.user.first_name,
            last_name: data.user.last_name,
            is_admin: self.is_admin(data.user.id),
        })
    }

    fn verify_hash(&self, data_check_string: &str, provided_hash: &str) -> Result<()> {
        let expected = hex::decode(provided_hash)
            .map_err(|_| StoreError::Authentication("hash is not hex".to_string()))?;

        // secret = HMAC_SHA256("WebAppData", bot_token)
        let mut secret_mac = HmacSha256::new_from_slice(b"WebAppData")
            .map_err(|_| StoreError::Authentication("bad hmac key".to_string()))?;
        secret_mac.update(self.settings.bot.token.as_bytes());
        let secret = secret_mac.finalize().into_bytes();

        let mut mac = HmacSha256::new_from_slice(&secret)
            .map_err(|_| StoreError::Authentication("bad hmac key".to_string()))?;
        mac.update(data_check_string.as_bytes());
        mac.verify_slice(&expected)
            .map_err(|_| StoreError::Authentication("init data hash mismatch".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::config::Settings;

    const TOKEN: &str = "12345:test_token";

    fn service() -> AuthService {
        let mut settings = Settings::default();
        settings.bot.token = TOKEN.to_string();
        settings.bot.admin_ids = vec![777];
        AuthService::new(settings)
    }

    /// Build signed init data the way the Telegram client does
    fn sign(pairs: &[(&str, &str)]) -> String {
        let mut sorted: Vec<_> = pairs.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        let dcs = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("\n");

        let mut secret_mac = HmacSha256::new_from_slice(b"WebAppData").unwrap();
        secret_mac.update(TOKEN.as_bytes());
        let secret = secret_mac.finalize().into_bytes();
        let mut mac = HmacSha256::new_from_slice(&secret).unwrap();
        mac.update(dcs.as_bytes());
        let hash = hex::encode(mac.finalize().into_bytes());

        let mut query: Vec<String> = pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();
        query.push(format!("hash={}", hash));
        query.join("&")
    }

    fn fresh_pairs<'a>(user_json: &'a str, auth_date: &'a str) -> Vec<(&'a str, &'a str)> {
        vec![
            ("auth_date", auth_date),
            ("query_id", "AAF9xxx"),
            ("user", user_json),
        ]
    }

    #[test]
    fn test_valid_init_data_accepted() {
        let auth_date = Utc::now().timestamp().to_string();
        let user = r#"{"id":777,"first_name":"Aung","username":"aung99"}"#;
        let init_data = sign(&fresh_pairs(user, &auth_date));

        let ctx = service().authenticate(&init_data).unwrap();
        assert_eq!(ctx.telegram_id, 777);
        assert_eq!(ctx.username.as_deref(), Some("aung99"));
        assert!(ctx.is_admin);
    }

    #[test]
    fn test_non_admin_identity() {
        let auth_date = Utc::now().timestamp().to_string();
        let user = r#"{"id":42,"first_name":"Mya"}"#;
        let init_data = sign(&fresh_pairs(user, &auth_date));

        let ctx = service().authenticate(&init_data).unwrap();
        assert!(!ctx.is_admin);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let auth_date = Utc::now().timestamp().to_string();
        let user = r#"{"id":42,"first_name":"Mya"}"#;
        let init_data = sign(&fresh_pairs(user, &auth_date));

        // Swap the embedded identity after signing
        let tampered = init_data.replace("%22id%22%3A42", "%22id%22%3A777");
        assert!(service().authenticate(&tampered).is_err());
    }

    #[test]
    fn test_missing_hash_rejected() {
        let err = service()
            .validate_init_data("auth_date=1&user=%7B%22id%22%3A1%7D")
            .unwrap_err();
        assert_matches!(err, StoreError::Authentication(_));
    }

    #[test]
    fn test_stale_init_data_rejected() {
        let auth_date = (Utc::now().timestamp() - 200_000).to_string();
        let user = r#"{"id":42,"first_name":"Mya"}"#;
        let init_data = sign(&fresh_pairs(user, &auth_date));

        // Default max age is one day
        let err = service().validate_init_data(&init_data).unwrap_err();
        assert_matches!(err, StoreError::Authentication(_));
    }
}
