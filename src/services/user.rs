//! User service implementation
//!
//! Registration on first login, profile refresh, and read access for the
//! admin panel.

use tracing::{debug, info};
use crate::database::repositories::UserRepository;
use crate::models::user::{UpsertUserRequest, User};
use crate::services::auth::AuthContext;
use crate::utils::errors::{Result, StoreError};

/// User service for profile management
#[derive(Debug, Clone)]
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Create the user on first login, refresh profile fields afterwards
    pub async fn register_or_refresh(&self, ctx: &AuthContext) -> Result<User> {
        debug!(telegram_id = ctx.telegram_id, "Registering or refreshing user");

        let user = self
            .users
            .upsert(UpsertUserRequest {
                telegram_id: ctx.telegram_id,
                username: ctx.username.clone(),
                first_name: ctx.first_name.clone(),
                last_name: ctx.last_name.clone(),
            })
            .await?;

        info!(telegram_id = user.telegram_id, "User profile up to date");
        Ok(user)
    }

    /// Get user by Telegram ID
    pub async fn get_by_telegram_id(&self, telegram_id: i64) -> Result<User> {
        self.users
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or(StoreError::UserNotFound { telegram_id })
    }

    /// List users with pagination
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        self.users.list(limit, offset).await
    }

    /// Count total users
    pub async fn count(&self) -> Result<i64> {
        self.users.count().await
    }

    /// All telegram ids, for broadcast fan-out
    pub async fn all_telegram_ids(&self) -> Result<Vec<i64>> {
        self.users.all_telegram_ids().await
    }
}
