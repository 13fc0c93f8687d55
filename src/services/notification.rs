//! Notification service implementation
//!
//! All outbound Telegram traffic funnels through here: operator alerts for
//! new orders/deposits, buyer notifications for processed ones, and admin
//! broadcasts. Sends are fire-and-forget from the ledger's point of view:
//! a failed send is logged and never rolls back a committed state change.

use std::time::Duration;
use teloxide::{
    payloads::{SendMessageSetters, SendPhotoSetters},
    prelude::Request,
    requests::Requester,
    types::{ChatId, InputFile, ParseMode},
    Bot,
};
use serde::Serialize;
use tracing::{info, warn};
use crate::config::Settings;
use crate::utils::errors::{Result, StoreError};
use crate::utils::logging;

/// Aggregated result of a broadcast fan-out
#[derive(Debug, Clone, Default, Serialize)]
pub struct BroadcastOutcome {
    pub success: u32,
    pub failed: u32,
}

/// Notification service for Telegram message delivery
#[derive(Clone)]
pub struct NotificationService {
    bot: Bot,
    settings: Settings,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(settings: Settings) -> Result<Self> {
        let mut bot = Bot::new(&settings.bot.token);
        if let Some(api_url) = &settings.bot.api_url {
            bot = bot.set_api_url(url::Url::parse(api_url)?);
        }

        Ok(Self { bot, settings })
    }

    /// Send a plain HTML-mode message to one chat
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        match self
            .bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::Html)
            .send()
            .await
        {
            Ok(_) => {
                logging::log_notification(chat_id, "message", true);
                Ok(())
            }
            Err(e) => {
                warn!(chat_id = chat_id, error = %e, "Failed to send message");
                logging::log_notification(chat_id, "message", false);
                Err(StoreError::Telegram(e))
            }
        }
    }

    /// Send a photo by Telegram file reference with an HTML caption
    pub async fn send_photo(&self, chat_id: i64, file_id: &str, caption: &str) -> Result<()> {
        match self
            .bot
            .send_photo(ChatId(chat_id), InputFile::file_id(file_id.to_owned()))
            .caption(caption)
            .parse_mode(ParseMode::Html)
            .send()
            .await
        {
            Ok(_) => {
                logging::log_notification(chat_id, "photo", true);
                Ok(())
            }
            Err(e) => {
                warn!(chat_id = chat_id, error = %e, "Failed to send photo");
                logging::log_notification(chat_id, "photo", false);
                Err(StoreError::Telegram(e))
            }
        }
    }

    /// Send to the configured operator chat
    pub async fn notify_operator(&self, text: &str) -> Result<()> {
        self.send_message(self.settings.bot.operator_chat_id, text)
            .await
    }

    /// Send a photo to the configured operator chat
    pub async fn notify_operator_with_photo(&self, file_id: &str, caption: &str) -> Result<()> {
        self.send_photo(self.settings.bot.operator_chat_id, file_id, caption)
            .await
    }

    /// Sequential broadcast with a fixed inter-message delay.
    ///
    /// Per-recipient failures are counted, not propagated; the delay is the
    /// only rate control applied.
    pub async fn broadcast(
        &self,
        recipients: &[i64],
        text: &str,
        image_file_id: Option<&str>,
    ) -> BroadcastOutcome {
        info!(count = recipients.len(), "Starting broadcast");

        let delay = Duration::from_millis(self.settings.limits.broadcast_delay_ms);
        let mut outcome = BroadcastOutcome::default();

        for (i, &chat_id) in recipients.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(delay).await;
            }

            let sent = match image_file_id {
                Some(file_id) => self.send_photo(chat_id, file_id, text).await,
                None => self.send_message(chat_id, text).await,
            };

            match sent {
                Ok(()) => outcome.success += 1,
                Err(_) => outcome.failed += 1,
            }
        }

        info!(
            success = outcome.success,
            failed = outcome.failed,
            "Broadcast finished"
        );
        outcome
    }
}
