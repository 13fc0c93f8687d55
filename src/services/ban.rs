//! Ban service implementation
//!
//! Failed-attempt accounting with a per-calendar-day reset, the automatic
//! ban threshold, and the explicit ban/unban operations. The ban set is
//! checked at the auth boundary before any ledger operation is reachable.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use crate::config::Settings;
use crate::database::repositories::{BanRepository, UserRepository};
use crate::models::ban::{BannedUser, FailedAttemptOutcome};
use crate::services::notification::NotificationService;
use crate::utils::errors::Result;
use crate::utils::logging;

/// Reason attached to automatic bans
pub const AUTO_BAN_REASON: &str = "Too many failed purchase attempts in one day";

/// Post-increment attempt count: the counter restarts at 1 whenever the
/// calendar date of the last failure differs from today
pub fn next_attempt_count(last_failed: Option<NaiveDate>, today: NaiveDate, current: i32) -> i32 {
    match last_failed {
        Some(date) if date == today => current + 1,
        _ => 1,
    }
}

/// Ban service for the failed-attempt policy and explicit ban management
#[derive(Clone)]
pub struct BanService {
    bans: BanRepository,
    users: UserRepository,
    notifications: NotificationService,
    settings: Settings,
}

impl BanService {
    pub fn new(
        bans: BanRepository,
        users: UserRepository,
        notifications: NotificationService,
        settings: Settings,
    ) -> Self {
        Self {
            bans,
            users,
            notifications,
            settings,
        }
    }

    /// Record a purchase attempt blocked by insufficient balance.
    ///
    /// Returns the attempt count for today and whether this call crossed the
    /// threshold and banned the user.
    pub async fn record_failed_attempt(&self, telegram_id: i64) -> Result<FailedAttemptOutcome> {
        let today = Utc::now().date_naive();
        let attempts = self.users.record_failed_attempt(telegram_id, today).await?;

        let limit = self.settings.limits.max_daily_failed_attempts;
        let banned_now = attempts >= limit
            && self.settings.limits.auto_ban
            && self.bans.ban(telegram_id, AUTO_BAN_REASON).await?;

        if banned_now {
            logging::log_ban_event(telegram_id, true, Some(AUTO_BAN_REASON));
            self.notify_banned(telegram_id, AUTO_BAN_REASON).await;
        } else {
            warn!(
                telegram_id = telegram_id,
                attempts = attempts,
                limit = limit,
                "Failed purchase attempt recorded"
            );
        }

        Ok(FailedAttemptOutcome {
            attempts,
            limit,
            attempts_remaining: (limit - attempts).max(0),
            banned_now,
        })
    }

    /// Add a user to the ban set. Idempotent; notifies the user once.
    pub async fn ban_user(&self, telegram_id: i64, reason: &str, admin_id: i64) -> Result<bool> {
        let newly_banned = self.bans.ban(telegram_id, reason).await?;

        if newly_banned {
            logging::log_admin_action(admin_id, "ban", Some(&telegram_id.to_string()), Some(reason));
            self.notify_banned(telegram_id, reason).await;
        }

        Ok(newly_banned)
    }

    /// Remove a user from the ban set. Idempotent; notifies the user once.
    pub async fn unban_user(&self, telegram_id: i64, admin_id: i64) -> Result<bool> {
        let removed = self.bans.unban(telegram_id).await?;

        if removed {
            logging::log_admin_action(admin_id, "unban", Some(&telegram_id.to_string()), None);
            info!(telegram_id = telegram_id, "User unbanned");
            if let Err(e) = self
                .notifications
                .send_message(
                    telegram_id,
                    "✅ Your access has been restored. Welcome back!",
                )
                .await
            {
                warn!(telegram_id = telegram_id, error = %e, "Failed to send unban notification");
            }
        }

        Ok(removed)
    }

    /// Membership lookup with the ban reason
    pub async fn check(&self, telegram_id: i64) -> Result<Option<BannedUser>> {
        self.bans.find(telegram_id).await
    }

    pub async fn is_banned(&self, telegram_id: i64) -> Result<bool> {
        self.bans.is_banned(telegram_id).await
    }

    /// List the full ban set
    pub async fn list_banned(&self) -> Result<Vec<BannedUser>> {
        self.bans.list().await
    }

    async fn notify_banned(&self, telegram_id: i64, reason: &str) {
        let text = format!("🚫 Your account has been suspended.\nReason: {}", reason);
        if let Err(e) = self.notifications.send_message(telegram_id, &text).await {
            warn!(telegram_id = telegram_id, error = %e, "Failed to send ban notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    #[test]
    fn test_counter_increments_within_one_day() {
        assert_eq!(next_attempt_count(None, day(1), 0), 1);
        assert_eq!(next_attempt_count(Some(day(1)), day(1), 1), 2);
        assert_eq!(next_attempt_count(Some(day(1)), day(1), 4), 5);
    }

    #[test]
    fn test_counter_resets_across_day_boundary() {
        // Five failures on day N then one on day N+1 must give 1, not 6
        assert_eq!(next_attempt_count(Some(day(1)), day(2), 5), 1);
    }

    #[test]
    fn test_counter_resets_after_a_gap() {
        assert_eq!(next_attempt_count(Some(day(1)), day(15), 3), 1);
    }

    #[test]
    fn test_threshold_reached_on_fifth_same_day_attempt() {
        let mut count = 0;
        let mut last: Option<NaiveDate> = None;
        for _ in 0..5 {
            count = next_attempt_count(last, day(3), count);
            last = Some(day(3));
        }
        assert_eq!(count, 5);
        assert!(count >= 5, "fifth same-day failure crosses the threshold");
    }

    #[test]
    fn test_auto_ban_reason_mentions_attempts() {
        assert!(AUTO_BAN_REASON.contains("attempt"));
    }
}
