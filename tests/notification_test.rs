//! Notification delivery tests against a mock Bot API

mod helpers;

use helpers::TelegramMockServer;
use serial_test::serial;
use TopupStore::config::Settings;
use TopupStore::services::NotificationService;

fn test_settings(api_url: String) -> Settings {
    let mut settings = Settings::default();
    settings.bot.token = "12345:test_token".to_string();
    settings.bot.api_url = Some(api_url);
    settings.bot.operator_chat_id = -1001234567890;
    settings.limits.broadcast_delay_ms = 1;
    settings
}

#[tokio::test]
#[serial]
async fn operator_notification_is_delivered() {
    let mock = TelegramMockServer::start().await;
    mock.mock_send_ok().await;

    let service = NotificationService::new(test_settings(mock.api_url()))
        .unwrap_or_else(|e| panic!("service init failed: {e}"));

    let result = service.notify_operator("<b>New order</b> ORD-TEST1234").await;
    assert!(result.is_ok());
}

#[tokio::test]
#[serial]
async fn broadcast_counts_successful_sends() {
    let mock = TelegramMockServer::start().await;
    mock.mock_send_ok().await;

    let service = NotificationService::new(test_settings(mock.api_url()))
        .unwrap_or_else(|e| panic!("service init failed: {e}"));

    let outcome = service.broadcast(&[100, 200, 300], "hello", None).await;
    assert_eq!(outcome.success, 3);
    assert_eq!(outcome.failed, 0);
}

#[tokio::test]
#[serial]
async fn broadcast_counts_failures_without_aborting() {
    let mock = TelegramMockServer::start().await;
    mock.mock_send_forbidden().await;

    let service = NotificationService::new(test_settings(mock.api_url()))
        .unwrap_or_else(|e| panic!("service init failed: {e}"));

    let outcome = service.broadcast(&[100, 200], "hello", None).await;
    assert_eq!(outcome.success, 0);
    assert_eq!(outcome.failed, 2);
}

#[tokio::test]
#[serial]
async fn broadcast_with_image_uses_send_photo() {
    let mock = TelegramMockServer::start().await;
    mock.mock_send_ok().await;

    let service = NotificationService::new(test_settings(mock.api_url()))
        .unwrap_or_else(|e| panic!("service init failed: {e}"));

    let outcome = service
        .broadcast(&[100], "caption", Some("AgACAgQAAxkBAAIB"))
        .await;
    assert_eq!(outcome.success, 1);
}
