//! Mock Telegram Bot API server
//!
//! Wiremock-backed stand-in for api.telegram.org. The notification service
//! is pointed at it through the `bot.api_url` setting, so tests exercise the
//! real request path without touching the network.

use serde_json::json;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to put into `bot.api_url`
    pub fn api_url(&self) -> String {
        format!("{}/", self.server.uri())
    }

    /// Accept every sendMessage/sendPhoto call with a well-formed Message
    pub async fn mock_send_ok(&self) {
        Mock::given(method("POST"))
            .and(path_regex(r"^/bot.*/[Ss]end(Message|Photo)$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {
                    "message_id": 123,
                    "from": {
                        "id": 12345,
                        "is_bot": true,
                        "first_name": "TestBot",
                        "username": "test_bot"
                    },
                    "chat": {
                        "id": 777,
                        "first_name": "Test",
                        "type": "private"
                    },
                    "date": 1640995200,
                    "text": "ok"
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Reject every sendMessage/sendPhoto call as the Bot API would for a
    /// blocked recipient
    pub async fn mock_send_forbidden(&self) {
        Mock::given(method("POST"))
            .and(path_regex(r"^/bot.*/[Ss]end(Message|Photo)$"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "ok": false,
                "error_code": 403,
                "description": "Forbidden: bot was blocked by the user"
            })))
            .mount(&self.server)
            .await;
    }
}
