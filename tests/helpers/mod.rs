//! Shared test helpers

pub mod database_helper;
pub mod telegram_mock;

pub use telegram_mock::TelegramMockServer;
