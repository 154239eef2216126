//! TgBot - Telegram Bot API webhook worker.
//!
//! This library provides shared modules for the two binaries:
//! - `tgbot-web`: Webhook server receiving updates from Telegram
//! - `tgbot-admin`: CLI for registering and inspecting the webhook
//!
//! ## Architecture
//!
//! ```text
//! Telegram → POST /webhook → secret check → Update → dispatch → handler → Bot API
//! ```

pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod types;
pub mod web;

// Re-export commonly used types
pub use api::TelegramApi;
pub use config::Config;
pub use dispatch::{dispatch, Dispatch, UpdateHandler};
pub use error::{ApiError, ConfigError, HandlerError};
pub use handlers::BotHandler;
pub use types::{CallbackQuery, Message, Update, UpdateKind};
pub use web::AppState;
