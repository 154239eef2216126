//! Telegram Bot API object schema.
//!
//! Only the identifiers the bot routes on are typed. Every other member,
//! including explicit `null`s, is kept in a flattened `extra` map, so every
//! record serializes back to the JSON it was parsed from. Payloads of update
//! kinds without a handler are not decoded at all.
//!
//! Reference: <https://core.telegram.org/bots/api#available-types>

pub mod callback;
pub mod message;
pub mod response;
pub mod update;
pub mod user;

/// Members of a Telegram object that are not modeled as struct fields.
pub type Extra = serde_json::Map<String, serde_json::Value>;

pub use callback::CallbackQuery;
pub use message::Message;
pub use response::{ApiResponse, ResponseParameters, WebhookInfo};
pub use update::{Update, UpdateKind};
pub use user::{Chat, User};
