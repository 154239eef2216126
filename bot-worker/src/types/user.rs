//! Users and chats.

use serde::{Deserialize, Serialize};

use super::Extra;

/// A Telegram user or bot.
///
/// See also: <https://core.telegram.org/bots/api#user>.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A private chat, group, supergroup or channel.
///
/// See also: <https://core.telegram.org/bots/api#chat>.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(flatten)]
    pub extra: Extra,
}
