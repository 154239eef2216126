//! Messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Chat, Extra};

/// A message, post, or business message.
///
/// Only the ids needed to reply are typed; text, sender, media and service
/// fields stay in `extra`.
///
/// See also: <https://core.telegram.org/bots/api#message>.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Message {
    /// Text of the message, falling back to a media caption.
    pub fn text_or_caption(&self) -> Option<&str> {
        ["text", "caption"]
            .iter()
            .find_map(|key| self.extra.get(*key).and_then(Value::as_str))
    }

    /// Id of the sender, absent for channel posts and anonymous admins.
    pub fn from_id(&self) -> Option<i64> {
        self.extra
            .get("from")
            .and_then(|from| from.get("id"))
            .and_then(Value::as_i64)
    }
}
