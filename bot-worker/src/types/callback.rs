//! Callback queries from inline keyboards.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Extra, User};

/// A press on a callback button of an inline keyboard.
///
/// See also: <https://core.telegram.org/bots/api#callbackquery>.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(flatten)]
    pub extra: Extra,
}

impl CallbackQuery {
    /// Data attached to the pressed button.
    pub fn data(&self) -> Option<&str> {
        self.extra.get("data").and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_callback_query_from_inline_message() {
        let raw = json!({
            "id": "4382bfdwdsb323b2d9",
            "from": {"id": 100, "is_bot": false, "first_name": "John"},
            "inline_message_id": "AAAB",
            "chat_instance": "-1234",
            "data": "vote:yes"
        });

        let query: CallbackQuery = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(query.data(), Some("vote:yes"));
        assert_eq!(serde_json::to_value(&query).unwrap(), raw);
    }

    #[test]
    fn test_null_message_roundtrips() {
        let raw = json!({
            "id": "q",
            "from": {"id": 1},
            "message": null,
            "data": null
        });

        let query: CallbackQuery = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(query.data(), None);
        assert_eq!(serde_json::to_value(&query).unwrap(), raw);
    }
}
