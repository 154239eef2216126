//! The `Update` envelope.
//!
//! On the wire an update is an object with `update_id` and at most one of a
//! fixed set of optional fields. Here the populated field becomes a variant
//! of [`UpdateKind`], chosen while parsing. An update that carries two
//! known fields is rejected instead of being silently routed by priority.
//!
//! Only kinds with a handler decode their payload; the rest keep it as raw
//! JSON, so no payload shape of an ignored kind can fail the update.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::{CallbackQuery, Extra, Message};

/// An incoming update.
///
/// See also: <https://core.telegram.org/bots/api#update>.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Sequential identifier, usable for deduplication by the caller.
    pub update_id: i64,
    pub kind: UpdateKind,
    /// Top-level members outside the known set, including known fields sent as `null`.
    pub extra: Extra,
}

macro_rules! update_kinds {
    ($( $(#[$meta:meta])* $variant:ident($payload:ty) => $field:literal, )+) => {
        /// The single populated payload of an [`Update`].
        #[derive(Debug, Clone, PartialEq)]
        pub enum UpdateKind {
            $( $(#[$meta])* $variant($payload), )+
            /// None of the known fields was present.
            Unknown,
        }

        impl UpdateKind {
            /// Wire names of the known update fields, in documented order.
            pub const FIELDS: &'static [&'static str] = &[$($field),+];

            /// Wire name of the populated field, or `"unknown"`.
            pub fn field_name(&self) -> &'static str {
                match self {
                    $( UpdateKind::$variant(_) => $field, )+
                    UpdateKind::Unknown => "unknown",
                }
            }

            fn from_field(field: &str, value: Value) -> Result<Self, serde_json::Error> {
                match field {
                    $( $field => serde_json::from_value(value).map(UpdateKind::$variant), )+
                    other => Err(serde_json::Error::unknown_field(other, Self::FIELDS)),
                }
            }

            fn serialize_entry<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
                match self {
                    $( UpdateKind::$variant(payload) => map.serialize_entry($field, payload), )+
                    UpdateKind::Unknown => Ok(()),
                }
            }
        }
    };
}

update_kinds! {
    Message(Message) => "message",
    EditedMessage(Value) => "edited_message",
    ChannelPost(Value) => "channel_post",
    EditedChannelPost(Value) => "edited_channel_post",
    BusinessConnection(Value) => "business_connection",
    BusinessMessage(Value) => "business_message",
    EditedBusinessMessage(Value) => "edited_business_message",
    DeletedBusinessMessages(Value) => "deleted_business_messages",
    MessageReaction(Value) => "message_reaction",
    MessageReactionCount(Value) => "message_reaction_count",
    InlineQuery(Value) => "inline_query",
    ChosenInlineResult(Value) => "chosen_inline_result",
    CallbackQuery(CallbackQuery) => "callback_query",
    ShippingQuery(Value) => "shipping_query",
    PreCheckoutQuery(Value) => "pre_checkout_query",
    PurchasedPaidMedia(Value) => "purchased_paid_media",
    Poll(Value) => "poll",
    PollAnswer(Value) => "poll_answer",
    /// The bot's own membership status changed.
    MyChatMember(Value) => "my_chat_member",
    /// Requires `chat_member` in `allowed_updates`.
    ChatMember(Value) => "chat_member",
    ChatJoinRequest(Value) => "chat_join_request",
    ChatBoost(Value) => "chat_boost",
    RemovedChatBoost(Value) => "removed_chat_boost",
}

impl<'de> Deserialize<'de> for Update {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Extra::deserialize(deserializer)?;

        let update_id = match fields.remove("update_id") {
            Some(value) => i64::deserialize(value).map_err(D::Error::custom)?,
            None => return Err(D::Error::missing_field("update_id")),
        };

        let mut kind = UpdateKind::Unknown;
        for &field in UpdateKind::FIELDS {
            let value = match fields.remove(field) {
                None => continue,
                Some(Value::Null) => {
                    fields.insert(field.to_string(), Value::Null);
                    continue;
                }
                Some(value) => value,
            };

            if !matches!(kind, UpdateKind::Unknown) {
                return Err(D::Error::custom(format!(
                    "update {} carries both `{}` and `{}`",
                    update_id,
                    kind.field_name(),
                    field
                )));
            }

            kind = UpdateKind::from_field(field, value)
                .map_err(|e| D::Error::custom(format!("invalid `{}` payload: {}", field, e)))?;
        }

        Ok(Update {
            update_id,
            kind,
            extra: fields,
        })
    }
}

impl Serialize for Update {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let populated = usize::from(!matches!(self.kind, UpdateKind::Unknown));
        let mut map = serializer.serialize_map(Some(1 + populated + self.extra.len()))?;
        map.serialize_entry("update_id", &self.update_id)?;
        self.kind.serialize_entry(&mut map)?;
        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
