//! Update dispatch.
//!
//! Routes a parsed [`Update`] to the handler for its variant. Only messages
//! and callback queries have handlers; the remaining variants are listed
//! explicitly so that a newly added [`UpdateKind`] has to be routed here
//! before the crate compiles.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::HandlerError;
use crate::types::{CallbackQuery, Message, Update, UpdateKind};

/// Handlers for the update kinds the bot reacts to.
#[async_trait]
pub trait UpdateHandler: Send + Sync {
    async fn handle_message(&self, message: &Message) -> Result<(), HandlerError>;

    async fn handle_callback_query(&self, query: &CallbackQuery) -> Result<(), HandlerError>;
}

/// What `dispatch` did with an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A handler ran for this field.
    Handled(&'static str),
    /// A known field with no handler yet.
    Ignored(&'static str),
    /// No known field was present; the update was dropped.
    Unrecognized,
}

/// Invoke the handler for the update's variant, at most once.
pub async fn dispatch<H>(handler: &H, update: &Update) -> Result<Dispatch, HandlerError>
where
    H: UpdateHandler + ?Sized,
{
    let kind = update.kind.field_name();

    match &update.kind {
        UpdateKind::Message(message) => {
            info!(
                update_id = update.update_id,
                kind,
                chat_id = message.chat.id,
                message_id = message.message_id,
                "update_dispatch"
            );
            handler.handle_message(message).await?;
            Ok(Dispatch::Handled(kind))
        }
        UpdateKind::CallbackQuery(query) => {
            info!(
                update_id = update.update_id,
                kind,
                callback_query_id = %query.id,
                from_id = query.from.id,
                "update_dispatch"
            );
            handler.handle_callback_query(query).await?;
            Ok(Dispatch::Handled(kind))
        }
        UpdateKind::EditedMessage(_)
        | UpdateKind::ChannelPost(_)
        | UpdateKind::EditedChannelPost(_)
        | UpdateKind::BusinessConnection(_)
        | UpdateKind::BusinessMessage(_)
        | UpdateKind::EditedBusinessMessage(_)
        | UpdateKind::DeletedBusinessMessages(_)
        | UpdateKind::MessageReaction(_)
        | UpdateKind::MessageReactionCount(_)
        | UpdateKind::InlineQuery(_)
        | UpdateKind::ChosenInlineResult(_)
        | UpdateKind::ShippingQuery(_)
        | UpdateKind::PreCheckoutQuery(_)
        | UpdateKind::PurchasedPaidMedia(_)
        | UpdateKind::Poll(_)
        | UpdateKind::PollAnswer(_)
        | UpdateKind::MyChatMember(_)
        | UpdateKind::ChatMember(_)
        | UpdateKind::ChatJoinRequest(_)
        | UpdateKind::ChatBoost(_)
        | UpdateKind::RemovedChatBoost(_) => {
            debug!(update_id = update.update_id, kind, "update_ignored");
            Ok(Dispatch::Ignored(kind))
        }
        UpdateKind::Unknown => {
            warn!(
                update_id = update.update_id,
                fields = ?update.extra.keys().collect::<Vec<_>>(),
                "update_kind_unrecognized"
            );
            Ok(Dispatch::Unrecognized)
        }
    }
}
