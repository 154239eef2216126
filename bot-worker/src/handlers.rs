//! The bot's update handlers.

use async_trait::async_trait;
use tracing::info;

use crate::api::TelegramApi;
use crate::dispatch::UpdateHandler;
use crate::error::HandlerError;
use crate::types::{CallbackQuery, Message};

/// Replies to text messages (or captioned media) with their own text and
/// acknowledges callback button presses.
#[derive(Debug, Clone)]
pub struct BotHandler {
    api: TelegramApi,
}

impl BotHandler {
    pub fn new(api: TelegramApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UpdateHandler for BotHandler {
    async fn handle_message(&self, message: &Message) -> Result<(), HandlerError> {
        let Some(text) = message.text_or_caption() else {
            info!(
                chat_id = message.chat.id,
                message_id = message.message_id,
                "message_without_text_skipped"
            );
            return Ok(());
        };

        info!(
            chat_id = message.chat.id,
            message_id = message.message_id,
            from_id = ?message.from_id(),
            text_length = text.len(),
            "message_received"
        );

        let sent = self
            .api
            .send_message(message.chat.id, text, Some(message.message_id))
            .await?;

        info!(
            chat_id = sent.chat.id,
            message_id = sent.message_id,
            "message_reply_sent"
        );

        Ok(())
    }

    async fn handle_callback_query(&self, query: &CallbackQuery) -> Result<(), HandlerError> {
        info!(
            callback_query_id = %query.id,
            from_id = query.from.id,
            has_data = query.data().is_some(),
            "callback_query_received"
        );

        self.api.answer_callback_query(&query.id, None).await?;

        info!(callback_query_id = %query.id, "callback_query_answered");

        Ok(())
    }
}
