//! Bot API HTTP client.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use url::Url;

use super::query::query_pairs;
use crate::error::ApiError;
use crate::types::{ApiResponse, Message, User, WebhookInfo};
use crate::Config;

/// Async Bot API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct TelegramApi {
    client: Client,
    /// `{api_base}/bot{token}`; never logged.
    endpoint: String,
}

impl TelegramApi {
    /// Create a client with its own connection pool and the configured timeout.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client on top of an existing `reqwest::Client`.
    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            endpoint: format!(
                "{}/bot{}",
                config.api_base.trim_end_matches('/'),
                config.token
            ),
        }
    }

    /// Build the request URL for `method` with `params` encoded in the query.
    pub fn method_url<P: Serialize + ?Sized>(
        &self,
        method: &str,
        params: &P,
    ) -> Result<Url, ApiError> {
        let mut url = Url::parse(&format!("{}/{}", self.endpoint, method))?;

        let params = match serde_json::to_value(params)? {
            Value::Null => return Ok(url),
            Value::Object(map) => map,
            _ => {
                return Err(ApiError::InvalidParams {
                    method: method.to_string(),
                })
            }
        };

        let pairs = query_pairs(&params);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Call a Bot API method and decode its `result`.
    ///
    /// An `ok: false` envelope is returned as [`ApiError::Telegram`] with the
    /// whole envelope, regardless of the HTTP status it arrived with.
    pub async fn call<P, T>(&self, method: &str, params: &P) -> Result<T, ApiError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.method_url(method, params)?;

        debug!(method, "telegram_api_request");

        // Strip the URL from transport errors so the token never reaches logs.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Http(e.without_url()))?;

        let status = response.status().as_u16();
        let envelope: ApiResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Http(e.without_url()))?;

        if !envelope.ok {
            warn!(
                method,
                status_code = status,
                error_code = ?envelope.error_code,
                description = ?envelope.description,
                "telegram_api_error"
            );
            return Err(ApiError::Telegram(envelope));
        }

        debug!(method, status_code = status, "telegram_api_ok");

        let result = envelope.result.unwrap_or(Value::Null);
        Ok(serde_json::from_value(result)?)
    }

    /// Send a text message, optionally as a reply.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to_message_id: Option<i64>,
    ) -> Result<Message, ApiError> {
        let reply_parameters = reply_to_message_id.map(|id| json!({"message_id": id}));
        self.call(
            "sendMessage",
            &json!({
                "chat_id": chat_id,
                "text": text,
                "reply_parameters": reply_parameters,
            }),
        )
        .await
    }

    /// Acknowledge a callback query so the client stops showing progress.
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<bool, ApiError> {
        self.call(
            "answerCallbackQuery",
            &json!({
                "callback_query_id": callback_query_id,
                "text": text,
            }),
        )
        .await
    }

    /// Register `url` as the webhook, protected by `secret_token`.
    pub async fn set_webhook(
        &self,
        url: &str,
        secret_token: &str,
        drop_pending_updates: bool,
    ) -> Result<bool, ApiError> {
        let ok = self
            .call(
                "setWebhook",
                &json!({
                    "url": url,
                    "secret_token": secret_token,
                    "drop_pending_updates": drop_pending_updates.then_some(true),
                }),
            )
            .await?;
        info!(webhook_url = %url, drop_pending_updates, "telegram_webhook_set");
        Ok(ok)
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool, ApiError> {
        let ok = self
            .call(
                "deleteWebhook",
                &json!({ "drop_pending_updates": drop_pending_updates.then_some(true) }),
            )
            .await?;
        info!(drop_pending_updates, "telegram_webhook_deleted");
        Ok(ok)
    }

    pub async fn get_webhook_info(&self) -> Result<WebhookInfo, ApiError> {
        self.call("getWebhookInfo", &Value::Null).await
    }

    pub async fn get_me(&self) -> Result<User, ApiError> {
        self.call("getMe", &Value::Null).await
    }
}

impl fmt::Debug for TelegramApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramApi")
            .field("endpoint", &"<redacted>")
            .finish()
    }
}
