//! Error types shared across the crate.

use thiserror::Error;

use crate::types::ApiResponse;

/// Configuration could not be loaded from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// A Bot API call failed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, non-JSON body).
    #[error("telegram request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The envelope was fine but `result` did not match the expected type.
    #[error("failed to decode telegram result: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid telegram api url: {0}")]
    Url(#[from] url::ParseError),

    /// Parameters must serialize to a JSON object (or nothing).
    #[error("parameters for {method} must be a JSON object")]
    InvalidParams { method: String },

    /// Telegram answered with `ok: false`; the full envelope is kept.
    #[error("telegram api error {}: {}", .0.error_code.unwrap_or_default(), .0.description.as_deref().unwrap_or("no description"))]
    Telegram(ApiResponse),
}

impl ApiError {
    /// The envelope returned by Telegram, when the failure came from the API itself.
    pub fn envelope(&self) -> Option<&ApiResponse> {
        match self {
            ApiError::Telegram(envelope) => Some(envelope),
            _ => None,
        }
    }
}

/// An update handler failed.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    Other(String),
}
