//! Webhook ingress.
//!
//! This module provides the HTTP surface that Telegram delivers updates to:
//! - Verifies the shared-secret header
//! - Parses the body into an `Update`
//! - Dispatches it and waits for the handler
//! - Echoes the parsed update back as pretty-printed JSON

pub mod handlers;
pub mod secret;

pub use handlers::{health, router, telegram_webhook, AppState, HealthResponse};
pub use secret::{verify_secret_token, SECRET_TOKEN_HEADER};
