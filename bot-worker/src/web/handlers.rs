//! Webhook endpoint handlers.
//!
//! The webhook handler:
//! 1. Verifies the secret header before looking at the body
//! 2. Parses the raw body into an `Update`
//! 3. Dispatches it and awaits the handler
//! 4. Responds with the parsed update, pretty-printed

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::dispatch::{dispatch, UpdateHandler};
use crate::types::Update;
use crate::web::secret::{verify_secret_token, SECRET_TOKEN_HEADER};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub handler: Arc<dyn UpdateHandler>,
}

impl AppState {
    pub fn new(config: Config, handler: Arc<dyn UpdateHandler>) -> Self {
        Self {
            config: Arc::new(config),
            handler,
        }
    }
}

/// Build the service router: `GET /health` and `POST {webhook_path}`.
pub fn router(state: AppState) -> Router {
    let webhook_path = state.config.webhook_path.clone();

    Router::new()
        .route("/health", get(health))
        .route(&webhook_path, post(telegram_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Telegram Webhook
// =============================================================================

/// Telegram webhook endpoint.
///
/// The body is taken as raw bytes so authorization happens before any
/// parsing. A handler failure is logged and does not change the response:
/// Telegram re-delivers updates answered with a non-2xx status.
pub async fn telegram_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let provided = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    if !verify_secret_token(provided, &state.config.secret) {
        warn!(body_length = body.len(), "webhook_unauthorized");
        return (StatusCode::FORBIDDEN, "Unauthorized").into_response();
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, body_length = body.len(), "webhook_payload_invalid");
            return (StatusCode::BAD_REQUEST, "Bad Request").into_response();
        }
    };

    let kind = update.kind.field_name();
    info!(update_id = update.update_id, kind, "webhook_update_received");

    match dispatch(state.handler.as_ref(), &update).await {
        Ok(outcome) => {
            info!(
                update_id = update.update_id,
                kind,
                outcome = ?outcome,
                "webhook_update_dispatched"
            );
        }
        Err(e) => {
            error!(
                update_id = update.update_id,
                kind,
                error = %e,
                "webhook_handler_failed"
            );
        }
    }

    match serde_json::to_string_pretty(&update) {
        Ok(echo) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            echo,
        )
            .into_response(),
        Err(e) => {
            error!(update_id = update.update_id, error = %e, "webhook_echo_failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
