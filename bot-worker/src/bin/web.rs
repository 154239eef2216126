//! TgBot Web Server - Telegram webhook receiver.
//!
//! This binary provides the webhook endpoint that:
//! - Verifies the `X-Telegram-Bot-Api-Secret-Token` header
//! - Parses and dispatches each update
//! - Replies through the Bot API from the handlers
//! - Echoes the parsed update back to Telegram

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tgbot::web::{router, AppState};
use tgbot::{BotHandler, Config, TelegramApi};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(
        port = config.port,
        webhook_path = %config.webhook_path,
        api_base = %config.api_base,
        request_timeout_ms = config.request_timeout_ms,
        "config_loaded"
    );

    let api = TelegramApi::new(&config).context("Failed to build Telegram client")?;
    let handler = Arc::new(BotHandler::new(api));

    let port = config.port;
    let app = router(AppState::new(config, handler));

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
