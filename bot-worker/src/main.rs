//! TgBot Admin - webhook registration and inspection.
//!
//! Uses the same environment as `tgbot-web`, so the secret registered with
//! Telegram is always the one the server checks.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tgbot::{Config, TelegramApi};

#[derive(Parser, Debug)]
#[command(author, version, about = "TgBot webhook administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register the webhook with Telegram, using SECRET as the secret token
    SetWebhook {
        /// Webhook URL; defaults to PUBLIC_URL + WEBHOOK_PATH
        #[arg(long)]
        url: Option<String>,
        /// Drop updates queued while no webhook was set
        #[arg(long)]
        drop_pending_updates: bool,
    },
    /// Remove the webhook
    DeleteWebhook {
        #[arg(long)]
        drop_pending_updates: bool,
    },
    /// Show the current webhook status
    WebhookInfo,
    /// Show the bot account
    Me,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let api = TelegramApi::new(&config).context("Failed to build Telegram client")?;

    match cli.command {
        Commands::SetWebhook {
            url,
            drop_pending_updates,
        } => {
            let url = url
                .or_else(|| config.webhook_url())
                .context("No webhook URL: pass --url or set PUBLIC_URL")?;
            let ok = api
                .set_webhook(&url, &config.secret, drop_pending_updates)
                .await
                .context("setWebhook failed")?;
            print_json(&serde_json::json!({ "ok": ok, "url": url }))?;
        }
        Commands::DeleteWebhook {
            drop_pending_updates,
        } => {
            let ok = api
                .delete_webhook(drop_pending_updates)
                .await
                .context("deleteWebhook failed")?;
            print_json(&serde_json::json!({ "ok": ok }))?;
        }
        Commands::WebhookInfo => {
            let info = api
                .get_webhook_info()
                .await
                .context("getWebhookInfo failed")?;
            print_json(&info)?;
        }
        Commands::Me => {
            let me = api.get_me().await.context("getMe failed")?;
            print_json(&me)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
