//! Configuration module for environment variable parsing.
//!
//! Configuration is read once at process start and then passed by value
//! (or behind an `Arc`) into the web server and the API client. Nothing in
//! the crate reads the environment after `Config::from_env` returns.

use std::env;
use std::fmt;

use tracing::warn;

use crate::error::ConfigError;

/// Default Telegram Bot API host.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Default path the webhook is served on.
pub const DEFAULT_WEBHOOK_PATH: &str = "/webhook";

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Bot API token, used to build outbound URLs
    pub token: String,

    /// Webhook shared secret, compared against `X-Telegram-Bot-Api-Secret-Token`
    pub secret: String,

    /// Port for the web server to listen on
    pub port: u16,

    /// Path the webhook endpoint is mounted on
    pub webhook_path: String,

    /// Base URL of the Bot API (overridable for tests and local Bot API servers)
    pub api_base: String,

    /// Outbound HTTP request timeout in milliseconds
    pub request_timeout_ms: u64,

    /// Public HTTPS origin of this service, used when registering the webhook
    pub public_url: Option<String>,
}

impl Config {
    /// Build a configuration with defaults for everything but the credentials.
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Config {
            token: token.into(),
            secret: secret.into(),
            port: 8080,
            webhook_path: DEFAULT_WEBHOOK_PATH.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_ms: 10_000,
            public_url: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `TOKEN` and `SECRET` are required; everything else falls back to a
    /// default, with a warning when a value is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = required("TOKEN")?.trim().to_string();
        let secret = required("SECRET")?;

        let mut config = Config::new(token, secret);

        config.port = parse_or("PORT", config.port);
        config.request_timeout_ms = parse_or("REQUEST_TIMEOUT_MS", config.request_timeout_ms);

        if let Ok(path) = env::var("WEBHOOK_PATH") {
            config.webhook_path = normalize_path(&path).ok_or(ConfigError::Invalid {
                var: "WEBHOOK_PATH",
                value: path,
            })?;
        }

        if let Ok(base) = env::var("TELEGRAM_API_BASE") {
            let trimmed = base.trim().trim_end_matches('/');
            if url::Url::parse(trimmed).is_err() {
                return Err(ConfigError::Invalid {
                    var: "TELEGRAM_API_BASE",
                    value: base,
                });
            }
            config.api_base = trimmed.to_string();
        }

        config.public_url = env::var("PUBLIC_URL")
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        Ok(config)
    }

    /// Full public URL of the webhook endpoint, if `PUBLIC_URL` is known.
    pub fn webhook_url(&self) -> Option<String> {
        self.public_url
            .as_ref()
            .map(|origin| format!("{}{}", origin, self.webhook_path))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("secret", &"<redacted>")
            .field("port", &self.port)
            .field("webhook_path", &self.webhook_path)
            .field("api_base", &self.api_base)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("public_url", &self.public_url)
            .finish()
    }
}

/// Read a variable that must be present and non-blank, keeping it verbatim.
fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// Parse a variable into `T`, keeping `default` when unset or malformed.
fn parse_or<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}

/// Ensure a route path starts with `/` and has no trailing slash.
fn normalize_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
        return None;
    }
    if trimmed.starts_with('/') {
        Some(trimmed.to_string())
    } else {
        Some(format!("/{}", trimmed))
    }
}
