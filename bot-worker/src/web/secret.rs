//! Webhook shared-secret verification.
//!
//! Telegram echoes the `secret_token` given to `setWebhook` in the
//! `X-Telegram-Bot-Api-Secret-Token` header of every delivery.
//! Reference: https://core.telegram.org/bots/api#setwebhook

use tracing::warn;

/// Header carrying the webhook secret.
pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Check the secret header of an inbound webhook request.
///
/// A missing header never matches, and neither does any header when the
/// configured secret is blank.
pub fn verify_secret_token(provided: Option<&str>, expected: &str) -> bool {
    if expected.trim().is_empty() {
        warn!("webhook_secret_not_configured");
        return false;
    }

    let provided = match provided {
        Some(p) => p,
        None => {
            warn!("webhook_secret_missing");
            return false;
        }
    };

    let valid = constant_time_compare(provided, expected);

    if !valid {
        warn!(
            expected_length = expected.len(),
            actual_length = provided.len(),
            "webhook_secret_mismatch"
        );
    }

    valid
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
