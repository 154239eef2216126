//! Outbound Bot API calls.
//!
//! ```text
//! TelegramApi::call(method, params) → GET {api_base}/bot{token}/{method}?{query} → result
//! ```

pub mod client;
pub mod query;

pub use client::TelegramApi;
pub use query::query_pairs;
