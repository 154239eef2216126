//! Query-string encoding for Bot API parameters.

use serde_json::{Map, Value};

/// Flatten a parameter object into query pairs.
///
/// `null` members are dropped. Strings are sent as-is; numbers, booleans,
/// arrays and objects are sent JSON-encoded, which is how the Bot API
/// expects `reply_markup`, `allowed_updates` and similar fields.
pub fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| {
            let encoded = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), encoded))
        })
        .collect()
}
