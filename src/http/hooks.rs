//! Field hooks shipped with the crate.
//!
//! Each has the [`FieldHook`](super::FieldHook) shape and returns the value
//! unchanged when it does not apply.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Pretty-print values that parse as a JSON object or array.
pub fn pretty_json(_field: &str, value: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(value.trim()) {
        Ok(json @ (serde_json::Value::Object(_) | serde_json::Value::Array(_))) => {
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| value.to_string())
        }
        _ => value.to_string(),
    }
}

/// Decode values that are valid base64 of valid UTF-8 text.
pub fn base64_decode(_field: &str, value: &str) -> String {
    STANDARD
        .decode(value.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_else(|| value.to_string())
}

/// [`base64_decode`] followed by [`pretty_json`].
pub fn decode_and_pretty_print(field: &str, value: &str) -> String {
    pretty_json(field, &base64_decode(field, value))
}
