//! Pulling payloads and messages out of API responses.

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde_json::Value;

pub fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.contains("application/json"))
}

/// Parses a response body. Empty bodies and parse failures give `None`.
pub fn parse_body(path: &str, text: &str) -> Option<Value> {
    if text.is_empty() {
        return None;
    }
    serde_json::from_str(text)
        .map(Some)
        .unwrap_or_else(|err| swallow!(format!("unparseable JSON body from {path}"), err))
}

/// Picks the most specific human-readable message from an error payload:
/// field-level `details`, then `message`, then `error`.
pub fn error_message(payload: Option<&Value>, fallback: &str) -> String {
    let Some(payload) = payload else {
        return fallback.to_string();
    };

    if let Some(details) = payload.get("details").and_then(details_message) {
        return details;
    }
    ["message", "error"]
        .iter()
        .filter_map(|key| payload.get(*key))
        .find_map(text_of)
        .unwrap_or_else(|| fallback.to_string())
}

fn details_message(details: &Value) -> Option<String> {
    let parts: Vec<String> = match details {
        Value::Object(fields) => fields.values().filter_map(text_of).collect(),
        Value::Array(items) => items.iter().filter_map(text_of).collect(),
        other => text_of(other).into_iter().collect(),
    };
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
