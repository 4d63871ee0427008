//! Helpers for the backend's JSON envelopes.
//!
//! Replies wrap their payload in `results` (auth, pets) or `data`
//! (sub-resources, mutations) next to optional `message`/`error` strings.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Message carried by a reply, preferring `message` over `error`.
pub(crate) fn message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// The wrapped payload, or the whole body when unwrapped.
pub(crate) fn payload(body: &Value) -> &Value {
    ["results", "data"]
        .iter()
        .find_map(|key| body.get(key).filter(|value| !value.is_null()))
        .unwrap_or(body)
}

/// Decodes a list payload. Absent payloads are empty lists.
pub(crate) fn decode_list<T: DeserializeOwned>(body: &Value) -> Result<Vec<T>, serde_json::Error> {
    match payload(body) {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) if map.is_empty() => Ok(Vec::new()),
        value => serde_json::from_value(value.clone()),
    }
}

/// Decodes an optional echoed entity; anything unexpected reads as `None`.
pub(crate) fn decode_echo<T: DeserializeOwned>(body: &Value) -> Option<T> {
    let value = payload(body);
    if value.is_null() {
        return None;
    }
    serde_json::from_value(value.clone()).ok()
}
