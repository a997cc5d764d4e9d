//! Lenient serde helpers for remote payloads.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a key that only matters for its presence.
///
/// Combined with `#[serde(default)]`, a missing key becomes `None` while a
/// present key (even `null`) becomes `Some`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Accept a star count only when it is a non-negative integer.
pub fn count_or_none<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_u64())
}

/// Accept `private` as a JSON boolean or the strings `"true"`/`"false"`.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::String(text) => text.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// Accept a manifest license written as an SPDX string or as the legacy
/// `{ "type": "MIT" }` object.
pub fn license<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Object(map) => map
            .get("type")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        _ => None,
    })
}
