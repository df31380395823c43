//! Decoding helpers for fields the gamma API encodes inconsistently.
//!
//! `clobTokenIds`, `outcomePrices` and `outcomes` arrive either as a native
//! JSON array or as a string holding a JSON-encoded array. Every model in this
//! crate routes those fields through [`json_list`] so callers only ever see a
//! `Vec<String>`.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Deserialize a string-or-array field into a list of strings.
///
/// `null`, a missing field and an empty string all decode to an empty list.
/// Numeric elements are kept in their JSON text form.
pub fn json_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    normalize_list(value.unwrap_or(Value::Null)).map_err(de::Error::custom)
}

/// Normalize an already-decoded JSON value into a list of strings.
pub fn normalize_list(value: Value) -> Result<Vec<String>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(Value::Array(items)) => items.into_iter().map(list_item).collect(),
            Ok(other) => Err(format!("expected an encoded JSON array, got {other}")),
            Err(e) => Err(format!("invalid encoded JSON array {s:?}: {e}")),
        },
        Value::Array(items) => items.into_iter().map(list_item).collect(),
        other => Err(format!("expected an array or encoded array, got {other}")),
    }
}

fn list_item(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("unexpected list element {other}")),
    }
}

/// Deserialize an identifier that may be a JSON string or number.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(de::Error::custom(format!(
            "expected a string or number identifier, got {other}"
        ))),
    }
}

/// Deserialize a field whose explicit `null` means the type's default.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a decimal in plain or scientific notation.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    Decimal::from_str(s)
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}
