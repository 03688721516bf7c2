//! Tolerant field normalization for catalogue records
//!
//! The catalogue export does not agree with itself on primitive types: flags
//! arrive as `true` or `"true"`, stats as `12` or `"12"`. Everything is
//! normalized here, once, while deserializing, so the rest of the crate only
//! sees native `bool` and numeric values.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce a raw JSON value into a flag.
///
/// Only the boolean `true` and the string `"true"` are true.
pub fn coerce_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

/// Coerce a raw JSON value into an integer, accepting numeric strings.
///
/// Fractional numbers are truncated toward zero. Anything else is `None`.
pub fn coerce_int(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
        }
        _ => None,
    }
}

/// Coerce a raw JSON value into a real number, accepting numeric strings.
pub fn coerce_real(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Coerce a raw JSON value into text. Numbers are rendered, empty strings dropped.
pub fn coerce_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Display label for a flag
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// `deserialize_with` adapter for [`coerce_flag`]; pair with `#[serde(default)]`
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_flag(value.as_ref()))
}

/// `deserialize_with` adapter for [`coerce_int`]; pair with `#[serde(default)]`
pub fn int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_int(value.as_ref()))
}

/// `deserialize_with` adapter for [`coerce_real`]; pair with `#[serde(default)]`
pub fn real<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_real(value.as_ref()))
}

/// `deserialize_with` adapter for [`coerce_text`]; pair with `#[serde(default)]`
pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_text(value.as_ref()))
}

/// `deserialize_with` adapter for record names: text coercion, with anything
/// unreadable becoming the empty name
pub fn name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_text(value.as_ref()).unwrap_or_default())
}

/// `deserialize_with` adapter for nested records. Anything that is not an
/// object, or does not fit `T`, is `None`.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}
