//! Tolerant field deserializers for the wire model.
//!
//! Server documents are hand-written as often as they are generated, so a
//! field that expects a number also accepts `"16"` or `"16dp"`, a field that
//! expects a string accepts a bare number or bool, and a flag accepts
//! `"true"`/`"false"`. An explicit `null` reads as the field's default.
//! Anything else that cannot be coerced without guessing is still a decode
//! error.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parse a number the way a dimension-ish field is written: optional `dp`
/// suffix, surrounding whitespace ignored. Non-finite values are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix("dp").unwrap_or(trimmed).trim_end();
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

pub(crate) fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn value_to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    }
}

fn value_to_i32(value: &Value) -> Option<i32> {
    let number = value_to_f64(value)?;
    if number.fract() != 0.0 || number < i32::MIN as f64 || number > i32::MAX as f64 {
        return None;
    }
    Some(number as i32)
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn mismatch<E: serde::de::Error>(expected: &str, value: &Value) -> E {
    E::custom(format!("expected {}, found {}", expected, describe(value)))
}

/// Decode with `convert`; `null` yields `fallback()`, so an explicit null
/// behaves like an absent field.
fn or_fallback<'de, D, T>(
    deserializer: D,
    convert: fn(&Value) -> Option<T>,
    expected: &str,
    fallback: fn() -> T,
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(fallback());
    }
    convert(&value).ok_or_else(|| mismatch(expected, &value))
}

pub fn f64_or<'de, D>(deserializer: D, fallback: fn() -> f64) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    or_fallback(deserializer, value_to_f64, "a number", fallback)
}

pub fn f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64_or(deserializer, f64::default)
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    value_to_f64(&value)
        .map(Some)
        .ok_or_else(|| mismatch("a number", &value))
}

pub fn i32_or<'de, D>(deserializer: D, fallback: fn() -> i32) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    or_fallback(deserializer, value_to_i32, "an integer", fallback)
}

pub fn i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    i32_or(deserializer, i32::default)
}

pub fn opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    value_to_i32(&value)
        .map(Some)
        .ok_or_else(|| mismatch("an integer", &value))
}

pub fn bool_or<'de, D>(deserializer: D, fallback: fn() -> bool) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    or_fallback(deserializer, value_to_bool, "a boolean", fallback)
}

pub fn bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    bool_or(deserializer, bool::default)
}

pub fn string_or<'de, D>(deserializer: D, fallback: fn() -> String) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    or_fallback(deserializer, value_to_string, "a string", fallback)
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    string_or(deserializer, String::new)
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    value_to_string(&value)
        .map(Some)
        .ok_or_else(|| mismatch("a string", &value))
}

/// Like [`opt_string`], but an inline JSON object or array is kept as its
/// serialized text. Used for request bodies.
pub fn opt_string_or_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::Object(_) | Value::Array(_) => Ok(Some(value.to_string())),
        other => value_to_string(&other)
            .map(Some)
            .ok_or_else(|| mismatch("a string", &other)),
    }
}

fn to_string_map<E: serde::de::Error>(value: Value) -> Result<BTreeMap<String, String>, E> {
    let Value::Object(entries) = value else {
        return Err(mismatch("an object", &value));
    };
    let mut map = BTreeMap::new();
    for (key, entry) in entries {
        match entry {
            Value::Null => continue,
            Value::Object(_) | Value::Array(_) => {
                map.insert(key, entry.to_string());
            }
            scalar => {
                let text = value_to_string(&scalar).ok_or_else(|| mismatch("a string", &scalar))?;
                map.insert(key, text);
            }
        }
    }
    Ok(map)
}

pub fn string_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(BTreeMap::new());
    }
    to_string_map(value)
}

pub fn opt_string_map<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    to_string_map(value).map(Some)
}

/// Child sequences: absent or `null` both mean "no children".
pub fn nodes<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_f64")]
        size: Option<f64>,
        #[serde(default, deserialize_with = "opt_string")]
        label: Option<String>,
        #[serde(default, deserialize_with = "opt_i32")]
        lines: Option<i32>,
        #[serde(default, deserialize_with = "string_map")]
        meta: BTreeMap<String, String>,
    }

    fn probe(value: Value) -> Result<Probe, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn numbers_accept_numeric_strings_and_dp_suffix() {
        assert_eq!(probe(json!({"size": "12"})).unwrap().size, Some(12.0));
        assert_eq!(probe(json!({"size": "12dp"})).unwrap().size, Some(12.0));
        assert_eq!(probe(json!({"size": 3.5})).unwrap().size, Some(3.5));
        assert_eq!(probe(json!({"size": null})).unwrap().size, None);
    }

    #[test]
    fn numbers_reject_garbage() {
        let err = probe(json!({"size": "wide"})).unwrap_err();
        assert!(err.to_string().contains("expected a number"));
    }

    #[test]
    fn strings_accept_scalars() {
        assert_eq!(probe(json!({"label": 42})).unwrap().label.as_deref(), Some("42"));
        assert_eq!(probe(json!({"label": true})).unwrap().label.as_deref(), Some("true"));
    }

    #[test]
    fn integers_reject_fractions() {
        assert_eq!(probe(json!({"lines": "3"})).unwrap().lines, Some(3));
        assert!(probe(json!({"lines": 2.5})).is_err());
    }

    #[test]
    fn maps_stringify_values_and_drop_nulls() {
        let parsed = probe(json!({"meta": {"a": 1, "b": "x", "c": null}})).unwrap();
        assert_eq!(parsed.meta.get("a").map(String::as_str), Some("1"));
        assert_eq!(parsed.meta.get("b").map(String::as_str), Some("x"));
        assert!(!parsed.meta.contains_key("c"));
    }

    #[derive(Debug, Deserialize)]
    struct Defaults {
        #[serde(default, deserialize_with = "string")]
        text: String,
        #[serde(default, deserialize_with = "i32")]
        count: i32,
        #[serde(default, deserialize_with = "bool")]
        flag: bool,
        #[serde(default, deserialize_with = "f64")]
        ratio: f64,
    }

    #[test]
    fn null_falls_back_to_default() {
        let parsed: Defaults =
            serde_json::from_value(json!({"text": null, "count": null, "flag": null, "ratio": null}))
                .unwrap();
        assert_eq!(parsed.text, "");
        assert_eq!(parsed.count, 0);
        assert!(!parsed.flag);
        assert_eq!(parsed.ratio, 0.0);
    }

    #[test]
    fn null_still_rejects_wrong_shapes() {
        let err = serde_json::from_value::<Defaults>(json!({"flag": "maybe"})).unwrap_err();
        assert!(err.to_string().contains("expected a boolean"));
    }

    #[test]
    fn parse_number_trims() {
        assert_eq!(parse_number("8px"), None);
        assert_eq!(parse_number(" 8dp "), Some(8.0));
        assert_eq!(parse_number("NaN"), None);
    }
}
