//! Dynamically-typed state values with total cross-type coercion.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A value held in the [`StateStore`](super::StateStore).
///
/// Every getter answers for every variant; see each `as_*` method for the
/// fallback it applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StateValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    Double(f64),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
    /// Raw JSON text, stored verbatim.
    Json(String),
}

impl Default for StateValue {
    fn default() -> Self {
        StateValue::String(String::new())
    }
}

fn unquote(raw: &str) -> &str {
    let trimmed = raw.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    trimmed
}

fn split_items(inner: &str) -> impl Iterator<Item = &str> {
    inner.split(',').filter(|item| !item.trim().is_empty())
}

impl StateValue {
    /// Infer a value from text: `true`/`false` (any case), integers,
    /// finite floats, `[a, b]` lists, `{k=v, ...}` maps, else a string.
    pub fn from_string(raw: &str) -> StateValue {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            return StateValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return StateValue::Boolean(false);
        }
        if let Ok(n) = trimmed.parse::<i64>() {
            return StateValue::Integer(n);
        }
        if let Some(n) = parse_finite(trimmed) {
            return StateValue::Double(n);
        }
        if let Some(inner) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return StateValue::List(split_items(inner).map(|i| unquote(i).to_string()).collect());
        }
        if let Some(inner) = trimmed.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            let map = split_items(inner)
                .filter_map(|entry| entry.split_once('='))
                .map(|(k, v)| (unquote(k).to_string(), unquote(v).to_string()))
                .collect();
            return StateValue::Map(map);
        }
        StateValue::String(raw.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            StateValue::String(_) => "string",
            StateValue::Integer(_) => "integer",
            StateValue::Boolean(_) => "boolean",
            StateValue::Double(_) => "double",
            StateValue::List(_) => "list",
            StateValue::Map(_) => "map",
            StateValue::Json(_) => "json",
        }
    }

    /// Text form. Lists render as `[a, b]`, maps as `{k=v, ...}`, JSON raw.
    pub fn as_string(&self) -> String {
        match self {
            StateValue::String(s) | StateValue::Json(s) => s.clone(),
            StateValue::Integer(n) => n.to_string(),
            StateValue::Boolean(b) => b.to_string(),
            StateValue::Double(n) => n.to_string(),
            StateValue::List(items) => format!("[{}]", items.join(", ")),
            StateValue::Map(map) => {
                let entries: Vec<String> = map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                format!("{{{}}}", entries.join(", "))
            }
        }
    }

    /// Strings are true only for `"true"` (any case); numbers when non-zero;
    /// collections and JSON when non-empty.
    pub fn as_bool(&self) -> bool {
        match self {
            StateValue::String(s) => s.trim().eq_ignore_ascii_case("true"),
            StateValue::Integer(n) => *n != 0,
            StateValue::Boolean(b) => *b,
            StateValue::Double(n) => *n != 0.0,
            StateValue::List(items) => !items.is_empty(),
            StateValue::Map(map) => !map.is_empty(),
            StateValue::Json(raw) => !raw.trim().is_empty(),
        }
    }

    /// Strings parse as integer or truncated float, else 0; booleans are 0/1;
    /// collections give their length; JSON gives its byte length.
    pub fn as_int(&self) -> i64 {
        match self {
            StateValue::String(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| parse_finite(trimmed).map(|n| n as i64))
                    .unwrap_or(0)
            }
            StateValue::Integer(n) => *n,
            StateValue::Boolean(b) => i64::from(*b),
            StateValue::Double(n) => *n as i64,
            StateValue::List(items) => items.len() as i64,
            StateValue::Map(map) => map.len() as i64,
            StateValue::Json(raw) => raw.len() as i64,
        }
    }

    /// Same fallbacks as [`as_int`](Self::as_int), without truncation.
    pub fn as_double(&self) -> f64 {
        match self {
            StateValue::String(s) => parse_finite(s.trim()).unwrap_or(0.0),
            StateValue::Integer(n) => *n as f64,
            StateValue::Boolean(b) => f64::from(u8::from(*b)),
            StateValue::Double(n) => *n,
            StateValue::List(items) => items.len() as f64,
            StateValue::Map(map) => map.len() as f64,
            StateValue::Json(raw) => raw.len() as f64,
        }
    }

    /// Scalars become a one-item list (empty string gives an empty list);
    /// maps become `k=v` items.
    pub fn as_list(&self) -> Vec<String> {
        match self {
            StateValue::List(items) => items.clone(),
            StateValue::Map(map) => map.iter().map(|(k, v)| format!("{}={}", k, v)).collect(),
            StateValue::String(s) if s.is_empty() => Vec::new(),
            other => vec![other.as_string()],
        }
    }

    /// Lists are keyed by index; scalars become `{"value": text}`.
    pub fn as_map(&self) -> BTreeMap<String, String> {
        match self {
            StateValue::Map(map) => map.clone(),
            StateValue::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item.clone()))
                .collect(),
            other => BTreeMap::from([("value".to_string(), other.as_string())]),
        }
    }
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::String(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        StateValue::String(value)
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        StateValue::Boolean(value)
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        StateValue::Integer(value)
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        StateValue::Double(value)
    }
}

impl From<Vec<String>> for StateValue {
    fn from(value: Vec<String>) -> Self {
        StateValue::List(value)
    }
}

impl From<BTreeMap<String, String>> for StateValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        StateValue::Map(value)
    }
}

impl From<serde_json::Value> for StateValue {
    fn from(value: serde_json::Value) -> Self {
        StateValue::Json(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<StateValue> {
        vec![
            StateValue::String("hello".into()),
            StateValue::String(String::new()),
            StateValue::Integer(-3),
            StateValue::Boolean(true),
            StateValue::Double(2.75),
            StateValue::List(vec!["a".into(), "b".into()]),
            StateValue::Map(BTreeMap::from([("k".into(), "v".into())])),
            StateValue::Json(r#"{"a":1}"#.into()),
        ]
    }

    #[test]
    fn infers_scalars() {
        assert_eq!(StateValue::from_string("TRUE"), StateValue::Boolean(true));
        assert_eq!(StateValue::from_string("false"), StateValue::Boolean(false));
        assert_eq!(StateValue::from_string("42"), StateValue::Integer(42));
        assert_eq!(StateValue::from_string("-1.5"), StateValue::Double(-1.5));
        assert_eq!(StateValue::from_string("done"), StateValue::String("done".into()));
    }

    #[test]
    fn non_finite_numbers_stay_strings() {
        assert_eq!(StateValue::from_string("NaN"), StateValue::String("NaN".into()));
        assert_eq!(StateValue::from_string("inf"), StateValue::String("inf".into()));
    }

    #[test]
    fn infers_lists_with_unquoting() {
        assert_eq!(
            StateValue::from_string(r#"["a", 'b' , c]"#),
            StateValue::List(vec!["a".into(), "b".into(), "c".into()])
        );
        assert_eq!(StateValue::from_string("[]"), StateValue::List(Vec::new()));
    }

    #[test]
    fn infers_maps_skipping_bare_entries() {
        let value = StateValue::from_string("{name=Ann, age = 3, junk}");
        assert_eq!(
            value,
            StateValue::Map(BTreeMap::from([
                ("age".into(), "3".into()),
                ("name".into(), "Ann".into()),
            ]))
        );
    }

    #[test]
    fn coercion_is_total() {
        for value in all_variants() {
            let _ = value.as_string();
            let _ = value.as_bool();
            let _ = value.as_int();
            let _ = value.as_double();
            let _ = value.as_list();
            let _ = value.as_map();
        }
    }

    #[test]
    fn documented_fallbacks() {
        let list = StateValue::List(vec!["a".into(), "b".into()]);
        assert_eq!(list.as_int(), 2);
        assert_eq!(StateValue::Boolean(true).as_int(), 1);
        assert_eq!(StateValue::Json("{}".into()).as_int(), 2);
        assert_eq!(StateValue::String("7.9".into()).as_int(), 7);
        assert_eq!(StateValue::String("x".into()).as_double(), 0.0);
        assert!(!StateValue::String("yes".into()).as_bool());
        assert_eq!(list.as_string(), "[a, b]");
        assert_eq!(
            list.as_map(),
            BTreeMap::from([("0".into(), "a".into()), ("1".into(), "b".into())])
        );
        assert_eq!(StateValue::Integer(5).as_list(), vec!["5".to_string()]);
        assert!(StateValue::String(String::new()).as_list().is_empty());
    }

    #[test]
    fn bool_text_round_trips() {
        let value = StateValue::from_string("true");
        assert!(value.as_bool());
        assert_eq!(value.as_string(), "true");
    }
}
