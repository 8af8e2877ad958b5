//! Serde adapters for Paddle's wire quirks.
//!
//! The classic API is served by PHP: booleans often arrive as `0`/`1`,
//! empty maps arrive as `[]`, and list parameters are sent comma-joined.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Format Paddle uses for alert query bounds.
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serialize a list as one comma-separated string.
pub(crate) fn comma_list<S, T>(items: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    let joined = items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    serializer.serialize_str(&joined)
}

/// Same as [`comma_list`] for optional lists; `None` is skipped by the
/// caller's `skip_serializing_if`.
pub(crate) fn optional_comma_list<S, T>(
    items: &Option<Vec<T>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    match items {
        Some(items) => comma_list(items, serializer),
        None => serializer.serialize_none(),
    }
}

/// Serialize an optional timestamp as `YYYY-MM-DD HH:MM:SS`.
pub(crate) fn optional_datetime<S>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.collect_str(&dt.format(DATETIME_FORMAT)),
        None => serializer.serialize_none(),
    }
}

/// Accept `true`/`false`, `0`/`1` and `"0"`/`"1"`.
pub(crate) fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) => match s.trim() {
            "1" | "true" => Ok(true),
            "0" | "false" | "" => Ok(false),
            other => Err(de::Error::custom(format!("invalid boolean: {other}"))),
        },
        Value::Null => Ok(false),
        other => Err(de::Error::custom(format!("invalid boolean: {other}"))),
    }
}

/// A currency → amount map that may arrive as `[]` when empty.
pub(crate) fn price_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(currency, amount)| {
                <Decimal as Deserialize>::deserialize(amount)
                    .map(|amount| (currency, amount))
                    .map_err(de::Error::custom)
            })
            .collect(),
        Value::Array(items) if items.is_empty() => Ok(BTreeMap::new()),
        Value::Null => Ok(BTreeMap::new()),
        other => Err(de::Error::custom(format!("invalid price map: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Flags {
        #[serde(deserialize_with = "flexible_bool")]
        a: bool,
        #[serde(deserialize_with = "flexible_bool")]
        b: bool,
        #[serde(deserialize_with = "flexible_bool")]
        c: bool,
    }

    #[test]
    fn test_flexible_bool() {
        let flags: Flags = serde_json::from_value(json!({ "a": 1, "b": "0", "c": true })).unwrap();
        assert!(flags.a);
        assert!(!flags.b);
        assert!(flags.c);
    }

    #[derive(Deserialize)]
    struct Prices {
        #[serde(deserialize_with = "price_map")]
        initial: BTreeMap<String, Decimal>,
    }

    #[test]
    fn test_price_map_accepts_empty_list() {
        let prices: Prices = serde_json::from_value(json!({ "initial": [] })).unwrap();
        assert!(prices.initial.is_empty());

        let prices: Prices =
            serde_json::from_value(json!({ "initial": { "USD": "9.99", "EUR": 8 } })).unwrap();
        assert_eq!(prices.initial["USD"], Decimal::new(999, 2));
        assert_eq!(prices.initial["EUR"], Decimal::new(8, 0));
    }

    #[derive(Serialize)]
    struct Joined {
        #[serde(serialize_with = "comma_list")]
        ids: Vec<u64>,
        #[serde(serialize_with = "optional_datetime")]
        at: Option<NaiveDateTime>,
    }

    #[test]
    fn test_serializers() {
        let at = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(4, 5, 6)
            .unwrap();
        let value = serde_json::to_value(Joined {
            ids: vec![1, 22, 333],
            at: Some(at),
        })
        .unwrap();
        assert_eq!(value, json!({ "ids": "1,22,333", "at": "2024-03-01 04:05:06" }));
    }
}
