//! Request parameter encoding.
//!
//! Endpoint parameters are plain `Serialize` structs. They are turned into an
//! ordered JSON object first, so the executor can inspect and extend them,
//! and then flattened into the `key=value` pairs Paddle expects in form
//! bodies and query strings.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

/// An ordered mapping of parameter names to values for one request.
///
/// Null values never reach the wire: a field left as `None` means "omit",
/// matching how Paddle treats missing form fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams(Map<String, Value>);

impl RequestParams {
    /// An empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build parameters from any serializable value.
    ///
    /// Structs and maps become their fields; `()` and `None` become an empty
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the value serializes to something
    /// other than an object (a bare string or list has no field names).
    pub fn from_serialize<P: Serialize + ?Sized>(params: &P) -> Result<Self> {
        match serde_json::to_value(params)? {
            Value::Object(map) => Ok(Self(
                map.into_iter().filter(|(_, v)| !v.is_null()).collect(),
            )),
            Value::Null => Ok(Self::new()),
            other => Err(Error::InvalidInput(format!(
                "Request parameters must serialize to an object, got {other}"
            ))),
        }
    }

    /// Whether a non-null value is present for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(|v| !v.is_null())
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set `key` unless the caller already supplied a value for it.
    ///
    /// Returns `true` if the value was inserted.
    pub fn insert_if_absent(&mut self, key: &str, value: impl Into<Value>) -> bool {
        if self.contains(key) {
            return false;
        }
        self.0.insert(key.to_string(), value.into());
        true
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flatten into form/query pairs.
    ///
    /// Booleans become `1`/`0`, lists become `key[0]`, `key[1]`, and nested
    /// objects become `key[field]`.
    ///
    /// # Example
    ///
    /// ```
    /// use paddle_rs::client::RequestParams;
    ///
    /// let params = RequestParams::from_serialize(&serde_json::json!({
    ///     "prices": ["USD:9.99", "EUR:8.99"],
    ///     "discountable": false,
    ///     "coupon_code": null,
    /// })).unwrap();
    ///
    /// assert_eq!(params.to_pairs(), vec![
    ///     ("prices[0]".to_string(), "USD:9.99".to_string()),
    ///     ("prices[1]".to_string(), "EUR:8.99".to_string()),
    ///     ("discountable".to_string(), "0".to_string()),
    /// ]);
    /// ```
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            flatten(key, value, &mut pairs);
        }
        pairs
    }

    /// Names of all parameters, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

fn flatten(key: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((key.to_string(), if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => out.push((key.to_string(), n.to_string())),
        Value::String(s) => out.push((key.to_string(), s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten(&format!("{key}[{i}]"), item, out);
            }
        }
        Value::Object(fields) => {
            for (name, item) in fields {
                flatten(&format!("{key}[{name}]"), item, out);
            }
        }
    }
}
