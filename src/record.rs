//! Records and their loosely-typed field values.
//!
//! A [`Record`] is one structured item from the input. Field values are kept as a tagged
//! [`Value`] so rendering never has to inspect types at runtime.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One structured item, keyed by field name.
///
/// Keys are kept sorted, which makes whole-record serialization canonical.
pub type Record = BTreeMap<String, Value>;

/// A field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// JSON `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// A number, kept in its JSON spelling
    Number(serde_json::Number),
    /// A string
    Text(String),
    /// An ordered list of values
    List(Vec<Value>),
    /// A nested mapping
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Renders the value the way it is shown in the item list.
    ///
    /// Text is kept raw, scalars use their JSON spelling and containers are serialized as compact
    /// JSON.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Null => String::from("null"),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::List(_) | Value::Map(_) => to_json(self),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value.into())
    }
}

/// Serializes anything serde can handle as a single line of JSON.
///
/// Our value types only contain string keys and finite numbers, so serialization cannot fail; an
/// empty string is returned if it ever does.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        warn!("failed to serialize value: {e}");
        String::new()
    })
}

/// Builds a record from `(field, value)` pairs
///
/// ```
/// use qjp::record::{record, Value};
///
/// let r = record([("name", Value::from("Alpha")), ("id", Value::from(1))]);
/// assert_eq!(r["name"], Value::from("Alpha"));
/// ```
pub fn record<K, I>(fields: I) -> Record
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Value)>,
{
    fields.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
