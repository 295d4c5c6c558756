//! Example value tree

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Key of the object substituted for a type that could not be expanded
pub const DATATYPE_KEY: &str = "datatype";

/// A JSON-shaped example value.
///
/// Objects keep insertion order, so serializing an example lists properties
/// in their declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExampleValue {
    /// Boolean literal
    Bool(bool),
    /// Integer literal
    Integer(i64),
    /// Floating point literal
    Float(f64),
    /// String literal
    String(String),
    /// Array of examples
    Array(Vec<ExampleValue>),
    /// Object mapping property names to examples
    Object(IndexMap<String, ExampleValue>),
}

impl ExampleValue {
    /// The diagnostic object `{"datatype": <type_name>}`
    pub fn fallback(type_name: impl Into<String>) -> Self {
        let mut object = IndexMap::with_capacity(1);
        object.insert(DATATYPE_KEY.to_string(), ExampleValue::String(type_name.into()));
        ExampleValue::Object(object)
    }

    /// The type name carried by a fallback object, if this is one
    pub fn fallback_type(&self) -> Option<&str> {
        match self.as_object() {
            Some(object) if object.len() == 1 => match object.get(DATATYPE_KEY) {
                Some(ExampleValue::String(name)) => Some(name.as_str()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Get the object entries, if this is an object
    pub fn as_object(&self) -> Option<&IndexMap<String, ExampleValue>> {
        match self {
            ExampleValue::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Get the array items, if this is an array
    pub fn as_array(&self) -> Option<&[ExampleValue]> {
        match self {
            ExampleValue::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Length of the compact JSON text, with floats estimated
    pub fn approximate_size(&self) -> usize {
        match self {
            ExampleValue::Bool(true) => 4,
            ExampleValue::Bool(false) => 5,
            ExampleValue::Integer(i) => i.to_string().len(),
            ExampleValue::Float(_) => 24,
            ExampleValue::String(s) => s.len() + 2,
            ExampleValue::Array(items) => {
                2 + items.len().saturating_sub(1)
                    + items.iter().map(ExampleValue::approximate_size).sum::<usize>()
            }
            ExampleValue::Object(object) => {
                2 + object.len().saturating_sub(1)
                    + object
                        .iter()
                        .map(|(key, value)| key.len() + 3 + value.approximate_size())
                        .sum::<usize>()
            }
        }
    }

    /// Serialize to compact JSON text
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to indented JSON text
    pub fn to_json_string_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&str> for ExampleValue {
    fn from(value: &str) -> Self {
        ExampleValue::String(value.to_string())
    }
}

impl From<bool> for ExampleValue {
    fn from(value: bool) -> Self {
        ExampleValue::Bool(value)
    }
}

impl From<i64> for ExampleValue {
    fn from(value: i64) -> Self {
        ExampleValue::Integer(value)
    }
}

impl From<f64> for ExampleValue {
    fn from(value: f64) -> Self {
        ExampleValue::Float(value)
    }
}

impl From<ExampleValue> for JsonValue {
    fn from(value: ExampleValue) -> Self {
        match value {
            ExampleValue::Bool(b) => JsonValue::Bool(b),
            ExampleValue::Integer(i) => JsonValue::from(i),
            ExampleValue::Float(f) => serde_json::Number::from_f64(f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ExampleValue::String(s) => JsonValue::String(s),
            ExampleValue::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            ExampleValue::Object(object) => JsonValue::Object(
                object
                    .into_iter()
                    .map(|(key, value)| (key, JsonValue::from(value)))
                    .collect(),
            ),
        }
    }
}
