//! Attribute values
//!
//! The sinks accept a small closed set of scalar kinds for custom keys and
//! event parameters. [`AttributeValue`] is that set; the `From` impls let call
//! sites pass plain Rust values.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Attribute map attached to a recorded failure.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Parameter map attached to an analytics event.
pub type Parameters = BTreeMap<String, AttributeValue>;

/// A value the sinks know how to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Free text
    Text(String),
    /// 32-bit signed integer
    Int(i32),
    /// Boolean flag
    Bool(bool),
    /// Floating point number
    Float(f64),
    /// Opaque structured value; sinks usually store its JSON rendering
    Object(serde_json::Value),
}

impl AttributeValue {
    /// Short name of the variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Text(_) => "text",
            AttributeValue::Int(_) => "int",
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Float(_) => "float",
            AttributeValue::Object(_) => "object",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Display for AttributeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => write!(f, "{s}"),
            AttributeValue::Int(n) => write!(f, "{n}"),
            AttributeValue::Bool(b) => write!(f, "{b}"),
            AttributeValue::Float(x) => write!(f, "{x}"),
            AttributeValue::Object(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<i32> for AttributeValue {
    fn from(n: i32) -> Self {
        AttributeValue::Int(n)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<f32> for AttributeValue {
    fn from(x: f32) -> Self {
        AttributeValue::Float(f64::from(x))
    }
}

impl From<f64> for AttributeValue {
    fn from(x: f64) -> Self {
        AttributeValue::Float(x)
    }
}

impl From<serde_json::Value> for AttributeValue {
    fn from(v: serde_json::Value) -> Self {
        AttributeValue::Object(v)
    }
}

/// Checks that an attribute or parameter key is usable.
///
/// Whitespace-only keys count as empty.
pub fn validate_key(key: &str) -> Result<&str, DomainError> {
    if key.trim().is_empty() {
        return Err(DomainError::EmptyKey);
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_plain_values() {
        assert_eq!(AttributeValue::from("abc"), AttributeValue::Text("abc".into()));
        assert_eq!(AttributeValue::from(30), AttributeValue::Int(30));
        assert_eq!(AttributeValue::from(true), AttributeValue::Bool(true));
        assert_eq!(AttributeValue::from(1.5_f32), AttributeValue::Float(1.5));
        assert_eq!(
            AttributeValue::from(serde_json::json!({"a": 1})).kind(),
            "object"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(AttributeValue::from("x").to_string(), "x");
        assert_eq!(AttributeValue::from(-4).to_string(), "-4");
        assert_eq!(AttributeValue::from(false).to_string(), "false");
        assert_eq!(
            AttributeValue::from(serde_json::json!([1, 2])).to_string(),
            "[1,2]"
        );
    }

    #[test]
    fn test_untagged_deserialization() {
        let attrs: Attributes =
            serde_json::from_str(r#"{"a":"s","b":7,"c":true,"d":0.25,"e":{"k":null}}"#).unwrap();
        assert_eq!(attrs["a"], AttributeValue::Text("s".into()));
        assert_eq!(attrs["b"], AttributeValue::Int(7));
        assert_eq!(attrs["c"], AttributeValue::Bool(true));
        assert_eq!(attrs["d"], AttributeValue::Float(0.25));
        assert_eq!(attrs["e"].kind(), "object");
    }

    #[test]
    fn test_validate_key() {
        assert_eq!(validate_key("age"), Ok("age"));
        assert_eq!(validate_key(""), Err(DomainError::EmptyKey));
        assert_eq!(validate_key("   "), Err(DomainError::EmptyKey));
    }
}
