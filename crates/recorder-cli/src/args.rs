//! Parsing helpers for `key=value` arguments and typed attribute values

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use recorder_core::domain::{AttributeValue, Attributes};

/// Explicit type for an attribute value given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueType {
    Text,
    Int,
    Bool,
    Float,
    Json,
}

/// Parses `raw` as the requested type, or infers one when `ty` is `None`.
pub fn parse_value(raw: &str, ty: Option<ValueType>) -> Result<AttributeValue> {
    let Some(ty) = ty else {
        return Ok(infer_value(raw));
    };

    let value = match ty {
        ValueType::Text => AttributeValue::from(raw),
        ValueType::Int => AttributeValue::Int(
            raw.parse()
                .with_context(|| format!("'{raw}' is not a 32-bit integer"))?,
        ),
        ValueType::Bool => AttributeValue::Bool(
            raw.parse()
                .with_context(|| format!("'{raw}' is not true or false"))?,
        ),
        ValueType::Float => AttributeValue::Float(
            raw.parse()
                .with_context(|| format!("'{raw}' is not a number"))?,
        ),
        ValueType::Json => AttributeValue::Object(
            serde_json::from_str(raw).with_context(|| format!("'{raw}' is not valid JSON"))?,
        ),
    };
    Ok(value)
}

/// Picks the narrowest type that parses: bool, then int, then float, then text.
pub fn infer_value(raw: &str) -> AttributeValue {
    if let Ok(b) = raw.parse::<bool>() {
        AttributeValue::Bool(b)
    } else if let Ok(n) = raw.parse::<i32>() {
        AttributeValue::Int(n)
    } else if let Ok(f) = raw.parse::<f64>() {
        AttributeValue::Float(f)
    } else {
        AttributeValue::from(raw)
    }
}

/// Splits one `key=value` pair at the first `=`.
pub fn parse_pair(pair: &str) -> Result<(String, AttributeValue)> {
    let Some((key, value)) = pair.split_once('=') else {
        bail!("expected key=value, got '{pair}'");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("empty key in '{pair}'");
    }
    Ok((key.to_string(), infer_value(value)))
}

/// Collects repeated `key=value` arguments; later keys overwrite earlier ones.
pub fn parse_pairs(pairs: &[String]) -> Result<Attributes> {
    pairs.iter().map(|pair| parse_pair(pair)).collect()
}
