//! Moves records between JSON and DynamoDB attribute values.
//!
//! DynamoDB holds numbers as decimal strings (`N`, `NS`). On the way in, a JSON
//! number keeps its literal text, so integers wider than 64 bits are stored
//! exactly. On the way out they are converted to `f64`, recursively through maps
//! and lists, so callers only ever see standard JSON numbers.

use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

use crate::error::ApiError;

/// JSON to attribute value. Numbers are written from their source text.
pub fn json_to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::String(s) => AttributeValue::S(s),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Null => AttributeValue::Null(true),
        Value::Array(list) => {
            AttributeValue::L(list.into_iter().map(json_to_attribute).collect())
        }
        Value::Object(map) => AttributeValue::M(record_to_item(map)),
    }
}

pub fn record_to_item(record: Map<String, Value>) -> HashMap<String, AttributeValue> {
    record
        .into_iter()
        .map(|(k, v)| (k, json_to_attribute(v)))
        .collect()
}

pub fn decimal_to_f64(raw: &str) -> Result<Number, ApiError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| {
            ApiError::Unexpected(format!("number {raw} is not representable as a float"))
        })
}

pub fn attribute_to_json(value: &AttributeValue) -> Result<Value, ApiError> {
    let json = match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => Value::Number(decimal_to_f64(n)?),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::M(map) => Value::Object(item_to_json(map)?),
        AttributeValue::L(list) => Value::Array(
            list.iter()
                .map(attribute_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::Ss(set) => Value::Array(set.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(set) => Value::Array(
            set.iter()
                .map(|n| decimal_to_f64(n).map(Value::Number))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::B(blob) => Value::String(STANDARD.encode(blob.as_ref())),
        AttributeValue::Bs(blobs) => Value::Array(
            blobs
                .iter()
                .map(|b| Value::String(STANDARD.encode(b.as_ref())))
                .collect(),
        ),
        other => {
            return Err(ApiError::Unexpected(format!(
                "unsupported attribute value: {other:?}"
            )))
        }
    };
    Ok(json)
}

pub fn item_to_json(item: &HashMap<String, AttributeValue>) -> Result<Map<String, Value>, ApiError> {
    item.iter()
        .map(|(k, v)| Ok((k.clone(), attribute_to_json(v)?)))
        .collect()
}

pub fn items_to_json(items: &[HashMap<String, AttributeValue>]) -> Result<Vec<Value>, ApiError> {
    items
        .iter()
        .map(|item| item_to_json(item).map(Value::Object))
        .collect()
}
