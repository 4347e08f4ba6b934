//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between JSON items and DynamoDB
//! `AttributeValue` maps. These are testable in isolation without DynamoDB
//! access.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cloudfns_core::items::{Item, ItemId, ITEM_KEY};
use cloudfns_core::storage::RepositoryError;
use serde_json::{Map, Number, Value};

// ============================================================================
// Item conversions
// ============================================================================

/// Convert an Item to a DynamoDB item.
pub fn item_to_attributes(
    item: &Item,
) -> Result<HashMap<String, AttributeValue>, RepositoryError> {
    item.attributes()
        .iter()
        .map(|(name, value)| Ok((name.clone(), json_to_attribute(value)?)))
        .collect()
}

/// Convert a DynamoDB item to an Item.
pub fn attributes_to_item(
    attributes: &HashMap<String, AttributeValue>,
) -> Result<Item, RepositoryError> {
    let map = attributes
        .iter()
        .map(|(name, value)| Ok((name.clone(), attribute_to_json(value)?)))
        .collect::<Result<Map<String, Value>, RepositoryError>>()?;

    Item::from_map(map).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// The key attribute map for `GetItem` and `DeleteItem`.
pub fn item_key(id: &ItemId) -> HashMap<String, AttributeValue> {
    HashMap::from([(ITEM_KEY.to_string(), AttributeValue::S(id.to_string()))])
}

// ============================================================================
// Value conversions
// ============================================================================

/// Convert a JSON value to an AttributeValue.
pub fn json_to_attribute(value: &Value) -> Result<AttributeValue, RepositoryError> {
    Ok(match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(values) => AttributeValue::L(
            values
                .iter()
                .map(json_to_attribute)
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), json_to_attribute(v)?)))
                .collect::<Result<_, RepositoryError>>()?,
        ),
    })
}

/// Convert an AttributeValue to a JSON value.
///
/// String and number sets become arrays, binaries become base64 strings.
pub fn attribute_to_json(value: &AttributeValue) -> Result<Value, RepositoryError> {
    Ok(match value {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::B(blob) => Value::String(encode_blob(blob)),
        AttributeValue::Ss(values) => Value::Array(values.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(values) => Value::Array(
            values
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Bs(blobs) => {
            Value::Array(blobs.iter().map(|b| Value::String(encode_blob(b))).collect())
        }
        AttributeValue::L(values) => Value::Array(
            values
                .iter()
                .map(attribute_to_json)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), attribute_to_json(v)?)))
                .collect::<Result<_, RepositoryError>>()?,
        ),
        other => {
            return Err(RepositoryError::Serialization(format!(
                "Unsupported attribute value: {:?}",
                other
            )))
        }
    })
}

/// DynamoDB numbers are decimal strings. Integers are kept exact.
fn parse_number(n: &str) -> Result<Number, RepositoryError> {
    if let Ok(i) = n.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = n.parse::<u64>() {
        return Ok(Number::from(u));
    }
    n.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(|| RepositoryError::Serialization(format!("Invalid number: {}", n)))
}

fn encode_blob(blob: &Blob) -> String {
    STANDARD.encode(blob.as_ref())
}
