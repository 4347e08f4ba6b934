use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ItemRequestError;

/// Name of the key attribute every item carries.
pub const ITEM_KEY: &str = "ItemId";

/// Identifier of an item in the items table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an id, rejecting empty strings.
    pub fn new(id: impl Into<String>) -> Result<Self, ItemRequestError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ItemRequestError::MissingId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A schemaless item: a JSON object holding at least a string `ItemId`.
///
/// Attributes other than the key are stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Item {
    attributes: Map<String, Value>,
    #[serde(skip)]
    id: ItemId,
}

impl Item {
    /// Validates a JSON value as an item.
    pub fn from_value(value: Value) -> Result<Self, ItemRequestError> {
        let Value::Object(attributes) = value else {
            return Err(ItemRequestError::InvalidItem(
                "item must be a JSON object".to_string(),
            ));
        };
        Self::from_map(attributes)
    }

    /// Validates an attribute map as an item.
    pub fn from_map(attributes: Map<String, Value>) -> Result<Self, ItemRequestError> {
        let id = match attributes.get(ITEM_KEY) {
            Some(Value::String(id)) if !id.is_empty() => ItemId(id.clone()),
            Some(Value::String(_)) => {
                return Err(ItemRequestError::InvalidItem(format!(
                    "{ITEM_KEY} must not be empty"
                )))
            }
            Some(_) => {
                return Err(ItemRequestError::InvalidItem(format!(
                    "{ITEM_KEY} must be a string"
                )))
            }
            None => {
                return Err(ItemRequestError::InvalidItem(format!(
                    "missing {ITEM_KEY} attribute"
                )))
            }
        };
        Ok(Self { attributes, id })
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.attributes)
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Item::from_value(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_keeps_extra_attributes() {
        let item = Item::from_value(json!({
            "ItemId": "abc",
            "name": "Widget",
            "tags": ["a", "b"],
            "price": 9.5
        }))
        .unwrap();

        assert_eq!(item.id().as_str(), "abc");
        assert_eq!(item.attributes().len(), 4);
        assert_eq!(item.attributes()["tags"], json!(["a", "b"]));
    }

    #[test]
    fn test_item_requires_object() {
        let err = Item::from_value(json!(["ItemId", "abc"])).unwrap_err();
        assert_eq!(
            err,
            ItemRequestError::InvalidItem("item must be a JSON object".to_string())
        );
    }

    #[test]
    fn test_item_requires_key() {
        let err = Item::from_value(json!({"name": "Widget"})).unwrap_err();
        assert_eq!(
            err,
            ItemRequestError::InvalidItem("missing ItemId attribute".to_string())
        );
    }

    #[test]
    fn test_item_key_must_be_non_empty_string() {
        assert!(Item::from_value(json!({"ItemId": 42})).is_err());
        assert!(Item::from_value(json!({"ItemId": ""})).is_err());
    }

    #[test]
    fn test_item_serializes_as_plain_object() {
        let item = Item::from_value(json!({"ItemId": "abc", "count": 3})).unwrap();
        let text = serde_json::to_string(&item).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, json!({"ItemId": "abc", "count": 3}));
    }

    #[test]
    fn test_item_deserialize_validates() {
        let parsed: Result<Item, _> = serde_json::from_str(r#"{"name": "x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_item_id_rejects_empty() {
        assert_eq!(ItemId::new(""), Err(ItemRequestError::MissingId));
        assert_eq!(ItemId::new("42").unwrap().to_string(), "42");
    }
}
