//! Items API client methods.

use cloudfns_core::items::{Item, ItemId};
use serde_json::Value;

use super::CloudfnsClient;
use crate::error::{ClientError, Result};

impl CloudfnsClient {
    /// Store an item. The server echoes it back.
    pub async fn put_item(&self, item: &Item) -> Result<Item> {
        let response = self
            .client
            .post(self.url("/items"))
            .json(item)
            .send()
            .await?;
        self.handle_response(response, "Item").await
    }

    /// Fetch an item by id.
    pub async fn get_item(&self, id: &ItemId) -> Result<Item> {
        let response = self
            .client
            .get(self.segments_url(&["items", id.as_str()])?)
            .send()
            .await?;
        self.handle_response(response, &format!("Item {id}")).await
    }

    /// Delete an item by id. Deleting a missing item succeeds.
    pub async fn delete_item(&self, id: &ItemId) -> Result<()> {
        let response = self
            .client
            .delete(self.segments_url(&["items", id.as_str()])?)
            .send()
            .await?;
        self.handle_empty_response(response, &format!("Item {id}"))
            .await
    }
}

/// Parses an item given on the command line as a JSON object.
pub fn parse_item(raw: &str) -> Result<Item> {
    let value: Value = serde_json::from_str(raw)?;
    Item::from_value(value).map_err(|e| ClientError::InvalidInput(e.to_string()))
}

/// Validates an item id given on the command line.
pub fn parse_item_id(raw: &str) -> Result<ItemId> {
    ItemId::new(raw).map_err(|e| ClientError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        let item = parse_item(r#"{"ItemId":"abc","name":"Widget"}"#).unwrap();
        assert_eq!(item.id().as_str(), "abc");
    }

    #[test]
    fn test_parse_item_rejects_missing_key() {
        let err = parse_item(r#"{"name":"Widget"}"#).unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
        assert_eq!(
            err.to_string(),
            "Invalid input: Invalid item: missing ItemId attribute"
        );
    }

    #[test]
    fn test_parse_item_rejects_bad_json() {
        assert!(matches!(
            parse_item("{not json"),
            Err(ClientError::Json(_))
        ));
    }

    #[test]
    fn test_parse_item_id_rejects_empty() {
        assert!(parse_item_id("").is_err());
        assert_eq!(parse_item_id("abc").unwrap().as_str(), "abc");
    }
}
