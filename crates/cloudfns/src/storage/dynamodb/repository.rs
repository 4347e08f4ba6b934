//! DynamoDB repository implementation.
//!
//! Implements `ItemRepository` from `cloudfns_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use cloudfns_core::items::{Item, ItemId};
use cloudfns_core::storage::{ItemRepository, Result};

use super::conversions::{attributes_to_item, item_key, item_to_attributes};
use super::error::{map_delete_item_error, map_get_item_error, map_put_item_error};

/// DynamoDB-based item repository.
pub struct DynamoDbItemRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbItemRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a repository from a loaded AWS SDK configuration.
    ///
    /// `endpoint_url` points the client at a local DynamoDB when set.
    pub fn from_sdk_config(
        sdk_config: &aws_config::SdkConfig,
        endpoint_url: Option<&str>,
        table_name: impl Into<String>,
    ) -> Self {
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);
        if let Some(endpoint) = endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        Self::new(Client::from_conf(builder.build()), table_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl ItemRepository for DynamoDbItemRepository {
    async fn put_item(&self, item: &Item) -> Result<()> {
        let attributes = item_to_attributes(item)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(attributes))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn get_item(&self, id: &ItemId) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(item_key(id)))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(attributes) => Ok(Some(attributes_to_item(&attributes)?)),
            None => Ok(None),
        }
    }

    async fn delete_item(&self, id: &ItemId) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(item_key(id)))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }
}
