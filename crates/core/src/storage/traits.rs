use async_trait::async_trait;

use crate::items::{Item, ItemId};

use super::Result;

/// Repository for items keyed by `ItemId`.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Stores an item, replacing any item with the same id.
    async fn put_item(&self, item: &Item) -> Result<()>;

    /// Gets an item by its id.
    async fn get_item(&self, id: &ItemId) -> Result<Option<Item>>;

    /// Deletes an item by its id. Deleting a missing item is not an error.
    async fn delete_item(&self, id: &ItemId) -> Result<()>;
}
