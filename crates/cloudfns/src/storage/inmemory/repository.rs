//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use cloudfns_core::items::{Item, ItemId};
use cloudfns_core::storage::{ItemRepository, Result};

/// In-memory item storage.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<HashMap<ItemId, Item>>>,
}

impl InMemoryItemRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn put_item(&self, item: &Item) -> Result<()> {
        let mut items = self.items.write().await;
        items.insert(item.id().clone(), item.clone());
        Ok(())
    }

    async fn get_item(&self, id: &ItemId) -> Result<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(id).cloned())
    }

    async fn delete_item(&self, id: &ItemId) -> Result<()> {
        let mut items = self.items.write().await;
        items.remove(id);
        Ok(())
    }
}
