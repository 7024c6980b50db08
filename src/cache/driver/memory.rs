// In-memory storage driver.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{MEMORY_DRIVER, StorageDriver};
use crate::cache::storage::StorageResult;

/// Process-local driver, always supported. Contents are lost on exit.
#[derive(Debug)]
pub struct MemoryDriver {
    id: String,
    items: RwLock<HashMap<String, Value>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::with_id(MEMORY_DRIVER)
    }

    /// Create a memory driver registered under a custom identifier.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageDriver for MemoryDriver {
    fn id(&self) -> &str {
        &self.id
    }

    async fn is_supported(&self) -> bool {
        true
    }

    async fn get_item(&self, key: &str) -> StorageResult<Option<Value>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: Value) -> StorageResult<()> {
        self.items.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items.write().await.remove(key);
        Ok(())
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.items.read().await.keys().cloned().collect())
    }
}
