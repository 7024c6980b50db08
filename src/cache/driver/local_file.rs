// Local key-value storage driver.
// Keeps every key in a single JSON object file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{LOCAL_FILE, StorageDriver};
use crate::cache::storage::StorageResult;
use crate::cache::store::{dir_is_writable, read_json, write_json_atomic};

type Items = BTreeMap<String, Value>;

#[derive(Debug)]
pub struct LocalFileDriver {
    path: Option<PathBuf>,
    // Serializes read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl LocalFileDriver {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> StorageResult<Items> {
        match &self.path {
            Some(path) => Ok(read_json(path).await?.unwrap_or_default()),
            None => Ok(Items::new()),
        }
    }

    async fn update<F>(&self, f: F) -> StorageResult<()>
    where
        F: FnOnce(&mut Items) + Send,
    {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let _guard = self.lock.lock().await;
        let mut items: Items = read_json(path).await?.unwrap_or_default();
        f(&mut items);
        write_json_atomic(path, &items).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageDriver for LocalFileDriver {
    fn id(&self) -> &str {
        LOCAL_FILE
    }

    async fn is_supported(&self) -> bool {
        match self.path.as_ref().and_then(|p| p.parent()) {
            Some(parent) => dir_is_writable(parent).await,
            None => false,
        }
    }

    async fn get_item(&self, key: &str) -> StorageResult<Option<Value>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: Value) -> StorageResult<()> {
        let key = key.to_string();
        self.update(move |items| {
            items.insert(key, value);
        })
        .await
    }

    async fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.update(|items| {
            items.remove(key);
        })
        .await
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.into_keys().collect())
    }
}
