// Durable indexed storage driver.
// Stores each key as its own JSON file so reads and writes touch one entry.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;

use super::{INDEXED_FILES, StorageDriver};
use crate::cache::paths::item_file_name;
use crate::cache::storage::StorageResult;
use crate::cache::store::{delete, dir_is_writable, read_json, write_json_atomic};

/// On-disk record; keeps the original key since file names are hashed.
#[derive(Debug, Serialize, Deserialize)]
struct Record {
    key: String,
    value: Value,
}

/// One file per key below a directory.
///
/// Unsupported when no directory is configured or files cannot be created in it.
#[derive(Debug, Clone)]
pub struct IndexedFileDriver {
    dir: Option<PathBuf>,
}

impl IndexedFileDriver {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self { dir }
    }

    fn item_path(&self, key: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(item_file_name(key)))
    }
}

#[async_trait]
impl StorageDriver for IndexedFileDriver {
    fn id(&self) -> &str {
        INDEXED_FILES
    }

    async fn is_supported(&self) -> bool {
        match &self.dir {
            Some(dir) => dir_is_writable(dir).await,
            None => false,
        }
    }

    async fn get_item(&self, key: &str) -> StorageResult<Option<Value>> {
        let Some(path) = self.item_path(key) else {
            return Ok(None);
        };

        let record: Option<Record> = read_json(&path).await?;
        Ok(record.filter(|r| r.key == key).map(|r| r.value))
    }

    async fn set_item(&self, key: &str, value: Value) -> StorageResult<()> {
        if let Some(path) = self.item_path(key) {
            let record = Record {
                key: key.to_string(),
                value,
            };
            write_json_atomic(&path, &record).await?;
        }
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> StorageResult<()> {
        if let Some(path) = self.item_path(key) {
            delete(&path).await?;
        }
        Ok(())
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        let Some(dir) = &self.dir else {
            return Ok(Vec::new());
        };

        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(record) = read_json::<Record>(&path).await? {
                    keys.push(record.key);
                }
            }
        }
        Ok(keys)
    }
}
