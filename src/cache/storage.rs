// Storage abstraction over pluggable drivers.
// Drivers are registered by identifier; instances pick the first supported
// driver from an ordered preference list.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::driver::{INDEXED_FILES, IndexedFileDriver, LOCAL_FILE, LocalFileDriver, StorageDriver};
use super::paths::{indexed_store_dir, local_store_path};

/// Instance name used when none is configured.
pub const DEFAULT_INSTANCE_NAME: &str = "account-client";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid storage driver: {0}")]
    InvalidDriver(String),

    #[error("No supported storage driver among [{0}]")]
    NoSupportedDriver(String),

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Options for [`Storage::create_instance`].
#[derive(Debug, Clone)]
pub struct InstanceConfig {
    /// Namespace for this instance's keys.
    pub name: String,
    /// Driver identifiers in order of preference.
    pub drivers: Vec<String>,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_INSTANCE_NAME.to_string(),
            drivers: vec![INDEXED_FILES.to_string(), LOCAL_FILE.to_string()],
        }
    }
}

impl InstanceConfig {
    pub fn with_drivers<I, S>(drivers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            drivers: drivers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// Registry of storage drivers.
pub struct Storage {
    // Registration order
    drivers: RwLock<Vec<Arc<dyn StorageDriver>>>,
}

impl Storage {
    /// Storage with no drivers registered.
    pub fn empty() -> Self {
        Self {
            drivers: RwLock::new(Vec::new()),
        }
    }

    /// Storage with the built-in file drivers rooted at `base_dir`.
    ///
    /// With no base directory both file drivers report themselves unsupported.
    pub fn new(base_dir: Option<&Path>) -> Self {
        let indexed = IndexedFileDriver::new(base_dir.map(indexed_store_dir));
        let local = LocalFileDriver::new(base_dir.map(local_store_path));

        Self {
            drivers: RwLock::new(vec![Arc::new(indexed), Arc::new(local)]),
        }
    }

    /// Register a driver, replacing any previous driver with the same identifier.
    pub async fn define_driver(&self, driver: Arc<dyn StorageDriver>) -> StorageResult<()> {
        let id = driver.id().trim();
        if id.is_empty() {
            return Err(StorageError::InvalidDriver(
                "driver identifier must not be empty".to_string(),
            ));
        }

        let mut drivers = self.drivers.write().await;
        match drivers.iter_mut().find(|d| d.id() == driver.id()) {
            Some(existing) => {
                debug!(driver = driver.id(), "Replacing storage driver");
                *existing = driver;
            }
            None => {
                debug!(driver = driver.id(), "Defined storage driver");
                drivers.push(driver);
            }
        }
        Ok(())
    }

    /// Identifiers of all registered drivers, in registration order.
    pub async fn driver_ids(&self) -> Vec<String> {
        self.drivers
            .read()
            .await
            .iter()
            .map(|d| d.id().to_string())
            .collect()
    }

    /// Create an instance backed by the first supported driver in `config.drivers`.
    ///
    /// Identifiers that were never defined are skipped.
    pub async fn create_instance(&self, config: InstanceConfig) -> StorageResult<StorageInstance> {
        let registered = self.drivers.read().await.clone();

        for id in &config.drivers {
            let Some(driver) = registered.iter().find(|d| d.id() == id) else {
                debug!(driver = %id, "Storage driver not defined, skipping");
                continue;
            };

            if driver.is_supported().await {
                info!(driver = %id, instance = %config.name, "Selected storage driver");
                return Ok(StorageInstance {
                    name: config.name,
                    driver: Arc::clone(driver),
                });
            }

            debug!(driver = %id, "Storage driver unsupported, trying next");
        }

        Err(StorageError::NoSupportedDriver(config.drivers.join(", ")))
    }
}

/// A namespaced handle onto one selected driver.
#[derive(Clone)]
pub struct StorageInstance {
    name: String,
    driver: Arc<dyn StorageDriver>,
}

impl std::fmt::Debug for StorageInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageInstance")
            .field("name", &self.name)
            .field("driver", &self.driver.id())
            .finish()
    }
}

impl StorageInstance {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the driver this instance selected.
    pub fn driver_id(&self) -> &str {
        self.driver.id()
    }

    fn prefix(&self) -> String {
        format!("{}/", self.name)
    }

    fn scoped(&self, key: &str) -> String {
        format!("{}{}", self.prefix(), key)
    }

    pub async fn get_item(&self, key: &str) -> StorageResult<Option<Value>> {
        self.driver.get_item(&self.scoped(key)).await
    }

    pub async fn set_item(&self, key: &str, value: Value) -> StorageResult<()> {
        self.driver.set_item(&self.scoped(key), value).await
    }

    pub async fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.driver.remove_item(&self.scoped(key)).await
    }

    /// Keys belonging to this instance, without the namespace prefix.
    pub async fn keys(&self) -> StorageResult<Vec<String>> {
        let prefix = self.prefix();
        Ok(self
            .driver
            .keys()
            .await?
            .into_iter()
            .filter_map(|k| k.strip_prefix(&prefix).map(str::to_string))
            .collect())
    }

    pub async fn length(&self) -> StorageResult<usize> {
        Ok(self.keys().await?.len())
    }

    /// Remove every key belonging to this instance.
    pub async fn clear(&self) -> StorageResult<()> {
        for key in self.keys().await? {
            self.remove_item(&key).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::driver::{MEMORY_DRIVER, MemoryDriver};
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_define_driver_rejects_blank_id() {
        let storage = Storage::empty();
        let result = storage
            .define_driver(Arc::new(MemoryDriver::with_id("  ")))
            .await;
        assert!(matches!(result, Err(StorageError::InvalidDriver(_))));
        assert!(storage.driver_ids().await.is_empty());
    }

    #[tokio::test]
    async fn test_define_driver_replaces_same_id() {
        let storage = Storage::empty();
        storage.define_driver(Arc::new(MemoryDriver::new())).await.unwrap();
        storage.define_driver(Arc::new(MemoryDriver::new())).await.unwrap();
        assert_eq!(storage.driver_ids().await, vec![MEMORY_DRIVER]);
    }

    #[tokio::test]
    async fn test_builtin_drivers_registered_in_order() {
        let storage = Storage::new(None);
        assert_eq!(storage.driver_ids().await, vec![INDEXED_FILES, LOCAL_FILE]);
    }

    #[tokio::test]
    async fn test_prefers_first_supported_driver() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(Some(temp_dir.path()));
        storage.define_driver(Arc::new(MemoryDriver::new())).await.unwrap();

        let instance = storage
            .create_instance(InstanceConfig::with_drivers([
                INDEXED_FILES,
                LOCAL_FILE,
                MEMORY_DRIVER,
            ]))
            .await
            .unwrap();
        assert_eq!(instance.driver_id(), INDEXED_FILES);

        let local_first = storage
            .create_instance(InstanceConfig::with_drivers([LOCAL_FILE, INDEXED_FILES]))
            .await
            .unwrap();
        assert_eq!(local_first.driver_id(), LOCAL_FILE);
    }

    #[tokio::test]
    async fn test_falls_back_when_durable_drivers_unsupported() {
        let storage = Storage::new(None);
        storage.define_driver(Arc::new(MemoryDriver::new())).await.unwrap();

        let instance = storage
            .create_instance(InstanceConfig::with_drivers([
                INDEXED_FILES,
                LOCAL_FILE,
                MEMORY_DRIVER,
            ]))
            .await
            .unwrap();
        assert_eq!(instance.driver_id(), MEMORY_DRIVER);
    }

    #[tokio::test]
    async fn test_skips_undefined_drivers() {
        let storage = Storage::new(None);
        let result = storage
            .create_instance(InstanceConfig::with_drivers(["nope", MEMORY_DRIVER]))
            .await;
        match result {
            Err(StorageError::NoSupportedDriver(ids)) => {
                assert_eq!(ids, "nope, memoryStorageDriver")
            }
            other => panic!("expected NoSupportedDriver, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_instances_are_namespaced() {
        let storage = Storage::empty();
        storage.define_driver(Arc::new(MemoryDriver::new())).await.unwrap();

        let mut config = InstanceConfig::with_drivers([MEMORY_DRIVER]);
        config.name = "first".to_string();
        let first = storage.create_instance(config.clone()).await.unwrap();
        config.name = "second".to_string();
        let second = storage.create_instance(config).await.unwrap();

        first.set_item("key", json!(1)).await.unwrap();
        second.set_item("key", json!(2)).await.unwrap();
        second.set_item("other", json!(3)).await.unwrap();

        assert_eq!(first.get_item("key").await.unwrap(), Some(json!(1)));
        assert_eq!(first.keys().await.unwrap(), vec!["key"]);
        assert_eq!(second.length().await.unwrap(), 2);

        second.clear().await.unwrap();
        assert_eq!(second.length().await.unwrap(), 0);
        assert_eq!(first.get_item("key").await.unwrap(), Some(json!(1)));
    }
}
