// Response cache setup for the API client.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::driver::{INDEXED_FILES, LOCAL_FILE, MemoryDriver, StorageDriver};
use super::response::{CacheConfig, ResponseCache, setup_cache};
use super::storage::{InstanceConfig, Storage, StorageResult};

/// Entry lifetime for cached responses: 5 minutes.
pub const CACHE_MAX_AGE: Duration = Duration::from_millis(5 * 60 * 1000);

/// Configure the response cache with the in-memory driver as last resort.
///
/// Backend preference is indexed files, then the local key-value file, then memory.
pub async fn configure_cache(storage: &Storage) -> StorageResult<ResponseCache> {
    configure_cache_with(storage, Arc::new(MemoryDriver::new())).await
}

/// Configure the response cache with an explicit fallback driver.
///
/// The fallback must be defined before the instance is created, since
/// selection only considers drivers that are already registered.
pub async fn configure_cache_with(
    storage: &Storage,
    fallback: Arc<dyn StorageDriver>,
) -> StorageResult<ResponseCache> {
    let fallback_id = fallback.id().to_string();
    storage.define_driver(fallback).await?;

    let store = storage
        .create_instance(InstanceConfig::with_drivers([
            INDEXED_FILES.to_string(),
            LOCAL_FILE.to_string(),
            fallback_id,
        ]))
        .await?;

    info!(
        driver = store.driver_id(),
        max_age_ms = CACHE_MAX_AGE.as_millis() as u64,
        "Configured response cache"
    );

    Ok(setup_cache(CacheConfig {
        max_age: CACHE_MAX_AGE,
        store,
    }))
}
