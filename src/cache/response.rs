// HTTP response cache.
// Stores GET response bodies in a storage instance and serves them while younger than max_age.

use std::time::Duration;

use reqwest::{Method, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::storage::{StorageInstance, StorageResult};
use super::store::CachedData;

/// Settings for [`setup_cache`].
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long an entry is served before it is treated as stale.
    pub max_age: Duration,
    /// Where entries are persisted.
    pub store: StorageInstance,
}

/// A cached response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub status: u16,
    pub body: String,
}

/// Response cache attachable to an [`ApiClient`](crate::api::ApiClient).
#[derive(Debug, Clone)]
pub struct ResponseCache {
    max_age: Duration,
    store: StorageInstance,
}

/// Build a response cache from its configuration.
pub fn setup_cache(config: CacheConfig) -> ResponseCache {
    ResponseCache {
        max_age: config.max_age,
        store: config.store,
    }
}

impl ResponseCache {
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub fn store(&self) -> &StorageInstance {
        &self.store
    }

    /// Only plain GET requests are cached; any query string bypasses the cache.
    pub fn is_cacheable(method: &Method, url: &Url) -> bool {
        *method == Method::GET && url.query().is_none()
    }

    /// Fetch a fresh entry. Stale entries are removed and reported as a miss.
    pub async fn get(&self, url: &Url) -> StorageResult<Option<CachedResponse>> {
        let Some(value) = self.store.get_item(url.as_str()).await? else {
            return Ok(None);
        };

        let entry: CachedData<CachedResponse> = serde_json::from_value(value)?;
        if entry.is_expired(self.max_age) {
            debug!(url = %url, "Removing stale cache entry");
            self.store.remove_item(url.as_str()).await?;
            return Ok(None);
        }

        Ok(Some(entry.data))
    }

    pub async fn put(&self, url: &Url, response: CachedResponse) -> StorageResult<()> {
        let entry = serde_json::to_value(CachedData::new(response))?;
        self.store.set_item(url.as_str(), entry).await
    }

    pub async fn invalidate(&self, url: &Url) -> StorageResult<()> {
        self.store.remove_item(url.as_str()).await
    }

    pub async fn clear(&self) -> StorageResult<()> {
        self.store.clear().await
    }
}
