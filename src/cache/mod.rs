// Cache module.
// Storage drivers, the storage abstraction, and the HTTP response cache built on them.

pub mod configure;
pub mod driver;
pub mod paths;
pub mod response;
pub mod storage;
pub mod store;

pub use configure::{CACHE_MAX_AGE, configure_cache, configure_cache_with};
pub use driver::{
    INDEXED_FILES, IndexedFileDriver, LOCAL_FILE, LocalFileDriver, MEMORY_DRIVER, MemoryDriver,
    StorageDriver,
};
pub use response::{CacheConfig, CachedResponse, ResponseCache, setup_cache};
pub use storage::{InstanceConfig, Storage, StorageError, StorageInstance, StorageResult};
pub use store::CachedData;
