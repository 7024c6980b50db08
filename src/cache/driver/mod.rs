// Storage drivers.
// Each driver is one persistence backend the storage abstraction can select.

mod indexed_file;
mod local_file;
mod memory;

use async_trait::async_trait;
use serde_json::Value;

use super::storage::StorageResult;

pub use indexed_file::IndexedFileDriver;
pub use local_file::LocalFileDriver;
pub use memory::MemoryDriver;

/// Durable storage with one file per key.
pub const INDEXED_FILES: &str = "indexedFileStorage";
/// Simple key-value storage in a single file.
pub const LOCAL_FILE: &str = "localFileStorage";
/// Process-local fallback.
pub const MEMORY_DRIVER: &str = "memoryStorageDriver";

/// A persistence backend.
///
/// Keys are opaque strings; namespacing is handled by
/// [`StorageInstance`](super::StorageInstance).
#[async_trait]
pub trait StorageDriver: Send + Sync {
    /// Identifier used in driver preference lists.
    fn id(&self) -> &str;

    /// Whether the backend can be used in the current environment.
    async fn is_supported(&self) -> bool;

    async fn get_item(&self, key: &str) -> StorageResult<Option<Value>>;

    async fn set_item(&self, key: &str, value: Value) -> StorageResult<()>;

    async fn remove_item(&self, key: &str) -> StorageResult<()>;

    /// All stored keys, in no particular order.
    async fn keys(&self) -> StorageResult<Vec<String>>;
}
