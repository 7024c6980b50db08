// Cache path utilities.
// Constructs filesystem locations for the durable storage drivers.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use sha2::{Digest, Sha256};

/// Get the base cache directory (~/.cache/account-client on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "account-client").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding one file per key for the indexed file driver.
pub fn indexed_store_dir(base: &Path) -> PathBuf {
    base.join("indexed")
}

/// Single key-value file used by the local file driver.
pub fn local_store_path(base: &Path) -> PathBuf {
    base.join("local_storage.json")
}

/// File name for a stored key.
///
/// The readable prefix is lossy, so a hash of the full key keeps names unique.
pub fn item_file_name(key: &str) -> String {
    let sanitized = sanitize_name(key);
    let prefix = truncate_to_boundary(&sanitized, MAX_PREFIX_BYTES);
    format!("{}-{}.json", prefix, key_digest(key))
}

// Leaves room for the digest and extension under a 255-byte NAME_MAX
const MAX_PREFIX_BYTES: usize = 128;

/// Longest prefix of `value` no longer than `max` bytes, cut on a char boundary.
fn truncate_to_boundary(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let end = (0..=max)
        .rev()
        .find(|&i| value.is_char_boundary(i))
        .unwrap_or(0);
    &value[..end]
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

/// First 16 hex characters of the SHA-256 of the key.
fn key_digest(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let hash = hasher.finalize();
    hex::encode(&hash[..8])
}
