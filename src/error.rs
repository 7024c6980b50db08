// Error types for the account client.
// Covers account API failures, storage driver failures and configuration errors.

use thiserror::Error;

use crate::cache::StorageError;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Account API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Missing {0} environment variable")]
    MissingConfig(&'static str),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AccountError>;
