// Client configuration.
// Loaded from environment variables, with the platform cache dir as default storage root.

use std::path::PathBuf;

use crate::cache::paths;
use crate::error::{AccountError, Result};

pub const API_URL_VAR: &str = "ACCOUNT_API_URL";
pub const API_TOKEN_VAR: &str = "ACCOUNT_API_TOKEN";
pub const CACHE_DIR_VAR: &str = "ACCOUNT_CACHE_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the account API.
    pub api_url: String,
    /// Bearer token, if the API requires one.
    pub api_token: Option<String>,
    /// Root for durable storage drivers. `None` leaves only the memory driver.
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// An empty cache dir variable disables durable storage.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or(AccountError::MissingConfig(API_URL_VAR))?;

        let api_token = lookup(API_TOKEN_VAR).filter(|v| !v.is_empty());

        let cache_dir = match lookup(CACHE_DIR_VAR) {
            Some(dir) if dir.is_empty() => None,
            Some(dir) => Some(PathBuf::from(dir)),
            None => paths::cache_dir(),
        };

        Ok(Self {
            api_url,
            api_token,
            cache_dir,
        })
    }
}
