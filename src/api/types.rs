// Account API resource types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user account as returned by the account API.
///
/// Only `username` is interpreted; every other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserAccount {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            extra: Map::new(),
        }
    }
}
