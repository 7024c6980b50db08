// Account API module.
// Provides the HTTP client, resource types and the user account service.

pub mod client;
pub mod service;
pub mod types;

pub use client::ApiClient;
pub use service::{HttpUserAccountService, UserAccountService};
pub use types::UserAccount;
