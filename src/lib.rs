// account-client: user account actions and storage-backed response caching.

pub mod actions;
pub mod api;
pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;

pub use actions::{Dispatch, UserAccountAction, fetch_user_account, save_user_account};
pub use api::{ApiClient, HttpUserAccountService, UserAccount, UserAccountService};
pub use app::App;
pub use cache::{ResponseCache, Storage, configure_cache};
pub use config::Config;
pub use error::{AccountError, Result};
pub use state::{LoadingState, UserAccountState};
