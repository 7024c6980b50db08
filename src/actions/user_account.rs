// User account actions.
// Signal constructors and the fetch/save action creators that wrap service calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::{UserAccount, UserAccountService};

use super::Dispatch;

pub const FETCH_USER_ACCOUNT_BEGIN: &str = "FETCH_USER_ACCOUNT_BEGIN";
pub const FETCH_USER_ACCOUNT_SUCCESS: &str = "FETCH_USER_ACCOUNT_SUCCESS";
pub const FETCH_USER_ACCOUNT_FAILURE: &str = "FETCH_USER_ACCOUNT_FAILURE";
pub const SAVE_USER_ACCOUNT_BEGIN: &str = "SAVE_USER_ACCOUNT_BEGIN";
pub const SAVE_USER_ACCOUNT_SUCCESS: &str = "SAVE_USER_ACCOUNT_SUCCESS";
pub const SAVE_USER_ACCOUNT_FAILURE: &str = "SAVE_USER_ACCOUNT_FAILURE";

/// Progress signal for a user account operation.
///
/// Serializes as `{ "type": ..., "payload": { ... } }`, with no payload for
/// the begin signals. `E` is the service's error value, carried as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum UserAccountAction<E> {
    FetchUserAccountBegin,
    FetchUserAccountSuccess { user_account: UserAccount },
    FetchUserAccountFailure { error: E },
    SaveUserAccountBegin,
    SaveUserAccountSuccess { user_account: UserAccount },
    SaveUserAccountFailure { error: E },
}

impl<E> UserAccountAction<E> {
    /// The `type` tag of this signal.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FetchUserAccountBegin => FETCH_USER_ACCOUNT_BEGIN,
            Self::FetchUserAccountSuccess { .. } => FETCH_USER_ACCOUNT_SUCCESS,
            Self::FetchUserAccountFailure { .. } => FETCH_USER_ACCOUNT_FAILURE,
            Self::SaveUserAccountBegin => SAVE_USER_ACCOUNT_BEGIN,
            Self::SaveUserAccountSuccess { .. } => SAVE_USER_ACCOUNT_SUCCESS,
            Self::SaveUserAccountFailure { .. } => SAVE_USER_ACCOUNT_FAILURE,
        }
    }

    /// Whether this signal ends an operation.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::FetchUserAccountBegin | Self::SaveUserAccountBegin)
    }
}

pub fn fetch_user_account_begin<E>() -> UserAccountAction<E> {
    UserAccountAction::FetchUserAccountBegin
}

pub fn fetch_user_account_success<E>(user_account: UserAccount) -> UserAccountAction<E> {
    UserAccountAction::FetchUserAccountSuccess { user_account }
}

pub fn fetch_user_account_failure<E>(error: E) -> UserAccountAction<E> {
    UserAccountAction::FetchUserAccountFailure { error }
}

pub fn save_user_account_begin<E>() -> UserAccountAction<E> {
    UserAccountAction::SaveUserAccountBegin
}

pub fn save_user_account_success<E>(user_account: UserAccount) -> UserAccountAction<E> {
    UserAccountAction::SaveUserAccountSuccess { user_account }
}

pub fn save_user_account_failure<E>(error: E) -> UserAccountAction<E> {
    UserAccountAction::SaveUserAccountFailure { error }
}

/// Fetch a user account, dispatching begin, then success or failure.
///
/// The begin signal is dispatched before the service is called. A panic inside
/// the service is not caught and no terminal signal is dispatched for it.
pub async fn fetch_user_account<S, D>(service: &S, username: &str, dispatch: &D)
where
    S: UserAccountService + ?Sized,
    D: Dispatch<UserAccountAction<S::Error>> + ?Sized,
{
    dispatch.dispatch(fetch_user_account_begin());

    match service.get_user_account(username).await {
        Ok(user_account) => {
            debug!(username, "Fetched user account");
            dispatch.dispatch(fetch_user_account_success(user_account));
        }
        Err(error) => {
            debug!(username, "User account fetch failed");
            dispatch.dispatch(fetch_user_account_failure(error));
        }
    }
}

/// Save a user account, dispatching begin, then success or failure.
///
/// Same contract as [`fetch_user_account`].
pub async fn save_user_account<S, D>(service: &S, username: &str, dispatch: &D)
where
    S: UserAccountService + ?Sized,
    D: Dispatch<UserAccountAction<S::Error>> + ?Sized,
{
    dispatch.dispatch(save_user_account_begin());

    match service.save_user_account(username).await {
        Ok(user_account) => {
            debug!(username, "Saved user account");
            dispatch.dispatch(save_user_account_success(user_account));
        }
        Err(error) => {
            debug!(username, "User account save failed");
            dispatch.dispatch(save_user_account_failure(error));
        }
    }
}
