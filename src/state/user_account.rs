// User account state.
// Reduces user account signals into loading/loaded/error state.

use crate::actions::UserAccountAction;
use crate::api::UserAccount;

use super::loading::LoadingState;

/// State for the current user account and its pending save.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccountState<E> {
    /// Last fetched (or saved) account.
    pub account: LoadingState<UserAccount, E>,
    /// Outcome of the latest save.
    pub saving: LoadingState<UserAccount, E>,
}

impl<E> Default for UserAccountState<E> {
    fn default() -> Self {
        Self {
            account: LoadingState::Idle,
            saving: LoadingState::Idle,
        }
    }
}

impl<E> UserAccountState<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one signal.
    pub fn reduce(&mut self, action: UserAccountAction<E>) {
        match action {
            UserAccountAction::FetchUserAccountBegin => {
                self.account = LoadingState::Loading;
            }
            UserAccountAction::FetchUserAccountSuccess { user_account } => {
                self.account = LoadingState::Loaded(user_account);
            }
            UserAccountAction::FetchUserAccountFailure { error } => {
                self.account = LoadingState::Error(error);
            }
            UserAccountAction::SaveUserAccountBegin => {
                self.saving = LoadingState::Loading;
            }
            UserAccountAction::SaveUserAccountSuccess { user_account } => {
                // The saved account supersedes whatever was fetched
                self.account = LoadingState::Loaded(user_account.clone());
                self.saving = LoadingState::Loaded(user_account);
            }
            UserAccountAction::SaveUserAccountFailure { error } => {
                self.saving = LoadingState::Error(error);
            }
        }
    }
}
