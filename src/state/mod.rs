// State management module.
// Reducers that turn dispatched signals into loading and data state.

pub mod loading;
pub mod user_account;

pub use loading::LoadingState;
pub use user_account::UserAccountState;
