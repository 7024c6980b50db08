// App state and main signal loop.
// Drains dispatched signals into the reducers until every sender is gone.

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use crate::actions::UserAccountAction;
use crate::state::UserAccountState;

/// Main application state.
#[derive(Debug)]
pub struct App<E> {
    /// User account data and save progress.
    pub user_account: UserAccountState<E>,
    /// Number of signals applied so far.
    pub signals_applied: usize,
}

impl<E> Default for App<E> {
    fn default() -> Self {
        Self {
            user_account: UserAccountState::default(),
            signals_applied: 0,
        }
    }
}

impl<E> App<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single signal.
    pub fn handle(&mut self, action: UserAccountAction<E>) {
        debug!(kind = action.kind(), "Applying signal");
        self.user_account.reduce(action);
        self.signals_applied += 1;
    }

    /// Main loop. Returns once all senders have been dropped and the channel is drained.
    pub async fn run(&mut self, mut rx: UnboundedReceiver<UserAccountAction<E>>) -> usize {
        let start = self.signals_applied;
        while let Some(action) = rx.recv().await {
            self.handle(action);
        }
        self.signals_applied - start
    }
}
