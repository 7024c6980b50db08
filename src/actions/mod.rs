// Actions module.
// Signals describing state-change intent and the sinks they are dispatched to.

pub mod user_account;

use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

pub use user_account::{UserAccountAction, fetch_user_account, save_user_account};

/// Sink for action signals, typically feeding a reducer.
pub trait Dispatch<A> {
    fn dispatch(&self, action: A);
}

impl<A> Dispatch<A> for UnboundedSender<A> {
    fn dispatch(&self, action: A) {
        if let Err(e) = self.send(action) {
            error!("Failed to dispatch action: {}", e);
        }
    }
}

/// Plain callbacks are sinks too.
impl<A, F> Dispatch<A> for F
where
    F: Fn(A),
{
    fn dispatch(&self, action: A) {
        self(action)
    }
}
