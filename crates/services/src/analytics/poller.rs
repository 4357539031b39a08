use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

use super::store::SessionStore;

/// Refresh period while an analytics-consuming view is active.
pub const POLL_PERIOD: Duration = Duration::from_secs(30);

/// Cancellable handle for the background poll timer.
///
/// Owned by the view's activation lifecycle: started on enter, stopped (or
/// simply dropped) on leave. The first refresh fires immediately, then one
/// per period. A failed poll logs a warning and leaves the store's last good
/// snapshot in place.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Spawn the poll loop on the current tokio runtime.
    #[must_use]
    pub fn start(store: Arc<SessionStore>, period: Duration) -> Self {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(err) = store.refresh().await {
                    warn!(%err, "session poll failed, keeping last snapshot");
                }
            }
        });
        Self { task }
    }

    /// Cancel the timer. Equivalent to dropping the handle.
    pub fn stop(self) {
        self.task.abort();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
