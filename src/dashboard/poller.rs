use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

use super::DashboardController;

/// Default time between background refreshes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Background refresh loop.
pub struct Poller;

impl Poller {
    /// Fetch immediately, then once per `interval` until the handle is dropped.
    ///
    /// Ticks do not wait for earlier fetches to finish; overlapping results
    /// are ordered by the controller's sequence numbers.
    pub fn start(controller: Arc<DashboardController>, interval: Duration) -> PollHandle {
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut fetches = JoinSet::new();

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let controller = controller.clone();
                        fetches.spawn(async move {
                            if let Err(e) = controller.refresh().await {
                                tracing::debug!(error = %e, "background refresh failed");
                            }
                        });
                    }
                    Some(joined) = fetches.join_next(), if !fetches.is_empty() => {
                        if let Err(e) = joined
                            && e.is_panic()
                        {
                            tracing::error!(error = %e, "refresh task panicked");
                        }
                    }
                }
            }
        });
        PollHandle { task }
    }
}

/// Owned handle to a running [`Poller`].
///
/// Dropping it cancels the timer and every fetch the poller started.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
