//! Background refresh timer for scheduled mode.
//!
//! Refreshes on a fixed interval, starting immediately. A failed refresh is
//! logged and retried on the next tick; there is no backoff.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::EdlCache;

/// Handle to a running refresh loop.
pub struct RefreshTask {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RefreshTask {
    /// Stop the loop and wait for an in-flight refresh to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.handle.await {
            warn!(error = %e, "EDL refresh loop ended abnormally");
        }
    }

    /// Returns true once the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawn a loop refreshing `cache` every `interval`.
pub fn spawn_refresh_loop(cache: Arc<EdlCache>, interval: Duration) -> RefreshTask {
    let (shutdown, mut shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = interval.as_secs(), "EDL refresh loop started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = cache.refresh().await {
                        warn!(
                            error = %e,
                            retryable = e.is_retryable(),
                            "EDL refresh failed, keeping previous list"
                        );
                    }
                }
                _ = shutdown_rx.changed() => break,
            }
        }

        info!("EDL refresh loop stopped");
    });

    RefreshTask { shutdown, handle }
}
