//! Reaper: sweeps terminal and expired links on a fixed interval.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use impactqr_store::BlobRegistry;

/// Sweeps never run more often than this.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(10);

/// Periodic sweeper bound to one registry.
#[derive(Debug)]
pub struct Reaper {
    /// Registry to sweep.
    registry: Arc<BlobRegistry>,
    /// Time between sweeps.
    interval: Duration,
}

impl Reaper {
    /// Create a reaper. Intervals below [`MIN_SWEEP_INTERVAL`] are raised to it.
    pub fn new(registry: Arc<BlobRegistry>, interval: Duration) -> Self {
        Self {
            registry,
            interval: interval.max(MIN_SWEEP_INTERVAL),
        }
    }

    /// Effective sweep interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawn the sweep loop on the current runtime.
    pub fn start(self) -> ReaperHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(stop_rx));
        ReaperHandle { stop_tx, task }
    }

    async fn run(self, mut stop: watch::Receiver<bool>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Reaper started"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let removed = self.registry.sweep();
                    if removed > 0 {
                        tracing::info!(
                            removed,
                            remaining = self.registry.len(),
                            "Pruned expired links"
                        );
                    } else {
                        tracing::debug!("Reaper sweep found nothing to prune");
                    }
                }
            }
        }

        tracing::info!("Reaper stopped");
    }
}

/// Handle to a running reaper.
#[derive(Debug)]
pub struct ReaperHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signal the reaper to stop and wait for the loop to exit.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!("Reaper task ended abnormally: {}", e);
        }
    }

    /// Whether the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
