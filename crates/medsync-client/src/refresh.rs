//! # Periodic Refresher
//!
//! Re-invokes a store fetch on a fixed interval. No backoff, no jitter:
//! the cadence is exactly the configured interval for as long as the task
//! lives.
//!
//! The background task deliberately survives the handle being dropped —
//! mirroring a refresh loop whose owner navigated away without tearing it
//! down. Only an explicit [`Refresher::stop`] ends the loop.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Handle to a spawned refresh loop.
pub struct Refresher {
    shutdown: mpsc::Sender<()>,
}

impl Refresher {
    /// Spawns a loop that awaits `tick` once per `interval`.
    ///
    /// The first invocation happens one full interval after spawn: the
    /// owning view fetches on mount, so an immediate refresh would be a
    /// duplicate.
    pub fn spawn<F, Fut>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        // The task keeps its own sender alive so a dropped handle cannot
        // close the channel and end the loop implicitly.
        let keep_alive = shutdown_tx.clone();

        tokio::spawn(async move {
            let _keep_alive = keep_alive;
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Consume the interval's immediate first fire.
            timer.tick().await;

            loop {
                tokio::select! {
                    _ = timer.tick() => tick().await,
                    _ = shutdown_rx.recv() => {
                        debug!("Refresher stopped");
                        break;
                    }
                }
            }
        });

        Refresher {
            shutdown: shutdown_tx,
        }
    }

    /// Explicitly tears the loop down. Idempotent.
    pub async fn stop(&self) {
        let _ = self.shutdown.send(()).await;
    }
}
