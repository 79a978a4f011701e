//! Periodic recomputation while a session is open.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

/// A cancellable ticker running `tick` every `period`.
///
/// One tick runs at a time; ticks missed while one is running are dropped,
/// not queued. Must be spawned inside a tokio runtime.
pub struct RefreshTask {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RefreshTask {
    pub fn spawn<F>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> AppResult<()> + Send + 'static,
    {
        let (stop, mut stopped) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = stopped.changed() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = tick() {
                            warning(format!("Refresh failed: {}", e));
                        }
                    }
                }
            }
        });

        Self { stop, handle }
    }

    /// Stop ticking and wait for the task to exit. No tick runs after this returns.
    pub async fn cancel(self) {
        let _ = self.stop.send(true);
        let _ = self.handle.await;
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
