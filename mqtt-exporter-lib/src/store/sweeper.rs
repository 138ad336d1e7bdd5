use super::ObservationStore;
use core::time::Duration;
use std::sync::{Arc, Weak};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const LOG_TARGET: &str = "   sweeper";

/// Shortest accepted sweep period.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Background task that periodically drops expired observations.
///
/// The task stops when the sweeper is dropped or when the store it sweeps is gone.
#[derive(Debug)]
pub struct Sweeper {
    task: JoinHandle<()>,
}

impl Sweeper {
    /// Start sweeping `store` every `interval`, raised to at least one millisecond.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn(store: &Arc<ObservationStore>, interval: Duration) -> Self {
        let interval = interval.max(MIN_INTERVAL);
        log::debug!(target: LOG_TARGET, "Sweeping expired observations every {interval:?}");
        let store = Arc::downgrade(store);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // the first tick completes immediately
            _ = ticker.tick().await;
            while sweep_once(&store) {
                _ = ticker.tick().await;
            }
        });

        Self { task }
    }
}

fn sweep_once(store: &Weak<ObservationStore>) -> bool {
    store.upgrade().is_some_and(|store| {
        _ = store.sweep();
        true
    })
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.task.abort();
    }
}
