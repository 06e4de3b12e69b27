//! Wall-clock scheduler on the tokio runtime

use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};

use super::{Scheduler, Task, TaskSlot, TickHandle};

/// Spawns one tokio task per registration
///
/// Cancelling a handle empties its slot and aborts the task.
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    handle: Handle,
}

impl IntervalScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler on the runtime the caller is running in
    pub fn current() -> Result<Self, tokio::runtime::TryCurrentError> {
        Handle::try_current().map(Self::new)
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule(&self, name: &str, period: Duration, task: Task) -> TickHandle {
        let period = period.max(Duration::from_millis(1));
        let slot = TaskSlot::new(task);
        let ticker = slot.clone();
        let label = name.to_string();

        let join = self.handle.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if !ticker.run() {
                    break;
                }
            }
            log::trace!("Ticker '{}' stopped", label);
        });

        log::debug!("Scheduled ticker '{}' every {:?}", name, period);
        TickHandle::new(name, slot, Some(join.abort_handle()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_interval_ticks_until_cancelled() {
        let scheduler = IntervalScheduler::current().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();

        let handle = scheduler.schedule(
            "count",
            Duration::from_millis(100),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_millis(350)).await;
        handle.cancel();
        let seen = count.load(Ordering::SeqCst);
        assert_eq!(seen, 3);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
        assert!(!handle.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_ticker() {
        let scheduler = IntervalScheduler::current().unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();

        let handle = scheduler.schedule(
            "count",
            Duration::from_millis(50),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        drop(handle);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
