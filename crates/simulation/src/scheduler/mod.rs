//! Periodic tick scheduling
//!
//! Feeds never own timers. A view hands each feed's tick closure to a
//! [`Scheduler`] and keeps the returned [`TickHandle`]; dropping or
//! cancelling the handle stops the ticks. [`ManualScheduler`] drives ticks
//! from virtual time for tests and [`IntervalScheduler`] runs them on tokio.

mod interval;
mod manual;

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

pub use interval::IntervalScheduler;
pub use manual::ManualScheduler;

/// Work executed on every tick
pub type Task = Box<dyn FnMut() + Send + 'static>;

/// Runs registered tasks periodically until their handle is cancelled
pub trait Scheduler: Send + Sync {
    /// Run `task` every `period`, first after one full period
    fn schedule(&self, name: &str, period: Duration, task: Task) -> TickHandle;
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    fn schedule(&self, name: &str, period: Duration, task: Task) -> TickHandle {
        (**self).schedule(name, period, task)
    }
}

/// Shared cell holding a registered task
///
/// Ticks run the task while holding the lock and cancellation empties the
/// cell under the same lock, so once `clear` returns the task never runs
/// again.
#[derive(Clone)]
pub(crate) struct TaskSlot(Arc<Mutex<Option<Task>>>);

impl TaskSlot {
    pub(crate) fn new(task: Task) -> Self {
        Self(Arc::new(Mutex::new(Some(task))))
    }

    /// Run the task once; false when it has been cancelled
    pub(crate) fn run(&self) -> bool {
        match self.0.lock().as_mut() {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&self) {
        self.0.lock().take();
    }

    pub(crate) fn is_active(&self) -> bool {
        self.0.lock().is_some()
    }
}

/// Registration returned by [`Scheduler::schedule`]
///
/// Must not be cancelled from inside its own task.
pub struct TickHandle {
    name: String,
    slot: TaskSlot,
    abort: Option<tokio::task::AbortHandle>,
}

impl TickHandle {
    pub(crate) fn new(name: &str, slot: TaskSlot, abort: Option<tokio::task::AbortHandle>) -> Self {
        Self {
            name: name.to_string(),
            slot,
            abort,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.slot.is_active()
    }

    /// Stop ticking. Waits for a tick already in progress to finish.
    pub fn cancel(&self) {
        if !self.slot.is_active() {
            return;
        }
        self.slot.clear();
        if let Some(abort) = &self.abort {
            abort.abort();
        }
        log::debug!("Cancelled ticker '{}'", self.name);
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("name", &self.name)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_slot_stops_after_clear() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let slot = TaskSlot::new(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert!(slot.run());
        slot.clear();
        assert!(!slot.run());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropping_handle_cancels() {
        let slot = TaskSlot::new(Box::new(|| {}));
        let handle = TickHandle::new("liveness", slot.clone(), None);
        assert!(handle.is_active());

        drop(handle);
        assert!(!slot.is_active());
    }
}
