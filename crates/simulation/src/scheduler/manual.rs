//! Virtual-time scheduler

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use umbra_clock::WorldClock;

use super::{Scheduler, Task, TaskSlot, TickHandle};

struct Registration {
    seq: u64,
    name: String,
    period: Duration,
    next_due: Duration,
    slot: TaskSlot,
}

#[derive(Default)]
struct ManualState {
    /// Virtual time since construction
    now: Duration,
    next_seq: u64,
    registrations: Vec<Registration>,
}

/// Scheduler that only moves when told to
///
/// [`advance`](Self::advance) fires every tick that falls due in time order,
/// ties broken by registration order. When built with a [`WorldClock`] the
/// clock is moved to each tick's due time before the task runs, so records
/// stamped inside a tick carry that tick's time.
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
    clock: Option<Arc<WorldClock>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Arc<WorldClock>) -> Self {
        Self {
            state: Mutex::new(ManualState::default()),
            clock: Some(clock),
        }
    }

    /// Virtual time elapsed so far
    pub fn elapsed(&self) -> Duration {
        self.state.lock().now
    }

    /// Number of registrations that are still live
    pub fn active(&self) -> usize {
        self.state
            .lock()
            .registrations
            .iter()
            .filter(|r| r.slot.is_active())
            .count()
    }

    /// Move virtual time forward by `by`, running every tick due on the way.
    /// Returns how many ticks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.lock().now + by;
        let mut fired = 0;

        loop {
            let (slot, delta) = {
                let mut state = self.state.lock();
                state.registrations.retain(|r| r.slot.is_active());

                let Some(next) = state
                    .registrations
                    .iter_mut()
                    .filter(|r| r.next_due <= target)
                    .min_by_key(|r| (r.next_due, r.seq))
                else {
                    break;
                };

                let due = next.next_due;
                next.next_due += next.period;
                log::trace!("Tick '{}' at {:?}", next.name, due);
                let slot = next.slot.clone();

                let delta = due - state.now;
                state.now = due;
                (slot, delta)
            };

            self.move_clock(delta);
            if slot.run() {
                fired += 1;
            }
        }

        let delta = {
            let mut state = self.state.lock();
            let delta = target - state.now;
            state.now = target;
            delta
        };
        self.move_clock(delta);

        fired
    }

    fn move_clock(&self, delta: Duration) {
        if let Some(clock) = &self.clock {
            if !delta.is_zero() {
                clock.advance(chrono::Duration::microseconds(delta.as_micros() as i64));
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, name: &str, period: Duration, task: Task) -> TickHandle {
        // A zero period would make advance spin forever
        let period = period.max(Duration::from_millis(1));
        let slot = TaskSlot::new(task);

        let mut state = self.state.lock();
        let seq = state.next_seq;
        state.next_seq += 1;
        let next_due = state.now + period;
        state.registrations.push(Registration {
            seq,
            name: name.to_string(),
            period,
            next_due,
            slot: slot.clone(),
        });

        TickHandle::new(name, slot, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use umbra_ports::Clock;

    fn recorder(log: &Arc<Mutex<Vec<String>>>, label: &str) -> Task {
        let log = log.clone();
        let label = label.to_string();
        Box::new(move || log.lock().push(label.clone()))
    }

    #[test]
    fn test_ticks_fire_each_period() {
        let scheduler = ManualScheduler::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let _handle = scheduler.schedule("a", Duration::from_millis(2_000), recorder(&log, "a"));

        assert_eq!(scheduler.advance(Duration::from_millis(1_999)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(scheduler.advance(Duration::from_millis(10_000)), 5);
        assert_eq!(log.lock().len(), 6);
        assert_eq!(scheduler.elapsed(), Duration::from_millis(12_000));
    }

    #[test]
    fn test_ticks_interleave_in_time_order() {
        let scheduler = ManualScheduler::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let _a = scheduler.schedule("a", Duration::from_millis(2_000), recorder(&log, "a"));
        let _b = scheduler.schedule("b", Duration::from_millis(3_000), recorder(&log, "b"));

        scheduler.advance(Duration::from_millis(6_000));

        // At 6000 both are due; registration order breaks the tie
        assert_eq!(*log.lock(), vec!["a", "b", "a", "a", "b"]);
    }

    #[test]
    fn test_cancelled_handle_never_fires() {
        let scheduler = ManualScheduler::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let handle = scheduler.schedule("a", Duration::from_millis(100), recorder(&log, "a"));

        scheduler.advance(Duration::from_millis(250));
        handle.cancel();
        scheduler.advance(Duration::from_secs(10));

        assert_eq!(log.lock().len(), 2);
        assert_eq!(scheduler.active(), 0);
    }

    #[test]
    fn test_clock_follows_ticks() {
        let clock = WorldClock::fixed(None);
        let start = clock.now();
        let scheduler = ManualScheduler::with_clock(clock.clone());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let tick_clock = clock.clone();
        let _handle = scheduler.schedule(
            "stamp",
            Duration::from_millis(1_500),
            Box::new(move || sink.lock().push(tick_clock.now())),
        );

        scheduler.advance(Duration::from_millis(4_000));

        let offsets: Vec<_> = seen
            .lock()
            .iter()
            .map(|t| (*t - start).num_milliseconds())
            .collect();
        assert_eq!(offsets, vec![1_500, 3_000]);
        assert_eq!((clock.now() - start).num_milliseconds(), 4_000);
    }
}
