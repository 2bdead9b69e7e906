//! Repeating-task scheduling.
//!
//! The animator only needs "call this every N milliseconds until I say stop".
//! [`Scheduler`] captures that capability so the tick logic can be driven by a
//! browser interval, the [`LoopScheduler`] below, or a test stepping by hand.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use web_time::{Duration, Instant};

use crate::error::ScheduleError;

/// Callback invoked on every firing of a repeating task.
pub type TaskCallback = Box<dyn FnMut()>;

/// Handle to a scheduled repeating task.
///
/// Cancelling consumes the handle, so a task can be released at most once.
pub trait TaskHandle {
    fn cancel(self);
}

/// Capability to run a callback repeatedly at a fixed period.
pub trait Scheduler {
    type Handle: TaskHandle + 'static;

    /// Register `callback` to run every `interval` until the returned handle
    /// is cancelled. Implementations may be invoked from inside a running
    /// callback, and must accept cancellation from there too.
    fn schedule_repeating(
        &self,
        interval: Duration,
        callback: TaskCallback,
    ) -> Result<Self::Handle, ScheduleError>;
}

struct Task {
    id: u64,
    interval: Duration,
    next_due: Instant,
    cancelled: Rc<Cell<bool>>,
    /// Taken out while the callback runs so the scheduler stays borrowable
    callback: Option<TaskCallback>,
}

#[derive(Default)]
struct LoopState {
    tasks: Vec<Task>,
    next_id: u64,
}

impl LoopState {
    fn prune(&mut self) {
        self.tasks.retain(|task| !task.cancelled.get());
    }
}

/// Cooperative single-threaded scheduler.
///
/// Tasks run one at a time on the calling thread and each callback runs to
/// completion before the next one starts. Cloning yields another handle to the
/// same task list.
#[derive(Clone, Default)]
pub struct LoopScheduler {
    state: Rc<RefCell<LoopState>>,
}

/// Handle returned by [`LoopScheduler`].
#[derive(Debug)]
pub struct LoopHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle for LoopHandle {
    fn cancel(self) {
        self.cancelled.set(true);
    }
}

impl LoopScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks that have not been cancelled.
    pub fn live_tasks(&self) -> usize {
        self.state
            .borrow()
            .tasks
            .iter()
            .filter(|task| !task.cancelled.get())
            .count()
    }

    /// Earliest deadline among live tasks.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state
            .borrow()
            .tasks
            .iter()
            .filter(|task| !task.cancelled.get())
            .map(|task| task.next_due)
            .min()
    }

    /// Fire every live task whose deadline has passed. Returns how many fired.
    pub fn run_due(&self) -> usize {
        let now = Instant::now();
        let due: Vec<u64> = self
            .state
            .borrow()
            .tasks
            .iter()
            .filter(|task| !task.cancelled.get() && task.next_due <= now)
            .map(|task| task.id)
            .collect();
        self.fire(&due)
    }

    /// Fire every live task once, ignoring deadlines. Returns how many fired.
    pub fn fire_all(&self) -> usize {
        let ids: Vec<u64> = self
            .state
            .borrow()
            .tasks
            .iter()
            .filter(|task| !task.cancelled.get())
            .map(|task| task.id)
            .collect();
        self.fire(&ids)
    }

    /// Block the current thread, firing tasks as they come due, until no live
    /// task remains.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run(&self) {
        while let Some(deadline) = self.next_deadline() {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
            self.run_due();
        }
        log::debug!("Loop scheduler idle");
    }

    fn fire(&self, ids: &[u64]) -> usize {
        let mut fired = 0;
        for &id in ids {
            let callback = {
                let mut state = self.state.borrow_mut();
                let Some(task) = state.tasks.iter_mut().find(|task| task.id == id) else {
                    continue;
                };
                // An earlier callback in this round may have cancelled it
                if task.cancelled.get() {
                    continue;
                }
                // No catch-up burst after a stall
                task.next_due = Instant::now() + task.interval;
                task.callback.take()
            };

            let Some(mut callback) = callback else {
                continue;
            };
            callback();
            fired += 1;

            let mut state = self.state.borrow_mut();
            if let Some(task) = state.tasks.iter_mut().find(|task| task.id == id) {
                task.callback = Some(callback);
            }
        }
        self.state.borrow_mut().prune();
        fired
    }
}

impl Scheduler for LoopScheduler {
    type Handle = LoopHandle;

    fn schedule_repeating(
        &self,
        interval: Duration,
        callback: TaskCallback,
    ) -> Result<LoopHandle, ScheduleError> {
        if interval.is_zero() {
            return Err(ScheduleError::Rejected(
                "interval must be greater than zero".to_string(),
            ));
        }

        let cancelled = Rc::new(Cell::new(false));
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.tasks.push(Task {
            id,
            interval,
            next_due: Instant::now() + interval,
            cancelled: Rc::clone(&cancelled),
            callback: Some(callback),
        });
        log::trace!("Scheduled task {} every {:?}", id, interval);

        Ok(LoopHandle { cancelled })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(scheduler: &LoopScheduler) -> (Rc<Cell<u32>>, LoopHandle) {
        let count = Rc::new(Cell::new(0));
        let count_clone = Rc::clone(&count);
        let handle = scheduler
            .schedule_repeating(
                Duration::from_millis(10),
                Box::new(move || count_clone.set(count_clone.get() + 1)),
            )
            .unwrap();
        (count, handle)
    }

    #[test]
    fn test_fire_all_runs_each_task_once() {
        let scheduler = LoopScheduler::new();
        let (a, _ha) = counter(&scheduler);
        let (b, _hb) = counter(&scheduler);

        assert_eq!(scheduler.fire_all(), 2);
        assert_eq!(scheduler.fire_all(), 2);
        assert_eq!(a.get(), 2);
        assert_eq!(b.get(), 2);
    }

    #[test]
    fn test_cancel_stops_task() {
        let scheduler = LoopScheduler::new();
        let (count, handle) = counter(&scheduler);

        scheduler.fire_all();
        handle.cancel();
        assert_eq!(scheduler.live_tasks(), 0);
        assert_eq!(scheduler.fire_all(), 0);
        assert_eq!(count.get(), 1);
        assert!(scheduler.next_deadline().is_none());
    }

    #[test]
    fn test_cancel_from_inside_callback() {
        let scheduler = LoopScheduler::new();
        let slot: Rc<RefCell<Option<LoopHandle>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(Cell::new(0));

        let slot_clone = Rc::clone(&slot);
        let count_clone = Rc::clone(&count);
        let handle = scheduler
            .schedule_repeating(
                Duration::from_millis(5),
                Box::new(move || {
                    count_clone.set(count_clone.get() + 1);
                    if count_clone.get() == 3 {
                        if let Some(handle) = slot_clone.borrow_mut().take() {
                            handle.cancel();
                        }
                    }
                }),
            )
            .unwrap();
        *slot.borrow_mut() = Some(handle);

        for _ in 0..10 {
            scheduler.fire_all();
        }
        assert_eq!(count.get(), 3);
        assert_eq!(scheduler.live_tasks(), 0);
    }

    #[test]
    fn test_schedule_from_inside_callback() {
        let scheduler = LoopScheduler::new();
        let inner_count = Rc::new(Cell::new(0));

        let scheduler_clone = scheduler.clone();
        let inner_clone = Rc::clone(&inner_count);
        let mut spawned = false;
        let _outer = scheduler
            .schedule_repeating(
                Duration::from_millis(5),
                Box::new(move || {
                    if !spawned {
                        spawned = true;
                        let inner = Rc::clone(&inner_clone);
                        let _ = scheduler_clone.schedule_repeating(
                            Duration::from_millis(5),
                            Box::new(move || inner.set(inner.get() + 1)),
                        );
                    }
                }),
            )
            .unwrap();

        // The new task is not part of the round that created it
        assert_eq!(scheduler.fire_all(), 1);
        assert_eq!(scheduler.live_tasks(), 2);
        assert_eq!(scheduler.fire_all(), 2);
        assert_eq!(inner_count.get(), 1);
    }

    #[test]
    fn test_no_burst_after_stall() {
        let scheduler = LoopScheduler::new();
        let (count, _handle) = counter(&scheduler);

        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(scheduler.run_due(), 1);
        assert_eq!(scheduler.run_due(), 0);
        assert_eq!(count.get(), 1);
        assert!(scheduler.next_deadline().unwrap() > Instant::now());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let scheduler = LoopScheduler::new();
        let result = scheduler.schedule_repeating(Duration::ZERO, Box::new(|| {}));
        assert!(matches!(result, Err(ScheduleError::Rejected(_))));
    }

    #[test]
    fn test_run_returns_when_idle() {
        let scheduler = LoopScheduler::new();
        let slot: Rc<RefCell<Option<LoopHandle>>> = Rc::new(RefCell::new(None));
        let count = Rc::new(Cell::new(0));

        let slot_clone = Rc::clone(&slot);
        let count_clone = Rc::clone(&count);
        let handle = scheduler
            .schedule_repeating(
                Duration::from_millis(1),
                Box::new(move || {
                    count_clone.set(count_clone.get() + 1);
                    if count_clone.get() == 2 {
                        if let Some(handle) = slot_clone.borrow_mut().take() {
                            handle.cancel();
                        }
                    }
                }),
            )
            .unwrap();
        *slot.borrow_mut() = Some(handle);

        scheduler.run();
        assert_eq!(count.get(), 2);
    }
}
