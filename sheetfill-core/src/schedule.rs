//! Time source and fire-and-forget work.
//!
//! A fill pass only ever blocks for the short visual-feedback pause. Highlight
//! removal happens "later": it is queued in [`Deferred`] and run by whoever
//! owns the queue.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Pause after writing a row so the highlight can render.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(100);
/// How long written fields stay highlighted.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(2000);
/// Progress presentation lifetime after a fully successful pass.
pub const SUCCESS_DISMISS_DELAY: Duration = Duration::from_millis(3000);
/// Progress presentation lifetime after a pass aborted by an error.
pub const FAILURE_DISMISS_DELAY: Duration = Duration::from_millis(5000);

pub trait Clock {
    /// Time elapsed since the clock started.
    fn now(&self) -> Duration;
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.started.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Virtual clock: `sleep` advances time instantly.
#[derive(Debug, Default)]
pub struct ManualClock {
    elapsed: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, duration: Duration) {
        self.elapsed.set(self.elapsed.get() + duration);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.elapsed.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Remove the highlight from the fields of the row at this index.
    ClearHighlight { row: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub due: Duration,
    pub task: Task,
}

/// Queue of tasks that nobody waits for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deferred {
    pending: Vec<Scheduled>,
}

impl Deferred {
    pub fn schedule(&mut self, clock: &dyn Clock, after: Duration, task: Task) {
        self.pending.push(Scheduled {
            due: clock.now() + after,
            task,
        });
    }

    pub fn pending(&self) -> &[Scheduled] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Removes and returns the tasks due at `now`, earliest first.
    pub fn take_due(&mut self, now: Duration) -> Vec<Task> {
        let (mut due, rest): (Vec<Scheduled>, Vec<Scheduled>) =
            self.pending.drain(..).partition(|s| s.due <= now);
        self.pending = rest;
        due.sort_by_key(|s| s.due);
        due.into_iter().map(|s| s.task).collect()
    }

    /// Removes and returns every task regardless of due time, earliest first.
    pub fn take_all(&mut self) -> Vec<Task> {
        self.take_due(Duration::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_sleep_advances_time() {
        let clock = ManualClock::new();
        clock.sleep(FEEDBACK_DELAY);
        clock.sleep(FEEDBACK_DELAY);
        assert_eq!(clock.now(), Duration::from_millis(200));
    }

    #[test]
    fn take_due_only_returns_expired_tasks_in_order() {
        let clock = ManualClock::new();
        let mut deferred = Deferred::default();
        deferred.schedule(&clock, HIGHLIGHT_DURATION, Task::ClearHighlight { row: 1 });
        deferred.schedule(&clock, Duration::from_millis(500), Task::ClearHighlight { row: 0 });
        deferred.schedule(&clock, Duration::from_secs(3), Task::ClearHighlight { row: 2 });

        assert!(deferred.take_due(Duration::from_millis(499)).is_empty());
        assert_eq!(
            deferred.take_due(Duration::from_millis(2000)),
            vec![Task::ClearHighlight { row: 0 }, Task::ClearHighlight { row: 1 }]
        );
        assert_eq!(deferred.pending().len(), 1);
        assert_eq!(deferred.take_all(), vec![Task::ClearHighlight { row: 2 }]);
        assert!(deferred.is_empty());
    }
}
