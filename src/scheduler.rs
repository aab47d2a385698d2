use std::collections::BTreeMap;
use std::time::Duration;

/// Deferred work owned by the session controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Advance the countdown to the given number of seconds left.
    Tick(u32),
    /// Put the phase label back after the "Restarted" flash.
    RestoreLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle(u64);

/// Single-shot deferred task scheduling
pub trait Scheduler {
    fn schedule_after(&mut self, delay: Duration, task: Task) -> TaskHandle;
    /// Cancelling a handle that already fired or was cancelled is a no-op.
    fn cancel(&mut self, handle: TaskHandle);
}

/// Virtual-clock task queue.
///
/// Time only moves when the owner calls [`TimerQueue::advance`], which makes the
/// queue deterministic under test and lets the terminal loop feed it real
/// elapsed time.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    // keyed by (deadline, id) so equal deadlines fire in scheduling order
    pending: BTreeMap<(Duration, u64), Task>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending tasks with the delay left until each fires, earliest first.
    pub fn pending(&self) -> Vec<(Duration, Task)> {
        self.pending
            .iter()
            .map(|(&(deadline, _), &task)| (deadline.saturating_sub(self.now), task))
            .collect()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending
            .keys()
            .next()
            .map(|&(deadline, _)| deadline.saturating_sub(self.now))
    }

    /// Pops the earliest task due at or before `until`, moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<Task> {
        let (&key, _) = self.pending.iter().next()?;
        if key.0 > until {
            return None;
        }
        self.now = self.now.max(key.0);
        self.pending.remove(&key)
    }

    /// Moves the clock forward to `until` once nothing else is due.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

impl Scheduler for TimerQueue {
    fn schedule_after(&mut self, delay: Duration, task: Task) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert((self.now + delay, id), task);
        TaskHandle(id)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.pending.retain(|&(_, id), _| id != handle.0);
    }
}
