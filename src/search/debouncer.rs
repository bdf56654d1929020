//! Cancellable timers and the lookup debouncer built on them
//!
//! Timers are driven by the caller's clock: every operation takes `now`, and
//! the event loop polls [`TimerQueue::take_due`] on each tick. This keeps the
//! timing logic deterministic under test.

use std::time::{Duration, Instant};

/// Identifies a scheduled task so it can be cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Scheduled<T> {
    handle: TimerHandle,
    deadline: Instant,
    task: T,
}

/// A queue of tasks that become due at a deadline
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_handle: u64,
    scheduled: Vec<Scheduled<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            scheduled: Vec::new(),
        }
    }

    /// Schedule `task` to become due `delay` after `now`
    pub fn schedule(&mut self, now: Instant, delay: Duration, task: T) -> TimerHandle {
        self.next_handle = self.next_handle.wrapping_add(1);
        let handle = TimerHandle(self.next_handle);
        self.scheduled.push(Scheduled {
            handle,
            deadline: now + delay,
            task,
        });
        handle
    }

    /// Cancel a scheduled task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.scheduled.len();
        self.scheduled.retain(|s| s.handle != handle);
        self.scheduled.len() != before
    }

    /// Remove and return every task whose deadline is at or before `now`, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.scheduled)
            .into_iter()
            .partition(|s| s.deadline <= now);
        self.scheduled = pending;

        due.sort_by_key(|s| s.deadline);
        due.into_iter().map(|s| s.task).collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduled.iter().map(|s| s.deadline).min()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
    }
}

/// Delays a task until input has been quiet for the configured period.
///
/// Each [`trigger`](Debouncer::trigger) cancels the previous timer and starts a
/// new one, so a burst of edits yields a single task carrying the last value.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    timers: TimerQueue<T>,
    pending: Option<TimerHandle>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            timers: TimerQueue::new(),
            pending: None,
        }
    }

    /// Restart the quiet period with `task` as the value to deliver
    pub fn trigger(&mut self, now: Instant, task: T) {
        self.cancel();
        self.pending = Some(self.timers.schedule(now, self.delay, task));
    }

    /// Drop the pending task, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.timers.cancel(handle);
        }
    }

    /// Returns the task once the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let task = self.timers.take_due(now).pop()?;
        self.pending = None;
        Some(task)
    }

    #[cfg(test)]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    #[cfg(test)]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
