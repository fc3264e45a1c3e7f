//! Virtual-time timer queue.
//!
//! Stands in for `setTimeout`: work is scheduled at a point on a virtual
//! clock and popped in due order. Timers scheduled for the same instant fire
//! in the order they were scheduled. Time only moves when the owner pops due
//! timers or advances the clock, which keeps every timed behaviour
//! deterministic under test.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a scheduled timer, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId {
    due: Duration,
    seq: u64,
}

impl TimerId {
    pub fn due(&self) -> Duration {
        self.due
    }
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<TimerId, T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `timer` to fire `delay` after the current time.
    pub fn schedule_after(&mut self, delay: Duration, timer: T) -> TimerId {
        self.schedule_at(self.now + delay, timer)
    }

    /// Schedule `timer` at an absolute time. Times in the past fire on the
    /// next pop.
    pub fn schedule_at(&mut self, at: Duration, timer: T) -> TimerId {
        let id = TimerId {
            due: at.max(self.now),
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.insert(id, timer);
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.queue.contains_key(&id)
    }

    /// Due time of the earliest pending timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.keys().next().map(TimerId::due)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let due = self.next_due()?;
        if due > until {
            return None;
        }
        let (id, timer) = self.queue.pop_first()?;
        self.now = self.now.max(id.due);
        Some((id, timer))
    }

    /// Move the clock forward without firing anything. Never moves backwards.
    pub fn advance_clock(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
