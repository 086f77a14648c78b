#![forbid(unsafe_code)]

//! Virtual-time timer queue.
//!
//! A [`TimerQueue`] never reads a wall clock: its notion of "now" advances only
//! when the owner calls [`advance`](TimerQueue::advance). This is what makes
//! stagger/settle timing fully deterministic under test, in the same spirit as
//! a manually-advanceable lab clock.
//!
//! # Invariants
//!
//! 1. `advance(dt)` pops every entry whose deadline has passed, ordered by
//!    deadline, with insertion order breaking ties.
//! 2. Entries are fire-and-forget: there is no cancellation handle. Consumers
//!    that may fire through more than one path must apply entries
//!    idempotently.
//! 3. Virtual time is monotonic; `advance` with a zero `dt` still delivers
//!    entries already due.
//!
//! # Failure Modes
//!
//! - None. An empty queue advances trivially; scheduling at zero delay makes
//!   the entry due on the next `advance`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use web_time::Duration;

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Entry<T> {
    deadline: Duration,
    seq: u64,
    value: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then(self.seq.cmp(&other.seq))
    }
}

// ---------------------------------------------------------------------------
// Queue
// ---------------------------------------------------------------------------

/// Deadline-ordered queue over manually-advanced virtual time.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    heap: BinaryHeap<Reverse<Entry<T>>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Empty queue at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            heap: BinaryHeap::new(),
        }
    }

    /// Current virtual time.
    #[inline]
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no entries are pending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Schedule `value` to become due `delay` after the current virtual time.
    pub fn schedule_after(&mut self, delay: Duration, value: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry {
            deadline: self.now + delay,
            seq,
            value,
        }));
    }

    /// Advance virtual time by `dt` and collect everything now due, in
    /// deadline-then-insertion order.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.now += dt;
        let mut due = Vec::new();
        while self
            .heap
            .peek()
            .is_some_and(|Reverse(head)| head.deadline <= self.now)
        {
            if let Some(Reverse(entry)) = self.heap.pop() {
                due.push(entry.value);
            }
        }
        due
    }

    /// Drop every pending entry without firing it.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
