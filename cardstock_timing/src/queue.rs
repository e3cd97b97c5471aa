// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed single-shot timer queue.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::Millis;

/// A scheduled deadline.
///
/// Deadlines order by time first and by scheduling sequence second, so two
/// timers due at the same millisecond fire in the order they were scheduled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline {
    /// Time at which the timer becomes due.
    pub at: Millis,
    seq: u64,
}

/// Single-shot timers keyed by `K`.
///
/// Each key has at most one pending deadline. Scheduling a pending key moves
/// its deadline rather than adding a second timer.
///
/// # Example
///
/// ```
/// use cardstock_timing::TimerQueue;
///
/// let mut timers = TimerQueue::<u32>::new();
/// timers.schedule(1, 50);
/// timers.schedule(2, 10);
/// timers.schedule(1, 20); // moves key 1
///
/// assert_eq!(timers.next_deadline(), Some(10));
/// assert_eq!(timers.pop_due(20), vec![2, 1]);
/// assert!(timers.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct TimerQueue<K>
where
    K: Copy + Eq + Hash,
{
    by_deadline: BTreeMap<Deadline, K>,
    by_key: HashMap<K, Deadline>,
    next_seq: u64,
}

impl<K> Default for TimerQueue<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TimerQueue<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_deadline: BTreeMap::new(),
            by_key: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Schedules `key` to become due at `at`, replacing any pending deadline.
    ///
    /// Returns the previous deadline for `key`, if one was pending.
    pub fn schedule(&mut self, key: K, at: Millis) -> Option<Millis> {
        let previous = self.cancel(key);
        let deadline = Deadline {
            at,
            seq: self.next_seq,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        self.by_deadline.insert(deadline, key);
        self.by_key.insert(key, deadline);
        previous
    }

    /// Cancels the pending deadline for `key`.
    ///
    /// Returns the cancelled deadline, or `None` if nothing was pending.
    pub fn cancel(&mut self, key: K) -> Option<Millis> {
        let deadline = self.by_key.remove(&key)?;
        self.by_deadline.remove(&deadline);
        Some(deadline.at)
    }

    /// Returns the pending deadline for `key`.
    #[must_use]
    pub fn deadline_of(&self, key: K) -> Option<Millis> {
        self.by_key.get(&key).map(|d| d.at)
    }

    /// Returns `true` if `key` has a pending deadline.
    #[must_use]
    pub fn is_pending(&self, key: K) -> bool {
        self.by_key.contains_key(&key)
    }

    /// Returns the earliest pending deadline.
    ///
    /// Hosts use this to arm their single platform timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.by_deadline.keys().next().map(|d| d.at)
    }

    /// Removes and returns every key whose deadline is `<= now`, earliest first.
    pub fn pop_due(&mut self, now: Millis) -> Vec<K> {
        let mut due = Vec::new();
        while let Some(entry) = self.by_deadline.first_entry() {
            if entry.key().at > now {
                break;
            }
            let key = entry.remove();
            self.by_key.remove(&key);
            due.push(key);
        }
        due
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Cancels every pending timer.
    pub fn clear(&mut self) {
        self.by_deadline.clear();
        self.by_key.clear();
    }
}
