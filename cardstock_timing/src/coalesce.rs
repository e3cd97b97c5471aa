// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Last-write-wins debouncing on top of [`TimerQueue`].

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::Millis;
use crate::queue::TimerQueue;

/// Debounced work keyed by `K`.
///
/// Every call to [`schedule`](Self::schedule) cancels the work still pending
/// for the same key and arms a fresh settle delay. Work is never queued: a key
/// has at most one pending item and it is always the most recent one.
///
/// # Example
///
/// ```
/// use cardstock_timing::CoalescingScheduler;
///
/// let mut scheduler = CoalescingScheduler::new();
/// scheduler.schedule("title", 1, 10, 0);
/// scheduler.schedule("body", 2, 50, 0);
///
/// assert_eq!(scheduler.next_deadline(), Some(10));
/// assert_eq!(scheduler.poll(10), vec![("title", 1)]);
/// assert_eq!(scheduler.poll(50), vec![("body", 2)]);
/// ```
#[derive(Clone, Debug)]
pub struct CoalescingScheduler<K, W>
where
    K: Copy + Eq + Hash,
{
    timers: TimerQueue<K>,
    work: HashMap<K, W>,
}

impl<K, W> Default for CoalescingScheduler<K, W>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, W> CoalescingScheduler<K, W>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timers: TimerQueue::new(),
            work: HashMap::new(),
        }
    }

    /// Schedules `work` for `key` to run `delay` milliseconds after `now`.
    ///
    /// Any work still pending for `key` is cancelled and returned.
    pub fn schedule(&mut self, key: K, work: W, delay: Millis, now: Millis) -> Option<W> {
        self.timers.schedule(key, now.saturating_add(delay));
        self.work.insert(key, work)
    }

    /// Cancels the pending work for `key` and returns it.
    pub fn cancel(&mut self, key: K) -> Option<W> {
        self.timers.cancel(key);
        self.work.remove(&key)
    }

    /// Returns the pending work for `key`, if any.
    #[must_use]
    pub fn pending(&self, key: K) -> Option<&W> {
        self.work.get(&key)
    }

    /// Returns `true` if `key` has pending work.
    #[must_use]
    pub fn is_pending(&self, key: K) -> bool {
        self.timers.is_pending(key)
    }

    /// Returns the earliest time at which [`poll`](Self::poll) will yield work.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Removes and returns all work that is due at `now`, earliest first.
    pub fn poll(&mut self, now: Millis) -> Vec<(K, W)> {
        self.timers
            .pop_due(now)
            .into_iter()
            .filter_map(|key| self.work.remove(&key).map(|work| (key, work)))
            .collect()
    }

    /// Number of keys with pending work.
    #[must_use]
    pub fn len(&self) -> usize {
        self.work.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.work.is_empty()
    }

    /// Cancels all pending work.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.work.clear();
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::CoalescingScheduler;

    #[test]
    fn burst_collapses_into_last_request() {
        let mut scheduler = CoalescingScheduler::new();
        assert_eq!(scheduler.schedule(1_u32, 'a', 10, 0), None);
        assert_eq!(scheduler.schedule(1, 'b', 10, 4), Some('a'));
        assert_eq!(scheduler.schedule(1, 'c', 10, 8), Some('b'));

        assert!(scheduler.poll(17).is_empty());
        assert_eq!(scheduler.poll(18), vec![(1, 'c')]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn rescheduling_can_shorten_the_delay() {
        let mut scheduler = CoalescingScheduler::new();
        scheduler.schedule(1_u32, "slow", 50, 0);
        scheduler.schedule(1, "fast", 10, 5);
        assert_eq!(scheduler.next_deadline(), Some(15));
        assert_eq!(scheduler.poll(15), vec![(1, "fast")]);
        assert!(scheduler.poll(100).is_empty());
    }

    #[test]
    fn keys_are_independent() {
        let mut scheduler = CoalescingScheduler::new();
        scheduler.schedule(1_u32, 10, 10, 0);
        scheduler.schedule(2, 20, 10, 0);
        scheduler.schedule(1, 11, 10, 5);

        assert_eq!(scheduler.poll(10), vec![(2, 20)]);
        assert_eq!(scheduler.poll(15), vec![(1, 11)]);
    }

    #[test]
    fn cancel_returns_pending_work() {
        let mut scheduler = CoalescingScheduler::new();
        scheduler.schedule(1_u32, "x", 10, 0);
        assert_eq!(scheduler.pending(1), Some(&"x"));
        assert_eq!(scheduler.cancel(1), Some("x"));
        assert!(!scheduler.is_pending(1));
        assert!(scheduler.poll(10).is_empty());
    }

    #[test]
    fn delay_saturates_instead_of_overflowing() {
        let mut scheduler = CoalescingScheduler::new();
        scheduler.schedule(1_u32, (), 10, u64::MAX - 1);
        assert_eq!(scheduler.next_deadline(), Some(u64::MAX));
    }
}
