// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardstock Timing: host-clock timer primitives for UI runtimes.
//!
//! This crate provides two small building blocks for debounced work in a
//! single-threaded, event-driven host:
//!
//! - [`TimerQueue`]: single-shot deadlines keyed by a caller-chosen id. Scheduling
//!   a key that is already pending replaces its deadline.
//! - [`CoalescingScheduler`]: a [`TimerQueue`] that also stores the work
//!   associated with each key. Scheduling new work for a key cancels whatever was
//!   pending for it, so a burst of requests collapses into the most recent one.
//!
//! Neither type reads a clock. The host passes `now` as a monotonically
//! non-decreasing millisecond timestamp and polls for due work from its own
//! timer callback or frame loop.
//!
//! ## Minimal example
//!
//! ```rust
//! use cardstock_timing::CoalescingScheduler;
//!
//! let mut scheduler = CoalescingScheduler::<u32, &str>::new();
//!
//! // Three requests for key 7 inside one burst.
//! scheduler.schedule(7, "first", 10, 0);
//! scheduler.schedule(7, "second", 10, 3);
//! scheduler.schedule(7, "third", 10, 6);
//!
//! // Nothing is due before the settle delay of the last request.
//! assert!(scheduler.poll(15).is_empty());
//!
//! // Only the last request survives.
//! assert_eq!(scheduler.poll(16), vec![(7, "third")]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod coalesce;
mod queue;

pub use coalesce::CoalescingScheduler;
pub use queue::{Deadline, TimerQueue};

/// Host timestamp in milliseconds.
pub type Millis = u64;
