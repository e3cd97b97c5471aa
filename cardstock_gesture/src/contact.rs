// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active pointer contacts and input capture.

use hashbrown::HashSet;
use kurbo::Point;
use smallvec::SmallVec;

/// Identifier of one pointer or touch contact, as reported by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointerId(pub u64);

/// Exclusive delivery of a contact's events to one element.
///
/// While a contact is captured the host keeps delivering its events to the
/// capturing element even if the pointer leaves the element's bounds. Every
/// capture is paired with a release, on contact lift or on session teardown.
pub trait PointerCapture {
    /// Starts delivering `pointer` exclusively to the current element.
    fn capture(&mut self, pointer: PointerId);
    /// Stops the exclusive delivery of `pointer`.
    fn release(&mut self, pointer: PointerId);
}

/// Capture for hosts that do not support it.
impl PointerCapture for () {
    fn capture(&mut self, _pointer: PointerId) {}
    fn release(&mut self, _pointer: PointerId) {}
}

/// A [`PointerCapture`] that records which contacts are currently captured.
///
/// Useful as a host-side capture table and for checking that no capture leaks.
#[derive(Clone, Debug, Default)]
pub struct CaptureSet {
    captured: HashSet<PointerId>,
}

impl CaptureSet {
    /// Creates an empty capture set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `pointer` is captured.
    #[must_use]
    pub fn is_captured(&self, pointer: PointerId) -> bool {
        self.captured.contains(&pointer)
    }

    /// Number of captured contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captured.len()
    }

    /// Returns `true` if nothing is captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captured.is_empty()
    }
}

impl PointerCapture for CaptureSet {
    fn capture(&mut self, pointer: PointerId) {
        self.captured.insert(pointer);
    }

    fn release(&mut self, pointer: PointerId) {
        self.captured.remove(&pointer);
    }
}

/// Active contacts in arrival order with their last known positions.
///
/// The table accepts any number of contacts; the first two by arrival drive a
/// pinch.
#[derive(Clone, Debug, Default)]
pub struct Contacts {
    entries: SmallVec<[(PointerId, Point); 2]>,
}

impl Contacts {
    /// Adds `pointer` at `pos`, or moves it if already present.
    ///
    /// Returns `true` if the contact is new.
    pub fn insert(&mut self, pointer: PointerId, pos: Point) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|(id, _)| *id == pointer) {
            entry.1 = pos;
            return false;
        }
        self.entries.push((pointer, pos));
        true
    }

    /// Moves `pointer` to `pos`. Returns `false` for unknown contacts.
    pub fn update(&mut self, pointer: PointerId, pos: Point) -> bool {
        match self.entries.iter_mut().find(|(id, _)| *id == pointer) {
            Some(entry) => {
                entry.1 = pos;
                true
            }
            None => false,
        }
    }

    /// Removes `pointer`. Returns `false` for unknown contacts.
    pub fn remove(&mut self, pointer: PointerId) -> bool {
        let Some(index) = self.entries.iter().position(|(id, _)| *id == pointer) else {
            return false;
        };
        self.entries.remove(index);
        true
    }

    /// Last known position of `pointer`.
    #[must_use]
    pub fn position(&self, pointer: PointerId) -> Option<Point> {
        self.entries
            .iter()
            .find(|(id, _)| *id == pointer)
            .map(|(_, pos)| *pos)
    }

    /// Returns `true` if `pointer` is active.
    #[must_use]
    pub fn contains(&self, pointer: PointerId) -> bool {
        self.entries.iter().any(|(id, _)| *id == pointer)
    }

    /// The earliest-arrived contact.
    #[must_use]
    pub fn first(&self) -> Option<(PointerId, Point)> {
        self.entries.first().copied()
    }

    /// Distance between the two earliest-arrived contacts.
    #[must_use]
    pub fn pinch_distance(&self) -> Option<f64> {
        match self.entries.as_slice() {
            [(_, a), (_, b), ..] => Some(a.distance(*b)),
            _ => None,
        }
    }

    /// Iterates contacts in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (PointerId, Point)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of active contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no contacts are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every contact, returning them in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = (PointerId, Point)> + '_ {
        self.entries.drain(..)
    }
}
