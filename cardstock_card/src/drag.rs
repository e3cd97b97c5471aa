// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Move-drag state: translating an element's frame with a single pointer.
//!
//! ## Usage
//!
//! 1) Start with [`MoveDrag::start`], passing the pointer position and the
//!    frame's origin at that moment.
//! 2) On each move, call [`MoveDrag::origin_at`] to get the frame's new origin,
//!    clamped so the frame stays on the card.
//! 3) Drop the drag when the pointer lifts.
//!
//! ## Minimal example
//!
//! ```
//! use cardstock_card::{ElementId, MoveDrag};
//! use cardstock_gesture::PointerId;
//! use kurbo::{Point, Size};
//!
//! let start = Point::new(10.0, 10.0);
//! let drag = MoveDrag::start(ElementId(1), PointerId(1), start, Point::ORIGIN);
//!
//! // A 50x50 frame on a 200x100 card, dragged far to the right.
//! let card = Size::new(200.0, 100.0);
//! let origin = drag.origin_at(Point::new(500.0, 30.0), Size::new(50.0, 50.0), card);
//! assert_eq!(origin, Point::new(150.0, 20.0));
//! ```

use cardstock_gesture::PointerId;
use kurbo::{Point, Size, Vec2};

use crate::element::ElementId;

/// An in-progress move of one element by one pointer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MoveDrag {
    element: ElementId,
    pointer: PointerId,
    start_pos: Point,
    start_origin: Point,
}

impl MoveDrag {
    /// Starts moving `element` with `pointer` at `pos`, from a frame at
    /// `origin`.
    #[must_use]
    pub fn start(element: ElementId, pointer: PointerId, pos: Point, origin: Point) -> Self {
        Self {
            element,
            pointer,
            start_pos: pos,
            start_origin: origin,
        }
    }

    /// The element being moved.
    #[must_use]
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The pointer driving the move.
    #[must_use]
    pub fn pointer(&self) -> PointerId {
        self.pointer
    }

    /// Offset of `pos` from where the drag started.
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Vec2 {
        pos - self.start_pos
    }

    /// Frame origin for a pointer at `pos`, keeping a frame of `frame` size
    /// inside `bounds`.
    ///
    /// A frame larger than the bounds on an axis is pinned to the leading
    /// edge on that axis.
    #[must_use]
    pub fn origin_at(&self, pos: Point, frame: Size, bounds: Size) -> Point {
        let target = self.start_origin + self.total_offset(pos);
        Point::new(
            clamp_axis(target.x, bounds.width - frame.width),
            clamp_axis(target.y, bounds.height - frame.height),
        )
    }
}

fn clamp_axis(value: f64, room: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.min(room).max(0.0)
}
