// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardstock Gesture: multi-pointer pan, pinch and wheel for a selected element.
//!
//! Elements carry an [`ElementTransform`] (a zoom factor and a pan offset)
//! that is applied to their content. This crate turns raw contact-identified
//! pointer input into [`TransformUpdate`]s against that transform:
//!
//! - One contact pans. The offset follows the pointer relative to where the
//!   drag began and is clamped to `±max(0, (scale - 1) * pan_per_scale)` on
//!   each axis, so panning is only possible while zoomed in.
//! - Two contacts pinch. The scale is the scale at pinch start times the ratio
//!   of the current to the initial contact distance, clamped to
//!   `[min_scale, max_scale]`.
//! - The wheel nudges the scale proportionally to the vertical delta and asks
//!   the host to suppress page scrolling.
//!
//! Every contact is captured on down and released on up, cancel, or when the
//! session is torn down; see [`PointerCapture`].
//!
//! The layers are:
//!
//! - [`GestureConfig`]: bounds and coefficients.
//! - [`Contacts`]: the per-session contact table in arrival order.
//! - [`GestureSession`]: one element's pan/pinch state machine.
//! - [`GestureRouter`]: selection and manipulability gating. Input for an
//!   element that is not both selected and manipulable falls back to
//!   [`PointerDisposition::StartMove`].
//!
//! ## Minimal example
//!
//! ```rust
//! use cardstock_gesture::{
//!     CaptureSet, ElementTransform, GestureRouter, PointerDisposition, PointerEvent, PointerId,
//! };
//! use kurbo::Point;
//!
//! let mut capture = CaptureSet::new();
//! let mut router = GestureRouter::default();
//! router.set_manipulable("photo", true, &mut capture);
//! router.select("photo", &mut capture);
//!
//! let mut transform = ElementTransform::IDENTITY;
//! let a = PointerId(1);
//! let b = PointerId(2);
//! let down_a = PointerEvent::down(a, Point::new(0.0, 0.0));
//! let down_b = PointerEvent::down(b, Point::new(100.0, 0.0));
//! router.handle_pointer("photo", down_a, transform, &mut capture);
//! router.handle_pointer("photo", down_b, transform, &mut capture);
//!
//! let spread = PointerEvent::moved(b, Point::new(200.0, 0.0));
//! if let PointerDisposition::Manipulate(Some(update)) =
//!     router.handle_pointer("photo", spread, transform, &mut capture)
//! {
//!     transform = update.apply_to(transform);
//! }
//! assert_eq!(transform.scale, 2.0);
//! assert_eq!(capture.len(), 2);
//! ```
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to `kurbo`.
//! - `tracing`: emit `tracing` events for session lifecycle and capture.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod contact;
mod router;
mod session;
mod transform;

pub use config::GestureConfig;
pub use contact::{CaptureSet, Contacts, PointerCapture, PointerId};
pub use router::{
    GestureRouter, PointerDisposition, PointerEvent, PointerPhase, WheelDisposition,
};
pub use session::{GestureSession, PanAnchor, PinchAnchor, SessionState, wheel_update};
pub use transform::{ElementTransform, TransformAnchor, TransformUpdate};
