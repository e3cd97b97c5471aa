// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One element's manipulation session: contact table, anchors, and the
//! pan/pinch state machine.
//!
//! ## Usage
//!
//! 1) Feed each contact landing on the element to [`GestureSession::on_down`].
//! 2) Feed moves to [`GestureSession::on_move`] and apply the returned
//!    [`TransformUpdate`] to the element.
//! 3) Feed lifts and cancels to [`GestureSession::on_up`]; once it reports
//!    [`SessionState::Ended`] the session can be dropped.
//!
//! Every call takes the element's *current* transform. The session never keeps
//! its own copy; it only proposes changes against what the host hands it.
//!
//! ## Minimal example
//!
//! ```
//! use cardstock_gesture::{
//!     ElementTransform, GestureConfig, GestureSession, PointerId, TransformUpdate,
//! };
//! use kurbo::Point;
//!
//! let config = GestureConfig::default();
//! let mut session = GestureSession::new();
//! let mut transform = ElementTransform::IDENTITY;
//!
//! // Two fingers 100 apart, then spread to 150.
//! session.on_down(PointerId(1), Point::new(0.0, 0.0), transform, &mut ());
//! session.on_down(PointerId(2), Point::new(100.0, 0.0), transform, &mut ());
//! let update = session
//!     .on_move(PointerId(2), Point::new(150.0, 0.0), transform, &config)
//!     .unwrap();
//! transform = update.apply_to(transform);
//! assert_eq!(transform.scale, 1.5);
//! ```

use kurbo::{Point, Vec2};

use crate::config::GestureConfig;
use crate::contact::{Contacts, PointerCapture, PointerId};
use crate::transform::{ElementTransform, TransformUpdate};

/// Snapshot taken when panning begins.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PanAnchor {
    /// Contact position when panning began.
    pub origin: Point,
    /// Element pan when panning began.
    pub pan_at_start: Vec2,
}

/// Snapshot taken when a second contact joins.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PinchAnchor {
    /// Distance between the first two contacts when the pinch began.
    pub distance: f64,
    /// Element scale when the pinch began.
    pub scale_at_start: f64,
}

/// Whether a session is still live after a contact lifts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Contacts remain; the session continues.
    Active(usize),
    /// The last contact lifted; the session is over.
    Ended,
}

/// Manipulation session for one element.
#[derive(Clone, Debug, Default)]
pub struct GestureSession {
    contacts: Contacts,
    pan_anchor: Option<PanAnchor>,
    pinch_anchor: Option<PinchAnchor>,
}

impl GestureSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active contacts.
    #[must_use]
    pub fn contacts(&self) -> &Contacts {
        &self.contacts
    }

    /// The pan anchor, while panning is armed.
    #[must_use]
    pub fn pan_anchor(&self) -> Option<&PanAnchor> {
        self.pan_anchor.as_ref()
    }

    /// The pinch anchor, while two or more contacts are down.
    #[must_use]
    pub fn pinch_anchor(&self) -> Option<&PinchAnchor> {
        self.pinch_anchor.as_ref()
    }

    /// Returns `true` if at least one contact is down.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.contacts.is_empty()
    }

    /// Returns `true` while pinch drives the transform.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pinch_anchor.is_some()
    }

    /// A contact landed on the element.
    ///
    /// The contact is captured. The first contact arms panning from `current`;
    /// the second arms a pinch from `current`'s scale. A down never changes the
    /// transform.
    pub fn on_down<C>(
        &mut self,
        pointer: PointerId,
        pos: Point,
        current: ElementTransform,
        capture: &mut C,
    ) where
        C: PointerCapture + ?Sized,
    {
        if !self.contacts.insert(pointer, pos) {
            return;
        }
        capture.capture(pointer);
        match self.contacts.len() {
            1 => {
                #[cfg(feature = "tracing")]
                tracing::debug!(pointer = pointer.0, "gesture session started");
                self.pan_anchor = Some(PanAnchor {
                    origin: pos,
                    pan_at_start: current.pan,
                });
            }
            2 => self.arm_pinch(current.scale),
            _ => {}
        }
    }

    /// A captured contact moved.
    ///
    /// Returns the proposed change, or `None` when nothing changes (unknown
    /// contact, degenerate pinch, or a move that lands on the current value).
    pub fn on_move(
        &mut self,
        pointer: PointerId,
        pos: Point,
        current: ElementTransform,
        config: &GestureConfig,
    ) -> Option<TransformUpdate> {
        if !self.contacts.update(pointer, pos) {
            return None;
        }
        if self.contacts.len() >= 2 {
            return self.pinch(current, config);
        }
        self.pan(current, config)
    }

    /// A contact lifted or was cancelled.
    ///
    /// Its capture is released. With fewer than two contacts left the pinch
    /// ends and panning re-arms from the remaining contact at `current`; with
    /// none left the session ends.
    pub fn on_up<C>(
        &mut self,
        pointer: PointerId,
        current: ElementTransform,
        capture: &mut C,
    ) -> SessionState
    where
        C: PointerCapture + ?Sized,
    {
        let in_pair = self.contacts.iter().take(2).any(|(id, _)| id == pointer);
        if self.contacts.remove(pointer) {
            capture.release(pointer);
        }
        let remaining = self.contacts.len();
        if remaining >= 2 {
            // A third contact stepped into the pair; pinch on from here.
            if in_pair {
                self.arm_pinch(current.scale);
            }
        } else if self.pinch_anchor.take().is_some() {
            self.pan_anchor = self.contacts.first().map(|(_, origin)| PanAnchor {
                origin,
                pan_at_start: current.pan,
            });
        }
        if remaining == 0 {
            self.pan_anchor = None;
            #[cfg(feature = "tracing")]
            tracing::debug!("gesture session ended");
            return SessionState::Ended;
        }
        SessionState::Active(remaining)
    }

    /// The platform cancelled a contact. Treated exactly like a lift.
    pub fn on_cancel<C>(
        &mut self,
        pointer: PointerId,
        current: ElementTransform,
        capture: &mut C,
    ) -> SessionState
    where
        C: PointerCapture + ?Sized,
    {
        self.on_up(pointer, current, capture)
    }

    /// Ends the session, releasing every contact still captured.
    pub fn teardown<C>(&mut self, capture: &mut C)
    where
        C: PointerCapture + ?Sized,
    {
        for (pointer, _) in self.contacts.drain() {
            #[cfg(feature = "tracing")]
            tracing::trace!(pointer = pointer.0, "releasing capture on teardown");
            capture.release(pointer);
        }
        self.pan_anchor = None;
        self.pinch_anchor = None;
    }

    fn arm_pinch(&mut self, scale: f64) {
        self.pinch_anchor = self
            .contacts
            .pinch_distance()
            .filter(|d| *d > f64::EPSILON && d.is_finite())
            .map(|distance| PinchAnchor {
                distance,
                scale_at_start: scale,
            });
        #[cfg(feature = "tracing")]
        if let Some(anchor) = &self.pinch_anchor {
            tracing::debug!(
                distance = anchor.distance,
                scale = anchor.scale_at_start,
                "pinch started"
            );
        };
    }

    fn pinch(
        &mut self,
        current: ElementTransform,
        config: &GestureConfig,
    ) -> Option<TransformUpdate> {
        // Both contacts landed on the same spot; anchor once they separate.
        let Some(anchor) = self.pinch_anchor else {
            self.arm_pinch(current.scale);
            return None;
        };
        let distance = self.contacts.pinch_distance()?;
        let scale = config.clamp_scale(anchor.scale_at_start * (distance / anchor.distance));
        scale_update(scale, current, config)
    }

    fn pan(
        &mut self,
        current: ElementTransform,
        config: &GestureConfig,
    ) -> Option<TransformUpdate> {
        let anchor = self.pan_anchor?;
        let (_, pos) = self.contacts.first()?;
        let target = anchor.pan_at_start + (pos - anchor.origin);
        let pan = config.clamp_pan(target, current.scale);
        if pan == current.pan {
            return None;
        }
        Some(TransformUpdate::pan(pan))
    }
}

/// Scale change for one wheel event.
///
/// `delta_y` follows the usual scroll convention: negative values scroll up
/// and zoom in. Returns `None` for non-finite deltas or when the clamped scale
/// and pan are unchanged.
#[must_use]
pub fn wheel_update(
    delta_y: f64,
    current: ElementTransform,
    config: &GestureConfig,
) -> Option<TransformUpdate> {
    if !delta_y.is_finite() {
        return None;
    }
    let scale = config.clamp_scale(current.scale - delta_y * config.wheel_step());
    scale_update(scale, current, config)
}

/// Builds the update for a scale change, re-clamping the pan when the current
/// pan does not fit the new scale.
pub(crate) fn scale_update(
    scale: f64,
    current: ElementTransform,
    config: &GestureConfig,
) -> Option<TransformUpdate> {
    let pan = config.clamp_pan(current.pan, scale);
    TransformUpdate {
        scale: (scale != current.scale).then_some(scale),
        pan: (pan != current.pan).then_some(pan),
    }
    .non_empty()
}
