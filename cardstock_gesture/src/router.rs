// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Routing of pointer and wheel input between manipulation and plain moves.
//!
//! Manipulation is an opt-in upgrade. Input only reaches a
//! [`GestureSession`] when the element is both selected and marked
//! manipulable; otherwise a pointer-down is handed back to the host as
//! [`PointerDisposition::StartMove`] and wheel input is left alone.

use core::hash::Hash;

use hashbrown::HashSet;
use kurbo::Point;

use crate::config::GestureConfig;
use crate::contact::{PointerCapture, PointerId};
use crate::session::{GestureSession, SessionState, wheel_update};
use crate::transform::{ElementTransform, TransformUpdate};

/// Phase of a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    /// Contact landed.
    Down,
    /// Contact moved.
    Move,
    /// Contact lifted.
    Up,
    /// The platform cancelled the contact.
    Cancel,
}

/// A contact-identified pointer event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Contact that produced the event.
    pub pointer: PointerId,
    /// Position in the host's coordinate space.
    pub position: Point,
    /// Event phase.
    pub phase: PointerPhase,
}

impl PointerEvent {
    /// A pointer-down event.
    #[must_use]
    pub const fn down(pointer: PointerId, position: Point) -> Self {
        Self {
            pointer,
            position,
            phase: PointerPhase::Down,
        }
    }

    /// A pointer-move event.
    #[must_use]
    pub const fn moved(pointer: PointerId, position: Point) -> Self {
        Self {
            pointer,
            position,
            phase: PointerPhase::Move,
        }
    }

    /// A pointer-up event.
    #[must_use]
    pub const fn up(pointer: PointerId, position: Point) -> Self {
        Self {
            pointer,
            position,
            phase: PointerPhase::Up,
        }
    }

    /// A pointer-cancel event.
    #[must_use]
    pub const fn cancel(pointer: PointerId, position: Point) -> Self {
        Self {
            pointer,
            position,
            phase: PointerPhase::Cancel,
        }
    }
}

/// What the host should do with a pointer event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerDisposition {
    /// Not a manipulation: start the generic "move this element" path.
    StartMove,
    /// Consumed by the element's session; apply the update if there is one.
    Manipulate(Option<TransformUpdate>),
    /// No session owns this contact; the host's own paths may use it.
    Ignored,
}

/// What the host should do with a wheel event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum WheelDisposition {
    /// Leave the event to the page.
    Ignored,
    /// Captured by the element; apply the update if there is one.
    Consumed(Option<TransformUpdate>),
}

impl WheelDisposition {
    /// Whether the event's default page scroll must be suppressed.
    #[must_use]
    pub fn prevent_default(&self) -> bool {
        matches!(self, Self::Consumed(_))
    }
}

/// Per-surface gesture routing keyed by element id `E`.
///
/// At most one session exists at a time, owned by the selected element.
/// Changing or clearing the selection tears the session down and releases its
/// captures.
#[derive(Clone, Debug)]
pub struct GestureRouter<E>
where
    E: Copy + Eq + Hash,
{
    config: GestureConfig,
    selected: Option<E>,
    manipulable: HashSet<E>,
    session: Option<(E, GestureSession)>,
}

impl<E> Default for GestureRouter<E>
where
    E: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl<E> GestureRouter<E>
where
    E: Copy + Eq + Hash,
{
    /// Creates a router with nothing selected.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            selected: None,
            manipulable: HashSet::new(),
            session: None,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Opts `element` in or out of manipulation.
    ///
    /// Opting out ends the element's session, if it has one.
    pub fn set_manipulable<C>(&mut self, element: E, manipulable: bool, capture: &mut C)
    where
        C: PointerCapture + ?Sized,
    {
        if manipulable {
            self.manipulable.insert(element);
        } else {
            self.manipulable.remove(&element);
            self.end_session_for(element, capture);
        }
    }

    /// Returns `true` if `element` accepts manipulation.
    #[must_use]
    pub fn is_manipulable(&self, element: E) -> bool {
        self.manipulable.contains(&element)
    }

    /// The selected element.
    #[must_use]
    pub fn selected(&self) -> Option<E> {
        self.selected
    }

    /// Selects `element`, ending any session of a previously selected element.
    pub fn select<C>(&mut self, element: E, capture: &mut C)
    where
        C: PointerCapture + ?Sized,
    {
        if self.selected == Some(element) {
            return;
        }
        self.end_session(capture);
        self.selected = Some(element);
    }

    /// Clears the selection, ending any open session.
    pub fn deselect<C>(&mut self, capture: &mut C)
    where
        C: PointerCapture + ?Sized,
    {
        self.end_session(capture);
        self.selected = None;
    }

    /// Forgets everything about `element`, for example when it is deleted.
    pub fn remove<C>(&mut self, element: E, capture: &mut C)
    where
        C: PointerCapture + ?Sized,
    {
        self.manipulable.remove(&element);
        if self.selected == Some(element) {
            self.deselect(capture);
        }
    }

    /// The open session for `element`.
    #[must_use]
    pub fn session(&self, element: E) -> Option<&GestureSession> {
        match &self.session {
            Some((owner, session)) if *owner == element => Some(session),
            _ => None,
        }
    }

    /// Routes a pointer event aimed at `element`.
    ///
    /// `current` is the element's persisted transform; any update returned is
    /// relative to it.
    pub fn handle_pointer<C>(
        &mut self,
        element: E,
        event: PointerEvent,
        current: ElementTransform,
        capture: &mut C,
    ) -> PointerDisposition
    where
        C: PointerCapture + ?Sized,
    {
        match event.phase {
            PointerPhase::Down => {
                if !self.accepts(element) {
                    return PointerDisposition::StartMove;
                }
                if self.session(element).is_none() {
                    self.session = Some((element, GestureSession::new()));
                }
                if let Some((_, session)) = &mut self.session {
                    session.on_down(event.pointer, event.position, current, capture);
                }
                PointerDisposition::Manipulate(None)
            }
            PointerPhase::Move => {
                let config = self.config;
                match self.owned_session(element, event.pointer) {
                    Some(session) => PointerDisposition::Manipulate(session.on_move(
                        event.pointer,
                        event.position,
                        current,
                        &config,
                    )),
                    None => PointerDisposition::Ignored,
                }
            }
            PointerPhase::Up | PointerPhase::Cancel => {
                let Some(session) = self.owned_session(element, event.pointer) else {
                    return PointerDisposition::Ignored;
                };
                let state = if event.phase == PointerPhase::Up {
                    session.on_up(event.pointer, current, capture)
                } else {
                    session.on_cancel(event.pointer, current, capture)
                };
                if state == SessionState::Ended {
                    self.session = None;
                }
                PointerDisposition::Manipulate(None)
            }
        }
    }

    /// Routes a wheel event aimed at `element`.
    ///
    /// The new scale is `clamp(scale - delta_y * wheel_step)`; see
    /// [`wheel_update`]. Consumed events must not scroll the page, even when
    /// the scale is already at a bound.
    pub fn handle_wheel(
        &mut self,
        element: E,
        delta_y: f64,
        current: ElementTransform,
    ) -> WheelDisposition {
        if !self.accepts(element) {
            return WheelDisposition::Ignored;
        }
        WheelDisposition::Consumed(wheel_update(delta_y, current, &self.config))
    }

    fn accepts(&self, element: E) -> bool {
        self.selected == Some(element) && self.manipulable.contains(&element)
    }

    fn owned_session(&mut self, element: E, pointer: PointerId) -> Option<&mut GestureSession> {
        match &mut self.session {
            Some((owner, session)) if *owner == element && session.contacts().contains(pointer) => {
                Some(session)
            }
            _ => None,
        }
    }

    fn end_session<C>(&mut self, capture: &mut C)
    where
        C: PointerCapture + ?Sized,
    {
        if let Some((_, mut session)) = self.session.take() {
            session.teardown(capture);
        }
    }

    fn end_session_for<C>(&mut self, element: E, capture: &mut C)
    where
        C: PointerCapture + ?Sized,
    {
        if self.session.as_ref().is_some_and(|(owner, _)| *owner == element) {
            self.end_session(capture);
        }
    }
}
