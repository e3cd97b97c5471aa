// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The card surface: elements, selection and input routing.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use cardstock_fit::{
    ContainerSize, FitContent, FitEstimator, FitReport, FitTrigger, IdentityToken, Millis,
};
use cardstock_gesture::{
    GestureRouter, PointerCapture, PointerDisposition, PointerEvent, PointerPhase,
    TransformUpdate, WheelDisposition,
};
use kurbo::{Rect, Size};

use crate::config::CardConfig;
use crate::drag::MoveDrag;
use crate::element::{Element, ElementId, ElementKind};
use crate::error::CardError;

/// Host text measurement.
pub trait TextMeasure {
    /// Natural, unscaled size of `text` set at `font_size`.
    fn measure(&self, text: &str, font_size: f64) -> Size;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, f64) -> Size,
{
    fn measure(&self, text: &str, font_size: f64) -> Size {
        self(text, font_size)
    }
}

/// What a pointer event did on the card.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerOutcome {
    /// Nothing on the card responded.
    Ignored,
    /// A move-drag began; the element is now selected.
    MoveStarted,
    /// The dragged element's frame moved.
    Moved(Rect),
    /// The move-drag ended.
    MoveEnded,
    /// The selected element's manipulation session consumed the event; the
    /// update, if any, has been applied.
    Manipulated(Option<TransformUpdate>),
}

/// A fixed-size card holding text, image and shape elements.
///
/// Text elements are shrunk to fit their frames by a [`FitEstimator`]; image
/// elements can be panned and zoomed through a [`GestureRouter`] once
/// selected. Everything else moves the element's frame.
///
/// Both engines write through the card: fit reports land in
/// [`Element::fit_scale`] and gesture updates in [`Element::transform`].
#[derive(Debug)]
pub struct Card {
    size: Size,
    config: CardConfig,
    elements: BTreeMap<ElementId, Element>,
    next_id: u32,
    fit: FitEstimator<ElementId>,
    gestures: GestureRouter<ElementId>,
    drag: Option<MoveDrag>,
}

impl Card {
    /// Creates an empty card of `size`.
    #[must_use]
    pub fn new(size: Size, config: CardConfig) -> Self {
        Self {
            size,
            config,
            elements: BTreeMap::new(),
            next_id: 0,
            fit: FitEstimator::new(config.fit),
            gestures: GestureRouter::new(config.gesture),
            drag: None,
        }
    }

    /// The card's logical size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// The card's configuration.
    #[must_use]
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// The element with `id`.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// All elements in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> + '_ {
        self.elements.iter().map(|(id, element)| (*id, element))
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the card has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Adds a text element and schedules its first fit measurement.
    ///
    /// The font size is clamped to the configured range and the frame to the
    /// card.
    pub fn add_text(
        &mut self,
        value: impl Into<String>,
        font_size: f64,
        frame: Rect,
        now: Millis,
    ) -> ElementId {
        let kind = ElementKind::Text {
            value: value.into(),
            font_size: self.config.clamp_font_size(font_size),
        };
        let id = self.insert(kind, frame);
        let mounted = self.fit.mount(id, self.config.text_fit, now, &mut ());
        debug_assert!(mounted.is_ok(), "live element ids are unique: {mounted:?}");
        id
    }

    /// Adds an image element. Images accept manipulation once selected.
    pub fn add_image(&mut self, frame: Rect) -> ElementId {
        let id = self.insert(ElementKind::Image, frame);
        self.gestures.set_manipulable(id, true, &mut ());
        id
    }

    /// Adds a shape element.
    pub fn add_shape(&mut self, frame: Rect) -> ElementId {
        self.insert(ElementKind::Shape, frame)
    }

    /// Removes an element, ending any drag or session it owns.
    pub fn remove<C>(&mut self, id: ElementId, capture: &mut C) -> Result<Element, CardError>
    where
        C: PointerCapture + ?Sized,
    {
        let element = self
            .elements
            .remove(&id)
            .ok_or(CardError::UnknownElement(id))?;
        self.fit.unmount(id, &mut ());
        self.gestures.remove(id, capture);
        if let Some(drag) = self.drag.take_if(|drag| drag.element() == id) {
            capture.release(drag.pointer());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(element = id.0, "element removed");
        Ok(element)
    }

    /// The selected element.
    #[must_use]
    pub fn selected(&self) -> Option<ElementId> {
        self.gestures.selected()
    }

    /// Selects an element, ending the previous selection's session.
    pub fn select<C>(&mut self, id: ElementId, capture: &mut C) -> Result<(), CardError>
    where
        C: PointerCapture + ?Sized,
    {
        self.require(id)?;
        self.gestures.select(id, capture);
        Ok(())
    }

    /// Clears the selection, ending any open session.
    pub fn deselect<C>(&mut self, capture: &mut C)
    where
        C: PointerCapture + ?Sized,
    {
        self.gestures.deselect(capture);
    }

    /// Opts an element in or out of manipulation.
    pub fn set_manipulable<C>(
        &mut self,
        id: ElementId,
        manipulable: bool,
        capture: &mut C,
    ) -> Result<(), CardError>
    where
        C: PointerCapture + ?Sized,
    {
        self.require(id)?;
        self.gestures.set_manipulable(id, manipulable, capture);
        Ok(())
    }

    /// Returns `true` if the element accepts manipulation when selected.
    #[must_use]
    pub fn is_manipulable(&self, id: ElementId) -> bool {
        self.gestures.is_manipulable(id)
    }

    /// Replaces a text element's value and schedules a re-fit.
    ///
    /// Non-text elements are left alone.
    pub fn set_text(
        &mut self,
        id: ElementId,
        value: impl Into<String>,
        now: Millis,
    ) -> Result<(), CardError> {
        let element = self.get_mut(id)?;
        if let ElementKind::Text { value: text, .. } = &mut element.kind {
            *text = value.into();
            self.fit.notify(id, FitTrigger::ContentChanged, now);
        }
        Ok(())
    }

    /// Sets a text element's font size and schedules a re-fit.
    ///
    /// Returns the size actually applied after clamping. Non-text elements are
    /// left alone and report `None`.
    pub fn set_font_size(
        &mut self,
        id: ElementId,
        font_size: f64,
        now: Millis,
    ) -> Result<Option<f64>, CardError> {
        let clamped = self.config.clamp_font_size(font_size);
        let element = self.get_mut(id)?;
        let ElementKind::Text { font_size: size, .. } = &mut element.kind else {
            return Ok(None);
        };
        *size = clamped;
        self.fit.notify(id, FitTrigger::StyleChanged, now);
        Ok(Some(clamped))
    }

    /// Resizes an element's frame, keeping its origin where possible.
    ///
    /// Each edge is clamped to the configured minimum and to the card, and the
    /// frame is then shifted back onto the card if it overhangs. Text elements
    /// re-fit as a container resize. Returns the applied frame.
    pub fn resize_element(
        &mut self,
        id: ElementId,
        size: Size,
        now: Millis,
    ) -> Result<Rect, CardError> {
        let card = self.size;
        let width = self.config.clamp_edge(size.width, card.width);
        let height = self.config.clamp_edge(size.height, card.height);
        let element = self.get_mut(id)?;
        let origin = element.frame.origin();
        let x = origin.x.min(card.width - width).max(0.0);
        let y = origin.y.min(card.height - height).max(0.0);
        element.frame = Rect::new(x, y, x + width, y + height);
        let frame = element.frame;
        if element.kind.is_text() {
            self.fit.notify(id, FitTrigger::ContainerResized, now);
        }
        Ok(frame)
    }

    /// Delivers the one-shot resources-ready signal (fonts loaded) to every
    /// text element.
    pub fn resources_ready(&mut self, now: Millis) {
        for (id, element) in &self.elements {
            if element.kind.is_text() {
                self.fit.resources_ready(*id, now);
            }
        }
    }

    /// Earliest time at which [`tick`](Self::tick) has fit work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.fit.next_deadline()
    }

    /// Runs every fit measurement due at `now`, measuring text with `measure`.
    ///
    /// Returns a report per measured element; committed scales are already
    /// written to the elements.
    pub fn tick<M>(&mut self, now: Millis, measure: &M) -> Vec<(ElementId, FitReport)>
    where
        M: TextMeasure + ?Sized,
    {
        let mut reports = Vec::new();
        for due in self.fit.poll(now) {
            let Some(element) = self.elements.get_mut(&due.key) else {
                continue;
            };
            let mut content = TextFit { element, measure };
            if let Some(report) = self.fit.measure(due.key, &mut content) {
                reports.push((due.key, report));
            }
        }
        reports
    }

    /// Routes a pointer event aimed at element `id`.
    ///
    /// The selected, manipulable element's session gets first refusal. A
    /// pointer-down it declines selects the element and starts a move-drag;
    /// the drag pointer is captured until it lifts.
    pub fn handle_pointer<C>(
        &mut self,
        id: ElementId,
        event: PointerEvent,
        capture: &mut C,
    ) -> Result<PointerOutcome, CardError>
    where
        C: PointerCapture + ?Sized,
    {
        let current = self.require(id)?.transform;
        if let Some(outcome) = self.drive_drag(event, capture) {
            return Ok(outcome);
        }
        let outcome = match self.gestures.handle_pointer(id, event, current, capture) {
            PointerDisposition::StartMove => self.start_move(id, event, capture),
            PointerDisposition::Manipulate(update) => {
                if let Some(update) = update {
                    self.apply_transform(id, update)?;
                }
                PointerOutcome::Manipulated(update)
            }
            PointerDisposition::Ignored => PointerOutcome::Ignored,
        };
        Ok(outcome)
    }

    /// Routes a wheel event aimed at element `id`, applying any scale change.
    ///
    /// The returned disposition tells the host whether to suppress page
    /// scrolling.
    pub fn handle_wheel(
        &mut self,
        id: ElementId,
        delta_y: f64,
    ) -> Result<WheelDisposition, CardError> {
        let current = self.require(id)?.transform;
        let disposition = self.gestures.handle_wheel(id, delta_y, current);
        if let WheelDisposition::Consumed(Some(update)) = disposition {
            self.apply_transform(id, update)?;
        }
        Ok(disposition)
    }

    /// Writes a gesture update into the element's transform.
    ///
    /// The frame is never touched.
    pub fn apply_transform(
        &mut self,
        id: ElementId,
        update: TransformUpdate,
    ) -> Result<(), CardError> {
        let element = self.get_mut(id)?;
        element.transform = update.apply_to(element.transform);
        Ok(())
    }

    fn insert(&mut self, kind: ElementKind, frame: Rect) -> ElementId {
        let id = self.allocate_id();
        let frame = self.clamp_frame(frame.abs());
        #[cfg(feature = "tracing")]
        tracing::debug!(element = id.0, text = kind.is_text(), "element added");
        self.elements.insert(id, Element::new(kind, frame));
        id
    }

    /// Next id not held by a live element. The counter wraps, skipping ids
    /// still in use.
    fn allocate_id(&mut self) -> ElementId {
        loop {
            let id = ElementId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if !self.elements.contains_key(&id) {
                return id;
            }
        }
    }

    fn clamp_frame(&self, frame: Rect) -> Rect {
        let width = self.config.clamp_edge(frame.width(), self.size.width);
        let height = self.config.clamp_edge(frame.height(), self.size.height);
        let x = frame.x0.min(self.size.width - width).max(0.0);
        let y = frame.y0.min(self.size.height - height).max(0.0);
        Rect::new(x, y, x + width, y + height)
    }

    fn require(&self, id: ElementId) -> Result<&Element, CardError> {
        self.elements.get(&id).ok_or(CardError::UnknownElement(id))
    }

    fn get_mut(&mut self, id: ElementId) -> Result<&mut Element, CardError> {
        self.elements
            .get_mut(&id)
            .ok_or(CardError::UnknownElement(id))
    }

    fn start_move<C>(
        &mut self,
        id: ElementId,
        event: PointerEvent,
        capture: &mut C,
    ) -> PointerOutcome
    where
        C: PointerCapture + ?Sized,
    {
        let Some(element) = self.elements.get(&id) else {
            return PointerOutcome::Ignored;
        };
        if self.drag.is_some() {
            return PointerOutcome::Ignored;
        }
        self.drag = Some(MoveDrag::start(
            id,
            event.pointer,
            event.position,
            element.frame.origin(),
        ));
        self.gestures.select(id, capture);
        capture.capture(event.pointer);
        PointerOutcome::MoveStarted
    }

    /// Feeds the active move-drag, if `event` belongs to it.
    fn drive_drag<C>(&mut self, event: PointerEvent, capture: &mut C) -> Option<PointerOutcome>
    where
        C: PointerCapture + ?Sized,
    {
        let drag = self.drag.filter(|drag| drag.pointer() == event.pointer)?;
        match event.phase {
            PointerPhase::Down => Some(PointerOutcome::Ignored),
            PointerPhase::Move => {
                let element = self.elements.get_mut(&drag.element())?;
                let size = element.frame.size();
                let origin = drag.origin_at(event.position, size, self.size);
                element.frame = Rect::from_origin_size(origin, size);
                Some(PointerOutcome::Moved(element.frame))
            }
            PointerPhase::Up | PointerPhase::Cancel => {
                self.drag = None;
                capture.release(event.pointer);
                Some(PointerOutcome::MoveEnded)
            }
        }
    }
}

/// A text element viewed as fit content.
struct TextFit<'a, M: ?Sized> {
    element: &'a mut Element,
    measure: &'a M,
}

impl<M> FitContent for TextFit<'_, M>
where
    M: TextMeasure + ?Sized,
{
    fn container(&self) -> ContainerSize {
        let size = self.element.frame.size();
        ContainerSize::bounded(size.width, size.height)
    }

    fn reset_to_identity(&mut self) {
        self.element.fit_scale = 1.0;
    }

    fn natural_size(&self, _token: &IdentityToken) -> Size {
        match &self.element.kind {
            ElementKind::Text { value, font_size } => self.measure.measure(value, *font_size),
            ElementKind::Image | ElementKind::Shape => Size::ZERO,
        }
    }

    fn apply_scale(&mut self, scale: f64) {
        self.element.fit_scale = scale;
    }
}
