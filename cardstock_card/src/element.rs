// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card elements.

use alloc::string::String;
use core::fmt;

use cardstock_gesture::{ElementTransform, TransformAnchor};
use kurbo::{Affine, Rect};

/// Identifier of an element on a card.
///
/// Ids are allocated by the card; no two live elements share one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an element shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    /// A text block, shrunk to fit its frame.
    Text {
        /// The text.
        value: String,
        /// Font size in layout units.
        font_size: f64,
    },
    /// An image, pannable and zoomable inside its frame.
    Image,
    /// A plain shape.
    Shape,
}

impl ElementKind {
    /// Returns `true` for text elements.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}

/// One element on a card.
///
/// The frame is the element's logical placement. Neither the fit scale nor the
/// gesture transform ever changes it; both only affect how content is drawn
/// inside the frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub(crate) kind: ElementKind,
    pub(crate) frame: Rect,
    pub(crate) fit_scale: f64,
    pub(crate) transform: ElementTransform,
}

impl Element {
    pub(crate) fn new(kind: ElementKind, frame: Rect) -> Self {
        Self {
            kind,
            frame,
            fit_scale: 1.0,
            transform: ElementTransform::IDENTITY,
        }
    }

    /// What the element shows.
    #[must_use]
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Logical placement on the card.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Committed shrink-to-fit scale. Always `1.0` for non-text elements.
    #[must_use]
    pub fn fit_scale(&self) -> f64 {
        self.fit_scale
    }

    /// Pan and zoom applied by manipulation.
    #[must_use]
    pub fn transform(&self) -> ElementTransform {
        self.transform
    }

    /// Transform from content space to frame-local space.
    ///
    /// Content is shrunk by the fit scale and then zoomed and panned by the
    /// gesture transform, all anchored at the frame center.
    #[must_use]
    pub fn content_affine(&self) -> Affine {
        let size = self.frame.size();
        let fit = Affine::scale_about(self.fit_scale, self.frame.size().to_rect().center());
        self.transform.to_affine(size, TransformAnchor::Center) * fit
    }
}

#[cfg(test)]
mod tests {
    use cardstock_gesture::ElementTransform;
    use kurbo::{Point, Rect, Vec2};

    use super::{Element, ElementKind};

    #[test]
    fn content_affine_composes_fit_and_gesture() {
        let mut element = Element::new(ElementKind::Image, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(element.content_affine() * Point::new(10.0, 10.0), Point::new(10.0, 10.0));

        element.fit_scale = 0.5;
        element.transform = ElementTransform::new(2.0, Vec2::new(5.0, 0.0));
        // Fit and zoom cancel out; only the pan remains.
        assert_eq!(element.content_affine() * Point::new(10.0, 10.0), Point::new(15.0, 10.0));
    }
}
