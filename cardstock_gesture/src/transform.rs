// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element transforms and the partial updates proposed against them.

use kurbo::{Affine, Point, Size, Vec2};

/// Pan and zoom applied to an element's content.
///
/// The element's logical frame is untouched; this only describes how its
/// content is drawn inside the frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElementTransform {
    /// Uniform zoom factor.
    pub scale: f64,
    /// Offset of the content inside the frame.
    pub pan: Vec2,
}

impl Default for ElementTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Where the element's scale is anchored when drawing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TransformAnchor {
    /// Scale about the frame center.
    #[default]
    Center,
    /// Scale about the frame's top-left corner.
    TopLeft,
}

impl ElementTransform {
    /// No zoom and no pan.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        pan: Vec2::ZERO,
    };

    /// Creates a transform.
    #[must_use]
    pub const fn new(scale: f64, pan: Vec2) -> Self {
        Self { scale, pan }
    }

    /// Visual transform for content drawn in a frame of `size`.
    ///
    /// The content is scaled about `anchor` and then translated by the pan.
    #[must_use]
    pub fn to_affine(&self, size: Size, anchor: TransformAnchor) -> Affine {
        let center = match anchor {
            TransformAnchor::Center => Point::new(size.width * 0.5, size.height * 0.5),
            TransformAnchor::TopLeft => Point::ORIGIN,
        };
        Affine::translate(self.pan) * Affine::scale_about(self.scale, center)
    }
}

/// A partial transform change proposed by the interpreter.
///
/// Single-contact panning proposes only `pan`; pinch and wheel propose `scale`,
/// plus `pan` when the old pan no longer fits the new scale.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct TransformUpdate {
    /// New scale, if it changed.
    pub scale: Option<f64>,
    /// New pan, if it changed.
    pub pan: Option<Vec2>,
}

impl TransformUpdate {
    /// An update that only changes the scale.
    #[must_use]
    pub const fn scale(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            pan: None,
        }
    }

    /// An update that only changes the pan.
    #[must_use]
    pub const fn pan(pan: Vec2) -> Self {
        Self {
            scale: None,
            pan: Some(pan),
        }
    }

    /// Returns `true` if nothing changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scale.is_none() && self.pan.is_none()
    }

    /// Returns `transform` with this update applied.
    #[must_use]
    pub fn apply_to(&self, transform: ElementTransform) -> ElementTransform {
        ElementTransform {
            scale: self.scale.unwrap_or(transform.scale),
            pan: self.pan.unwrap_or(transform.pan),
        }
    }

    pub(crate) fn non_empty(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }
}
