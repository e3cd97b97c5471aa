// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The measurement contract between the estimator and a host's content.
//!
//! Natural size must be read while the content is unscaled. Hosts implement
//! [`FitContent`], whose natural-size read takes an [`IdentityToken`]; only
//! this crate can mint one, and it does so right after calling
//! [`FitContent::reset_to_identity`]. The ordering
//! `reset_to_identity → natural_size → compute → apply_scale` is therefore
//! fixed by the API rather than by caller discipline.

use kurbo::{Affine, Point, Size};

use crate::compute::{ContainerSize, Measurement};

/// Proof that the content's display transform was reset to identity.
///
/// Only [`measure_content`] creates tokens.
#[derive(Debug)]
pub struct IdentityToken {
    _private: (),
}

impl IdentityToken {
    fn new() -> Self {
        Self { _private: () }
    }
}

/// A container/content pairing the estimator can measure and scale.
pub trait FitContent {
    /// Space the container currently offers, in layout units.
    fn container(&self) -> ContainerSize;

    /// Forces the content's display transform back to identity.
    fn reset_to_identity(&mut self);

    /// Natural, unscaled content size.
    ///
    /// Called only while the content is in the identity state established by
    /// [`reset_to_identity`](Self::reset_to_identity).
    fn natural_size(&self, token: &IdentityToken) -> Size;

    /// Applies `scale` as a visual transform anchored at the content center.
    ///
    /// Implementations must not change the logical size of the content.
    fn apply_scale(&mut self, scale: f64);
}

impl<T: FitContent + ?Sized> FitContent for &mut T {
    fn container(&self) -> ContainerSize {
        (**self).container()
    }

    fn reset_to_identity(&mut self) {
        (**self).reset_to_identity();
    }

    fn natural_size(&self, token: &IdentityToken) -> Size {
        (**self).natural_size(token)
    }

    fn apply_scale(&mut self, scale: f64) {
        (**self).apply_scale(scale);
    }
}

/// Resets `content` to identity and reads a [`Measurement`] from it.
///
/// The content is left unscaled; callers follow up with
/// [`FitContent::apply_scale`].
pub fn measure_content<C: FitContent + ?Sized>(content: &mut C) -> Measurement {
    let container = content.container();
    content.reset_to_identity();
    let token = IdentityToken::new();
    let natural = content.natural_size(&token);
    Measurement::new(container, natural)
}

/// Visual transform for content of `natural` size scaled about its center.
///
/// ```
/// use cardstock_fit::content_transform;
/// use kurbo::{Point, Size};
///
/// let t = content_transform(0.5, Size::new(200.0, 40.0));
/// // The center stays put.
/// assert_eq!(t * Point::new(100.0, 20.0), Point::new(100.0, 20.0));
/// // The left edge moves halfway towards it.
/// assert_eq!(t * Point::new(0.0, 20.0), Point::new(50.0, 20.0));
/// ```
#[must_use]
pub fn content_transform(scale: f64, natural: Size) -> Affine {
    let center = Point::new(natural.width * 0.5, natural.height * 0.5);
    Affine::scale_about(scale, center)
}
