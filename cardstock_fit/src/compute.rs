// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure scale computation: container and natural content size in, scale out.

use kurbo::Size;

use crate::options::{FitOptions, WRAP_THRESHOLD};

/// Space a container offers to its content, in layout units.
///
/// The height is optional: containers with an unconstrained height report
/// `None` and are fitted by width only.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContainerSize {
    /// Available width.
    pub width: f64,
    /// Available height, when the container has one.
    pub height: Option<f64>,
}

impl ContainerSize {
    /// A container bounded only in width.
    #[must_use]
    pub const fn width(width: f64) -> Self {
        Self {
            width,
            height: None,
        }
    }

    /// A container bounded in both axes.
    #[must_use]
    pub const fn bounded(width: f64, height: f64) -> Self {
        Self {
            width,
            height: Some(height),
        }
    }
}

impl From<Size> for ContainerSize {
    fn from(size: Size) -> Self {
        Self::bounded(size.width, size.height)
    }
}

/// One reading of a container and the natural (unscaled) size of its content.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Measurement {
    /// Space offered by the container.
    pub container: ContainerSize,
    /// Natural size of the content with an identity transform.
    pub natural: Size,
}

impl Measurement {
    /// Creates a measurement.
    #[must_use]
    pub const fn new(container: ContainerSize, natural: Size) -> Self {
        Self { container, natural }
    }

    /// Returns `true` if either width is non-positive or not finite.
    ///
    /// Degenerate measurements carry no usable ratio; see
    /// [`ZeroSizePolicy`](crate::ZeroSizePolicy).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.container.width.is_finite()
            && self.natural.width.is_finite()
            && self.container.width > 0.0
            && self.natural.width > 0.0)
    }
}

/// Result of [`compute_scale`].
///
/// This is derived data. The authoritative value is the committed scale held
/// by a [`FitTarget`](crate::FitTarget).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScaleComputation {
    /// Width offered by the container.
    pub available_width: f64,
    /// Height offered by the container, when a height bound was consulted.
    pub available_height: Option<f64>,
    /// Natural content width.
    pub needed_width: f64,
    /// Natural content height, when a height bound was consulted.
    pub needed_height: Option<f64>,
    /// Ratio-derived scale before the floor is applied.
    pub raw_scale: f64,
    /// Final candidate scale.
    pub scale: f64,
    /// `true` when the content should be wrapped rather than shrunk.
    pub wrap: bool,
}

/// Computes the largest scale `<= 1` that keeps the content inside its container.
///
/// Returns `None` for degenerate measurements (non-positive container or
/// content width).
///
/// The height is only consulted when `options` enforces a height bound and both
/// the container height and the natural height are positive.
///
/// ```
/// use cardstock_fit::{ContainerSize, FitOptions, Measurement, compute_scale};
/// use kurbo::Size;
///
/// let m = Measurement::new(ContainerSize::width(200.0), Size::new(400.0, 20.0));
/// let c = compute_scale(&m, &FitOptions::bounded()).unwrap();
/// assert_eq!(c.scale, 0.5);
///
/// let m = Measurement::new(ContainerSize::width(300.0), Size::new(280.0, 20.0));
/// assert_eq!(compute_scale(&m, &FitOptions::bounded()).unwrap().scale, 1.0);
/// ```
#[must_use]
pub fn compute_scale(measurement: &Measurement, options: &FitOptions) -> Option<ScaleComputation> {
    if measurement.is_degenerate() {
        return None;
    }
    let available_width = measurement.container.width;
    let needed_width = measurement.natural.width;
    let width_ratio = available_width / needed_width;

    if options.allow_wrap() && width_ratio < WRAP_THRESHOLD {
        return Some(ScaleComputation {
            available_width,
            available_height: None,
            needed_width,
            needed_height: None,
            raw_scale: width_ratio.min(1.0),
            scale: 1.0,
            wrap: true,
        });
    }

    let mut raw_scale = width_ratio.min(1.0);
    let mut available_height = None;
    let mut needed_height = None;
    let height_bound = measurement
        .container
        .height
        .filter(|_| options.enforce_height());
    if let Some(height) = height_bound {
        let natural_height = measurement.natural.height;
        if height > 0.0 && natural_height > 0.0 {
            available_height = Some(height);
            needed_height = Some(natural_height);
            if natural_height > height {
                raw_scale = raw_scale.min(height / natural_height);
            }
        }
    }

    let scale = match options.min_scale() {
        Some(floor) => raw_scale.max(floor),
        None => raw_scale,
    };

    Some(ScaleComputation {
        available_width,
        available_height,
        needed_width,
        needed_height,
        raw_scale,
        scale,
        wrap: false,
    })
}
