// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cardstock_fit::{FitConfig, FitOptions};
use cardstock_gesture::GestureConfig;

/// Smallest accepted font size.
pub const MIN_FONT_SIZE: f64 = 4.0;
/// Largest accepted font size.
pub const MAX_FONT_SIZE: f64 = 400.0;
/// Smallest accepted element edge.
pub const MIN_ELEMENT_EDGE: f64 = 8.0;

/// Card surface configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CardConfig {
    /// Settle delays and degenerate-input policy for text fitting.
    pub fit: FitConfig,
    /// Fit options applied to newly added text elements.
    ///
    /// Card text is single-line, so the default is the single-line floor with
    /// the frame height as an extra bound.
    pub text_fit: FitOptions,
    /// Scale and pan bounds for image manipulation.
    pub gesture: GestureConfig,
    min_font_size: f64,
    max_font_size: f64,
    min_element_edge: f64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            fit: FitConfig::default(),
            text_fit: FitOptions::single_line().with_height_bound(true),
            gesture: GestureConfig::default(),
            min_font_size: MIN_FONT_SIZE,
            max_font_size: MAX_FONT_SIZE,
            min_element_edge: MIN_ELEMENT_EDGE,
        }
    }
}

impl CardConfig {
    /// Sets the accepted font-size range.
    ///
    /// The bounds are reordered if needed; non-finite or non-positive bounds
    /// leave the current range in place.
    #[must_use]
    pub fn with_font_size_range(mut self, min: f64, max: f64) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        if lo.is_finite() && hi.is_finite() && lo > 0.0 {
            self.min_font_size = lo;
            self.max_font_size = hi;
        }
        self
    }

    /// Sets the smallest accepted element edge. Negative or non-finite values
    /// become zero.
    #[must_use]
    pub fn with_min_element_edge(mut self, edge: f64) -> Self {
        self.min_element_edge = if edge.is_finite() { edge.max(0.0) } else { 0.0 };
        self
    }

    /// Smallest accepted font size.
    #[must_use]
    pub fn min_font_size(&self) -> f64 {
        self.min_font_size
    }

    /// Largest accepted font size.
    #[must_use]
    pub fn max_font_size(&self) -> f64 {
        self.max_font_size
    }

    /// Smallest accepted element edge.
    #[must_use]
    pub fn min_element_edge(&self) -> f64 {
        self.min_element_edge
    }

    /// Clamps a requested font size into range. NaN maps to the minimum.
    #[must_use]
    pub fn clamp_font_size(&self, size: f64) -> f64 {
        if size.is_nan() {
            return self.min_font_size;
        }
        size.clamp(self.min_font_size, self.max_font_size)
    }

    /// Clamps one requested element edge into `[min_element_edge, limit]`.
    ///
    /// The minimum wins when `limit` is smaller than it. NaN maps to the
    /// minimum.
    #[must_use]
    pub fn clamp_edge(&self, edge: f64, limit: f64) -> f64 {
        if edge.is_nan() {
            return self.min_element_edge;
        }
        edge.min(limit).max(self.min_element_edge)
    }
}
