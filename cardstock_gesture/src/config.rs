// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;

/// Bounds and sensitivities for element manipulation.
///
/// The defaults are fixed constants rather than values derived from element
/// geometry: scale stays in `[0.5, 3.0]` and pan in `±(scale - 1) * 50` on each
/// axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureConfig {
    min_scale: f64,
    max_scale: f64,
    pan_per_scale: f64,
    wheel_step: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 3.0,
            pan_per_scale: 50.0,
            wheel_step: 0.001,
        }
    }
}

impl GestureConfig {
    /// Sets the scale limits.
    ///
    /// The range is normalized so that `min <= max`, and both are kept
    /// positive. Non-finite limits leave the current ones in place.
    #[must_use]
    pub fn with_scale_limits(mut self, min: f64, max: f64) -> Self {
        if !(min.is_finite() && max.is_finite()) {
            return self;
        }
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.min_scale = min.max(f64::MIN_POSITIVE);
        self.max_scale = max.max(self.min_scale);
        self
    }

    /// Sets how much pan range each unit of zoom above `1.0` unlocks.
    ///
    /// Negative or non-finite input is clamped to `0`.
    #[must_use]
    pub fn with_pan_per_scale(mut self, pan_per_scale: f64) -> Self {
        self.pan_per_scale = if pan_per_scale.is_finite() {
            pan_per_scale.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Sets the scale change per unit of wheel delta.
    ///
    /// Negative or non-finite input is clamped to `0`.
    #[must_use]
    pub fn with_wheel_step(mut self, wheel_step: f64) -> Self {
        self.wheel_step = if wheel_step.is_finite() {
            wheel_step.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Smallest allowed scale.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Largest allowed scale.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Pan range unlocked per unit of zoom above `1.0`.
    #[must_use]
    pub fn pan_per_scale(&self) -> f64 {
        self.pan_per_scale
    }

    /// Scale change per unit of wheel delta.
    #[must_use]
    pub fn wheel_step(&self) -> f64 {
        self.wheel_step
    }

    /// Clamps `scale` into the configured limits.
    ///
    /// NaN maps to the lower limit.
    #[must_use]
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min_scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// Largest pan offset allowed on each axis at `scale`.
    ///
    /// This is `(scale - 1) * pan_per_scale`, and `0` at or below scale `1`:
    /// there is no hidden content to reveal.
    #[must_use]
    pub fn max_pan(&self, scale: f64) -> f64 {
        let range = (scale - 1.0) * self.pan_per_scale;
        if range.is_finite() { range.max(0.0) } else { 0.0 }
    }

    /// Clamps `pan` per axis into `±max_pan(scale)`.
    #[must_use]
    pub fn clamp_pan(&self, pan: Vec2, scale: f64) -> Vec2 {
        let max = self.max_pan(scale);
        let clamp = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(-max, max) };
        Vec2::new(clamp(pan.x), clamp(pan.y))
    }
}
