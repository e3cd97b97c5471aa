// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-target fit options and estimator-wide timing configuration.

use cardstock_timing::Millis;

/// Default floor for single-line text.
pub const SINGLE_LINE_MIN_SCALE: f64 = 0.55;

/// Default floor for generic bounded content.
pub const BOUNDED_MIN_SCALE: f64 = 0.5;

/// Lowest floor accepted by [`FitOptions::with_min_scale`].
pub const LOWEST_MIN_SCALE: f64 = 0.01;

/// Width ratio below which wrap-capable content is wrapped instead of shrunk.
pub const WRAP_THRESHOLD: f64 = 0.85;

/// Candidates within this distance of the committed scale are ignored.
pub const HYSTERESIS: f64 = 0.01;

/// How a target should be fitted into its container.
///
/// Construct one of the presets and adjust it with the `with_*` builders. The
/// builders clamp out-of-range input instead of rejecting it.
///
/// ```
/// use cardstock_fit::FitOptions;
///
/// let opts = FitOptions::single_line().with_min_scale(-3.0);
/// assert_eq!(opts.min_scale(), Some(cardstock_fit::LOWEST_MIN_SCALE));
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FitOptions {
    min_scale: Option<f64>,
    allow_wrap: bool,
    enforce_height: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self::bounded()
    }
}

impl FitOptions {
    /// Options for single-line text: floor `0.55`, width only, no wrapping.
    #[must_use]
    pub const fn single_line() -> Self {
        Self {
            min_scale: Some(SINGLE_LINE_MIN_SCALE),
            allow_wrap: false,
            enforce_height: false,
        }
    }

    /// Options for generic bounded content: floor `0.5`, width and height.
    #[must_use]
    pub const fn bounded() -> Self {
        Self {
            min_scale: Some(BOUNDED_MIN_SCALE),
            allow_wrap: false,
            enforce_height: true,
        }
    }

    /// Removes the floor so the computed scale may go arbitrarily close to zero.
    #[must_use]
    pub const fn without_floor(mut self) -> Self {
        self.min_scale = None;
        self
    }

    /// Sets the floor, clamped into `[LOWEST_MIN_SCALE, 1]`.
    ///
    /// A NaN floor falls back to [`BOUNDED_MIN_SCALE`].
    #[must_use]
    pub fn with_min_scale(mut self, min_scale: f64) -> Self {
        let min_scale = if min_scale.is_nan() {
            BOUNDED_MIN_SCALE
        } else {
            min_scale.clamp(LOWEST_MIN_SCALE, 1.0)
        };
        self.min_scale = Some(min_scale);
        self
    }

    /// Allows the caller to wrap text instead of shrinking it past
    /// [`WRAP_THRESHOLD`].
    #[must_use]
    pub const fn with_wrap(mut self, allow_wrap: bool) -> Self {
        self.allow_wrap = allow_wrap;
        self
    }

    /// Enables or disables the height bound.
    ///
    /// Without a height bound vertical overflow is never checked, even when
    /// the container reports a height.
    #[must_use]
    pub const fn with_height_bound(mut self, enforce_height: bool) -> Self {
        self.enforce_height = enforce_height;
        self
    }

    /// The configured floor, if any.
    #[must_use]
    pub const fn min_scale(&self) -> Option<f64> {
        self.min_scale
    }

    /// Whether wrapping may replace shrinking.
    #[must_use]
    pub const fn allow_wrap(&self) -> bool {
        self.allow_wrap
    }

    /// Whether the height bound is enforced.
    #[must_use]
    pub const fn enforce_height(&self) -> bool {
        self.enforce_height
    }
}

/// What to commit when a measurement reports a non-positive size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ZeroSizePolicy {
    /// Commit the identity scale `1.0` so a transient zero-size read cannot
    /// lock in a shrink.
    #[default]
    ResetToIdentity,
    /// Leave the committed scale untouched.
    KeepCommitted,
}

/// Settle delays and degenerate-input policy for a [`FitEstimator`](crate::FitEstimator).
///
/// Delays are in host milliseconds. Each trigger class has its own delay; the
/// resources-ready signal fires once, late, after layout has stabilized, so it
/// waits longer than the high-frequency triggers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FitConfig {
    /// Settle delay after the initial mount.
    pub mount_settle_ms: Millis,
    /// Settle delay after a container resize notification.
    pub resize_settle_ms: Millis,
    /// Settle delay after the content value changed.
    pub content_settle_ms: Millis,
    /// Settle delay after a metrics-affecting style change.
    pub style_settle_ms: Millis,
    /// Settle delay after the resources-ready signal.
    pub resources_settle_ms: Millis,
    /// Behavior for non-positive measurements.
    pub zero_size: ZeroSizePolicy,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            mount_settle_ms: 0,
            resize_settle_ms: 10,
            content_settle_ms: 10,
            style_settle_ms: 10,
            resources_settle_ms: 50,
            zero_size: ZeroSizePolicy::default(),
        }
    }
}

impl FitConfig {
    /// Sets the policy for non-positive measurements.
    #[must_use]
    pub const fn with_zero_size(mut self, policy: ZeroSizePolicy) -> Self {
        self.zero_size = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_carry_documented_floors() {
        assert_eq!(FitOptions::single_line().min_scale(), Some(0.55));
        assert_eq!(FitOptions::bounded().min_scale(), Some(0.5));
        assert!(!FitOptions::single_line().enforce_height());
        assert!(FitOptions::bounded().enforce_height());
        assert_eq!(FitOptions::bounded().without_floor().min_scale(), None);
    }

    #[test]
    fn min_scale_is_clamped_not_rejected() {
        assert_eq!(
            FitOptions::bounded().with_min_scale(7.0).min_scale(),
            Some(1.0)
        );
        assert_eq!(
            FitOptions::bounded().with_min_scale(0.0).min_scale(),
            Some(LOWEST_MIN_SCALE)
        );
        assert_eq!(
            FitOptions::bounded().with_min_scale(f64::NAN).min_scale(),
            Some(BOUNDED_MIN_SCALE)
        );
    }

    #[test]
    fn default_config_settles_ready_signal_longer_than_resize() {
        let config = FitConfig::default();
        assert_eq!(config.resize_settle_ms, 10);
        assert_eq!(config.resources_settle_ms, 50);
        assert!(config.resources_settle_ms > config.resize_settle_ms);
        assert_eq!(config.zero_size, ZeroSizePolicy::ResetToIdentity);
    }
}
