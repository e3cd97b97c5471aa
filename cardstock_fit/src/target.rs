// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single container/content pairing and its committed scale.

use crate::committed::CommittedScale;
use crate::compute::{Measurement, ScaleComputation, compute_scale};
use crate::content::{FitContent, measure_content};
use crate::options::{FitOptions, ZeroSizePolicy};

/// Outcome of one measurement of a [`FitTarget`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FitReport {
    /// Committed scale after the measurement.
    pub scale: f64,
    /// `true` if the committed scale changed.
    pub changed: bool,
    /// `true` if the content should wrap instead of shrinking.
    pub wrap: bool,
    /// The computation behind the commit, or `None` for a degenerate
    /// measurement.
    pub computation: Option<ScaleComputation>,
}

impl FitReport {
    /// Returns `true` if the measurement reported a non-positive size.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.computation.is_none()
    }
}

/// State owned by one container/content pairing.
///
/// A target is the only writer of its committed scale. It starts at the
/// identity scale and holds no state that outlives it.
#[derive(Clone, Debug)]
pub struct FitTarget {
    options: FitOptions,
    committed: CommittedScale,
    wrap: bool,
    last: Option<ScaleComputation>,
}

impl FitTarget {
    /// Creates a target with the identity scale.
    #[must_use]
    pub fn new(options: FitOptions) -> Self {
        Self {
            options,
            committed: CommittedScale::default(),
            wrap: false,
            last: None,
        }
    }

    /// The options this target is fitted with.
    #[must_use]
    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Replaces the options. Takes effect on the next measurement.
    pub fn set_options(&mut self, options: FitOptions) {
        self.options = options;
    }

    /// The committed scale.
    #[must_use]
    pub fn committed_scale(&self) -> f64 {
        self.committed.get()
    }

    /// Whether the last measurement asked for wrapping instead of shrinking.
    #[must_use]
    pub fn wraps(&self) -> bool {
        self.wrap
    }

    /// The last non-degenerate computation.
    #[must_use]
    pub fn last_computation(&self) -> Option<&ScaleComputation> {
        self.last.as_ref()
    }

    /// Runs the full measurement protocol on `content`.
    ///
    /// The content is reset to identity, measured, and then scaled by the
    /// (possibly unchanged) committed scale. The scale is re-applied even when
    /// the hysteresis filter rejects the candidate, since the reset cleared it.
    pub fn measure<C: FitContent + ?Sized>(
        &mut self,
        content: &mut C,
        zero_size: ZeroSizePolicy,
    ) -> FitReport {
        let measurement = measure_content(content);
        let report = self.commit(&measurement, zero_size);
        content.apply_scale(report.scale);
        report
    }

    /// Computes a candidate from `measurement` and commits it.
    ///
    /// This is the pure half of [`measure`](Self::measure) for hosts that read
    /// sizes themselves.
    pub fn commit(&mut self, measurement: &Measurement, zero_size: ZeroSizePolicy) -> FitReport {
        let Some(computation) = compute_scale(measurement, &self.options) else {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                available_width = measurement.container.width,
                needed_width = measurement.natural.width,
                "degenerate fit measurement"
            );
            let changed = match zero_size {
                ZeroSizePolicy::ResetToIdentity => {
                    self.wrap = false;
                    self.committed.force(1.0)
                }
                ZeroSizePolicy::KeepCommitted => false,
            };
            return FitReport {
                scale: self.committed.get(),
                changed,
                wrap: self.wrap,
                computation: None,
            };
        };

        self.last = Some(computation);
        self.wrap = computation.wrap;
        let changed = if computation.wrap {
            self.committed.force(computation.scale)
        } else {
            self.committed.offer(computation.scale)
        };

        #[cfg(feature = "tracing")]
        trace_commit(changed, &computation, self.committed.get());

        FitReport {
            scale: self.committed.get(),
            changed,
            wrap: computation.wrap,
            computation: Some(computation),
        }
    }
}

#[cfg(feature = "tracing")]
fn trace_commit(changed: bool, computation: &ScaleComputation, committed: f64) {
    if changed {
        tracing::debug!(
            scale = computation.scale,
            wrap = computation.wrap,
            "fit scale committed"
        );
    } else {
        tracing::trace!(
            candidate = computation.scale,
            committed,
            "fit candidate within hysteresis"
        );
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::FitTarget;
    use crate::compute::{ContainerSize, Measurement};
    use crate::options::{FitOptions, ZeroSizePolicy};

    fn m(available: f64, needed: f64) -> Measurement {
        Measurement::new(ContainerSize::width(available), Size::new(needed, 12.0))
    }

    #[test]
    fn clamped_scenario_commits_floor() {
        let mut target = FitTarget::new(FitOptions::bounded());
        let report = target.commit(&m(200.0, 400.0), ZeroSizePolicy::default());
        assert!(report.changed);
        assert_eq!(report.scale, 0.5);
        assert_eq!(target.committed_scale(), 0.5);
    }

    #[test]
    fn fitting_scenario_stays_at_identity() {
        let mut target = FitTarget::new(FitOptions::single_line());
        let report = target.commit(&m(300.0, 280.0), ZeroSizePolicy::default());
        assert!(!report.changed);
        assert_eq!(report.scale, 1.0);
    }

    #[test]
    fn sub_pixel_reflow_does_not_recommit() {
        let mut target = FitTarget::new(FitOptions::single_line());
        target.commit(&m(300.0, 400.0), ZeroSizePolicy::default());
        assert_eq!(target.committed_scale(), 0.75);

        let report = target.commit(&m(300.0, 401.5), ZeroSizePolicy::default());
        assert!(!report.changed);
        assert_eq!(report.scale, 0.75);
    }

    #[test]
    fn zero_size_resets_to_identity_by_default() {
        let mut target = FitTarget::new(FitOptions::single_line());
        target.commit(&m(300.0, 400.0), ZeroSizePolicy::default());

        let report = target.commit(&m(0.0, 400.0), ZeroSizePolicy::ResetToIdentity);
        assert!(report.is_degenerate());
        assert!(report.changed);
        assert_eq!(target.committed_scale(), 1.0);
    }

    #[test]
    fn zero_size_can_keep_the_committed_scale() {
        let mut target = FitTarget::new(FitOptions::single_line());
        target.commit(&m(300.0, 400.0), ZeroSizePolicy::default());

        let report = target.commit(&m(300.0, 0.0), ZeroSizePolicy::KeepCommitted);
        assert!(report.is_degenerate());
        assert!(!report.changed);
        assert_eq!(target.committed_scale(), 0.75);
    }

    #[test]
    fn wrap_forces_identity_even_inside_hysteresis() {
        let opts = FitOptions::single_line().with_wrap(true);
        let mut target = FitTarget::new(opts);
        target.commit(&m(99.5, 100.0), ZeroSizePolicy::default());
        // 0.995 is inside the filter, so identity stays committed.
        assert_eq!(target.committed_scale(), 1.0);

        target.commit(&m(88.0, 100.0), ZeroSizePolicy::default());
        assert_eq!(target.committed_scale(), 0.88);

        let report = target.commit(&m(50.0, 100.0), ZeroSizePolicy::default());
        assert!(report.wrap);
        assert!(target.wraps());
        assert_eq!(report.scale, 1.0);
    }

    #[test]
    fn options_change_applies_on_next_measurement() {
        let mut target = FitTarget::new(FitOptions::single_line());
        target.commit(&m(100.0, 400.0), ZeroSizePolicy::default());
        assert_eq!(target.committed_scale(), 0.55);

        target.set_options(FitOptions::single_line().with_min_scale(0.2));
        target.commit(&m(100.0, 400.0), ZeroSizePolicy::default());
        assert_eq!(target.committed_scale(), 0.25);
    }
}
