// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The committed scale and its hysteresis filter.

use crate::options::HYSTERESIS;

/// The scale currently applied to a target's content.
///
/// Candidates only replace the committed value when they differ from it by
/// more than [`HYSTERESIS`]. Re-measuring near-identical geometry (sub-pixel
/// reflow, for example) therefore never produces a visible change.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CommittedScale {
    value: f64,
}

impl Default for CommittedScale {
    fn default() -> Self {
        Self { value: 1.0 }
    }
}

impl CommittedScale {
    /// The committed scale.
    #[must_use]
    pub fn get(&self) -> f64 {
        self.value
    }

    /// Offers a candidate through the hysteresis filter.
    ///
    /// Returns `true` if the candidate was committed.
    pub fn offer(&mut self, candidate: f64) -> bool {
        if !candidate.is_finite() || (self.value - candidate).abs() <= HYSTERESIS {
            return false;
        }
        self.value = candidate;
        true
    }

    /// Commits `value` unconditionally.
    ///
    /// Returns `true` if the committed value changed.
    pub fn force(&mut self, value: f64) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::CommittedScale;

    #[test]
    fn starts_at_identity() {
        assert_eq!(CommittedScale::default().get(), 1.0);
    }

    #[test]
    fn small_changes_are_filtered() {
        let mut committed = CommittedScale::default();
        assert!(!committed.offer(0.995));
        assert_eq!(committed.get(), 1.0);

        assert!(committed.offer(0.98));
        assert_eq!(committed.get(), 0.98);
    }

    #[test]
    fn drift_is_measured_against_the_committed_value() {
        let mut committed = CommittedScale::default();
        committed.offer(0.8);
        // Each step is within 1% of the previous candidate but the filter
        // compares against what was committed.
        assert!(!committed.offer(0.805));
        assert!(!committed.offer(0.809));
        assert!(committed.offer(0.8101));
    }

    #[test]
    fn non_finite_candidates_are_ignored() {
        let mut committed = CommittedScale::default();
        assert!(!committed.offer(f64::NAN));
        assert!(!committed.offer(f64::INFINITY));
        assert_eq!(committed.get(), 1.0);
    }

    #[test]
    fn force_bypasses_the_filter() {
        let mut committed = CommittedScale::default();
        committed.offer(0.6);
        assert!(committed.force(1.0));
        assert!(!committed.force(1.0));
        assert_eq!(committed.get(), 1.0);
    }
}
