// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for scale computation and the committed-scale filter.

use cardstock_fit::{
    ContainerSize, FitOptions, FitTarget, HYSTERESIS, Measurement, ZeroSizePolicy, compute_scale,
};
use kurbo::Size;
use proptest::prelude::*;

fn measurement(available: f64, needed: f64) -> Measurement {
    Measurement::new(ContainerSize::width(available), Size::new(needed, 10.0))
}

proptest! {
    #[test]
    fn raw_scale_contains_content(available in 0.1_f64..10_000.0, needed in 0.1_f64..10_000.0) {
        let c = compute_scale(&measurement(available, needed), &FitOptions::bounded()).unwrap();
        prop_assert!(c.raw_scale * needed <= available + 1e-9);
        prop_assert!(c.raw_scale <= 1.0);
    }

    #[test]
    fn committed_scale_respects_floor(
        floor in 0.01_f64..=1.0,
        steps in prop::collection::vec((0.1_f64..2_000.0, 0.1_f64..2_000.0), 1..20),
    ) {
        let mut target = FitTarget::new(FitOptions::single_line().with_min_scale(floor));
        for (available, needed) in steps {
            target.commit(&measurement(available, needed), ZeroSizePolicy::default());
            let committed = target.committed_scale();
            prop_assert!(committed >= floor - 1e-12);
            prop_assert!(committed <= 1.0);
        }
    }

    #[test]
    fn near_identical_candidates_never_recommit(
        needed in 100.0_f64..1_000.0,
        jitter in -0.009_f64..0.009,
    ) {
        let available = needed * 0.7;
        let mut target = FitTarget::new(FitOptions::single_line().without_floor());
        target.commit(&measurement(available, needed), ZeroSizePolicy::default());
        let first = target.committed_scale();

        // Re-measure at a width that moves the candidate by less than 1%.
        let shifted = available / (first + jitter);
        let report = target.commit(&measurement(available, shifted), ZeroSizePolicy::default());
        let candidate = report.computation.unwrap().scale;
        prop_assume!((candidate - first).abs() <= HYSTERESIS);
        prop_assert!(!report.changed);
        prop_assert_eq!(target.committed_scale(), first);
    }

    #[test]
    fn wrap_overrides_large_shrinks(available in 1.0_f64..1_000.0, factor in 1.2_f64..10.0) {
        let needed = available * factor;
        let mut target = FitTarget::new(FitOptions::single_line().with_wrap(true));
        let report = target.commit(&measurement(available, needed), ZeroSizePolicy::default());
        prop_assert!(report.wrap);
        prop_assert_eq!(target.committed_scale(), 1.0);
    }
}
