// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the pan and pinch bounds.

use cardstock_gesture::{ElementTransform, GestureConfig, GestureSession, PointerId};
use kurbo::{Point, Vec2};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = Point> {
    (-2_000.0_f64..2_000.0, -2_000.0_f64..2_000.0).prop_map(|(x, y)| Point::new(x, y))
}

proptest! {
    #[test]
    fn pinch_scale_stays_in_bounds(
        start in 0.5_f64..=3.0,
        a in point(),
        b in point(),
        moves in prop::collection::vec(point(), 1..16),
    ) {
        let config = GestureConfig::default();
        let mut session = GestureSession::new();
        let mut current = ElementTransform::new(start, Vec2::ZERO);
        session.on_down(PointerId(1), a, current, &mut ());
        session.on_down(PointerId(2), b, current, &mut ());
        for pos in moves {
            if let Some(update) = session.on_move(PointerId(2), pos, current, &config) {
                current = update.apply_to(current);
            }
            prop_assert!(current.scale >= config.min_scale());
            prop_assert!(current.scale <= config.max_scale());
            let limit = config.max_pan(current.scale);
            prop_assert!(current.pan.x.abs() <= limit && current.pan.y.abs() <= limit);
        }
    }

    #[test]
    fn pan_stays_in_bounds(
        scale in 0.5_f64..=3.0,
        origin in point(),
        moves in prop::collection::vec(point(), 1..16),
    ) {
        let config = GestureConfig::default();
        let mut session = GestureSession::new();
        let mut current = ElementTransform::new(scale, Vec2::ZERO);
        session.on_down(PointerId(7), origin, current, &mut ());
        let limit = config.max_pan(scale);
        for pos in moves {
            if let Some(update) = session.on_move(PointerId(7), pos, current, &config) {
                prop_assert!(update.scale.is_none());
                current = update.apply_to(current);
            }
            prop_assert!(current.pan.x.abs() <= limit && current.pan.y.abs() <= limit);
        }
    }

    #[test]
    fn wheel_scale_stays_in_bounds(
        start in 0.5_f64..=3.0,
        deltas in prop::collection::vec(-5_000.0_f64..5_000.0, 1..16),
    ) {
        let config = GestureConfig::default();
        let mut capture = cardstock_gesture::CaptureSet::new();
        let mut router = cardstock_gesture::GestureRouter::new(config);
        router.set_manipulable(0_u8, true, &mut capture);
        router.select(0_u8, &mut capture);
        let mut current = ElementTransform::new(start, Vec2::ZERO);
        for dy in deltas {
            let disposition = router.handle_wheel(0_u8, dy, current);
            prop_assert!(disposition.prevent_default());
            if let cardstock_gesture::WheelDisposition::Consumed(Some(update)) = disposition {
                current = update.apply_to(current);
            }
            prop_assert!(current.scale >= config.min_scale());
            prop_assert!(current.scale <= config.max_scale());
        }
    }
}
