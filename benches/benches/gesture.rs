// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cardstock_gesture::{
    CaptureSet, ElementTransform, GestureConfig, GestureRouter, GestureSession, PointerDisposition,
    PointerEvent, PointerId,
};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;

fn bench_pinch(c: &mut Criterion) {
    let config = GestureConfig::default();
    c.bench_function("gesture/pinch_1k_moves", |b| {
        b.iter_batched(
            || {
                let mut session = GestureSession::new();
                let t = ElementTransform::IDENTITY;
                session.on_down(PointerId(1), Point::new(0.0, 0.0), t, &mut ());
                session.on_down(PointerId(2), Point::new(100.0, 0.0), t, &mut ());
                session
            },
            |mut session| {
                let mut t = ElementTransform::IDENTITY;
                let mut x = 100.0;
                for _ in 0..1_000 {
                    x += 0.5;
                    let pos = Point::new(x, 0.0);
                    if let Some(update) = session.on_move(PointerId(2), pos, t, &config) {
                        t = update.apply_to(t);
                    }
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_router_pan(c: &mut Criterion) {
    c.bench_function("gesture/router_pan_1k_moves", |b| {
        b.iter_batched(
            || {
                let mut capture = CaptureSet::new();
                let mut router = GestureRouter::<u32>::default();
                router.set_manipulable(1, true, &mut capture);
                router.select(1, &mut capture);
                let t = ElementTransform::new(2.0, kurbo::Vec2::ZERO);
                let down = PointerEvent::down(PointerId(1), Point::ORIGIN);
                router.handle_pointer(1, down, t, &mut capture);
                (router, capture)
            },
            |(mut router, mut capture)| {
                let mut t = ElementTransform::new(2.0, kurbo::Vec2::ZERO);
                let mut x = 0.0;
                for _ in 0..1_000 {
                    x += 0.1;
                    let event = PointerEvent::moved(PointerId(1), Point::new(x, -x));
                    if let PointerDisposition::Manipulate(Some(update)) =
                        router.handle_pointer(1, event, t, &mut capture)
                    {
                        t = update.apply_to(t);
                    }
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_pinch, bench_router_pan);
criterion_main!(benches);
