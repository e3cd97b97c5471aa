// Copyright 2025 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use cardstock_card::{Card, CardConfig};
use cardstock_fit::{
    ContainerSize, FitOptions, FitTarget, Measurement, ZeroSizePolicy, compute_scale,
};
use cardstock_timing::CoalescingScheduler;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_f64(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn measurements(n: usize, seed: u64) -> Vec<Measurement> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| {
            let container = ContainerSize::bounded(
                50.0 + rng.next_f64() * 500.0,
                20.0 + rng.next_f64() * 200.0,
            );
            let natural = Size::new(
                10.0 + rng.next_f64() * 1_000.0,
                10.0 + rng.next_f64() * 300.0,
            );
            Measurement::new(container, natural)
        })
        .collect()
}

fn bench_compute(c: &mut Criterion) {
    let inputs = measurements(1_000, 7);
    let options = FitOptions::bounded().with_wrap(true);
    c.bench_function("fit/compute_scale_1k", |b| {
        b.iter(|| {
            for m in &inputs {
                black_box(compute_scale(black_box(m), &options));
            }
        });
    });
}

fn bench_commit(c: &mut Criterion) {
    let inputs = measurements(1_000, 11);
    c.bench_function("fit/commit_with_hysteresis_1k", |b| {
        b.iter_batched(
            || FitTarget::new(FitOptions::single_line()),
            |mut target| {
                for m in &inputs {
                    black_box(target.commit(m, ZeroSizePolicy::default()));
                }
                target
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_coalesce(c: &mut Criterion) {
    c.bench_function("timing/coalesce_burst_256_keys", |b| {
        b.iter_batched(
            CoalescingScheduler::<u32, u32>::new,
            |mut scheduler| {
                let mut now = 0;
                for round in 0..16_u32 {
                    for key in 0..256_u32 {
                        scheduler.schedule(key, round, 10, now);
                    }
                    now += 1;
                }
                black_box(scheduler.poll(now + 10))
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_card_tick(c: &mut Criterion) {
    let measure = |text: &str, size: f64| Size::new(text.len() as f64 * size * 0.6, size * 1.2);
    c.bench_function("card/tick_200_text_elements", |b| {
        b.iter_batched(
            || {
                let mut card = Card::new(Size::new(2_000.0, 2_000.0), CardConfig::default());
                for i in 0..200_u32 {
                    let x = f64::from(i % 20) * 100.0;
                    let y = f64::from(i / 20) * 100.0;
                    let frame = Rect::new(x, y, x + 90.0, y + 40.0);
                    card.add_text("The quick brown fox", 18.0, frame, 0);
                }
                card
            },
            |mut card| black_box(card.tick(0, &measure)),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_compute, bench_commit, bench_coalesce, bench_card_tick);
criterion_main!(benches);
