// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Timestep Benchmarks
//!
//! Cost of one controller step for each rule across array sizes, with every
//! presynaptic and postsynaptic neuron spiking so every cell is pulsed.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use memristor_device::{DeviceParameters, PowerLawMemristor};
use memristor_plasticity::{
    default_encoders, Bcm, ControllerConfig, LearningRule, MemristorController, Oja, Pes,
};

const SIZES: &[usize] = &[4, 16, 64];

fn bench_rule<R, F>(c: &mut Criterion, group_name: &str, make_rule: F)
where
    R: LearningRule,
    F: Fn(usize) -> R,
{
    let mut group = c.benchmark_group(group_name);

    for &n in SIZES {
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let config = ControllerConfig::new(n, n).with_logging(false).with_seed(1);
            let mut controller: MemristorController<PowerLawMemristor, R> =
                MemristorController::new(make_rule(n), config, DeviceParameters::default())
                    .expect("controller");
            let activities = vec![1.0; controller.activity_len()];
            let mut t = 0.0;
            b.iter(|| {
                t += 0.001;
                black_box(controller.step(t, black_box(&activities)).expect("step"))
            });
        });
    }

    group.finish();
}

fn bench_oja(c: &mut Criterion) {
    bench_rule(c, "oja_step", |_| Oja::default());
}

fn bench_bcm(c: &mut Criterion) {
    bench_rule(c, "bcm_step", |_| Bcm::default());
}

fn bench_pes(c: &mut Criterion) {
    bench_rule(c, "pes_step", |n| {
        Pes::with_encoders(default_encoders(n, 1)).expect("encoders")
    });
}

criterion_group!(benches, bench_oja, bench_bcm, bench_pes);
criterion_main!(benches);
