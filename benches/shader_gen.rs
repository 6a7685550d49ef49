//! Benchmarks for shader generation and CPU-side operations.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use strange::prelude::*;

fn bench_shader_chunks(c: &mut Criterion) {
    let mut group = c.benchmark_group("shader_chunk");

    let systems: Vec<(&str, Box<dyn OdeSystem>)> = vec![
        ("lorenz", Box::new(Lorenz::default())),
        ("roessler", Box::new(Roessler::default())),
        ("thomas", Box::new(Thomas::default())),
        ("chua", Box::new(ModifiedChua::default())),
    ];

    for (name, system) in &systems {
        group.bench_function(BenchmarkId::new("uniform", name), |b| {
            b.iter(|| black_box(system.shader_chunk()))
        });
        group.bench_function(BenchmarkId::new("baked", name), |b| {
            b.iter(|| black_box(system.shader_chunk_baked()))
        });
    }

    group.bench_function("full_fragment_shader", |b| {
        let lorenz = Lorenz::default();
        b.iter(|| black_box(build_fragment_shader(&lorenz)))
    });

    group.finish();
}

fn bench_integration(c: &mut Criterion) {
    let mut group = c.benchmark_group("integration");

    group.bench_function("lorenz_100_steps", |b| {
        b.iter(|| {
            let mut rk =
                RungeKuttaIntegrator::new(Lorenz::default(), &[1.0, 1.0, 1.0], 0.0, 0.01, 1e-6);
            for _ in 0..100 {
                black_box(rk.step().unwrap().0);
            }
        })
    });

    group.bench_function("thomas_100_steps", |b| {
        b.iter(|| {
            let mut rk =
                RungeKuttaIntegrator::new(Thomas::default(), &[1.0, 0.5, -0.5], 0.0, 0.05, 1e-6);
            for _ in 0..100 {
                black_box(rk.step().unwrap().0);
            }
        })
    });

    group.finish();
}

fn bench_modulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("modulation");

    // mix(20, 28, sin2(2 * t)) - a typical per-frame parameter expression
    let signal = Modulation::ternary(
        "mix",
        20.0,
        28.0,
        Modulation::unary("sin2", Modulation::binary("mul", 2.0, Modulation::now()).unwrap())
            .unwrap(),
    )
    .unwrap();

    group.bench_function("eval_tree", |b| {
        let clock = Clock::new(3.7, 1.0 / 60.0);
        b.iter(|| black_box(signal.eval(&clock)))
    });

    group.finish();
}

criterion_group!(benches, bench_shader_chunks, bench_integration, bench_modulation);
criterion_main!(benches);
