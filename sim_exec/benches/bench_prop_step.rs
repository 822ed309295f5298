//! # Propagator Step Benchmark

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::DVector;

use sim_lib::propagator::LtiModel;

fn prop_step_benchmark(c: &mut Criterion) {
    // ---- Build the reaction-wheel plant ----

    let body_inertia_kgm2 = 0.082;
    let wheel_inertia_kgm2 = 2.0 * 0.078359 * 0.078359;

    let model = LtiModel::reaction_wheel(body_inertia_kgm2, wheel_inertia_kgm2);

    let x0 = DVector::from_vec(vec![100.0, 0.0, 0.0, 0.0]);
    let u = DVector::from_element(1, 0.5);
    let dt_s = 0.001;

    // ---- Benchmark a full run's worth of steps ----

    c.bench_function("prop 10k steps", |b| {
        b.iter(|| {
            let mut x = x0.clone();
            for _ in 0..10_000 {
                model.step(&mut x, &u, dt_s).unwrap();
            }
            x
        })
    });
}

criterion_group!(benches, prop_step_benchmark);
criterion_main!(benches);
