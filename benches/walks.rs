use criterion::{criterion_group, criterion_main, Criterion};
use kacwalk::*;
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn kac_walk(c: &mut Criterion) {
    let params = KacParameters::new(4.0, 2.0, 10.0, Discretization::Steps(2000));
    let axis_flip = KacWalk::new(params).unwrap();
    let redraw = KacWalk::new(params)
        .unwrap()
        .with_variant(KacVariant::DirectionRedraw);
    let mut rng = StdRng::seed_from_u64(0);

    c.bench_function("kac axis flip 2000 steps", |b| {
        b.iter(|| black_box(axis_flip.simulate_with(&mut rng)))
    });
    c.bench_function("kac direction redraw 2000 steps", |b| {
        b.iter(|| black_box(redraw.simulate_with(&mut rng)))
    });
}

fn brownian(c: &mut Criterion) {
    let bm = BrownianMotion::new(10.0, 2000).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    c.bench_function("brownian 2000 steps", |b| {
        b.iter(|| black_box(bm.simulate_with(&mut rng)))
    });
}

fn sweep(c: &mut Criterion) {
    let sweep = Sweep::default();
    let mut rng = StdRng::seed_from_u64(0);
    c.bench_function("default sweep", |b| {
        b.iter(|| black_box(sweep.run_with(&mut rng).unwrap()))
    });
}

fn norm_curves(c: &mut Criterion) {
    let model = VelocityFieldModel::default();
    let times = Grid::new(0.0, 0.99, 10_000).values();
    c.bench_function("norm curves 10k", |b| {
        b.iter(|| black_box(model.norm_curves(&times)))
    });
}

criterion_group!(benches, kac_walk, brownian, sweep, norm_curves);
criterion_main!(benches);
