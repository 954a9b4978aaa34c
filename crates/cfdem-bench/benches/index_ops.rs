//! Criterion benchmarks for spatial index construction and lookup.

use std::hint::black_box;

use cfdem_bench::reference_profile;
use cfdem_drag::ForceLaw;
use cfdem_space::SpatialIndex;
use cfdem_test_utils::block_mesh;
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: build the index over the 16K-cell reference channel.
fn bench_build_16k(c: &mut Criterion) {
    let case = reference_profile(42, ForceLaw::Stokes);
    let geometry = case.config.fluid.geometry;
    let mesh = block_mesh("mesh", &geometry);

    c.bench_function("index_build_16k", |b| {
        b.iter(|| {
            let index = SpatialIndex::build(&mesh, &geometry).unwrap();
            black_box(&index);
        });
    });
}

/// Benchmark: locate 1K particles in the reference channel.
fn bench_locate_1k(c: &mut Criterion) {
    let case = reference_profile(42, ForceLaw::Stokes);
    let geometry = case.config.fluid.geometry;
    let index = SpatialIndex::build(&block_mesh("mesh", &geometry), &geometry).unwrap();
    let points: Vec<_> = case.flow.iter_particles().map(|p| p.coordinates).collect();

    c.bench_function("index_locate_1k", |b| {
        b.iter(|| {
            for point in &points {
                black_box(index.locate(*point).unwrap());
            }
        });
    });
}

criterion_group!(benches, bench_build_16k, bench_locate_1k);
criterion_main!(benches);
