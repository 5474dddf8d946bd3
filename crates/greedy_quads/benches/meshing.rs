use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::IVec3;

use greedy_quads::{greedy_mesh, greedy_mesh_faced, DenseOccupancy};

fn sphere(size: i32) -> DenseOccupancy {
    let center = IVec3::splat(size / 2);
    let radius_sq = (size / 2 - 1).pow(2);
    DenseOccupancy::from_fn([size; 3], |p| (p - center).length_squared() <= radius_sq).unwrap()
}

fn checkerboard(size: i32) -> DenseOccupancy {
    DenseOccupancy::from_fn([size; 3], |p| (p.x + p.y + p.z) % 2 == 0).unwrap()
}

fn meshing(c: &mut Criterion) {
    let _ = env_logger::try_init();

    let mut group = c.benchmark_group("greedy_mesh");
    for size in [16, 32, 64] {
        let volume = sphere(size);
        group.bench_with_input(BenchmarkId::new("sphere", size), &volume, |b, volume| {
            b.iter(|| greedy_mesh(black_box(volume), volume.dims()))
        });

        let volume = checkerboard(size);
        group.bench_with_input(BenchmarkId::new("checkerboard", size), &volume, |b, volume| {
            b.iter(|| greedy_mesh(black_box(volume), volume.dims()))
        });
    }
    group.finish();

    let volume = sphere(32);
    c.bench_function("greedy_mesh_faced/sphere/32", |b| {
        b.iter(|| greedy_mesh_faced(black_box(&volume), volume.dims()))
    });
}

criterion_group!(benches, meshing);
criterion_main!(benches);
