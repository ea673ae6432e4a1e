use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use strata_mesh_cpu::MarchingCubes;
use strata_world::{ChunkCoord, CHUNK_SIZE, World, WorldGenMode};

fn bench_extract_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("marching_flat");
    let world = World::new(0xC0FFEE, WorldGenMode::Flat { surface_y: 16.0 }, CHUNK_SIZE);
    let grid = world.generate(ChunkCoord::new(0, 0, 0));
    let mc = MarchingCubes::default();
    group.bench_function("flat_32", |b| {
        b.iter(|| black_box(mc.generate_mesh(&grid, 1)))
    });
    group.finish();
}

fn bench_generate_and_extract_normal(c: &mut Criterion) {
    let mut group = c.benchmark_group("marching_normal");
    group.measurement_time(Duration::from_secs(10));
    let world = World::new(69420, WorldGenMode::Normal, CHUNK_SIZE);
    let mc = MarchingCubes::default();
    group.bench_function("generate_extract_32", |b| {
        b.iter(|| {
            let grid = world.generate(ChunkCoord::new(0, 0, 0));
            black_box(mc.generate_mesh(&grid, 1))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_extract_flat, bench_generate_and_extract_normal);
criterion_main!(benches);
