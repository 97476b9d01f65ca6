use criterion::{criterion_group, criterion_main, Criterion, black_box};

use glam::Vec3;
use meadow::grass::{instances, wind_displacement, GrassConfig, WindConfig, WindNoise};
use meadow::terrain::TerrainMesh;

fn bench_instances_10k(c: &mut Criterion) {
    let config = GrassConfig::rolling_hills();
    let params = instances::PlacementParams {
        count: 10_000,
        ..config.placement()
    };

    c.bench_function("instances_10k_hills", |b| {
        b.iter(|| instances::generate(black_box(&params), &config.terrain));
    });
}

fn bench_terrain_mesh_128(c: &mut Criterion) {
    let config = GrassConfig::rolling_hills();

    c.bench_function("terrain_mesh_128_hills", |b| {
        b.iter(|| TerrainMesh::build(30.0, 30.0, black_box(128), &config.terrain));
    });
}

fn bench_wind_displacement(c: &mut Criterion) {
    let wind = WindConfig::default();
    let noise = WindNoise::new(0);

    c.bench_function("wind_displacement_1k_vertices", |b| {
        let mut frame = 0u32;
        b.iter(|| {
            frame += 1;
            let t = frame as f32 / 60.0;
            let mut acc = Vec3::ZERO;
            for i in 0..1000 {
                let pos = Vec3::new((i % 32) as f32 * 0.3, 0.0, (i / 32) as f32 * 0.3);
                acc += wind_displacement(black_box(pos), 1.0, &wind, t, &noise);
            }
            acc
        });
    });
}

criterion_group!(
    benches,
    bench_instances_10k,
    bench_terrain_mesh_128,
    bench_wind_displacement,
);
criterion_main!(benches);
