//! Benchmarks for the per-frame update and shape generation.
//!
//! Run with: `cargo bench` (add `--features parallel` for the rayon kernel)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use zen_particles::{shapes, InteractionState, MorphConfig, MorphEngine, Silhouette};

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    for count in [1_000_u32, 10_000, 50_000] {
        let config = MorphConfig::default()
            .with_particle_count(count)
            .with_silhouette(Silhouette::RingedPlanet);

        group.bench_with_input(BenchmarkId::new("idle", count), &config, |b, config| {
            let mut engine = MorphEngine::new(count as usize).with_seed(1);
            b.iter(|| engine.advance(black_box(1.0 / 60.0), config, InteractionState::idle()))
        });

        group.bench_with_input(BenchmarkId::new("open_hand", count), &config, |b, config| {
            let mut engine = MorphEngine::new(count as usize).with_seed(1);
            let open = InteractionState::new(0.8, true);
            b.iter(|| engine.advance(black_box(1.0 / 60.0), config, open))
        });
    }

    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for silhouette in Silhouette::ALL {
        group.bench_function(silhouette.name(), |b| {
            b.iter(|| black_box(shapes::generate(silhouette, 10_000, Some(7))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_advance, bench_generate);
criterion_main!(benches);
