//! Criterion benchmarks for u-tsp.
//!
//! Uses synthetic instances (points on a circle, scattered in a seeded
//! order) so every engine kind runs the same workload.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_tsp::city::{CityMap, CostMode};
use u_tsp::ga::operators::{greedy_crossover, two_opt};
use u_tsp::ga::{Engine, EngineKind, TspConfig, TspRunner};
use u_tsp::random::{create_rng, shuffle};

// ===========================================================================
// Instances
// ===========================================================================

fn circle(n: usize, seed: u64) -> CityMap {
    let mut angles: Vec<usize> = (0..n).collect();
    shuffle(&mut angles, &mut create_rng(seed));
    let coords: Vec<(i32, i32)> = angles
        .iter()
        .map(|&k| {
            let a = k as f64 * std::f64::consts::TAU / n as f64;
            ((a.cos() * 1000.0).round() as i32, (a.sin() * 1000.0).round() as i32)
        })
        .collect();
    CityMap::from_coords(&coords)
}

fn random_order(n: usize, seed: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..n).collect();
    shuffle(&mut order, &mut create_rng(seed));
    order
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_engine_kinds(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_generations");
    group.sample_size(10);

    let map = Arc::new(circle(50, 7));
    for kind in EngineKind::ALL {
        let config = TspConfig::default()
            .with_population_size(200)
            .with_engine(kind)
            .with_parallel(false);
        group.bench_with_input(BenchmarkId::from_parameter(kind), &config, |b, config| {
            b.iter(|| {
                let mut engine = Engine::from_seed(42);
                engine.initialize(config, map.clone()).unwrap();
                for _ in 0..50 {
                    engine.next_generation().unwrap();
                }
                black_box(engine.best_chromosome().map(|t| t.total_distance()))
            })
        });
    }
    group.finish();
}

fn bench_runner(c: &mut Criterion) {
    let mut group = c.benchmark_group("runner");
    group.sample_size(10);

    for &n in &[20usize, 50, 100] {
        let map = Arc::new(circle(n, 3));
        let config = TspConfig::default()
            .with_population_size(100)
            .with_stagnation_limit(20)
            .with_max_generations(200)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &config, |b, config| {
            b.iter(|| {
                let result = TspRunner::run(map.clone(), black_box(config));
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("operators");

    for &n in &[50usize, 200] {
        let map = circle(n, 11);
        let p1 = random_order(n, 1);
        let p2 = random_order(n, 2);

        group.bench_with_input(BenchmarkId::new("greedy_crossover", n), &n, |b, _| {
            b.iter(|| black_box(greedy_crossover(&p1, &p2, &map, CostMode::Plain)))
        });
        group.bench_with_input(BenchmarkId::new("two_opt", n), &n, |b, _| {
            b.iter(|| {
                let mut order = p1.clone();
                black_box(two_opt(&mut order, &map))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_engine_kinds, bench_runner, bench_operators);
criterion_main!(benches);
