// Criterion benchmarks for Commute Match

use commute_match::core::{MatchEngine, RouteOverlapScorer, TransitGraph};
use commute_match::models::NetworkData;
use commute_match::services::ProfileGenerator;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Grid of `side * side` stations joined to their right and lower neighbors
fn create_grid(side: usize) -> TransitGraph {
    let name = |r: usize, c: usize| format!("R{}C{}", r, c);
    let mut stations = Vec::new();
    let mut connections = Vec::new();
    for r in 0..side {
        for c in 0..side {
            stations.push(name(r, c));
            if c + 1 < side {
                connections.push((name(r, c), name(r, c + 1)));
            }
            if r + 1 < side {
                connections.push((name(r, c), name(r + 1, c)));
            }
        }
    }
    TransitGraph::new(&NetworkData::new(stations, connections))
}

fn bench_shortest_path(c: &mut Criterion) {
    let graph = create_grid(20);
    c.bench_function("shortest_path_grid_20", |b| {
        b.iter(|| graph.find_shortest_path(black_box("R0C0"), black_box("R19C19")));
    });
}

fn bench_route_overlap(c: &mut Criterion) {
    let graph = create_grid(20);
    let path_a = graph.find_shortest_path("R0C0", "R19C19");
    let path_b = graph.find_shortest_path("R0C5", "R19C10");
    let scorer = RouteOverlapScorer::new();
    c.bench_function("route_overlap", |b| {
        b.iter(|| scorer.score(black_box(&path_a), black_box(&path_b)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let graph = Arc::new(create_grid(10));
    let generator = ProfileGenerator::new(&graph);

    let mut group = c.benchmark_group("matching");

    for user_count in [10, 50, 100].iter() {
        let mut engine = MatchEngine::with_default_weights(Arc::clone(&graph));
        let profiles = generator
            .generate(*user_count, &mut StdRng::seed_from_u64(42))
            .unwrap();
        for profile in profiles {
            engine.add_user(profile).unwrap();
        }

        group.bench_with_input(BenchmarkId::from_parameter(user_count), user_count, |b, _| {
            b.iter(|| engine.find_matches(black_box("user1"), 0.3, 10));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_shortest_path, bench_route_overlap, bench_matching);
criterion_main!(benches);
