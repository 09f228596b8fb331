//! Benchmarks for the Lazor solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lazor::beam::simulate;
use lazor::bff;
use lazor::blocks::Inventory;
use lazor::enumerate::{Combinations, DistinctPermutations};
use lazor::solver::{CancelToken, SolverConfig};

const MAD_1: &str = include_str!("../puzzles/mad_1.bff");
const TINY_5: &str = include_str!("../puzzles/tiny_5.bff");

/// Benchmark the complete search on an open 4x4 board.
fn bench_solve(c: &mut Criterion) {
    let puzzle = bff::parse(MAD_1).unwrap();

    c.bench_function("solve_mad_1", |b| b.iter(|| black_box(&puzzle).solve()));
}

/// Compare sequential and parallel search on the same board.
fn bench_solve_parallel(c: &mut Criterion) {
    let puzzle = bff::parse(MAD_1).unwrap();
    let config = SolverConfig {
        parallel: true,
        ..SolverConfig::default()
    };

    let mut group = c.benchmark_group("mad_1");
    group.sample_size(20);
    group.bench_function("parallel", |b| {
        b.iter(|| black_box(&puzzle).solve_with(&config, &CancelToken::new()))
    });
    group.finish();
}

/// Benchmark a single beam simulation of a solved board.
fn bench_simulate(c: &mut Criterion) {
    let puzzle = bff::parse(TINY_5).unwrap();
    let placement = puzzle.solve().unwrap().unwrap();
    let bounds = puzzle.grid.bounds();

    c.bench_function("simulate_tiny_5", |b| {
        b.iter(|| simulate(bounds, black_box(&placement), &puzzle.emitters))
    });
}

/// Benchmark walking every candidate without simulating.
fn bench_enumerate(c: &mut Criterion) {
    let puzzle = bff::parse(MAD_1).unwrap();
    let cells = puzzle.grid.empty_cells();
    let inventory = Inventory::new(2, 1, 1);

    c.bench_function("enumerate_candidates", |b| {
        b.iter(|| {
            DistinctPermutations::new(inventory.to_multiset())
                .map(|ordering| Combinations::new(black_box(&cells), ordering.len()).count())
                .sum::<usize>()
        })
    });
}

criterion_group!(
    benches,
    bench_solve,
    bench_solve_parallel,
    bench_simulate,
    bench_enumerate
);
criterion_main!(benches);
