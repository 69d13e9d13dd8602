use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use grid_stepfinding::{GridModel, Heuristic, SearchEngine};

/// A size x size grid with wall columns every fourth column, each with a
/// single gap, so every search has to weave through the whole grid.
fn bench_grid(size: usize) -> GridModel {
    let mut grid = GridModel::new(size).unwrap();
    for cx in (2..size - 2).step_by(4) {
        let gap = (cx * 7) % size;
        for y in 0..size {
            if y != gap {
                grid.set_wall(cx as i32, y as i32, true);
            }
        }
    }
    grid
}

fn run_search(grid: &mut GridModel, heuristic: Heuristic, allow_diagonal: bool) {
    let mut engine = SearchEngine::new(grid, heuristic, allow_diagonal).unwrap();
    while !engine.step().is_terminal() {}
}

fn stepped_search(c: &mut Criterion) {
    let grid = bench_grid(64);
    c.bench_function("stepped_astar_64_octile_diagonal", |b| {
        b.iter_batched(
            || grid.clone(),
            |mut grid| run_search(&mut grid, Heuristic::Octile, true),
            BatchSize::SmallInput,
        )
    });
    c.bench_function("stepped_astar_64_manhattan_cardinal", |b| {
        b.iter_batched(
            || grid.clone(),
            |mut grid| run_search(&mut grid, Heuristic::Manhattan, false),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, stepped_search);
criterion_main!(benches);
