use grid_stepfinding::{GridModel, Heuristic, SearchEngine, StepResult};

// The goal is fully walled in, so the search exhausts the open set and
// reports NotFound instead of looping forever.
fn main() {
    let mut grid = GridModel::new(8).unwrap();
    for (x, y) in [(6, 7), (6, 6), (7, 6)] {
        grid.set_wall(x, y, true);
    }
    let mut engine = SearchEngine::new(&mut grid, Heuristic::Euclidean, true).unwrap();
    let mut steps = 0;
    loop {
        steps += 1;
        match engine.step() {
            StepResult::Found(_) => unreachable!("goal is walled in"),
            StepResult::NotFound => break,
            _ => {}
        }
    }
    let expanded = engine.expanded();
    drop(engine);
    println!("{grid}");
    println!("no path: open set exhausted after {steps} steps ({expanded} expansions)");
}
