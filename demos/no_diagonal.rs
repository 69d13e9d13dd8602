use grid_stepfinding::{GridModel, Heuristic, SearchEngine, StepResult};

// Runs the same search with and without diagonal movement under the octile
// model and compares the resulting path costs.
fn main() {
    for allow_diagonal in [false, true] {
        let mut grid = GridModel::new(10).unwrap();
        for y in 2..9 {
            grid.set_wall(5, y, true);
        }
        let mut engine = SearchEngine::new(&mut grid, Heuristic::Octile, allow_diagonal).unwrap();
        let path = loop {
            match engine.step() {
                StepResult::Found(path) => break path,
                StepResult::NotFound => unreachable!("grid is connected"),
                _ => {}
            }
        };
        let goal = engine.end();
        let cost = engine.grid().cell(goal.x, goal.y).unwrap().g;
        drop(engine);
        grid.apply_path(&path);
        println!("{grid}");
        println!("diagonal: {allow_diagonal}; cost: {cost} ({} cells)\n", path.len());
    }
}
