use grid_stepfinding::{GridModel, Heuristic, SearchEngine, StepResult};

// In this demo a path is found on a grid with shape
// S..#....
// ...#....
// ...#....
// ...#....
// ...#....
// ...#....
// ........
// .......G
// stepping the search one unit of work at a time.
fn main() {
    env_logger::init();
    let mut grid = GridModel::new(8).unwrap();
    for y in 0..6 {
        grid.set_wall(3, y, true);
    }
    let mut engine = SearchEngine::new(&mut grid, Heuristic::Manhattan, false).unwrap();
    let mut steps = 0;
    let mut renders = 0;
    let path = loop {
        steps += 1;
        match engine.step() {
            StepResult::Found(path) => break path,
            StepResult::NotFound => {
                println!("no path exists");
                return;
            }
            // A real driver would re-render here and skip plain Searching
            // results.
            StepResult::StateChanged => renders += 1,
            StepResult::Searching => {}
        }
    };
    let expanded = engine.expanded();
    drop(engine);
    grid.apply_path(&path);
    println!("{grid}");
    println!(
        "path of {} cells after {steps} steps ({expanded} expansions, {renders} visible changes)",
        path.len()
    );
}
