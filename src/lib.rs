//! # grid_stepfinding
//!
//! Stepwise [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding
//! on a square grid. Instead of running the search to completion, the
//! [SearchEngine] performs exactly one bounded unit of work per
//! [step](SearchEngine::step) call (selecting a frontier node, or relaxing a
//! single neighbor) and then yields, so an external driver can render
//! progress, pause, resume or single-step at its own pace.
//!
//! The crate is the algorithmic core only: it owns the grid model, cost
//! bookkeeping and heuristics, and exposes read-only per-cell introspection
//! for a renderer. It has no notion of time, no render loop and no UI.
//!
//! ```
//! use grid_stepfinding::{GridModel, Heuristic, SearchEngine, StepResult};
//!
//! let mut grid = GridModel::new(5).unwrap();
//! grid.set_wall(2, 1, true);
//! let mut engine = SearchEngine::new(&mut grid, Heuristic::Manhattan, false).unwrap();
//! let path = loop {
//!     match engine.step() {
//!         StepResult::Found(path) => break path,
//!         StepResult::NotFound => panic!("goal should be reachable"),
//!         StepResult::Searching | StepResult::StateChanged => continue,
//!     }
//! };
//! grid.apply_path(&path);
//! println!("{grid}");
//! ```

mod error;
pub mod grid;
pub mod heuristic;
pub mod search;

pub use error::GridError;
pub use grid::{Cell, CellState, Endpoint, GridModel};
pub use heuristic::Heuristic;
pub use search::{SearchEngine, StepResult};
