//! The stepwise A* state machine.

use std::cmp::Ordering;
use std::collections::VecDeque;

use fxhash::{FxBuildHasher, FxHashSet};
use grid_util::point::Point;
use indexmap::IndexSet;
use log::{debug, info};

use crate::error::GridError;
use crate::grid::{CellState, Endpoint, GridModel};
use crate::heuristic::Heuristic;

type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// Outcome of a single [SearchEngine::step] call.
///
/// `Searching` and `StateChanged` both mean the search is still in progress;
/// `StateChanged` is returned exactly when the step visibly changed a cell's
/// state (a cell was marked Open or Closed), so a driver that only re-renders
/// on visible change can key off it. `Found` and `NotFound` are terminal.
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult {
    /// One unit of work done, nothing visible changed.
    Searching,
    /// One unit of work done and some cell's visible state changed.
    StateChanged,
    /// The goal was reached. Carries the Start→End route, inclusive of both
    /// endpoints.
    Found(Vec<Point>),
    /// The open set is exhausted and the goal is unreachable. A normal
    /// outcome, not an error.
    NotFound,
}

impl StepResult {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepResult::Found(_) | StepResult::NotFound)
    }
}

/// Incremental A* over a [GridModel].
///
/// The engine borrows the grid mutably for its whole lifetime, which makes
/// the single-writer contract structural: no grid edits and no second search
/// can happen while an engine is alive. Dropping the engine releases the
/// grid; no other teardown is needed.
///
/// Start and End positions are snapshotted at construction and not
/// re-resolved afterwards. Once a terminal result has been returned, further
/// [step](Self::step) calls are idempotent no-ops repeating that result.
pub struct SearchEngine<'g> {
    grid: &'g mut GridModel,
    heuristic: Heuristic,
    allow_diagonal: bool,
    /// Frontier cells by arena index, insertion-ordered so equal-(f, h) ties
    /// resolve deterministically.
    open: FxIndexSet<usize>,
    closed: FxHashSet<usize>,
    /// Unexamined neighbors of `current`, drained one per step.
    neighbor_queue: VecDeque<usize>,
    current: Option<usize>,
    start: usize,
    end: usize,
    terminal: Option<StepResult>,
}

impl<'g> SearchEngine<'g> {
    /// Binds a new search to `grid`. Snapshots the Start and End cells and
    /// seeds the frontier with Start.
    ///
    /// Fails with [GridError::InvalidGrid] if an endpoint is missing, which
    /// the grid's own invariant makes unreachable in practice. The one
    /// legitimate exception is the 1×1 grid, where the single cell is both
    /// endpoints at once.
    pub fn new(
        grid: &'g mut GridModel,
        heuristic: Heuristic,
        allow_diagonal: bool,
    ) -> Result<SearchEngine<'g>, GridError> {
        let end = grid
            .find_index(CellState::End)
            .ok_or(GridError::InvalidGrid { missing: Endpoint::End })?;
        let start = match grid.find_index(CellState::Start) {
            Some(ix) => ix,
            None if grid.size() == 1 => end,
            None => return Err(GridError::InvalidGrid { missing: Endpoint::Start }),
        };
        let end_point = grid.cell_at(end).point();
        let start_cell = grid.cell_at_mut(start);
        let h = heuristic.distance(start_cell.point(), end_point);
        start_cell.g = 0.0;
        start_cell.h = h;
        start_cell.f = h;
        start_cell.parent = None;
        debug!(
            "search bound: {} -> {}, {:?}, diagonal: {}",
            start_cell.point(),
            end_point,
            heuristic,
            allow_diagonal
        );
        let mut open = FxIndexSet::default();
        open.insert(start);
        Ok(SearchEngine {
            grid,
            heuristic,
            allow_diagonal,
            open,
            closed: FxHashSet::default(),
            neighbor_queue: VecDeque::new(),
            current: None,
            start,
            end,
            terminal: None,
        })
    }

    /// Performs exactly one unit of work: relaxes one pending neighbor, or
    /// selects the next frontier cell for expansion. Never loops internally.
    pub fn step(&mut self) -> StepResult {
        if let Some(terminal) = &self.terminal {
            return terminal.clone();
        }
        if let Some(ix) = self.neighbor_queue.pop_front() {
            return self.relax(ix);
        }
        let Some(current) = self.select_current() else {
            info!("open set exhausted, goal is unreachable");
            return self.finish(StepResult::NotFound);
        };
        self.open.shift_remove(&current);
        self.closed.insert(current);
        self.current = Some(current);
        let mut changed = false;
        let cell = self.grid.cell_at_mut(current);
        if !cell.state.is_endpoint() {
            cell.state = CellState::Closed;
            changed = true;
        }
        if current == self.end {
            let path = self.reconstruct();
            info!("goal reached after {} expansions", self.closed.len());
            return self.finish(StepResult::Found(path));
        }
        let (x, y) = {
            let cell = self.grid.cell_at(current);
            (cell.x, cell.y)
        };
        let queue: VecDeque<usize> = self
            .grid
            .neighbors(x, y, self.allow_diagonal)
            .into_iter()
            .filter_map(|p| self.grid.index_of(p.x, p.y))
            .collect();
        self.neighbor_queue = queue;
        if changed {
            StepResult::StateChanged
        } else {
            StepResult::Searching
        }
    }

    /// Relaxes one popped neighbor against `current`.
    fn relax(&mut self, ix: usize) -> StepResult {
        // Walls never enter the queue and the grid is frozen mid-search, but
        // the skip mirrors the closed-set one and costs nothing.
        if self.grid.cell_at(ix).state.blocks() || self.closed.contains(&ix) {
            return StepResult::Searching;
        }
        let Some(current) = self.current else {
            return StepResult::Searching;
        };
        let (current_point, current_g) = {
            let cell = self.grid.cell_at(current);
            (cell.point(), cell.g)
        };
        let neighbor_point = self.grid.cell_at(ix).point();
        let tentative = current_g + self.heuristic.distance(current_point, neighbor_point);
        let in_open = self.open.contains(&ix);
        if in_open && tentative >= self.grid.cell_at(ix).g {
            return StepResult::Searching;
        }
        let end_point = self.grid.cell_at(self.end).point();
        let h = self.heuristic.distance(neighbor_point, end_point);
        let cell = self.grid.cell_at_mut(ix);
        cell.g = tentative;
        cell.h = h;
        cell.f = tentative + h;
        cell.parent = Some(current);
        let mut changed = false;
        if !in_open {
            if !cell.state.is_endpoint() {
                cell.state = CellState::Open;
                changed = true;
            }
            self.open.insert(ix);
        }
        if changed {
            StepResult::StateChanged
        } else {
            StepResult::Searching
        }
    }

    /// Argmin of `(f, h)` over the open set. Strict comparison over the
    /// insertion-ordered set: among equal-`f` cells the smaller `h` wins,
    /// among fully equal cells the earliest-inserted one does.
    fn select_current(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for &ix in &self.open {
            let cell = self.grid.cell_at(ix);
            let better = match best {
                None => true,
                Some(best_ix) => {
                    let best_cell = self.grid.cell_at(best_ix);
                    match cell.f.total_cmp(&best_cell.f) {
                        Ordering::Less => true,
                        Ordering::Equal => cell.h.total_cmp(&best_cell.h) == Ordering::Less,
                        Ordering::Greater => false,
                    }
                }
            };
            if better {
                best = Some(ix);
            }
        }
        best
    }

    /// Walks parent links from End back to Start and reverses. Both
    /// endpoints are included; a search where Start == End yields a
    /// single-cell path.
    fn reconstruct(&self) -> Vec<Point> {
        let mut path = Vec::new();
        let mut ix = self.end;
        loop {
            let cell = self.grid.cell_at(ix);
            path.push(cell.point());
            match cell.parent {
                Some(parent) => ix = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    fn finish(&mut self, result: StepResult) -> StepResult {
        self.terminal = Some(result.clone());
        result
    }

    /// The grid the engine is bound to, for rendering overlays and cost
    /// labels mid-search.
    pub fn grid(&self) -> &GridModel {
        self.grid
    }

    /// The cell most recently selected for expansion.
    pub fn current(&self) -> Option<Point> {
        self.current.map(|ix| self.grid.cell_at(ix).point())
    }

    /// Number of cells expanded so far.
    pub fn expanded(&self) -> usize {
        self.closed.len()
    }

    pub fn is_finished(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn start(&self) -> Point {
        self.grid.cell_at(self.start).point()
    }

    pub fn end(&self) -> Point {
        self.grid.cell_at(self.end).point()
    }
}
