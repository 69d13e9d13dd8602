//! Grid model: cell matrix, cell states and adjacency queries.

use core::fmt;

use grid_util::point::Point;
use smallvec::SmallVec;

use crate::error::GridError;

/// Visible state of a single grid cell.
///
/// Wall is the only state that blocks movement. Open/Closed/Path are search
/// marks written by the engine and overlay application; they never block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Idle,
    Wall,
    Start,
    End,
    Open,
    Closed,
    Path,
}

impl CellState {
    /// Whether this state is one of the two endpoints.
    pub fn is_endpoint(self) -> bool {
        matches!(self, CellState::Start | CellState::End)
    }
    /// Whether a cell in this state blocks movement.
    pub fn blocks(self) -> bool {
        self == CellState::Wall
    }
    fn glyph(self) -> char {
        match self {
            CellState::Idle => '.',
            CellState::Wall => '#',
            CellState::Start => 'S',
            CellState::End => 'G',
            CellState::Open => 'o',
            CellState::Closed => 'x',
            CellState::Path => '*',
        }
    }
}

/// Selector for the two endpoint cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl Endpoint {
    fn state(self) -> CellState {
        match self {
            Endpoint::Start => CellState::Start,
            Endpoint::End => CellState::End,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "Start"),
            Endpoint::End => write!(f, "End"),
        }
    }
}

/// A single cell with its search bookkeeping.
///
/// The cost fields are only meaningful after the engine has touched the cell
/// in the current search; [GridModel::clear_search_marks] deliberately leaves
/// them stale, they are overwritten before reuse.
#[derive(Clone, Debug)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub state: CellState,
    pub g: f64,
    pub h: f64,
    pub f: f64,
    /// Arena index of the cell this one was reached from, within the same
    /// grid. Never an owning reference, so it cannot outlive the grid.
    pub parent: Option<usize>,
}

impl Cell {
    fn new(x: i32, y: i32) -> Cell {
        Cell {
            x,
            y,
            state: CellState::Idle,
            g: 0.0,
            h: 0.0,
            f: 0.0,
            parent: None,
        }
    }
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// Cardinal directions first, diagonals second. The order is part of the
// contract: it feeds the engine's neighbor queue and thereby decides which of
// several equal-cost relaxations wins.
const CARDINAL_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Square cell matrix addressed by `(x, y)`, row-major.
///
/// Invariant: exactly one cell has state [CellState::Start] and exactly one
/// has state [CellState::End] at all times. All mutating operations preserve
/// this; illegal edits (endpoint overwrites, out-of-bounds coordinates) are
/// silent no-ops per the error-handling contract.
#[derive(Clone, Debug)]
pub struct GridModel {
    size: usize,
    cells: Vec<Cell>,
}

impl GridModel {
    /// Creates a `size`×`size` grid of Idle cells with Start at `(0, 0)` and
    /// End at `(size-1, size-1)`.
    pub fn new(size: usize) -> Result<GridModel, GridError> {
        if size < 1 {
            return Err(GridError::InvalidSize { size });
        }
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                cells.push(Cell::new(x, y));
            }
        }
        let mut grid = GridModel { size, cells };
        let last = (size - 1) as i32;
        let end_ix = grid.compute_ix(last, last);
        grid.cells[0].state = CellState::Start;
        // On a 1x1 grid Start and End share the cell; End wins so the cell
        // still terminates a search immediately.
        grid.cells[end_ix].state = CellState::End;
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    fn compute_ix(&self, x: i32, y: i32) -> usize {
        y as usize * self.size + x as usize
    }

    /// Read-only access to a cell for rendering (state and cost labels).
    pub fn cell(&self, x: i32, y: i32) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.compute_ix(x, y)])
        } else {
            None
        }
    }

    pub fn state(&self, x: i32, y: i32) -> Option<CellState> {
        self.cell(x, y).map(|c| c.state)
    }

    pub(crate) fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(self.compute_ix(x, y))
        } else {
            None
        }
    }

    pub(crate) fn cell_at(&self, ix: usize) -> &Cell {
        &self.cells[ix]
    }

    pub(crate) fn cell_at_mut(&mut self, ix: usize) -> &mut Cell {
        &mut self.cells[ix]
    }

    pub(crate) fn find_index(&self, state: CellState) -> Option<usize> {
        self.cells.iter().position(|c| c.state == state)
    }

    /// Position of the Start cell.
    pub fn find_start(&self) -> Option<Point> {
        self.find_index(CellState::Start).map(|ix| self.cells[ix].point())
    }

    /// Position of the End cell.
    pub fn find_end(&self) -> Option<Point> {
        self.find_index(CellState::End).map(|ix| self.cells[ix].point())
    }

    /// The in-bounds, non-Wall cells adjacent to `(x, y)`: the four cardinal
    /// neighbors in W, E, N, S order, followed by NW, NE, SW, SE when
    /// `allow_diagonal` is set.
    pub fn neighbors(&self, x: i32, y: i32, allow_diagonal: bool) -> SmallVec<[Point; 8]> {
        let mut out = SmallVec::new();
        let offsets = CARDINAL_OFFSETS
            .iter()
            .chain(allow_diagonal.then_some(&DIAGONAL_OFFSETS[..]).into_iter().flatten());
        for &(dx, dy) in offsets {
            let (nx, ny) = (x + dx, y + dy);
            if self.in_bounds(nx, ny) && !self.cells[self.compute_ix(nx, ny)].state.blocks() {
                out.push(Point::new(nx, ny));
            }
        }
        out
    }

    /// Flips a cell between Wall and Idle. Start/End and out-of-bounds
    /// targets are left untouched.
    pub fn toggle_wall(&mut self, x: i32, y: i32) {
        let Some(ix) = self.index_of(x, y) else {
            return;
        };
        let cell = &mut self.cells[ix];
        match cell.state {
            CellState::Start | CellState::End => {}
            CellState::Wall => cell.state = CellState::Idle,
            _ => cell.state = CellState::Wall,
        }
    }

    /// Absolute form of [toggle_wall](Self::toggle_wall): places a wall, or
    /// clears one. Clearing a non-Wall cell is a no-op so search marks are
    /// not disturbed.
    pub fn set_wall(&mut self, x: i32, y: i32, blocked: bool) {
        let Some(ix) = self.index_of(x, y) else {
            return;
        };
        let cell = &mut self.cells[ix];
        if cell.state.is_endpoint() {
            return;
        }
        if blocked {
            cell.state = CellState::Wall;
        } else if cell.state == CellState::Wall {
            cell.state = CellState::Idle;
        }
    }

    /// Moves Start or End to `(x, y)`, resetting the vacated cell to Idle.
    /// No-op when the destination is out of bounds or already holds an
    /// endpoint (which covers both the other endpoint and a move onto
    /// itself).
    pub fn move_endpoint(&mut self, endpoint: Endpoint, x: i32, y: i32) {
        let Some(dest) = self.index_of(x, y) else {
            return;
        };
        if self.cells[dest].state.is_endpoint() {
            return;
        }
        let Some(old) = self.find_index(endpoint.state()) else {
            return;
        };
        self.cells[old].state = CellState::Idle;
        self.cells[dest].state = endpoint.state();
    }

    /// Resets every Open/Closed/Path mark back to Idle. Walls and endpoints
    /// are untouched. Cost fields and parents are left stale; the engine
    /// overwrites them before relying on them.
    pub fn clear_search_marks(&mut self) {
        for cell in &mut self.cells {
            if matches!(cell.state, CellState::Open | CellState::Closed | CellState::Path) {
                cell.state = CellState::Idle;
            }
        }
    }

    /// Applies a found route as a display overlay: clears Open/Closed marks
    /// and marks the given cells Path, leaving Start/End as they are.
    pub fn apply_path(&mut self, path: &[Point]) {
        for cell in &mut self.cells {
            if matches!(cell.state, CellState::Open | CellState::Closed) {
                cell.state = CellState::Idle;
            }
        }
        for p in path {
            let Some(ix) = self.index_of(p.x, p.y) else {
                continue;
            };
            if !self.cells[ix].state.is_endpoint() {
                self.cells[ix].state = CellState::Path;
            }
        }
    }
}

impl fmt::Display for GridModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.size as i32 {
            for x in 0..self.size as i32 {
                write!(f, "{}", self.cells[self.compute_ix(x, y)].state.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_places_endpoints() {
        let grid = GridModel::new(4).unwrap();
        assert_eq!(grid.state(0, 0), Some(CellState::Start));
        assert_eq!(grid.state(3, 3), Some(CellState::End));
        assert_eq!(grid.state(1, 2), Some(CellState::Idle));
        assert_eq!(grid.find_start(), Some(Point::new(0, 0)));
        assert_eq!(grid.find_end(), Some(Point::new(3, 3)));
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(GridModel::new(0), Err(GridError::InvalidSize { size: 0 })));
    }

    #[test]
    fn degenerate_grid_has_end_only() {
        // The 1x1 grid collapses Start onto End; End wins.
        let grid = GridModel::new(1).unwrap();
        assert_eq!(grid.state(0, 0), Some(CellState::End));
        assert!(grid.find_start().is_none());
    }

    #[test]
    fn neighbor_order_is_cardinal_first() {
        let grid = GridModel::new(3).unwrap();
        let n = grid.neighbors(1, 1, true);
        let expected: Vec<Point> = [
            (0, 1),
            (2, 1),
            (1, 0),
            (1, 2),
            (0, 0),
            (2, 0),
            (0, 2),
            (2, 2),
        ]
        .iter()
        .map(|&(x, y)| Point::new(x, y))
        .collect();
        assert_eq!(n.to_vec(), expected);
    }

    #[test]
    fn neighbors_exclude_walls_and_out_of_bounds() {
        let mut grid = GridModel::new(3).unwrap();
        grid.set_wall(1, 0, true);
        let n = grid.neighbors(0, 0, false);
        assert_eq!(n.to_vec(), vec![Point::new(0, 1)]);
        let n = grid.neighbors(0, 0, true);
        assert_eq!(n.to_vec(), vec![Point::new(0, 1), Point::new(1, 1)]);
    }

    #[test]
    fn toggle_wall_flips_and_protects_endpoints() {
        let mut grid = GridModel::new(3).unwrap();
        grid.toggle_wall(1, 1);
        assert_eq!(grid.state(1, 1), Some(CellState::Wall));
        grid.toggle_wall(1, 1);
        assert_eq!(grid.state(1, 1), Some(CellState::Idle));
        grid.toggle_wall(0, 0);
        assert_eq!(grid.state(0, 0), Some(CellState::Start));
        // Out of bounds is a silent no-op.
        grid.toggle_wall(-1, 5);
    }

    #[test]
    fn set_wall_does_not_clear_marks() {
        let mut grid = GridModel::new(3).unwrap();
        grid.cell_at_mut(4).state = CellState::Closed;
        grid.set_wall(1, 1, false);
        assert_eq!(grid.state(1, 1), Some(CellState::Closed));
    }

    #[test]
    fn move_endpoint_rules() {
        let mut grid = GridModel::new(3).unwrap();
        grid.move_endpoint(Endpoint::Start, 1, 1);
        assert_eq!(grid.state(0, 0), Some(CellState::Idle));
        assert_eq!(grid.state(1, 1), Some(CellState::Start));
        // Onto the other endpoint: rejected.
        grid.move_endpoint(Endpoint::Start, 2, 2);
        assert_eq!(grid.state(1, 1), Some(CellState::Start));
        assert_eq!(grid.state(2, 2), Some(CellState::End));
        // Onto itself: rejected, does not vacate.
        grid.move_endpoint(Endpoint::Start, 1, 1);
        assert_eq!(grid.state(1, 1), Some(CellState::Start));
        // Out of bounds: rejected.
        grid.move_endpoint(Endpoint::End, 3, 0);
        assert_eq!(grid.state(2, 2), Some(CellState::End));
        // A wall may be displaced by an endpoint.
        grid.set_wall(0, 2, true);
        grid.move_endpoint(Endpoint::End, 0, 2);
        assert_eq!(grid.state(0, 2), Some(CellState::End));
        assert_eq!(grid.state(2, 2), Some(CellState::Idle));
    }

    #[test]
    fn clear_search_marks_resets_only_marks() {
        let mut grid = GridModel::new(3).unwrap();
        grid.set_wall(2, 0, true);
        grid.cell_at_mut(4).state = CellState::Open;
        grid.cell_at_mut(5).state = CellState::Closed;
        grid.cell_at_mut(6).state = CellState::Path;
        grid.clear_search_marks();
        assert_eq!(grid.state(1, 1), Some(CellState::Idle));
        assert_eq!(grid.state(2, 1), Some(CellState::Idle));
        assert_eq!(grid.state(0, 2), Some(CellState::Idle));
        assert_eq!(grid.state(2, 0), Some(CellState::Wall));
        assert_eq!(grid.state(0, 0), Some(CellState::Start));
    }

    #[test]
    fn apply_path_overlays_route() {
        let mut grid = GridModel::new(3).unwrap();
        grid.cell_at_mut(1).state = CellState::Closed;
        let path = vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)];
        grid.apply_path(&path);
        assert_eq!(grid.state(1, 0), Some(CellState::Idle));
        assert_eq!(grid.state(1, 1), Some(CellState::Path));
        assert_eq!(grid.state(0, 0), Some(CellState::Start));
        assert_eq!(grid.state(2, 2), Some(CellState::End));
    }

    #[test]
    fn display_renders_glyphs() {
        let mut grid = GridModel::new(2).unwrap();
        grid.set_wall(1, 0, true);
        assert_eq!(format!("{grid}"), "S#\n.G\n");
    }
}
