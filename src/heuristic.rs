//! Distance estimators for the search, pluggable per engine.

use grid_util::point::Point;

/// Integer-scaled octile weights: 10 per cardinal step, 14 (≈ 10·√2) per
/// diagonal step. Keeps the octile estimate admissible on 8-connected grids.
const OCTILE_CARDINAL: f64 = 10.0;
const OCTILE_DIAGONAL: f64 = 14.0;

/// A distance model over grid points.
///
/// The same model is used both as the heuristic estimate `h` and as the
/// movement cost between adjacent cells, so the estimate never overestimates
/// the true remaining cost and the search stays optimal.
///
/// Note that the models are not on a common scale: Manhattan and Euclidean
/// count a cardinal step as 1, Octile counts it as 10. Costs are only
/// comparable between searches run under the same model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// `|dx| + |dy|`. The natural model for 4-connected movement.
    Manhattan,
    /// `sqrt(dx² + dy²)`.
    Euclidean,
    /// `14·min(dx,dy) + 10·(max(dx,dy) − min(dx,dy))`. The natural model for
    /// 8-connected movement.
    Octile,
}

impl Heuristic {
    /// Estimated distance between two points: non-negative, symmetric and
    /// zero exactly when `a == b`.
    pub fn distance(&self, a: Point, b: Point) -> f64 {
        let dx = (a.x - b.x).abs() as f64;
        let dy = (a.y - b.y).abs() as f64;
        match self {
            Heuristic::Manhattan => dx + dy,
            Heuristic::Euclidean => (dx * dx + dy * dy).sqrt(),
            Heuristic::Octile => {
                let (min, max) = if dx < dy { (dx, dy) } else { (dy, dx) };
                OCTILE_DIAGONAL * min + OCTILE_CARDINAL * (max - min)
            }
        }
    }
}
