//! Error types for grid and engine construction.
//!
//! Expected search outcomes are never errors: an unreachable goal is reported
//! through [StepResult::NotFound](crate::StepResult::NotFound), and illegal
//! grid edits (toggling an endpoint, out-of-bounds coordinates) are silent
//! no-ops by contract.

use thiserror::Error;

use crate::grid::Endpoint;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Grid construction with a zero-sized grid.
    #[error("grid size must be at least 1, got {size}")]
    InvalidSize { size: usize },
    /// Engine construction against a grid that is missing an endpoint.
    /// [GridModel](crate::GridModel) maintains exactly one Start and one End,
    /// so this is normally unreachable and checked defensively.
    #[error("grid has no {missing} cell")]
    InvalidGrid { missing: Endpoint },
}
