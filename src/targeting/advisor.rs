//! Hook for handing move selection to an outside strategy.

use alloc::string::String;

use thiserror::Error;

use crate::common::GridCellState;
use crate::config::GRID_CELLS;
use crate::shot::{Move, ShotPattern};

/// What an advisor gets to see before proposing a move.
#[derive(Debug, Clone, Copy)]
pub struct TargetingView<'a> {
    pub grid: &'a [GridCellState; GRID_CELLS],
    pub remaining_ship_sizes: &'a [usize],
    pub ships_can_touch: bool,
    pub airstrike_allowed: bool,
    pub bombardment_allowed: bool,
    pub airstrike_hits: usize,
    pub bombardment_hits: usize,
    pub airstrike_ready: bool,
    pub bombardment_ready: bool,
}

/// Errors an advisor may report instead of a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisorError {
    #[error("advisor is unavailable")]
    Unavailable,
    #[error("advisor rejected the request: {reason}")]
    Rejected { reason: String },
    #[error("{pattern:?} at {cell} cannot be fired")]
    InvalidMove { cell: usize, pattern: ShotPattern },
}

/// External move selection for [`Difficulty::Delegated`](crate::Difficulty).
///
/// A proposed move is checked by the engine; an error or an unplayable move
/// makes the engine choose by itself for that turn.
pub trait ShotAdvisor: Send {
    fn next_move(&mut self, view: &TargetingView<'_>) -> Result<Move, AdvisorError>;
}

impl<F> ShotAdvisor for F
where
    F: FnMut(&TargetingView<'_>) -> Result<Move, AdvisorError> + Send,
{
    fn next_move(&mut self, view: &TargetingView<'_>) -> Result<Move, AdvisorError> {
        self(view)
    }
}
