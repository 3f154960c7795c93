//! Shared result types and errors.

use alloc::vec::Vec;

use thiserror::Error;

use crate::ship::{Orientation, ShipKind};
use crate::shot::ShotPattern;

/// State of one grid cell as seen by the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum GridCellState {
    #[default]
    Empty = 0,
    Miss = 1,
    Hit = 2,
    Sunk = 3,
}

/// A ship sunk during a turn, identified by its first cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SunkShip {
    pub start: usize,
    pub orientation: Orientation,
    pub kind: ShipKind,
}

impl SunkShip {
    /// Cells the sunk ship occupied.
    pub fn cells(&self) -> impl Iterator<Item = usize> {
        let (start, step) = (self.start, self.orientation.step());
        (0..self.kind.size()).map(move |i| start + i * step)
    }
}

/// Coarse classification of a turn report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    Miss,
    Hit,
    MultipleHit,
}

/// Outcome of resolving one shot pattern against a board.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub cells_hit: Vec<usize>,
    pub cells_missed: Vec<usize>,
    pub ships_sunk: Vec<SunkShip>,
    pub is_game_over: bool,
}

impl TurnReport {
    pub fn outcome(&self) -> ShotOutcome {
        match self.cells_hit.len() {
            0 => ShotOutcome::Miss,
            1 => ShotOutcome::Hit,
            _ => ShotOutcome::MultipleHit,
        }
    }
}

/// Errors returned by board construction and shot resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell {cell} is off the grid")]
    CellOutOfRange { cell: isize },
    #[error("{kind} does not fit on the grid")]
    ShipOutOfBounds { kind: ShipKind },
    #[error("{kind} overlaps another ship")]
    ShipOverlaps { kind: ShipKind },
    #[error("{kind} touches another ship")]
    ShipsTouching { kind: ShipKind },
    #[error("layout is missing the {kind}")]
    MissingShip { kind: ShipKind },
    #[error("grid has {len} cells")]
    GridLength { len: usize },
    #[error("grid cell {cell} is {state:?}, which the fleet's damage does not allow")]
    GridMismatch { cell: usize, state: GridCellState },
}

/// Errors raised by the available-cell bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("{pattern:?} anchored at {anchor} leaves the grid")]
    PatternOutOfBounds { anchor: usize, pattern: ShotPattern },
    #[error("cell {cell} was already fired upon")]
    NotAvailable { cell: usize },
    #[error("diagonal pool with spacing {spacing} holds cells missing from the available set")]
    InconsistentSnapshot { spacing: usize },
}

/// Errors returned by the targeting engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no unfired cells remain")]
    NoShotsAvailable,
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("heat map has {len} cells")]
    HeatMapLength { len: usize },
}
