//! Shot patterns and the cells they cover.

use arrayvec::ArrayVec;

use crate::config::{GRID_CELLS, GRID_WIDTH};

/// Cells affected by one shot pattern, in delta order.
pub type Footprint = ArrayVec<usize, 5>;

/// Shape of a shot relative to its anchor cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotPattern {
    #[default]
    Single,
    /// Three cells on a diagonal running up and to the right.
    AirstrikeUpRight,
    /// Three cells on a diagonal running down and to the right.
    AirstrikeDownRight,
    /// Plus-shaped cross of five cells.
    Bombardment,
}

impl ShotPattern {
    pub const ALL: [ShotPattern; 4] = [
        ShotPattern::Single,
        ShotPattern::AirstrikeUpRight,
        ShotPattern::AirstrikeDownRight,
        ShotPattern::Bombardment,
    ];

    /// Index offsets from the anchor, in resolution order.
    pub const fn deltas(self) -> &'static [isize] {
        match self {
            ShotPattern::Single => &[0],
            ShotPattern::AirstrikeUpRight => &[0, -9, -18],
            ShotPattern::AirstrikeDownRight => &[0, 11, 22],
            ShotPattern::Bombardment => &[0, 1, -1, 10, -10],
        }
    }

    pub fn is_single(self) -> bool {
        self == ShotPattern::Single
    }

    pub fn is_airstrike(self) -> bool {
        matches!(
            self,
            ShotPattern::AirstrikeUpRight | ShotPattern::AirstrikeDownRight
        )
    }

    /// Whether every cell of the pattern anchored at `anchor` stays on the
    /// grid without wrapping across a row edge.
    pub fn fits(self, anchor: usize) -> bool {
        if anchor >= GRID_CELLS {
            return false;
        }
        let (row, col) = (anchor / GRID_WIDTH, anchor % GRID_WIDTH);
        match self {
            ShotPattern::Single => true,
            ShotPattern::AirstrikeUpRight => col <= 7 && row >= 2,
            ShotPattern::AirstrikeDownRight => col <= 7 && row <= 7,
            ShotPattern::Bombardment => (1..=8).contains(&col) && (1..=8).contains(&row),
        }
    }

    /// Affected cells for a shot anchored at `anchor`, or `None` if the
    /// pattern does not fit there.
    pub fn footprint(self, anchor: usize) -> Option<Footprint> {
        if !self.fits(anchor) {
            return None;
        }
        Some(offset_cells(anchor, self.deltas()))
    }
}

fn offset_cells(anchor: usize, deltas: &[isize]) -> Footprint {
    deltas
        .iter()
        .filter_map(|&d| anchor.checked_add_signed(d))
        .filter(|&cell| cell < GRID_CELLS)
        .collect()
}

/// Cell reached by moving `delta` from `cell`, or `None` when it leaves the
/// grid or, for a horizontal step, crosses a row edge.
pub(crate) fn step(cell: usize, delta: isize) -> Option<usize> {
    let next = cell.checked_add_signed(delta).filter(|&n| n < GRID_CELLS)?;
    if delta.unsigned_abs() < GRID_WIDTH && next / GRID_WIDTH != cell / GRID_WIDTH {
        return None;
    }
    Some(next)
}

/// A chosen move: anchor cell plus the pattern fired from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub cell: usize,
    pub pattern: ShotPattern,
}

impl Move {
    pub const fn new(cell: usize, pattern: ShotPattern) -> Self {
        Move { cell, pattern }
    }

    pub const fn single(cell: usize) -> Self {
        Move::new(cell, ShotPattern::Single)
    }

    /// Cells this move covers, or `None` if the pattern does not fit.
    pub fn footprint(&self) -> Option<Footprint> {
        self.pattern.footprint(self.cell)
    }
}
