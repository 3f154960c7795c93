//! Bookkeeping of unfired cells and random shot selection along spaced
//! diagonals.
//!
//! The pool keeps a single set of available cells. Each diagonal spacing is a
//! fixed membership mask chosen when the pool is created; the cells still
//! available at a spacing are always `available & mask`, so consuming a cell
//! can never leave a diagonal pool out of step with the master set.

use rand::Rng;

use crate::cellset::CellSet;
use crate::common::PoolError;
use crate::config::{
    DIAGONAL_POOLS, GRID_CELLS, GRID_WIDTH, MAX_DIAGONAL_SPACING, MIN_DIAGONAL_SPACING,
    PICK_ATTEMPTS,
};
use crate::shot::{Footprint, Move, ShotPattern};

/// Direction the diagonals of one spacing run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slope {
    /// Cells where `(row + col) % spacing == 0`.
    Rising,
    /// Cells where `(row - col) % spacing == 0`.
    Falling,
}

impl Slope {
    fn mask(self, spacing: usize) -> CellSet {
        (0..GRID_CELLS)
            .filter(|&cell| {
                let (row, col) = (cell / GRID_WIDTH, cell % GRID_WIDTH);
                match self {
                    Slope::Rising => (row + col) % spacing == 0,
                    Slope::Falling => (row + GRID_WIDTH * spacing - col) % spacing == 0,
                }
            })
            .collect()
    }
}

/// Unfired cells plus the diagonal subsets used to spread hunting shots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagonalShotPool {
    available: CellSet,
    diagonals: [CellSet; DIAGONAL_POOLS],
}

impl DiagonalShotPool {
    /// A full pool. The slope of each spacing is drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let diagonals = core::array::from_fn(|i| {
            let slope = if rng.random_bool(0.5) {
                Slope::Rising
            } else {
                Slope::Falling
            };
            slope.mask(MIN_DIAGONAL_SPACING + i)
        });
        Self {
            available: CellSet::full(),
            diagonals,
        }
    }

    /// A full pool with the same slope for every spacing.
    pub fn with_slope(slope: Slope) -> Self {
        Self {
            available: CellSet::full(),
            diagonals: core::array::from_fn(|i| slope.mask(MIN_DIAGONAL_SPACING + i)),
        }
    }

    /// Rebuild a pool from saved sets. Every diagonal pool must be a subset
    /// of `available`.
    pub fn from_parts(
        available: CellSet,
        diagonals: [CellSet; DIAGONAL_POOLS],
    ) -> Result<Self, PoolError> {
        for (i, pool) in diagonals.iter().enumerate() {
            if !pool.is_subset(&available) {
                return Err(PoolError::InconsistentSnapshot {
                    spacing: MIN_DIAGONAL_SPACING + i,
                });
            }
        }
        Ok(Self {
            available,
            diagonals,
        })
    }

    /// Every cell not yet fired upon.
    pub fn available(&self) -> CellSet {
        self.available
    }

    pub fn is_available(&self, cell: usize) -> bool {
        self.available.contains(cell)
    }

    pub fn is_exhausted(&self) -> bool {
        self.available.is_empty()
    }

    /// Cells still available on the diagonals of `spacing`, or `None` for a
    /// spacing outside `2..=5`.
    pub fn diagonal(&self, spacing: usize) -> Option<CellSet> {
        let index = spacing.checked_sub(MIN_DIAGONAL_SPACING)?;
        self.diagonals.get(index).map(|mask| *mask & self.available)
    }

    /// The four available diagonal pools, narrowest spacing first.
    pub fn diagonals(&self) -> [CellSet; DIAGONAL_POOLS] {
        core::array::from_fn(|i| self.diagonals[i] & self.available)
    }

    /// Cells `pattern` would hit from `anchor`, if it fits and every one of
    /// them is still available.
    pub fn open_footprint(&self, anchor: usize, pattern: ShotPattern) -> Option<Footprint> {
        pattern
            .footprint(anchor)
            .filter(|cells| cells.iter().all(|&c| self.available.contains(c)))
    }

    /// Mark every cell of `pattern` at `anchor` as fired.
    ///
    /// Fails without mutating anything if the pattern leaves the grid or any
    /// of its cells was already consumed.
    pub fn consume(&mut self, anchor: usize, pattern: ShotPattern) -> Result<(), PoolError> {
        let cells = pattern
            .footprint(anchor)
            .ok_or(PoolError::PatternOutOfBounds { anchor, pattern })?;
        if let Some(&cell) = cells.iter().find(|&&c| !self.available.contains(c)) {
            return Err(PoolError::NotAvailable { cell });
        }
        for cell in cells {
            self.available.remove(cell);
        }
        Ok(())
    }

    /// Choose a random move without consuming it.
    ///
    /// Single shots are drawn from the widest non-empty diagonal pool at or
    /// below `spacing`; other patterns draw from every available cell. After
    /// too many misfits the pattern is downgraded to a single shot. Returns
    /// `None` only when no cell is left.
    pub fn select<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        pattern: ShotPattern,
        spacing: usize,
    ) -> Option<Move> {
        if self.available.is_empty() {
            return None;
        }
        let source = if pattern.is_single() {
            self.widest_diagonal(spacing)
        } else {
            self.available
        };

        let mut pattern = pattern;
        let mut attempts = 0;
        loop {
            let cell = source.nth(rng.random_range(0..source.len()))?;
            if self.open_footprint(cell, pattern).is_some() {
                return Some(Move::new(cell, pattern));
            }
            attempts += 1;
            if attempts >= PICK_ATTEMPTS {
                pattern = ShotPattern::Single;
            }
        }
    }

    /// [`select`](Self::select) a move and consume its cells.
    ///
    /// `Ok(None)` means the pool is exhausted. A consume failure is a
    /// bookkeeping desync and is returned as an error.
    pub fn pick<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        pattern: ShotPattern,
        spacing: usize,
    ) -> Result<Option<Move>, PoolError> {
        let Some(mv) = self.select(rng, pattern, spacing) else {
            return Ok(None);
        };
        self.consume(mv.cell, mv.pattern)?;
        Ok(Some(mv))
    }

    fn widest_diagonal(&self, spacing: usize) -> CellSet {
        if (MIN_DIAGONAL_SPACING..=MAX_DIAGONAL_SPACING).contains(&spacing) {
            for s in (MIN_DIAGONAL_SPACING..=spacing).rev() {
                if let Some(pool) = self.diagonal(s).filter(|p| !p.is_empty()) {
                    return pool;
                }
            }
        }
        self.available
    }
}
