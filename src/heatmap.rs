// Integer heat map estimating where undiscovered ship segments lie.
// Scores only move through the hit, miss and sinking rules below.

use alloc::vec::Vec;

use crate::cellset::CellSet;
use crate::common::{SunkShip, TurnReport};
use crate::config::{
    GRID_CELLS, GRID_WIDTH, HEAT_HIT_BOOST, HEAT_INITIAL, HEAT_MISS_PENALTY, HEAT_NO_TOUCH_REACH,
    HEAT_SINK_PENALTY, HEAT_SINK_REACH,
};
use crate::shot::step;

/// The four axis directions, in the order adjustments are applied.
const DIRECTIONS: [isize; 4] = [1, -1, GRID_WIDTH as isize, -(GRID_WIDTH as isize)];

/// Per-cell likelihood score. A score of zero or below means the cell is out
/// of consideration.
#[derive(Clone, PartialEq, Eq)]
pub struct ProbabilityDensityMap {
    scores: [i32; GRID_CELLS],
}

impl Default for ProbabilityDensityMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbabilityDensityMap {
    /// A fresh map with every cell at the initial score.
    pub fn new() -> Self {
        Self {
            scores: [HEAT_INITIAL; GRID_CELLS],
        }
    }

    /// Rebuild a map from saved scores.
    pub fn from_scores(scores: [i32; GRID_CELLS]) -> Self {
        Self { scores }
    }

    pub fn scores(&self) -> &[i32; GRID_CELLS] {
        &self.scores
    }

    #[inline]
    pub fn score(&self, cell: usize) -> i32 {
        self.scores[cell]
    }

    /// Sum of scores over `cells`.
    pub fn total<I: IntoIterator<Item = usize>>(&self, cells: I) -> i32 {
        cells.into_iter().map(|c| self.scores[c]).sum()
    }

    /// Fold a turn report into the map: hits, then misses, then sinkings,
    /// then every hit and miss cell is forced to zero.
    ///
    /// `reach` is the size of the largest ship still afloat.
    pub fn apply_report(&mut self, report: &TurnReport, reach: usize, ships_can_touch: bool) {
        for &cell in &report.cells_hit {
            self.on_hit(cell, reach);
        }
        for &cell in &report.cells_missed {
            self.on_miss(cell, reach);
        }
        for ship in &report.ships_sunk {
            self.on_sinking(ship, ships_can_touch);
        }
        for &cell in report.cells_hit.iter().chain(&report.cells_missed) {
            self.scores[cell] = 0;
        }
        log::trace!(
            "heat map folded {} hits, {} misses, {} sinkings",
            report.cells_hit.len(),
            report.cells_missed.len(),
            report.ships_sunk.len()
        );
    }

    /// Boost cells in line with a hit, strongest next to it.
    pub fn on_hit(&mut self, cell: usize, reach: usize) {
        for dir in DIRECTIONS {
            self.adjust(cell, dir, reach, |i| HEAT_HIT_BOOST - i);
        }
    }

    /// Penalise cells in line with a miss, strongest next to it.
    pub fn on_miss(&mut self, cell: usize, reach: usize) {
        for dir in DIRECTIONS {
            self.adjust(cell, dir, reach, |i| -(HEAT_MISS_PENALTY - i));
        }
    }

    /// Decay the surroundings of a sunk ship and clear its cells. Without the
    /// touch rule the direct neighbours cannot hold a ship and are zeroed.
    pub fn on_sinking(&mut self, ship: &SunkShip, ships_can_touch: bool) {
        let cells: Vec<usize> = ship.cells().collect();
        for &cell in &cells {
            for dir in DIRECTIONS {
                self.adjust(cell, dir, HEAT_SINK_REACH, |i| -(HEAT_SINK_PENALTY - i));
            }
        }
        if !ships_can_touch {
            for &cell in &cells {
                for dir in DIRECTIONS {
                    for next in ray(cell, dir, HEAT_NO_TOUCH_REACH) {
                        self.scores[next] = 0;
                    }
                }
            }
        }
        for &cell in &cells {
            self.scores[cell] = 0;
        }
    }

    /// Up to `n` positive-scoring cells from `available`, best first. Ties
    /// keep ascending cell order.
    pub fn top_cells(&self, available: &CellSet, n: usize) -> Vec<usize> {
        let mut cells: Vec<usize> = available
            .iter()
            .filter(|&c| self.scores[c] > 0)
            .collect();
        cells.sort_by(|&a, &b| self.scores[b].cmp(&self.scores[a]));
        cells.truncate(n);
        cells
    }

    fn adjust(&mut self, origin: usize, dir: isize, reach: usize, delta: impl Fn(i32) -> i32) {
        for (i, cell) in ray(origin, dir, reach).enumerate() {
            if self.scores[cell] > 0 {
                self.scores[cell] += delta(i as i32 + 1);
            }
        }
    }
}

/// Cells at distance `1..reach` from `origin` along `dir`, stopping at the
/// grid edge.
fn ray(origin: usize, dir: isize, reach: usize) -> impl Iterator<Item = usize> {
    (1..reach.max(1))
        .map(move |i| step(origin, dir * i as isize))
        .take_while(Option::is_some)
        .flatten()
}

impl core::fmt::Debug for ProbabilityDensityMap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "ProbabilityDensityMap:")?;
        for row in self.scores.chunks(GRID_WIDTH) {
            for score in row {
                write!(f, "{:>4}", score)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
