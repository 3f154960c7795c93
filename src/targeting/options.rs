//! Candidate shots around a target cell and how they are ranked.

use alloc::vec::Vec;

use crate::cellset::CellSet;
use crate::config::{GRID_WIDTH, MAX_CANDIDATES};
use crate::heatmap::ProbabilityDensityMap;
use crate::pool::DiagonalShotPool;
use crate::shot::{Move, ShotPattern};

use super::lines::Axis;

/// One way of firing at or near a candidate cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotOption {
    pub anchor: usize,
    pub pattern: ShotPattern,
    /// Footprint cells adjacent to a known hit. A single shot always counts 1.
    pub hit_adjacent: usize,
    /// Sum of heat-map scores over the footprint.
    pub score: i32,
}

impl ShotOption {
    /// Target-phase ordering: more hit-adjacent cells first, then the lower
    /// total score.
    pub fn outranks(&self, other: &ShotOption) -> bool {
        self.hit_adjacent > other.hit_adjacent
            || (self.hit_adjacent == other.hit_adjacent && self.score < other.score)
    }

    pub fn into_move(self) -> Move {
        Move::new(self.anchor, self.pattern)
    }
}

/// Builds the options for a candidate cell from the current heat map and
/// pool, offering only the weapons that are unlocked.
pub(crate) struct OptionScorer<'a> {
    pub heatmap: &'a ProbabilityDensityMap,
    pub pool: &'a DiagonalShotPool,
    pub airstrike: bool,
    pub bombardment: bool,
}

impl OptionScorer<'_> {
    /// Up to five options that would hit `cell`, best target-phase option
    /// first. Multi-cell options only appear when their whole footprint is
    /// still available.
    pub fn evaluate(&self, cell: usize, axis: Axis, adjacent: &CellSet) -> Vec<ShotOption> {
        let mut options = Vec::with_capacity(8);
        options.push(ShotOption {
            anchor: cell,
            pattern: ShotPattern::Single,
            hit_adjacent: 1,
            score: self.heatmap.score(cell),
        });

        if self.airstrike {
            let up = [0, 9, 18].map(|offset| cell.checked_add(offset));
            let down = [22, 11, 0].map(|offset| cell.checked_sub(offset));
            for anchor in up.into_iter().flatten() {
                self.push(&mut options, anchor, ShotPattern::AirstrikeUpRight, adjacent);
            }
            for anchor in down.into_iter().flatten() {
                self.push(&mut options, anchor, ShotPattern::AirstrikeDownRight, adjacent);
            }
        }

        if self.bombardment {
            let stride = match axis {
                Axis::Row => GRID_WIDTH,
                Axis::Column => 1,
            };
            let anchors = [cell.checked_sub(stride), Some(cell), cell.checked_add(stride)];
            for anchor in anchors.into_iter().flatten() {
                self.push(&mut options, anchor, ShotPattern::Bombardment, adjacent);
            }
        }

        options.sort_by(|a, b| {
            b.hit_adjacent
                .cmp(&a.hit_adjacent)
                .then(a.score.cmp(&b.score))
        });
        options.truncate(MAX_CANDIDATES);
        options
    }

    fn push(
        &self,
        options: &mut Vec<ShotOption>,
        anchor: usize,
        pattern: ShotPattern,
        adjacent: &CellSet,
    ) {
        if let Some(cells) = self.pool.open_footprint(anchor, pattern) {
            options.push(ShotOption {
                anchor,
                pattern,
                hit_adjacent: cells.iter().filter(|&&c| adjacent.contains(c)).count(),
                score: self.heatmap.total(cells.iter().copied()),
            });
        }
    }
}
