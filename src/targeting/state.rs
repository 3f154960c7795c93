//! What the engine learns from turn reports, and the saved form of an engine.

use alloc::vec::Vec;

use crate::cellset::CellSet;
use crate::common::TurnReport;
use crate::config::{
    EngineConfig, AIRSTRIKE_HITS_REQUIRED, BOMBARDMENT_HITS_REQUIRED, DIAGONAL_POOLS,
    MAX_SHIP_SIZE,
};
use crate::heatmap::ProbabilityDensityMap;
use crate::shot::Move;

/// Heat map, weapon hit counters and the largest ship still afloat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningState {
    pub heatmap: ProbabilityDensityMap,
    pub airstrike_hits: usize,
    pub bombardment_hits: usize,
    pub largest_remaining: usize,
}

impl Default for LearningState {
    fn default() -> Self {
        Self {
            heatmap: ProbabilityDensityMap::new(),
            airstrike_hits: 0,
            bombardment_hits: 0,
            largest_remaining: MAX_SHIP_SIZE,
        }
    }
}

impl LearningState {
    /// Fold the previous turn's report into the state.
    ///
    /// Both weapon counters grow by the number of cells hit. The largest
    /// remaining size is refreshed first so the heat-map update reaches as
    /// far as the biggest ship still afloat.
    pub fn absorb(
        mut self,
        report: &TurnReport,
        remaining_ship_sizes: &[usize],
        ships_can_touch: bool,
    ) -> Self {
        let hits = report.cells_hit.len();
        self.airstrike_hits += hits;
        self.bombardment_hits += hits;
        self.largest_remaining = remaining_ship_sizes.iter().copied().max().unwrap_or(0);
        self.heatmap
            .apply_report(report, self.largest_remaining, ships_can_touch);
        self
    }

    pub fn airstrike_ready(&self, config: &EngineConfig) -> bool {
        config.airstrike_allowed && self.airstrike_hits >= AIRSTRIKE_HITS_REQUIRED
    }

    pub fn bombardment_ready(&self, config: &EngineConfig) -> bool {
        config.bombardment_allowed && self.bombardment_hits >= BOMBARDMENT_HITS_REQUIRED
    }
}

/// Everything needed to resume a targeting engine, minus any advisor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineSnapshot {
    pub config: EngineConfig,
    pub heatmap: Vec<i32>,
    pub available: CellSet,
    /// Available cells of each diagonal pool, spacing 2 first.
    pub diagonals: [CellSet; DIAGONAL_POOLS],
    pub airstrike_hits: usize,
    pub bombardment_hits: usize,
    pub largest_remaining: usize,
    pub history: Vec<Move>,
}
