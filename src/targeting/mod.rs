//! Move selection against an opponent grid.
//!
//! The engine never sees the opponent's fleet. Each call to
//! [`TargetingEngine::choose_next_move`] folds the previous turn's report into
//! its learning state, picks a shot according to the configured difficulty
//! and consumes the affected cells from its pool.

mod advisor;
mod lines;
mod options;
mod state;

pub use advisor::{AdvisorError, ShotAdvisor, TargetingView};
pub use lines::{continuation, hit_adjacent, hit_adjacent_cells, lines_of_hits, Axis};
pub use options::ShotOption;
pub use state::{EngineSnapshot, LearningState};

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use arrayvec::ArrayVec;
use rand::Rng;

use crate::cellset::CellSet;
use crate::common::{EngineError, GridCellState, TurnReport};
use crate::config::{Difficulty, EngineConfig, GRID_CELLS, GRID_WIDTH, MAX_CANDIDATES};
use crate::heatmap::ProbabilityDensityMap;
use crate::pool::DiagonalShotPool;
use crate::shot::{step, Move, ShotPattern};

use options::OptionScorer;

/// Easy hunts on the narrowest diagonals.
const EASY_SPACING: usize = 2;
/// Easy targets a known hit on one turn in two.
const EASY_TARGET_WEIGHT: u32 = 2;
/// Spread of Easy's pattern draw; out-of-range draws mean Single.
const EASY_PATTERN_WEIGHT: usize = 3;
/// Medium always targets a known hit.
const MEDIUM_TARGET_WEIGHT: u32 = 1;

pub struct TargetingEngine {
    config: EngineConfig,
    learning: LearningState,
    pool: DiagonalShotPool,
    history: Vec<Move>,
    advisor: Option<Box<dyn ShotAdvisor>>,
}

impl TargetingEngine {
    /// A fresh engine. The diagonal slopes are drawn from `rng`.
    pub fn new<R: Rng + ?Sized>(config: EngineConfig, rng: &mut R) -> Self {
        Self::with_pool(config, DiagonalShotPool::new(rng))
    }

    /// A fresh engine hunting over a given pool.
    pub fn with_pool(config: EngineConfig, pool: DiagonalShotPool) -> Self {
        Self {
            config,
            learning: LearningState::default(),
            pool,
            history: Vec::new(),
            advisor: None,
        }
    }

    /// Attach the strategy consulted at [`Difficulty::Delegated`].
    pub fn with_advisor(mut self, advisor: Box<dyn ShotAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn learning(&self) -> &LearningState {
        &self.learning
    }

    pub fn heatmap(&self) -> &ProbabilityDensityMap {
        &self.learning.heatmap
    }

    pub fn pool(&self) -> &DiagonalShotPool {
        &self.pool
    }

    /// Moves chosen so far, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn airstrike_ready(&self) -> bool {
        self.learning.airstrike_ready(&self.config)
    }

    pub fn bombardment_ready(&self) -> bool {
        self.learning.bombardment_ready(&self.config)
    }

    /// Pick the next move.
    ///
    /// `last_report` is the result of the previous move, or `None` on the
    /// first move of a game. The returned move's cells are removed from the
    /// pool before returning. Fails only when no cell is left to fire at, or
    /// when the pool disagrees with the chosen move.
    pub fn choose_next_move<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: &[GridCellState; GRID_CELLS],
        remaining_ship_sizes: &[usize],
        last_report: Option<&TurnReport>,
    ) -> Result<Move, EngineError> {
        if let Some(report) = last_report {
            self.learning = core::mem::take(&mut self.learning).absorb(
                report,
                remaining_ship_sizes,
                self.config.ships_can_touch,
            );
        }
        if self.pool.is_exhausted() {
            return Err(EngineError::NoShotsAvailable);
        }

        let generated = match self.config.difficulty {
            Difficulty::Easy => self.easy_move(rng, grid),
            Difficulty::Medium => self.medium_move(rng, grid),
            Difficulty::Hard => self.hard_move(rng, grid),
            Difficulty::Delegated => self.delegated_move(rng, grid, remaining_ship_sizes),
        };
        let mv = match generated {
            Some(mv) => mv,
            None => {
                log::debug!("no strategic shot, falling back to any open cell");
                self.pool
                    .select(rng, ShotPattern::Single, 0)
                    .ok_or(EngineError::NoShotsAvailable)?
            }
        };

        self.pool.consume(mv.cell, mv.pattern)?;
        self.history.push(mv);
        if mv.pattern.is_airstrike() {
            self.learning.airstrike_hits = 0;
        } else if mv.pattern == ShotPattern::Bombardment {
            self.learning.bombardment_hits = 0;
        }
        log::debug!(
            "{:?} engine fires {:?} at {} ({} cells left)",
            self.config.difficulty,
            mv.pattern,
            mv.cell,
            self.pool.available().len()
        );
        Ok(mv)
    }

    /// Save everything but the advisor.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            config: self.config,
            heatmap: self.learning.heatmap.scores().to_vec(),
            available: self.pool.available(),
            diagonals: self.pool.diagonals(),
            airstrike_hits: self.learning.airstrike_hits,
            bombardment_hits: self.learning.bombardment_hits,
            largest_remaining: self.learning.largest_remaining,
            history: self.history.clone(),
        }
    }

    /// Rebuild an engine from a snapshot, rejecting a heat map of the wrong
    /// length or diagonal pools that hold unavailable cells.
    pub fn restore(snapshot: EngineSnapshot) -> Result<Self, EngineError> {
        let scores: [i32; GRID_CELLS] =
            snapshot
                .heatmap
                .as_slice()
                .try_into()
                .map_err(|_| EngineError::HeatMapLength {
                    len: snapshot.heatmap.len(),
                })?;
        let pool = DiagonalShotPool::from_parts(snapshot.available, snapshot.diagonals)?;
        Ok(Self {
            config: snapshot.config,
            learning: LearningState {
                heatmap: ProbabilityDensityMap::from_scores(scores),
                airstrike_hits: snapshot.airstrike_hits,
                bombardment_hits: snapshot.bombardment_hits,
                largest_remaining: snapshot.largest_remaining,
            },
            pool,
            history: snapshot.history,
            advisor: None,
        })
    }

    fn easy_move<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grid: &[GridCellState; GRID_CELLS],
    ) -> Option<Move> {
        if let Some(mv) = self.random_target_shot(rng, grid, EASY_TARGET_WEIGHT) {
            return Some(mv);
        }
        let pattern = self.weighted_pattern(rng, EASY_PATTERN_WEIGHT);
        self.pool.select(rng, pattern, EASY_SPACING)
    }

    fn medium_move<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grid: &[GridCellState; GRID_CELLS],
    ) -> Option<Move> {
        if let Some(mv) = self.random_target_shot(rng, grid, MEDIUM_TARGET_WEIGHT) {
            return Some(mv);
        }
        let pattern = self.special_pattern(rng);
        self.pool
            .select(rng, pattern, self.learning.largest_remaining)
    }

    fn hard_move<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grid: &[GridCellState; GRID_CELLS],
    ) -> Option<Move> {
        self.target_phase(rng, grid)
            .or_else(|| self.hunt_phase())
    }

    fn delegated_move<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: &[GridCellState; GRID_CELLS],
        remaining_ship_sizes: &[usize],
    ) -> Option<Move> {
        let view = TargetingView {
            grid,
            remaining_ship_sizes,
            ships_can_touch: self.config.ships_can_touch,
            airstrike_allowed: self.config.airstrike_allowed,
            bombardment_allowed: self.config.bombardment_allowed,
            airstrike_hits: self.learning.airstrike_hits,
            bombardment_hits: self.learning.bombardment_hits,
            airstrike_ready: self.airstrike_ready(),
            bombardment_ready: self.bombardment_ready(),
        };
        let advice = match self.advisor.as_mut().map(|advisor| advisor.next_move(&view)) {
            Some(advice) => advice,
            None => return self.hard_move(rng, grid),
        };
        match advice.and_then(|mv| self.check_advice(mv)) {
            Ok(mv) => Some(mv),
            Err(err) => {
                log::warn!("advisor failed ({}), choosing the move locally", err);
                self.hard_move(rng, grid)
            }
        }
    }

    fn check_advice(&self, mv: Move) -> Result<Move, AdvisorError> {
        let unlocked = match mv.pattern {
            ShotPattern::Single => true,
            ShotPattern::AirstrikeUpRight | ShotPattern::AirstrikeDownRight => {
                self.airstrike_ready()
            }
            ShotPattern::Bombardment => self.bombardment_ready(),
        };
        if unlocked && self.pool.open_footprint(mv.cell, mv.pattern).is_some() {
            Ok(mv)
        } else {
            Err(AdvisorError::InvalidMove {
                cell: mv.cell,
                pattern: mv.pattern,
            })
        }
    }

    /// With probability `1 / weight`, fire at a random open neighbour of the
    /// first hit on the grid.
    fn random_target_shot<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grid: &[GridCellState; GRID_CELLS],
        weight: u32,
    ) -> Option<Move> {
        let hit = grid.iter().position(|&s| s == GridCellState::Hit)?;
        if rng.random_range(0..weight) != 0 {
            return None;
        }
        let open: ArrayVec<usize, 4> = [-1, 1, -(GRID_WIDTH as isize), GRID_WIDTH as isize]
            .into_iter()
            .filter_map(|delta| step(hit, delta))
            .filter(|&cell| self.pool.is_available(cell))
            .collect();
        if open.is_empty() {
            return None;
        }
        Some(Move::single(open[rng.random_range(0..open.len())]))
    }

    /// Single, or an unlocked special pattern with odds `1 / weight` spread
    /// across the whole list.
    fn weighted_pattern<R: Rng + ?Sized>(&self, rng: &mut R, weight: usize) -> ShotPattern {
        let mut patterns = ArrayVec::<ShotPattern, 4>::new();
        patterns.push(ShotPattern::Single);
        if self.airstrike_ready() {
            patterns.push(ShotPattern::AirstrikeDownRight);
            patterns.push(ShotPattern::AirstrikeUpRight);
        }
        if self.bombardment_ready() {
            patterns.push(ShotPattern::Bombardment);
        }
        let index = rng.random_range(0..patterns.len() * weight);
        patterns.get(index).copied().unwrap_or(ShotPattern::Single)
    }

    /// A uniformly chosen unlocked special pattern, or Single if none.
    fn special_pattern<R: Rng + ?Sized>(&self, rng: &mut R) -> ShotPattern {
        let mut patterns = ArrayVec::<ShotPattern, 3>::new();
        if self.airstrike_ready() {
            patterns.push(ShotPattern::AirstrikeDownRight);
            patterns.push(ShotPattern::AirstrikeUpRight);
        }
        if self.bombardment_ready() {
            patterns.push(ShotPattern::Bombardment);
        }
        if patterns.is_empty() {
            return ShotPattern::Single;
        }
        patterns[rng.random_range(0..patterns.len())]
    }

    fn scorer(&self) -> OptionScorer<'_> {
        OptionScorer {
            heatmap: &self.learning.heatmap,
            pool: &self.pool,
            airstrike: self.airstrike_ready(),
            bombardment: self.bombardment_ready(),
        }
    }

    /// Finish off a damaged ship: extend the longest line of hits, or else
    /// try the best cells next to any hit.
    fn target_phase<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        grid: &[GridCellState; GRID_CELLS],
    ) -> Option<Move> {
        let hits: CellSet = (0..GRID_CELLS)
            .filter(|&c| grid[c] == GridCellState::Hit)
            .collect();
        if hits.is_empty() {
            return None;
        }
        let available = self.pool.available();

        let candidates = match continuation(rng, &hits, &available) {
            Some(candidate) => alloc::vec![candidate],
            None => {
                let mut adjacent = hit_adjacent(&hits, &available);
                adjacent.sort_by(|a, b| {
                    self.learning
                        .heatmap
                        .score(b.0)
                        .cmp(&self.learning.heatmap.score(a.0))
                });
                adjacent.truncate(MAX_CANDIDATES.min(hits.len()));
                adjacent
            }
        };

        let adjacent_cells = hit_adjacent_cells(&hits, &available);
        let scorer = self.scorer();
        let mut best: Option<ShotOption> = None;
        for (cell, axis) in candidates {
            for option in scorer.evaluate(cell, axis, &adjacent_cells) {
                if best.map_or(true, |b| option.outranks(&b)) {
                    best = Some(option);
                }
            }
        }
        best.map(ShotOption::into_move)
    }

    /// Fire where the heat map is strongest, preferring the option that
    /// covers the most total heat.
    fn hunt_phase(&self) -> Option<Move> {
        let scorer = self.scorer();
        let no_hits = CellSet::new();
        let mut best: Option<ShotOption> = None;
        for cell in self
            .learning
            .heatmap
            .top_cells(&self.pool.available(), MAX_CANDIDATES)
        {
            for option in scorer.evaluate(cell, Axis::Row, &no_hits) {
                if best.map_or(true, |b| option.score > b.score) {
                    best = Some(option);
                }
            }
        }
        best.map(ShotOption::into_move)
    }
}

impl fmt::Debug for TargetingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetingEngine")
            .field("config", &self.config)
            .field("learning", &self.learning)
            .field("available", &self.pool.available().len())
            .field("history", &self.history.len())
            .field("advisor", &self.advisor.is_some())
            .finish()
    }
}
