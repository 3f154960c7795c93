//! Board constants, fleet composition and engine configuration.

use crate::ship::ShipKind;

/// Width and height of the square grid.
pub const GRID_WIDTH: usize = 10;
/// Total number of addressable cells (`0..GRID_CELLS`).
pub const GRID_CELLS: usize = GRID_WIDTH * GRID_WIDTH;
pub const NUM_SHIPS: usize = 5;
pub const MAX_SHIP_SIZE: usize = 5;

/// Fleet order used for placement, hit resolution and snapshots.
pub const FLEET: [ShipKind; NUM_SHIPS] = [
    ShipKind::Battleship,
    ShipKind::Carrier,
    ShipKind::Cruiser,
    ShipKind::Destroyer,
    ShipKind::Submarine,
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 4 + 5 + 3 + 2 + 3;

/// Cumulative hits needed before an airstrike becomes available.
pub const AIRSTRIKE_HITS_REQUIRED: usize = 5;
/// Cumulative hits needed before a bombardment becomes available.
pub const BOMBARDMENT_HITS_REQUIRED: usize = 7;

/// Starting score of every heat map cell.
pub const HEAT_INITIAL: i32 = 100;
/// Peak boost applied next to a hit; falls off by one per step.
pub const HEAT_HIT_BOOST: i32 = 5;
/// Peak penalty applied next to a miss; falls off by one per step.
pub const HEAT_MISS_PENALTY: i32 = 5;
/// Peak penalty applied around a sunk ship.
pub const HEAT_SINK_PENALTY: i32 = 3;
/// Reach (exclusive) of the sinking decay.
pub const HEAT_SINK_REACH: usize = 3;
/// Reach (exclusive) of the no-touch zeroing around a sunk ship.
pub const HEAT_NO_TOUCH_REACH: usize = 2;

/// Diagonal spacings maintained by the shot pool.
pub const MIN_DIAGONAL_SPACING: usize = 2;
pub const MAX_DIAGONAL_SPACING: usize = 5;
pub const DIAGONAL_POOLS: usize = MAX_DIAGONAL_SPACING - MIN_DIAGONAL_SPACING + 1;

/// Random candidates tried for a multi-cell pattern before forcing a single shot.
pub const PICK_ATTEMPTS: usize = 10;
/// Upper bound on candidates the hard strategy scores per phase.
pub const MAX_CANDIDATES: usize = 5;

/// Difficulty of the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
    /// Moves come from an attached [`ShotAdvisor`](crate::ShotAdvisor).
    Delegated,
}

/// Rules the targeting engine plays under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    pub ships_can_touch: bool,
    pub airstrike_allowed: bool,
    pub bombardment_allowed: bool,
}

impl EngineConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Enable or disable the no-touch placement rule.
    pub fn ships_can_touch(mut self, allowed: bool) -> Self {
        self.ships_can_touch = allowed;
        self
    }

    pub fn with_airstrike(mut self, allowed: bool) -> Self {
        self.airstrike_allowed = allowed;
        self
    }

    pub fn with_bombardment(mut self, allowed: bool) -> Self {
        self.bombardment_allowed = allowed;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Hard,
            ships_can_touch: true,
            airstrike_allowed: false,
            bombardment_allowed: false,
        }
    }
}

/// Policy deciding how many shots a side fires in one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotAllowance {
    Fixed(usize),
    UnsunkShips,
    UndamagedShips,
    LargestUndamagedShip,
    LargestUnsunkShip,
}
