//! The types an orchestrator needs to run a game.

pub use crate::{
    Difficulty, EngineConfig, GridBoard, GridCellState, Move, ShotAllowance, ShotPattern,
    TargetingEngine, TurnReport,
};

#[cfg(feature = "std")]
pub use crate::init_logging;
