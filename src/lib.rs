//! Turn resolution and targeting for a two-player naval combat game on a
//! 10×10 grid.
//!
//! [`GridBoard`] holds one side's fleet and resolves incoming shot patterns.
//! [`TargetingEngine`] plays the attacking side: it learns from each
//! [`TurnReport`] and picks the next [`Move`] according to its
//! [`Difficulty`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
mod cellset;
mod common;
mod config;
mod heatmap;
#[cfg(feature = "std")]
mod logging;
mod placement;
mod pool;
pub mod prelude;
mod ship;
mod shot;
pub mod targeting;

pub use board::{BoardState, GridBoard, ShipState};
pub use cellset::{CellSet, Cells};
pub use common::*;
pub use config::*;
pub use heatmap::ProbabilityDensityMap;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
pub use placement::{FleetLayout, FleetPlacer};
pub use pool::{DiagonalShotPool, Slope};
pub use ship::{Orientation, Ship, ShipKind};
pub use shot::{Footprint, Move, ShotPattern};
pub use targeting::{
    AdvisorError, EngineSnapshot, LearningState, ShotAdvisor, TargetingEngine, TargetingView,
};
