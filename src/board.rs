//! One side's grid and fleet, and resolution of incoming shots.

use alloc::vec::Vec;
use core::fmt;

use arrayvec::ArrayVec;
use rand::Rng;

use crate::cellset::CellSet;
use crate::common::{BoardError, GridCellState, SunkShip, TurnReport};
use crate::config::{ShotAllowance, FLEET, GRID_CELLS, GRID_WIDTH, MAX_SHIP_SIZE, NUM_SHIPS};
use crate::placement::{FleetLayout, FleetPlacer};
use crate::ship::{Orientation, Ship, ShipKind};
use crate::shot::ShotPattern;

/// Serializable state of one ship, for saving and restoring boards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipState {
    pub kind: ShipKind,
    pub start: usize,
    pub orientation: Orientation,
    pub damage: [bool; MAX_SHIP_SIZE],
}

/// Serializable board state for saving games.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardState {
    pub grid: Vec<GridCellState>,
    pub ships: [ShipState; NUM_SHIPS],
    pub ships_can_touch: bool,
}

/// Grid cell states plus the five ships placed on them.
#[derive(Clone, PartialEq, Eq)]
pub struct GridBoard {
    grid: [GridCellState; GRID_CELLS],
    ships: [Ship; NUM_SHIPS],
    ships_can_touch: bool,
}

impl GridBoard {
    /// Build a board from a caller-supplied layout, checking bounds, overlap
    /// and, when ships may not touch, orthogonal adjacency.
    pub fn from_layout(layout: &FleetLayout, ships_can_touch: bool) -> Result<Self, BoardError> {
        let mut occupied = CellSet::new();
        let mut ships = ArrayVec::<Ship, NUM_SHIPS>::new();
        for kind in FLEET {
            let (start, orientation) = layout
                .get(kind)
                .ok_or(BoardError::MissingShip { kind })?;
            let ship = Ship::new(kind, orientation, start)?;
            let cells: CellSet = ship.cells().collect();
            if !(cells & occupied).is_empty() {
                return Err(BoardError::ShipOverlaps { kind });
            }
            if !ships_can_touch && !(neighbours(cells) & occupied).is_empty() {
                return Err(BoardError::ShipsTouching { kind });
            }
            occupied |= cells;
            ships.push(ship);
        }
        let ships = ships
            .into_inner()
            .map_err(|partial| BoardError::MissingShip {
                kind: FLEET[partial.len()],
            })?;
        Ok(GridBoard {
            grid: [GridCellState::Empty; GRID_CELLS],
            ships,
            ships_can_touch,
        })
    }

    /// Build a board with a randomly generated fleet.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, ships_can_touch: bool) -> Result<Self, BoardError> {
        let layout = FleetPlacer::new(ships_can_touch).generate(rng);
        Self::from_layout(&layout, ships_can_touch)
    }

    /// Attacker's view of every cell.
    pub fn grid(&self) -> &[GridCellState; GRID_CELLS] {
        &self.grid
    }

    pub fn ships(&self) -> &[Ship; NUM_SHIPS] {
        &self.ships
    }

    pub fn ship(&self, kind: ShipKind) -> Option<&Ship> {
        self.ships.iter().find(|s| s.kind() == kind)
    }

    pub fn ships_can_touch(&self) -> bool {
        self.ships_can_touch
    }

    /// Returns `true` when every ship is sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Union of every ship's cells.
    pub fn occupied(&self) -> CellSet {
        self.ships.iter().flat_map(Ship::cells).collect()
    }

    /// Sizes of ships still afloat, in fleet order.
    pub fn remaining_ship_sizes(&self) -> Vec<usize> {
        self.ships
            .iter()
            .filter(|s| !s.is_sunk())
            .map(Ship::size)
            .collect()
    }

    /// Resolve a shot pattern anchored at `anchor`.
    ///
    /// Every affected index must lie on the grid; otherwise nothing is
    /// mutated and `CellOutOfRange` is returned. Row wrap-around is not
    /// checked here: callers validate multi-cell anchors with
    /// [`ShotPattern::fits`] first.
    pub fn resolve_shot(&mut self, anchor: usize, pattern: ShotPattern) -> Result<TurnReport, BoardError> {
        let mut targets = Vec::with_capacity(pattern.deltas().len());
        for &delta in pattern.deltas() {
            let cell = anchor as isize + delta;
            if !(0..GRID_CELLS as isize).contains(&cell) {
                return Err(BoardError::CellOutOfRange { cell });
            }
            targets.push(cell as usize);
        }

        let mut report = TurnReport::default();
        for cell in targets {
            let struck = self
                .ships
                .iter_mut()
                .filter(|s| !s.is_sunk())
                .find(|s| s.occupies(cell));
            match struck {
                Some(ship) => {
                    ship.register_hit(cell);
                    self.grid[cell] = GridCellState::Hit;
                    report.cells_hit.push(cell);
                    if ship.is_sunk() {
                        report.ships_sunk.push(SunkShip {
                            start: ship.start(),
                            orientation: ship.orientation(),
                            kind: ship.kind(),
                        });
                        for sunk in ship.cells() {
                            self.grid[sunk] = GridCellState::Sunk;
                        }
                    }
                }
                None => {
                    self.grid[cell] = GridCellState::Miss;
                    report.cells_missed.push(cell);
                }
            }
        }
        report.is_game_over = self.all_sunk();

        log::debug!(
            "{:?} at {}: hit {:?}, missed {:?}, sunk {}",
            pattern,
            anchor,
            report.cells_hit,
            report.cells_missed,
            report.ships_sunk.len()
        );
        Ok(report)
    }

    /// Shots this side may fire in one turn under `allowance`, never less
    /// than one.
    pub fn shots_per_turn(&self, allowance: ShotAllowance) -> usize {
        let afloat = self.ships.iter().filter(|s| !s.is_sunk());
        let shots = match allowance {
            ShotAllowance::Fixed(n) => n,
            ShotAllowance::UnsunkShips => afloat.count(),
            ShotAllowance::UndamagedShips => afloat.filter(|s| s.is_undamaged()).count(),
            ShotAllowance::LargestUndamagedShip => afloat
                .filter(|s| s.is_undamaged())
                .map(Ship::size)
                .max()
                .unwrap_or(0),
            ShotAllowance::LargestUnsunkShip => afloat.map(Ship::size).max().unwrap_or(0),
        };
        shots.max(1)
    }

    /// Current positions of the fleet as a layout.
    pub fn layout(&self) -> FleetLayout {
        let mut layout = FleetLayout::new();
        for ship in &self.ships {
            layout.set(ship.kind(), ship.start(), ship.orientation());
        }
        layout
    }
}

/// Cells orthogonally adjacent to any member of `cells`, excluding `cells`.
pub(crate) fn neighbours(cells: CellSet) -> CellSet {
    let mut out = CellSet::new();
    for cell in cells.iter() {
        for delta in [1isize, -1, GRID_WIDTH as isize, -(GRID_WIDTH as isize)] {
            if let Some(next) = crate::shot::step(cell, delta) {
                out.insert(next);
            }
        }
    }
    out & !cells
}

impl fmt::Debug for GridBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GridBoard {{")?;
        for row in self.grid.chunks(GRID_WIDTH) {
            write!(f, "  ")?;
            for state in row {
                let mark = match state {
                    GridCellState::Empty => '.',
                    GridCellState::Miss => 'o',
                    GridCellState::Hit => 'x',
                    GridCellState::Sunk => '#',
                };
                write!(f, "{} ", mark)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  ships: {:?}", self.ships)?;
        write!(f, "}}")
    }
}

impl From<&GridBoard> for BoardState {
    fn from(board: &GridBoard) -> Self {
        let ships = core::array::from_fn(|i| {
            let ship = &board.ships[i];
            let mut damage = [false; MAX_SHIP_SIZE];
            damage[..ship.size()].copy_from_slice(ship.damage());
            ShipState {
                kind: ship.kind(),
                start: ship.start(),
                orientation: ship.orientation(),
                damage,
            }
        });
        BoardState {
            grid: board.grid.to_vec(),
            ships,
            ships_can_touch: board.ships_can_touch,
        }
    }
}

impl TryFrom<BoardState> for GridBoard {
    type Error = BoardError;

    fn try_from(state: BoardState) -> Result<Self, Self::Error> {
        let grid: [GridCellState; GRID_CELLS] = state
            .grid
            .as_slice()
            .try_into()
            .map_err(|_| BoardError::GridLength {
                len: state.grid.len(),
            })?;
        let mut layout = FleetLayout::new();
        for ship in &state.ships {
            layout.set(ship.kind, ship.start, ship.orientation);
        }
        // Validates geometry; damage is restored afterwards.
        let mut board = GridBoard::from_layout(&layout, state.ships_can_touch)?;
        for slot in board.ships.iter_mut() {
            let kind = slot.kind();
            let saved = state
                .ships
                .iter()
                .find(|s| s.kind == kind)
                .ok_or(BoardError::MissingShip { kind })?;
            *slot = Ship::with_damage(kind, saved.orientation, saved.start, saved.damage)?;
        }
        check_grid(&grid, &board.ships)?;
        board.grid = grid;
        Ok(board)
    }
}

/// A saved grid must agree with the fleet: untouched segments are Empty,
/// damaged segments of a live ship are Hit, a sunk ship's cells are Sunk (or
/// Miss once fired at again) and open water is Empty or Miss.
fn check_grid(grid: &[GridCellState; GRID_CELLS], ships: &[Ship; NUM_SHIPS]) -> Result<(), BoardError> {
    for (cell, &state) in grid.iter().enumerate() {
        let ship = ships.iter().find(|s| s.occupies(cell));
        let allowed = match ship {
            None => matches!(state, GridCellState::Empty | GridCellState::Miss),
            Some(ship) if ship.is_sunk() => {
                matches!(state, GridCellState::Sunk | GridCellState::Miss)
            }
            Some(ship) => {
                let damaged = ship
                    .segment_of(cell)
                    .is_some_and(|segment| ship.damage()[segment]);
                if damaged {
                    state == GridCellState::Hit
                } else {
                    state == GridCellState::Empty
                }
            }
        };
        if !allowed {
            return Err(BoardError::GridMismatch { cell, state });
        }
    }
    Ok(())
}
