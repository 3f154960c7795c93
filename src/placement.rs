//! Random fleet placement under the overlap and no-touch constraints.

use rand::Rng;

use crate::board::neighbours;
use crate::cellset::CellSet;
use crate::config::{FLEET, GRID_CELLS, GRID_WIDTH, NUM_SHIPS};
use crate::ship::{Orientation, ShipKind};

/// Start cell and orientation for each kind of ship in the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetLayout {
    slots: [Option<(usize, Orientation)>; NUM_SHIPS],
}

fn slot_of(kind: ShipKind) -> usize {
    match kind {
        ShipKind::Battleship => 0,
        ShipKind::Carrier => 1,
        ShipKind::Cruiser => 2,
        ShipKind::Destroyer => 3,
        ShipKind::Submarine => 4,
    }
}

impl FleetLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ShipKind) -> Option<(usize, Orientation)> {
        self.slots[slot_of(kind)]
    }

    pub fn set(&mut self, kind: ShipKind, start: usize, orientation: Orientation) {
        self.slots[slot_of(kind)] = Some((start, orientation));
    }

    /// Whether every ship in the fleet has a position.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Placed ships in fleet order.
    pub fn iter(&self) -> impl Iterator<Item = (ShipKind, usize, Orientation)> + '_ {
        FLEET
            .iter()
            .filter_map(|&kind| self.get(kind).map(|(start, o)| (kind, start, o)))
    }
}

/// Samples fleet layouts until every ship fits.
#[derive(Debug, Clone, Copy)]
pub struct FleetPlacer {
    ships_can_touch: bool,
}

impl FleetPlacer {
    pub fn new(ships_can_touch: bool) -> Self {
        Self { ships_can_touch }
    }

    /// Place all five ships. Each ship is resampled until it neither overlaps
    /// nor (with the no-touch rule) borders an earlier one.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> FleetLayout {
        let mut layout = FleetLayout::new();
        let mut occupied = CellSet::new();
        for kind in FLEET {
            let (start, orientation, cells) = loop {
                let anchor = rng.random_range(0..GRID_CELLS);
                let orientation = if rng.random_bool(0.5) {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                let start = clamp_start(anchor, orientation, kind.size());
                let cells: CellSet = (0..kind.size())
                    .map(|i| start + i * orientation.step())
                    .collect();
                if self.accepts(cells, occupied) {
                    break (start, orientation, cells);
                }
            };
            log::trace!("placed {} at {} {:?}", kind, start, orientation);
            layout.set(kind, start, orientation);
            occupied |= cells;
        }
        layout
    }

    fn accepts(&self, cells: CellSet, occupied: CellSet) -> bool {
        if !(cells & occupied).is_empty() {
            return false;
        }
        self.ships_can_touch || (neighbours(cells) & occupied).is_empty()
    }
}

/// Pull `anchor` back so a ship of `size` stays inside its row or column.
fn clamp_start(anchor: usize, orientation: Orientation, size: usize) -> usize {
    let (mut row, mut col) = (anchor / GRID_WIDTH, anchor % GRID_WIDTH);
    match orientation {
        Orientation::Horizontal if col + size > GRID_WIDTH => col = GRID_WIDTH - size,
        Orientation::Vertical if row + size > GRID_WIDTH => row = GRID_WIDTH - size,
        _ => {}
    }
    row * GRID_WIDTH + col
}
