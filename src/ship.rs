//! Ship kinds, orientation and per-segment damage tracking.

use core::fmt;

use crate::common::BoardError;
use crate::config::{GRID_CELLS, GRID_WIDTH, MAX_SHIP_SIZE};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Index distance between consecutive segments.
    #[inline]
    pub fn step(self) -> usize {
        match self {
            Orientation::Horizontal => 1,
            Orientation::Vertical => GRID_WIDTH,
        }
    }
}

/// The five kinds of ship in a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Battleship,
    Carrier,
    Cruiser,
    Destroyer,
    Submarine,
}

impl ShipKind {
    /// Number of cells a ship of this kind occupies.
    pub const fn size(self) -> usize {
        match self {
            ShipKind::Battleship => 4,
            ShipKind::Carrier => 5,
            ShipKind::Cruiser => 3,
            ShipKind::Destroyer => 2,
            ShipKind::Submarine => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Battleship => "Battleship",
            ShipKind::Carrier => "Carrier",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Destroyer => "Destroyer",
            ShipKind::Submarine => "Submarine",
        }
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cells covered by a ship of `size` starting at `start`, or `None` when the
/// ship would leave the grid or wrap onto the next row.
pub(crate) fn span(
    start: usize,
    orientation: Orientation,
    size: usize,
) -> Option<impl Iterator<Item = usize>> {
    if start >= GRID_CELLS || size == 0 {
        return None;
    }
    let (row, col) = (start / GRID_WIDTH, start % GRID_WIDTH);
    let fits = match orientation {
        Orientation::Horizontal => col + size <= GRID_WIDTH,
        Orientation::Vertical => row + size <= GRID_WIDTH,
    };
    if !fits {
        return None;
    }
    let step = orientation.step();
    Some((0..size).map(move |i| start + i * step))
}

/// A placed ship: fixed geometry plus one damage flag per segment.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    kind: ShipKind,
    orientation: Orientation,
    start: usize,
    damage: [bool; MAX_SHIP_SIZE],
}

impl Ship {
    /// Place an undamaged ship with its first segment at `start`.
    pub fn new(kind: ShipKind, orientation: Orientation, start: usize) -> Result<Self, BoardError> {
        Self::with_damage(kind, orientation, start, [false; MAX_SHIP_SIZE])
    }

    /// Rebuild a ship with previously recorded damage. Flags past the ship's
    /// size are ignored.
    pub fn with_damage(
        kind: ShipKind,
        orientation: Orientation,
        start: usize,
        mut damage: [bool; MAX_SHIP_SIZE],
    ) -> Result<Self, BoardError> {
        if span(start, orientation, kind.size()).is_none() {
            return Err(BoardError::ShipOutOfBounds { kind });
        }
        for flag in damage.iter_mut().skip(kind.size()) {
            *flag = false;
        }
        Ok(Ship {
            kind,
            orientation,
            start,
            damage,
        })
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn size(&self) -> usize {
        self.kind.size()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Index of the first (top or left) segment.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Occupied cells, first segment first.
    pub fn cells(&self) -> impl Iterator<Item = usize> {
        let (start, step) = (self.start, self.orientation.step());
        (0..self.kind.size()).map(move |i| start + i * step)
    }

    /// Segment index of `cell`, if the ship covers it.
    pub fn segment_of(&self, cell: usize) -> Option<usize> {
        self.cells().position(|c| c == cell)
    }

    pub fn occupies(&self, cell: usize) -> bool {
        self.segment_of(cell).is_some()
    }

    /// Damage flags, one per segment.
    pub fn damage(&self) -> &[bool] {
        &self.damage[..self.kind.size()]
    }

    /// Record a hit on `cell`. Returns `true` if the ship covers the cell.
    pub fn register_hit(&mut self, cell: usize) -> bool {
        match self.segment_of(cell) {
            Some(segment) => {
                self.damage[segment] = true;
                true
            }
            None => false,
        }
    }

    pub fn is_sunk(&self) -> bool {
        self.damage().iter().all(|&hit| hit)
    }

    pub fn is_undamaged(&self) -> bool {
        self.damage().iter().all(|&hit| !hit)
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ kind: {}, start: {}, orientation: {:?}, damage: {:?} }}",
            self.kind,
            self.start,
            self.orientation,
            self.damage(),
        )
    }
}
