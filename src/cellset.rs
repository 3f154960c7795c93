//! A fixed-size set of grid cells packed into a `u128`.
//!
//! Cells are addressed by their linear index `0..GRID_CELLS`. Bits above the
//! grid are always kept clear, so set operations never leak phantom cells.

use alloc::vec::Vec;
use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::config::{GRID_CELLS, GRID_WIDTH};

/// Set of cell indices on the 10×10 grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<u8>", into = "Vec<u8>")
)]
pub struct CellSet {
    bits: u128,
}

impl CellSet {
    #[inline]
    const fn mask() -> u128 {
        (1u128 << GRID_CELLS) - 1
    }

    /// An empty set.
    #[inline]
    pub const fn new() -> Self {
        CellSet { bits: 0 }
    }

    /// The set of every cell on the grid.
    #[inline]
    pub const fn full() -> Self {
        CellSet { bits: Self::mask() }
    }

    /// Build a set from raw bits, discarding anything beyond the grid.
    #[inline]
    pub const fn from_raw(raw: u128) -> Self {
        CellSet {
            bits: raw & Self::mask(),
        }
    }

    #[inline]
    pub const fn into_raw(self) -> u128 {
        self.bits
    }

    /// Number of cells in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Whether `cell` is a member. Indices off the grid are never members.
    #[inline]
    pub fn contains(&self, cell: usize) -> bool {
        cell < GRID_CELLS && (self.bits >> cell) & 1 == 1
    }

    /// Insert `cell`, returning `true` if it was not already present.
    /// Indices off the grid are ignored.
    pub fn insert(&mut self, cell: usize) -> bool {
        if cell >= GRID_CELLS {
            return false;
        }
        let fresh = !self.contains(cell);
        self.bits |= 1u128 << cell;
        fresh
    }

    /// Remove `cell`, returning `true` if it was present.
    pub fn remove(&mut self, cell: usize) -> bool {
        if !self.contains(cell) {
            return false;
        }
        self.bits &= !(1u128 << cell);
        true
    }

    /// Whether every member of `self` is also in `other`.
    #[inline]
    pub fn is_subset(&self, other: &CellSet) -> bool {
        self.bits & !other.bits == 0
    }

    /// The `n`th member in ascending order.
    pub fn nth(&self, n: usize) -> Option<usize> {
        self.iter().nth(n)
    }

    /// Iterate over members in ascending order.
    #[inline]
    pub fn iter(&self) -> Cells {
        Cells { bits: self.bits }
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..GRID_WIDTH {
            for col in 0..GRID_WIDTH {
                let mark = if self.contains(row * GRID_WIDTH + col) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", mark)?;
            }
            if row + 1 < GRID_WIDTH {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the members of a [`CellSet`].
#[derive(Clone, Copy)]
pub struct Cells {
    bits: u128,
}

impl Iterator for Cells {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.bits == 0 {
            return None;
        }
        let cell = self.bits.trailing_zeros() as usize;
        self.bits &= self.bits - 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Cells {}

impl FromIterator<usize> for CellSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = CellSet::new();
        for cell in iter {
            set.insert(cell);
        }
        set
    }
}

impl From<Vec<u8>> for CellSet {
    fn from(cells: Vec<u8>) -> Self {
        cells.into_iter().map(usize::from).collect()
    }
}

impl From<CellSet> for Vec<u8> {
    fn from(set: CellSet) -> Self {
        set.iter().map(|cell| cell as u8).collect()
    }
}

impl BitAnd for CellSet {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        CellSet::from_raw(self.bits & rhs.bits)
    }
}

impl BitOr for CellSet {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        CellSet::from_raw(self.bits | rhs.bits)
    }
}

/// Complement within the grid.
impl Not for CellSet {
    type Output = Self;
    #[inline]
    fn not(self) -> Self {
        CellSet::from_raw(!self.bits)
    }
}

impl BitAndAssign for CellSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl BitOrAssign for CellSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}
