//! Geometry of confirmed hits: runs along rows and columns and the open
//! cells around them.

use alloc::vec::Vec;

use rand::Rng;

use crate::cellset::CellSet;
use crate::config::GRID_WIDTH;
use crate::shot::step;

/// Axis a candidate shot extends along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    fn stride(self) -> isize {
        match self {
            Axis::Row => 1,
            Axis::Column => GRID_WIDTH as isize,
        }
    }
}

/// Maximal runs of two or more adjacent hits; every row first, then every
/// column, each in ascending order.
pub fn lines_of_hits(hits: &CellSet) -> Vec<Vec<usize>> {
    let mut lines = Vec::new();
    for axis in [Axis::Row, Axis::Column] {
        for fixed in 0..GRID_WIDTH {
            let mut run = Vec::new();
            for j in 0..GRID_WIDTH {
                let cell = match axis {
                    Axis::Row => fixed * GRID_WIDTH + j,
                    Axis::Column => j * GRID_WIDTH + fixed,
                };
                if hits.contains(cell) {
                    run.push(cell);
                } else {
                    flush(&mut run, &mut lines);
                }
            }
            flush(&mut run, &mut lines);
        }
    }
    lines
}

fn flush(run: &mut Vec<usize>, lines: &mut Vec<Vec<usize>>) {
    if run.len() >= 2 {
        lines.push(core::mem::take(run));
    } else {
        run.clear();
    }
}

/// Extend the longest line of hits (the first one found on ties) through
/// one of its open ends. When both ends are open a coin flip decides.
pub fn continuation<R: Rng + ?Sized>(
    rng: &mut R,
    hits: &CellSet,
    available: &CellSet,
) -> Option<(usize, Axis)> {
    let lines = lines_of_hits(hits);
    let mut longest: Option<&Vec<usize>> = None;
    for line in &lines {
        if longest.map_or(true, |best| line.len() > best.len()) {
            longest = Some(line);
        }
    }
    let line = longest?;
    let (first, last) = (*line.first()?, *line.last()?);
    let axis = if first % GRID_WIDTH == last % GRID_WIDTH {
        Axis::Column
    } else {
        Axis::Row
    };

    let before = extend(first, -axis.stride(), available);
    let after = extend(last, axis.stride(), available);
    let cell = match (before, after) {
        (Some(b), Some(a)) => {
            if rng.random_bool(0.5) {
                b
            } else {
                a
            }
        }
        (Some(b), None) => b,
        (None, Some(a)) => a,
        (None, None) => return None,
    };
    Some((cell, axis))
}

fn extend(cell: usize, delta: isize, available: &CellSet) -> Option<usize> {
    step(cell, delta).filter(|&next| available.contains(next))
}

/// Available cells orthogonally adjacent to a hit, paired with the axis that
/// reaches them. Pairs are distinct and follow hit order.
pub fn hit_adjacent(hits: &CellSet, available: &CellSet) -> Vec<(usize, Axis)> {
    let mut out: Vec<(usize, Axis)> = Vec::new();
    for hit in hits.iter() {
        for (delta, axis) in [
            (1, Axis::Row),
            (-1, Axis::Row),
            (GRID_WIDTH as isize, Axis::Column),
            (-(GRID_WIDTH as isize), Axis::Column),
        ] {
            if let Some(cell) = extend(hit, delta, available) {
                if !out.contains(&(cell, axis)) {
                    out.push((cell, axis));
                }
            }
        }
    }
    out
}

/// The set of cells returned by [`hit_adjacent`].
pub fn hit_adjacent_cells(hits: &CellSet, available: &CellSet) -> CellSet {
    hit_adjacent(hits, available)
        .into_iter()
        .map(|(cell, _)| cell)
        .collect()
}
