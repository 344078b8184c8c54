//! Ship segments: a straight run of cells with its own hit record.

use alloc::collections::BTreeSet;
use core::fmt;

use crate::common::BoardError;
use crate::coord::Coordinate;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Cells share a row; the ship extends to the right.
    Horizontal,
    /// Cells share a column; the ship extends downwards.
    Vertical,
}

impl Orientation {
    /// Unit step along the orientation as (d_row, d_col).
    pub fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// A ship placed on the grid, with hits tracked per cell.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    start: Coordinate,
    length: usize,
    orientation: Orientation,
    hits: BTreeSet<Coordinate>,
}

impl Ship {
    /// Build a ship starting at `start`. Bounds are checked by the board.
    pub fn new(start: Coordinate, length: usize, orientation: Orientation) -> Result<Self, BoardError> {
        if length == 0 {
            return Err(BoardError::EmptyShip);
        }
        Ok(Ship {
            start,
            length,
            orientation,
            hits: BTreeSet::new(),
        })
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Last cell of the ship.
    pub fn end(&self) -> Coordinate {
        let (dr, dc) = self.orientation.step();
        Coordinate::new(
            self.start.row + dr * (self.length - 1),
            self.start.col + dc * (self.length - 1),
        )
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Cells from start to end.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let (dr, dc) = self.orientation.step();
        (0..self.length).map(move |k| Coordinate::new(self.start.row + dr * k, self.start.col + dc * k))
    }

    /// True if the ship fits in a `size`×`size` grid.
    pub fn fits(&self, size: usize) -> bool {
        let end = self.end();
        end.row < size && end.col < size
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        let end = self.end();
        (self.start.row..=end.row).contains(&c.row) && (self.start.col..=end.col).contains(&c.col)
    }

    /// True if the two ships share at least one cell.
    pub fn overlaps(&self, other: &Ship) -> bool {
        let (a0, a1) = (self.start, self.end());
        let (b0, b1) = (other.start, other.end());
        ranges_meet(a0.row, a1.row, b0.row, b1.row) && ranges_meet(a0.col, a1.col, b0.col, b1.col)
    }

    /// True if the ships are edge-adjacent without sharing a cell.
    pub fn touches(&self, other: &Ship) -> bool {
        !self.overlaps(other)
            && self
                .cells()
                .any(|a| other.cells().any(|b| a.is_neighbor(&b)))
    }

    /// Record a shot. Returns `true` only for a fresh hit on one of our cells.
    pub fn register_hit(&mut self, c: Coordinate) -> bool {
        self.contains(c) && self.hits.insert(c)
    }

    pub fn is_hit_at(&self, c: Coordinate) -> bool {
        self.hits.contains(&c)
    }

    /// Hit at least once.
    pub fn is_damaged(&self) -> bool {
        !self.hits.is_empty()
    }

    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.hits.len() == self.length
    }
}

fn ranges_meet(a0: usize, a1: usize, b0: usize, b1: usize) -> bool {
    a0 <= b1 && a1 >= b0
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ start: {}, end: {}, length: {}, orientation: {:?}, hits: {} }}",
            self.start,
            self.end(),
            self.length,
            self.orientation,
            self.hits.len(),
        )
    }
}
