//! Grid coordinates and their "A1" textual form.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

/// A zero-based (row, column) position on the grid.
///
/// Ordering is row-major so coordinates sort the way the grid reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Signed offset from this coordinate, `None` when it would leave the
    /// first quadrant or the `size`×`size` grid.
    pub fn offset(self, dr: isize, dc: isize, size: usize) -> Option<Coordinate> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        if row < size && col < size {
            Some(Coordinate::new(row, col))
        } else {
            None
        }
    }

    /// Edge neighbours in fixed priority order: up, down, left, right.
    /// Off-board cells are skipped.
    pub fn neighbors(self, size: usize) -> Vec<Coordinate> {
        NEIGHBOR_STEPS
            .iter()
            .filter_map(|&(dr, dc)| self.offset(dr, dc, size))
            .collect()
    }

    /// True if `other` shares an edge with this cell (diagonals excluded).
    pub fn is_neighbor(&self, other: &Coordinate) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
    }
}

/// Up, down, left, right.
pub const NEIGHBOR_STEPS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Column letters followed by the 1-based row, e.g. `C2` for (1, 2).
/// Columns past `Z` continue spreadsheet style: `AA`, `AB`, ...
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bijective base 26; enough room for any usize.
        let mut letters = [0u8; 16];
        let mut len = 0;
        let mut n = self.col as u128 + 1;
        while n > 0 {
            n -= 1;
            letters[len] = b'A' + (n % 26) as u8;
            len += 1;
            n /= 26;
        }
        for &l in letters[..len].iter().rev() {
            write!(f, "{}", l as char)?;
        }
        write!(f, "{}", self.row + 1)
    }
}

/// Errors returned when parsing the "A1" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCoordinateError {
    Empty,
    InvalidColumn(char),
    InvalidRow,
}

impl fmt::Display for ParseCoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCoordinateError::Empty => write!(f, "empty coordinate"),
            ParseCoordinateError::InvalidColumn(c) => write!(f, "invalid column letter '{}'", c),
            ParseCoordinateError::InvalidRow => write!(f, "row must be a positive number"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseCoordinateError {}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let first = s.chars().next().ok_or(ParseCoordinateError::Empty)?;
        let split = s
            .find(|ch: char| !ch.is_ascii_alphabetic())
            .unwrap_or(s.len());
        if split == 0 {
            return Err(ParseCoordinateError::InvalidColumn(first));
        }
        let (letters, digits) = s.split_at(split);
        let mut col = 0usize;
        for ch in letters.chars() {
            let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
            col = col
                .checked_mul(26)
                .and_then(|c| c.checked_add(digit))
                .ok_or(ParseCoordinateError::InvalidColumn(ch))?;
        }
        let col = col - 1;
        let row: usize = digits
            .parse()
            .map_err(|_| ParseCoordinateError::InvalidRow)?;
        if row == 0 {
            return Err(ParseCoordinateError::InvalidRow);
        }
        Ok(Coordinate::new(row - 1, col))
    }
}
