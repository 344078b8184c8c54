//! A runtime-sized square bitboard.
//!
//! The grid side is only known once a game is configured, so cells are packed
//! into a vector of unsigned words `T` rather than a single integer. Basic
//! constructors, cell access and bitwise operations are provided.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{BitAnd, BitOr, Not};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

use crate::coord::Coordinate;

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitBoardError {
    /// Two boards of different sides were combined.
    SizeMismatch { left: usize, right: usize },
    /// Row or column index is out of bounds [0..N).
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::SizeMismatch { left, right } => {
                write!(f, "SizeMismatch: left side={}, right side={}", left, right)
            }
            BitBoardError::IndexOutOfBounds { row, col } => {
                write!(f, "IndexOutOfBounds: row={}, col={}", row, col)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BitBoardError {}

/// An N×N bitboard stored in words of the unsigned integer `T`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitBoard<T = u64>
where
    T: PrimInt + Unsigned + Zero,
{
    size: usize,
    words: Vec<T>,
}

impl<T> BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    const WORD_BITS: usize = mem::size_of::<T>() * 8;

    /// Create an empty `size`×`size` board (all bits cleared).
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        let len = cells.div_ceil(Self::WORD_BITS);
        BitBoard {
            size,
            words: vec![T::zero(); len],
        }
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (`N * N`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// Returns true if every cell is set.
    pub fn is_full(&self) -> bool {
        self.count_ones() == self.cell_count()
    }

    /// Returns true if `(row, col)` lies on the board.
    #[inline]
    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Gets the bit at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        let (word, bit) = self.locate(row, col)?;
        Ok(((self.words[word] >> bit) & T::one()) != T::zero())
    }

    /// Sets the bit at (row, col) to 1.
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        let (word, bit) = self.locate(row, col)?;
        self.words[word] = self.words[word] | (T::one() << bit);
        Ok(())
    }

    /// Clears the bit at (row, col) to 0.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        let (word, bit) = self.locate(row, col)?;
        self.words[word] = self.words[word] & !(T::one() << bit);
        Ok(())
    }

    /// Toggles the bit at (row, col).
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        let (word, bit) = self.locate(row, col)?;
        self.words[word] = self.words[word] ^ (T::one() << bit);
        Ok(())
    }

    /// Coordinate flavoured `get`; off-board cells read as unset.
    #[inline]
    pub fn is_set(&self, c: Coordinate) -> bool {
        self.get(c.row, c.col).unwrap_or(false)
    }

    /// Coordinate flavoured `set`.
    #[inline]
    pub fn mark(&mut self, c: Coordinate) -> Result<(), BitBoardError> {
        self.set(c.row, c.col)
    }

    /// Clears all bits to `0`.
    #[inline]
    pub fn clear_all(&mut self) {
        for w in self.words.iter_mut() {
            *w = T::zero();
        }
    }

    /// Creates a bitboard from an iterator over `(row, col)` positions.
    pub fn from_iter<I>(size: usize, iter: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut board = Self::new(size);
        for (r, c) in iter {
            board.set(r, c)?;
        }
        Ok(board)
    }

    /// Iterator over the set cells in row-major order.
    #[inline]
    pub fn iter_set_bits(&self) -> Cells<'_, T> {
        Cells {
            board: self,
            idx: 0,
            want: true,
        }
    }

    /// Iterator over the cleared cells in row-major order.
    #[inline]
    pub fn iter_unset_bits(&self) -> Cells<'_, T> {
        Cells {
            board: self,
            idx: 0,
            want: false,
        }
    }

    /// Bitwise AND, failing when the sides differ.
    pub fn try_and(&self, rhs: &Self) -> Result<Self, BitBoardError> {
        self.zip_with(rhs, |a, b| a & b)
    }

    /// Bitwise OR, failing when the sides differ.
    pub fn try_or(&self, rhs: &Self) -> Result<Self, BitBoardError> {
        self.zip_with(rhs, |a, b| a | b)
    }

    fn zip_with(&self, rhs: &Self, op: impl Fn(T, T) -> T) -> Result<Self, BitBoardError> {
        if self.size != rhs.size {
            return Err(BitBoardError::SizeMismatch {
                left: self.size,
                right: rhs.size,
            });
        }
        let words = self
            .words
            .iter()
            .zip(rhs.words.iter())
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(BitBoard {
            size: self.size,
            words,
        })
    }

    #[inline]
    fn bit_at(&self, idx: usize) -> bool {
        let word = idx / Self::WORD_BITS;
        let bit = idx % Self::WORD_BITS;
        ((self.words[word] >> bit) & T::one()) != T::zero()
    }

    #[inline]
    fn locate(&self, row: usize, col: usize) -> Result<(usize, usize), BitBoardError> {
        if !self.in_bounds(row, col) {
            return Err(BitBoardError::IndexOutOfBounds { row, col });
        }
        let idx = row * self.size + col;
        Ok((idx / Self::WORD_BITS, idx % Self::WORD_BITS))
    }

    /// Zero the padding bits of the last word so counts stay exact.
    fn trim(&mut self) {
        let used = self.cell_count() % Self::WORD_BITS;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last = *last & ((T::one() << used) - T::one());
            }
        }
    }
}

impl<T> fmt::Debug for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}>:", self.size)?;
        write!(f, "{}", self)?;
        writeln!(f)
    }
}

impl<T> fmt::Display for BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                let bit = if self.bit_at(r * self.size + c) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", bit)?;
            }
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set (or cleared) cells of a bitboard.
#[derive(Clone)]
pub struct Cells<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T>,
    idx: usize,
    want: bool,
}

impl<'a, T> Iterator for Cells<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = Coordinate;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let n = self.board.size;
        while self.idx < n * n {
            let idx = self.idx;
            self.idx += 1;
            if self.board.bit_at(idx) == self.want {
                return Some(Coordinate::new(idx / n, idx % n));
            }
        }
        None
    }
}

/// Bitwise AND for combining two boards of the same side.
///
/// Mismatched sides combine over the shorter word vector; use
/// [`BitBoard::try_and`] when sides are not known to agree.
impl<T> BitAnd for &BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = BitBoard<T>;
    fn bitand(self, rhs: Self) -> BitBoard<T> {
        let words = self
            .words
            .iter()
            .zip(rhs.words.iter())
            .map(|(&a, &b)| a & b)
            .collect();
        BitBoard {
            size: self.size,
            words,
        }
    }
}

/// Bitwise OR for combining two boards of the same side.
impl<T> BitOr for &BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = BitBoard<T>;
    fn bitor(self, rhs: Self) -> BitBoard<T> {
        let words = self
            .words
            .iter()
            .zip(rhs.words.iter())
            .map(|(&a, &b)| a | b)
            .collect();
        BitBoard {
            size: self.size,
            words,
        }
    }
}

/// Bitwise NOT, limited to the board's cells.
impl<T> Not for &BitBoard<T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = BitBoard<T>;
    fn not(self) -> BitBoard<T> {
        let mut out = BitBoard {
            size: self.size,
            words: self.words.iter().map(|&w| !w).collect(),
        };
        out.trim();
        out
    }
}
