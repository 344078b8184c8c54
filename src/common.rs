//! Common types: shot results, attack outcomes and board errors.

use core::fmt;

use crate::bitboard::BitBoardError;

/// Raw result of registering a shot on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotResult {
    /// The cell had already been fired at; nothing changed.
    AlreadyFired,
    /// No ship occupies the cell.
    Miss,
    /// A ship segment was hit.
    Hit,
}

/// Outcome of an attack as reported back to the attacker.
///
/// `Sunk` and `GameOver` refine `Hit`: the shot also finished a ship, or
/// finished the last ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Hit,
    Sunk,
    Miss,
    GameOver,
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error (e.g., invalid index).
    BitBoardError(BitBoardError),
    /// Ship length is zero.
    EmptyShip,
    /// Ship placement leaves the grid.
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship placement shares an edge with another ship.
    ShipTouches,
    /// Unable to place ship (random placement budget exhausted).
    UnableToPlaceShip { length: usize },
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::EmptyShip => write!(f, "Ship length must be at least 1"),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ShipTouches => write!(f, "Ship placement touches another ship"),
            BoardError::UnableToPlaceShip { length } => {
                write!(f, "Unable to place ship of length {}", length)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
