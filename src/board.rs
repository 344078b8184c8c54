//! The defending board: placed ships and the set of cells fired upon.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{BoardError, Outcome, ShotResult};
use crate::coord::Coordinate;
use crate::ship::{Orientation, Ship};

/// Random attempts per ship before the fleet placement restarts.
const PLACEMENT_ATTEMPTS: usize = 1_000;
/// Whole-fleet restarts before giving up.
const FLEET_RESTARTS: usize = 100;

/// Square board holding ship placements and received shots.
#[derive(Clone)]
pub struct Board {
    size: usize,
    ships: Vec<Ship>,
    fired: BitBoard,
}

impl Board {
    /// Create an empty `size`×`size` board (no ships placed).
    pub fn new(size: usize) -> Self {
        Board {
            size,
            ships: Vec::new(),
            fired: BitBoard::new(size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Cells that have received a shot.
    pub fn fired(&self) -> &BitBoard {
        &self.fired
    }

    pub fn in_bounds(&self, c: Coordinate) -> bool {
        c.row < self.size && c.col < self.size
    }

    /// Check whether `ship` could be added: on the board, no overlap and no
    /// edge contact with an existing ship.
    pub fn check_placement(&self, ship: &Ship) -> Result<(), BoardError> {
        if !ship.fits(self.size) {
            return Err(BoardError::ShipOutOfBounds);
        }
        for existing in &self.ships {
            if ship.overlaps(existing) {
                return Err(BoardError::ShipOverlaps);
            }
            if ship.touches(existing) {
                return Err(BoardError::ShipTouches);
            }
        }
        Ok(())
    }

    /// Add a ship after checking placement legality.
    pub fn place(&mut self, ship: Ship) -> Result<(), BoardError> {
        self.check_placement(&ship)?;
        self.ships.push(ship);
        Ok(())
    }

    /// Returns a random legal ship of `length`, or `UnableToPlaceShip` when
    /// the attempt budget runs out.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<Ship, BoardError> {
        if length == 0 {
            return Err(BoardError::EmptyShip);
        }
        if length > self.size {
            return Err(BoardError::ShipOutOfBounds);
        }
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orient = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_r, max_c) = match orient {
                Orientation::Horizontal => (self.size - 1, self.size - length),
                Orientation::Vertical => (self.size - length, self.size - 1),
            };
            let r = rng.random_range(0..=max_r);
            let c = rng.random_range(0..=max_c);
            let ship = Ship::new(Coordinate::new(r, c), length, orient)?;
            if self.check_placement(&ship).is_ok() {
                return Ok(ship);
            }
        }
        Err(BoardError::UnableToPlaceShip { length })
    }

    /// Place an ordered fleet at random. A dead end clears the board and
    /// starts over, up to a fixed number of restarts.
    pub fn place_fleet<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        lengths: &[usize],
    ) -> Result<(), BoardError> {
        let mut last_err = BoardError::UnableToPlaceShip { length: 0 };
        for attempt in 0..FLEET_RESTARTS {
            self.ships.clear();
            match self.try_place_all(rng, lengths) {
                Ok(()) => {
                    log::trace!("fleet {:?} placed after {} restart(s)", lengths, attempt);
                    return Ok(());
                }
                Err(e @ BoardError::UnableToPlaceShip { .. }) => last_err = e,
                Err(e) => return Err(e),
            }
        }
        self.ships.clear();
        log::warn!("could not place fleet {:?} on a {}x{} board", lengths, self.size, self.size);
        Err(last_err)
    }

    fn try_place_all<R: Rng + ?Sized>(&mut self, rng: &mut R, lengths: &[usize]) -> Result<(), BoardError> {
        for &len in lengths {
            let ship = self.random_placement(rng, len)?;
            self.ships.push(ship);
        }
        Ok(())
    }

    /// Process a shot. Firing twice at a cell is not an error: it reports
    /// `AlreadyFired` and changes nothing.
    pub fn register_shot(&mut self, c: Coordinate) -> Result<ShotResult, BoardError> {
        if self.fired.get(c.row, c.col)? {
            return Ok(ShotResult::AlreadyFired);
        }
        self.fired.set(c.row, c.col)?;
        for ship in self.ships.iter_mut() {
            if ship.register_hit(c) {
                return Ok(ShotResult::Hit);
            }
        }
        Ok(ShotResult::Miss)
    }

    /// No ship occupies `c`.
    pub fn is_water(&self, c: Coordinate) -> bool {
        !self.ships.iter().any(|s| s.contains(c))
    }

    /// The ship containing `c` is sunk.
    pub fn is_sunk_at(&self, c: Coordinate) -> bool {
        self.ships.iter().any(|s| s.contains(c) && s.is_sunk())
    }

    /// Returns `true` when all ships are sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Register a shot and refine it into the four-valued outcome the
    /// attacker consumes. Repeated or off-board shots count as misses.
    pub fn receive_attack(&mut self, c: Coordinate) -> Outcome {
        match self.register_shot(c) {
            Ok(ShotResult::Hit) => {
                if !self.is_sunk_at(c) {
                    Outcome::Hit
                } else if self.all_sunk() {
                    Outcome::GameOver
                } else {
                    Outcome::Sunk
                }
            }
            Ok(ShotResult::Miss) | Ok(ShotResult::AlreadyFired) => Outcome::Miss,
            Err(e) => {
                log::warn!("attack at {:?} rejected: {}", c, e);
                Outcome::Miss
            }
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {},\n  fired: {:?},\n  ships: {:?}\n}}",
            self.size, self.fired, self.ships
        )
    }
}
