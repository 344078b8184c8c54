//! Turn orchestration between two combatants.

use alloc::boxed::Box;
use core::fmt;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::Board;
use crate::common::{BoardError, Outcome};
use crate::config::{ConfigError, EngineConfig};
use crate::player::{Attacker, Player};

/// Which combatant of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    First,
    Second,
}

/// Current status of a board from its owner's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// Result of a finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchResult {
    pub winner: Side,
    /// Attacks by both sides.
    pub total_moves: usize,
    /// Attacks by the winner.
    pub winner_moves: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// A combatant is already engaged in another match.
    AlreadyEngaged,
    /// A side ran out of cells before the opposing fleet was sunk.
    Exhausted { side: Side },
    Config(ConfigError),
    Board(BoardError),
}

impl From<ConfigError> for MatchError {
    fn from(err: ConfigError) -> Self {
        MatchError::Config(err)
    }
}

impl From<BoardError> for MatchError {
    fn from(err: BoardError) -> Self {
        MatchError::Board(err)
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::AlreadyEngaged => write!(f, "combatant is already engaged in a match"),
            MatchError::Exhausted { side } => {
                write!(f, "{:?} side exhausted the board before winning", side)
            }
            MatchError::Config(e) => write!(f, "configuration error: {}", e),
            MatchError::Board(e) => write!(f, "board error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatchError {}

/// A player together with the board it defends.
pub struct Combatant {
    player: Box<dyn Player>,
    board: Board,
    engaged: bool,
}

impl Combatant {
    pub fn new(player: Box<dyn Player>, board: Board) -> Self {
        Self {
            player,
            board,
            engaged: false,
        }
    }

    /// Automated combatant: fleet placed at random and an [`Attacker`] built
    /// from `config`, both seeded from `seed`.
    pub fn automated(config: &EngineConfig, seed: u64) -> Result<Self, MatchError> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new(config.grid_size);
        board.place_fleet(&mut rng, &config.fleet)?;
        let attacker = Attacker::new(config, SmallRng::seed_from_u64(seed.wrapping_add(1)));
        Ok(Self::new(Box::new(attacker), board))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> &dyn Player {
        self.player.as_ref()
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Mark as taking part in a match. Used by orchestrators that drive turns
    /// themselves.
    pub fn engage(&mut self) -> Result<(), MatchError> {
        if self.engaged {
            return Err(MatchError::AlreadyEngaged);
        }
        self.engaged = true;
        Ok(())
    }

    pub fn release(&mut self) {
        self.engaged = false;
    }

    pub fn status(&self, opponent: &Combatant) -> GameStatus {
        if self.board.all_sunk() {
            GameStatus::Lost
        } else if opponent.board.all_sunk() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    /// One attack from `self` on `defender`.
    fn attack(&mut self, defender: &mut Combatant, side: Side) -> Result<Outcome, MatchError> {
        let target = self
            .player
            .choose_attack()
            .ok_or(MatchError::Exhausted { side })?;
        let outcome = defender.board.receive_attack(target);
        log::trace!("{:?} attacks {} -> {:?}", side, target, outcome);
        self.player.on_attack_outcome(target, outcome);
        defender.player.on_defense_outcome(target, outcome);
        Ok(outcome)
    }
}

/// Play `first` against `second` until one fleet is sunk; `first` opens.
pub fn play_match(first: &mut Combatant, second: &mut Combatant) -> Result<MatchResult, MatchError> {
    if first.engaged || second.engaged {
        return Err(MatchError::AlreadyEngaged);
    }
    first.engaged = true;
    second.engaged = true;
    let result = run_turns(first, second);
    first.engaged = false;
    second.engaged = false;
    result
}

fn run_turns(first: &mut Combatant, second: &mut Combatant) -> Result<MatchResult, MatchError> {
    let mut moves = [0usize; 2];
    loop {
        moves[0] += 1;
        if first.attack(second, Side::First)? == Outcome::GameOver {
            return Ok(finish(Side::First, moves));
        }
        moves[1] += 1;
        if second.attack(first, Side::Second)? == Outcome::GameOver {
            return Ok(finish(Side::Second, moves));
        }
    }
}

fn finish(winner: Side, moves: [usize; 2]) -> MatchResult {
    let winner_moves = match winner {
        Side::First => moves[0],
        Side::Second => moves[1],
    };
    log::debug!(
        "{:?} wins after {} attacks ({} total)",
        winner,
        winner_moves,
        moves[0] + moves[1]
    );
    MatchResult {
        winner,
        total_moves: moves[0] + moves[1],
        winner_moves,
    }
}
