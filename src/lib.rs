#![cfg_attr(not(feature = "std"), no_std)]
//! Targeting engine for a grid-based hidden-ship search game.
//!
//! Given an attacker's own observations of the opposing board (cells fired,
//! hits, remaining ship lengths) the engine picks the next cell to attack.
//! Three heuristics are available ([`Uniform`], [`ProbabilityHeatmap`],
//! [`MonteCarloSampler`]) and a hunt-and-target controller ([`HuntTarget`])
//! can sit in front of them to finish discovered ships first.

extern crate alloc;

mod bitboard;
mod board;
mod common;
pub mod config;
mod coord;
mod game;
pub mod heuristic;
#[cfg(feature = "std")]
mod logging;
mod player;
#[cfg(feature = "std")]
pub mod selfplay;
mod ship;
mod stats;
pub mod targeting;

pub use bitboard::{BitBoard, BitBoardError, Cells};
pub use board::Board;
pub use common::{BoardError, Outcome, ShotResult};
pub use config::{fit_fleet, ConfigError, EngineConfig};
pub use coord::{Coordinate, ParseCoordinateError};
pub use game::{play_match, Combatant, GameStatus, MatchError, MatchResult, Side};
pub use heuristic::{
    Heuristic, HeuristicKind, MonteCarloSampler, ProbabilityHeatmap, ScoreGrid, Uniform,
};
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use player::{Attacker, Player};
pub use ship::{Orientation, Ship};
pub use stats::MatchStats;
pub use targeting::{Bounds, HuntTarget, Observation, Phase};
