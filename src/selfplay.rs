#![cfg(feature = "std")]
//! Batch self-play. Every match owns its boards and attackers, so matches run
//! on the rayon pool with nothing shared between them.

use rand::Rng;
use rayon::prelude::*;

use crate::config::EngineConfig;
use crate::game::{play_match, Combatant, MatchError, MatchResult};
use crate::stats::MatchStats;

/// Seeds consumed per match: two combatants, each seeding a board and an
/// attacker.
const SEEDS_PER_MATCH: u64 = 4;

/// Play `first` against `second` once, with every random source derived from
/// `seed`.
pub fn play_seeded(
    first: &EngineConfig,
    second: &EngineConfig,
    seed: u64,
) -> Result<MatchResult, MatchError> {
    let mut a = Combatant::automated(first, seed)?;
    let mut b = Combatant::automated(second, seed.wrapping_add(2))?;
    play_match(&mut a, &mut b)
}

/// Run `trials` self-play matches of `config` in parallel. Without a seed the
/// base seed is drawn from the thread RNG.
pub fn run_self_play(
    config: &EngineConfig,
    trials: usize,
    seed: Option<u64>,
) -> Result<Vec<MatchResult>, MatchError> {
    config.validate()?;
    let base = seed.unwrap_or_else(|| rand::rng().random());
    log::info!(
        "self-play: {} x {} on {}x{} (base seed {})",
        trials,
        config.heuristic.name(),
        config.grid_size,
        config.grid_size,
        base
    );
    (0..trials)
        .into_par_iter()
        .map(|i| play_seeded(config, config, base.wrapping_add(i as u64 * SEEDS_PER_MATCH)))
        .collect()
}

/// Self-play summary: statistics over the winner's move counts.
pub fn self_play_stats(
    config: &EngineConfig,
    trials: usize,
    seed: Option<u64>,
) -> Result<Option<MatchStats>, MatchError> {
    let results = run_self_play(config, trials, seed)?;
    let moves: Vec<usize> = results.iter().map(|r| r.winner_moves).collect();
    Ok(MatchStats::from_moves(&moves))
}
