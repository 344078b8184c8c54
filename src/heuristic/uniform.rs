use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use super::Heuristic;
use crate::bitboard::BitBoard;
use crate::coord::Coordinate;

/// Uniformly random choice among unfired cells.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl Uniform {
    /// Free-function form, shared as the fallback of the other heuristics.
    pub fn pick(rng: &mut SmallRng, fired: &BitBoard) -> Option<Coordinate> {
        let candidates: Vec<Coordinate> = fired.iter_unset_bits().collect();
        candidates.choose(rng).copied()
    }
}

impl Heuristic for Uniform {
    fn choose(
        &mut self,
        rng: &mut SmallRng,
        fired: &BitBoard,
        _remaining: &[usize],
        _hits: &[Coordinate],
    ) -> Option<Coordinate> {
        Uniform::pick(rng, fired)
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}
