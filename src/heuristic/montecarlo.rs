//! Rejection-sampling estimator.
//!
//! Repeatedly lays out the whole remaining fleet at random, keeps only the
//! layouts consistent with what has been observed (every unresolved hit
//! covered, no known miss covered) and counts how often each cell is occupied.

use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::{placement_cells, placements, Heuristic, ScoreGrid, Uniform};
use crate::bitboard::BitBoard;
use crate::config::DEFAULT_SAMPLES;
use crate::coord::Coordinate;
use crate::ship::{Orientation, Ship};

#[derive(Debug, Clone, Copy)]
pub struct MonteCarloSampler {
    samples: usize,
}

impl Default for MonteCarloSampler {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLES)
    }
}

impl MonteCarloSampler {
    /// `samples` is clamped to at least one attempt.
    pub fn new(samples: usize) -> Self {
        Self {
            samples: samples.max(1),
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Fired cells that are not unresolved hits.
    pub fn known_misses(fired: &BitBoard, hits: &[Coordinate]) -> BitBoard {
        let mut misses = BitBoard::new(fired.size());
        for c in fired.iter_set_bits() {
            if !hits.contains(&c) {
                let _ = misses.mark(c);
            }
        }
        misses
    }

    /// One sampling attempt. Lengths are placed in a fresh random order, each
    /// uniformly among the positions that avoid known misses and the ships
    /// already laid in this attempt. Returns the layout when it is accepted.
    pub fn sample_once(
        rng: &mut SmallRng,
        misses: &BitBoard,
        remaining: &[usize],
        hits: &[Coordinate],
    ) -> Option<Vec<Ship>> {
        let size = misses.size();
        let mut order: Vec<usize> = remaining.to_vec();
        order.shuffle(rng);

        let mut occupied: BitBoard = BitBoard::new(size);
        let mut ships = Vec::with_capacity(order.len());
        for len in order {
            let options: Vec<(Coordinate, Orientation)> = placements(size, len)
                .filter(|&(start, orient)| {
                    placement_cells(start, orient, len)
                        .all(|c| !occupied.is_set(c) && !misses.is_set(c))
                })
                .collect();
            let &(start, orient) = options.choose(rng)?;
            for c in placement_cells(start, orient, len) {
                let _ = occupied.mark(c);
            }
            ships.push(Ship::new(start, len, orient).ok()?);
        }

        let covers_hits = hits.iter().all(|&h| occupied.is_set(h));
        let avoids_misses = misses.iter_set_bits().all(|m| !occupied.is_set(m));
        if covers_hits && avoids_misses {
            Some(ships)
        } else {
            None
        }
    }

    /// Occupancy counts over the sample budget, with the number of accepted
    /// layouts.
    pub fn occupancy(
        &self,
        rng: &mut SmallRng,
        fired: &BitBoard,
        remaining: &[usize],
        hits: &[Coordinate],
    ) -> (ScoreGrid, usize) {
        let misses = Self::known_misses(fired, hits);
        let mut counts = ScoreGrid::new(fired.size());
        let mut accepted = 0usize;
        for _ in 0..self.samples {
            if let Some(ships) = Self::sample_once(rng, &misses, remaining, hits) {
                accepted += 1;
                for ship in &ships {
                    for c in ship.cells() {
                        counts.increment(c);
                    }
                }
            }
        }
        (counts, accepted)
    }
}

impl Heuristic for MonteCarloSampler {
    fn choose(
        &mut self,
        rng: &mut SmallRng,
        fired: &BitBoard,
        remaining: &[usize],
        hits: &[Coordinate],
    ) -> Option<Coordinate> {
        if remaining.is_empty() {
            return Uniform::pick(rng, fired);
        }
        let (counts, accepted) = self.occupancy(rng, fired, remaining, hits);
        log::trace!(
            "monte carlo accepted {}/{} samples",
            accepted,
            self.samples
        );
        if accepted == 0 {
            log::debug!("no consistent layout sampled, falling back to uniform");
            return Uniform::pick(rng, fired);
        }
        counts.pick_best(rng, fired)
    }

    fn name(&self) -> &'static str {
        "montecarlo"
    }
}
