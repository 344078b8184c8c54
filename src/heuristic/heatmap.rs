//! Placement-counting heat map ("Markov" heuristic).
//!
//! For every remaining ship length, every axis-aligned placement that avoids
//! the cells already fired at adds one to each cell it covers. The per-length
//! maps are summed, reweighted by parity of the shortest remaining length, and,
//! while hits are unresolved, topped up with a boosted map of the placements
//! that explain those hits.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::rngs::SmallRng;

use super::{placement_cells, placements, Heuristic, ScoreGrid, Uniform};
use crate::bitboard::BitBoard;
use crate::coord::Coordinate;

/// Highest-heat unfired cell, ties broken at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbabilityHeatmap;

impl ProbabilityHeatmap {
    /// Summed placement counts before any reweighting.
    pub fn base_map(fired: &BitBoard, remaining: &[usize]) -> ScoreGrid {
        let size = fired.size();
        let mut sum = ScoreGrid::new(size);
        for len in distinct(remaining) {
            for (start, orient) in placements(size, len) {
                if placement_cells(start, orient, len).any(|c| fired.is_set(c)) {
                    continue;
                }
                for c in placement_cells(start, orient, len) {
                    sum.increment(c);
                }
            }
        }
        sum
    }

    /// Counts of placements that cover at least one of `hits`. Hit cells are
    /// allowed inside a placement; every other fired cell is excluded.
    pub fn constrained_map(fired: &BitBoard, remaining: &[usize], hits: &[Coordinate]) -> ScoreGrid {
        let size = fired.size();
        let mut map = ScoreGrid::new(size);
        if hits.is_empty() {
            return map;
        }
        for len in distinct(remaining) {
            for (start, orient) in placements(size, len) {
                let mut covers_hit = false;
                let mut blocked = false;
                for c in placement_cells(start, orient, len) {
                    if hits.contains(&c) {
                        covers_hit = true;
                    } else if fired.is_set(c) {
                        blocked = true;
                        break;
                    }
                }
                if blocked || !covers_hit {
                    continue;
                }
                for c in placement_cells(start, orient, len) {
                    if !fired.is_set(c) {
                        map.increment(c);
                    }
                }
            }
        }
        map
    }

    /// Aggregate heat map used for selection.
    pub fn heat_map(fired: &BitBoard, remaining: &[usize], hits: &[Coordinate]) -> ScoreGrid {
        let mut sum = Self::base_map(fired, remaining);
        let Some(min_len) = remaining.iter().copied().min() else {
            return sum;
        };

        // A ship of length `min_len` covers exactly one cell of each residue
        // class mod `min_len` along its axis.
        if min_len > 1 {
            for (c, heat) in sum.iter_mut() {
                if *heat == 0 {
                    continue;
                }
                if (c.row + c.col) % min_len == 0 {
                    *heat = *heat * 3 / 2 + 1;
                } else {
                    *heat /= 2;
                }
            }
        }

        if !hits.is_empty() {
            let constrained = Self::constrained_map(fired, remaining, hits);
            sum.add_scaled(&constrained, boost(min_len));
        }
        sum
    }
}

/// Weight of the hit-constrained map.
pub fn boost(min_len: usize) -> u64 {
    (min_len * 2).clamp(3, 8) as u64
}

fn distinct(remaining: &[usize]) -> Vec<usize> {
    remaining
        .iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl Heuristic for ProbabilityHeatmap {
    fn choose(
        &mut self,
        rng: &mut SmallRng,
        fired: &BitBoard,
        remaining: &[usize],
        hits: &[Coordinate],
    ) -> Option<Coordinate> {
        let heat = Self::heat_map(fired, remaining, hits);
        let live: u64 = fired.iter_unset_bits().map(|c| heat.get(c)).sum();
        if live == 0 {
            log::trace!("heat map degenerate, falling back to uniform");
            return Uniform::pick(rng, fired);
        }
        heat.pick_best(rng, fired)
    }

    fn name(&self) -> &'static str {
        "markov"
    }
}
