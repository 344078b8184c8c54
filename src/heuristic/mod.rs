//! Attack-selection heuristics.
//!
//! Each heuristic answers one question: given what this attacker has already
//! fired at, which ship lengths remain and which hits are still unresolved,
//! which cell should be attacked next?

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

use crate::bitboard::{BitBoard, BitBoardError};
use crate::coord::Coordinate;

pub mod heatmap;
pub mod montecarlo;
pub mod uniform;

pub use heatmap::ProbabilityHeatmap;
pub use montecarlo::MonteCarloSampler;
pub use uniform::Uniform;

/// Interface implemented by every attack-selection strategy.
pub trait Heuristic: Send {
    /// Pick the next cell. Never returns a cell set in `fired`; returns `None`
    /// only when every cell has been fired.
    fn choose(
        &mut self,
        rng: &mut SmallRng,
        fired: &BitBoard,
        remaining: &[usize],
        hits: &[Coordinate],
    ) -> Option<Coordinate>;

    /// Short lowercase name used in logs and reports.
    fn name(&self) -> &'static str;
}

/// Which heuristic to build. Parsing never fails: unknown names select
/// [`HeuristicKind::Uniform`]. Deserialization goes through the same lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase", from = "String"))]
pub enum HeuristicKind {
    #[default]
    Uniform,
    Markov,
    MonteCarlo,
    Smart,
}

impl HeuristicKind {
    pub const ALL: [HeuristicKind; 4] = [
        HeuristicKind::Uniform,
        HeuristicKind::Markov,
        HeuristicKind::MonteCarlo,
        HeuristicKind::Smart,
    ];

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("markov") || name.eq_ignore_ascii_case("markow") {
            HeuristicKind::Markov
        } else if name.eq_ignore_ascii_case("montecarlo") || name.eq_ignore_ascii_case("monte-carlo") {
            HeuristicKind::MonteCarlo
        } else if name.eq_ignore_ascii_case("smart") {
            HeuristicKind::Smart
        } else {
            HeuristicKind::Uniform
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeuristicKind::Uniform => "uniform",
            HeuristicKind::Markov => "markov",
            HeuristicKind::MonteCarlo => "montecarlo",
            HeuristicKind::Smart => "smart",
        }
    }
}

impl From<String> for HeuristicKind {
    fn from(name: String) -> Self {
        HeuristicKind::from_name(&name)
    }
}

impl core::str::FromStr for HeuristicKind {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(HeuristicKind::from_name(s))
    }
}

/// Build the standalone heuristic for `kind`. `Smart` layers hunt-and-target
/// on top of the heat map, so the heat map is what it delegates to.
pub fn build(kind: HeuristicKind, samples: usize) -> Box<dyn Heuristic> {
    match kind {
        HeuristicKind::Uniform => Box::new(Uniform),
        HeuristicKind::Markov | HeuristicKind::Smart => Box::new(ProbabilityHeatmap),
        HeuristicKind::MonteCarlo => Box::new(MonteCarloSampler::new(samples)),
    }
}

/// Integer score per cell of an N×N grid.
#[derive(Clone, PartialEq, Eq)]
pub struct ScoreGrid {
    size: usize,
    cells: Vec<u64>,
}

impl ScoreGrid {
    pub fn new(size: usize) -> Self {
        ScoreGrid {
            size,
            cells: vec![0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Score at `c`; off-grid cells read as zero.
    pub fn get(&self, c: Coordinate) -> u64 {
        self.index(c).map_or(0, |i| self.cells[i])
    }

    pub fn set(&mut self, c: Coordinate, v: u64) -> Result<(), BitBoardError> {
        let i = self.index(c).ok_or(BitBoardError::IndexOutOfBounds {
            row: c.row,
            col: c.col,
        })?;
        self.cells[i] = v;
        Ok(())
    }

    /// Add one at `c`. Callers only pass placement cells, which are on the grid.
    pub(crate) fn increment(&mut self, c: Coordinate) {
        if let Some(i) = self.index(c) {
            self.cells[i] += 1;
        }
    }

    fn index(&self, c: Coordinate) -> Option<usize> {
        (c.row < self.size && c.col < self.size).then(|| c.row * self.size + c.col)
    }

    /// Add `other * factor` cell by cell.
    pub fn add_scaled(&mut self, other: &ScoreGrid, factor: u64) {
        for (a, b) in self.cells.iter_mut().zip(other.cells.iter()) {
            *a += b * factor;
        }
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().sum()
    }

    /// Mutable access to every cell with its coordinate.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Coordinate, &mut u64)> {
        let n = self.size;
        self.cells
            .iter_mut()
            .enumerate()
            .map(move |(i, v)| (Coordinate::new(i / n, i % n), v))
    }

    /// Unfired cells sharing the highest score.
    pub fn best_unfired(&self, fired: &BitBoard) -> Vec<Coordinate> {
        let mut best = 0u64;
        let mut candidates = Vec::new();
        for c in fired.iter_unset_bits() {
            let v = self.get(c);
            if candidates.is_empty() || v > best {
                best = v;
                candidates.clear();
                candidates.push(c);
            } else if v == best {
                candidates.push(c);
            }
        }
        candidates
    }

    /// Highest-scoring unfired cell, ties broken uniformly at random.
    pub fn pick_best(&self, rng: &mut SmallRng, fired: &BitBoard) -> Option<Coordinate> {
        self.best_unfired(fired).choose(rng).copied()
    }
}

impl core::fmt::Debug for ScoreGrid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "ScoreGrid<{}>:", self.size)?;
        for r in 0..self.size {
            for c in 0..self.size {
                write!(f, "{:>5}", self.cells[r * self.size + c])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Every placement of `length` cells inside a `size`×`size` grid, as
/// (start, orientation). Horizontal placements come first.
pub(crate) fn placements(
    size: usize,
    length: usize,
) -> impl Iterator<Item = (Coordinate, crate::ship::Orientation)> {
    use crate::ship::Orientation;
    let span = (size + 1).saturating_sub(length);
    let valid = length > 0 && length <= size;
    let horizontal = (0..size)
        .flat_map(move |r| (0..span).map(move |c| (Coordinate::new(r, c), Orientation::Horizontal)));
    let vertical = (0..span)
        .flat_map(move |r| (0..size).map(move |c| (Coordinate::new(r, c), Orientation::Vertical)));
    horizontal.chain(vertical).filter(move |_| valid)
}

/// Cells covered by a placement.
pub(crate) fn placement_cells(
    start: Coordinate,
    orientation: crate::ship::Orientation,
    length: usize,
) -> impl Iterator<Item = Coordinate> {
    let (dr, dc) = orientation.step();
    (0..length).map(move |k| Coordinate::new(start.row + dr * k, start.col + dc * k))
}
