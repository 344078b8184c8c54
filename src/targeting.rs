//! Attacker-side observation state and the hunt-and-target controller.
//!
//! [`Observation`] is what one attacker knows about the opponent: its own
//! fired mask, the ship lengths it believes remain, and the cluster of hits
//! not yet attributed to a sunk ship. [`HuntTarget`] layers axis tracking on
//! top of it so a discovered ship is finished before new water is explored.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::bitboard::BitBoard;
use crate::common::Outcome;
use crate::coord::{Coordinate, NEIGHBOR_STEPS};
use crate::ship::Orientation;

/// One attacker's knowledge of the opposing board.
#[derive(Debug, Clone)]
pub struct Observation {
    fired: BitBoard,
    remaining: Vec<usize>,
    cluster: Vec<Coordinate>,
}

impl Observation {
    pub fn new(size: usize, fleet: &[usize]) -> Self {
        Self {
            fired: BitBoard::new(size),
            remaining: fleet.to_vec(),
            cluster: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.fired.size()
    }

    pub fn fired(&self) -> &BitBoard {
        &self.fired
    }

    /// Lengths of ships not yet sunk, as a multiset.
    pub fn remaining(&self) -> &[usize] {
        &self.remaining
    }

    /// Hits not yet attributed to a sunk ship, in discovery order.
    pub fn cluster(&self) -> &[Coordinate] {
        &self.cluster
    }

    pub fn is_fired(&self, c: Coordinate) -> bool {
        self.fired.is_set(c)
    }

    /// On the board and not fired at yet.
    pub fn is_open(&self, c: Coordinate) -> bool {
        self.fired.in_bounds(c.row, c.col) && !self.fired.is_set(c)
    }

    pub fn mark_fired(&mut self, c: Coordinate) {
        if self.fired.mark(c).is_err() {
            log::warn!("ignoring off-board coordinate {:?}", c);
        }
    }

    pub fn record_hit(&mut self, c: Coordinate) {
        if !self.cluster.contains(&c) {
            self.cluster.push(c);
        }
    }

    /// Attribute the sink at `c` to the 4-connected group of cluster hits
    /// containing it. Removes that group from the cluster and one matching
    /// entry from the remaining lengths. Returns the inferred ship length.
    pub fn resolve_sunk(&mut self, c: Coordinate) -> usize {
        self.record_hit(c);
        let component = connected_component(&self.cluster, c);
        self.cluster.retain(|h| !component.contains(h));
        let len = cluster_length(&component);
        match remove_length(&mut self.remaining, len) {
            Some(removed) if removed != len => {
                log::debug!("sunk ship measured {} cells, removed length {}", len, removed)
            }
            Some(_) => log::trace!("sunk ship of length {}", len),
            None => log::warn!("sunk ship of length {} but no lengths remain", len),
        }
        len
    }

    pub fn clear_cluster(&mut self) {
        self.cluster.clear();
    }

    /// Game over: nothing left to track.
    pub fn clear(&mut self) {
        self.cluster.clear();
        self.remaining.clear();
    }
}

/// Cells of `cluster` reachable from `start` through edge neighbours.
fn connected_component(cluster: &[Coordinate], start: Coordinate) -> Vec<Coordinate> {
    let mut component = Vec::new();
    let mut frontier = VecDeque::from([start]);
    while let Some(cur) = frontier.pop_front() {
        if component.contains(&cur) {
            continue;
        }
        component.push(cur);
        for h in cluster {
            if h.is_neighbor(&cur) && !component.contains(h) {
                frontier.push_back(*h);
            }
        }
    }
    component
}

/// Length of a resolved cluster: its extent along the shared row or column,
/// or the number of cells when it is not aligned.
pub fn cluster_length(cells: &[Coordinate]) -> usize {
    match Bounds::of(cells) {
        Some(b) if b.min_row == b.max_row => b.max_col - b.min_col + 1,
        Some(b) if b.min_col == b.max_col => b.max_row - b.min_row + 1,
        _ => cells.len(),
    }
}

/// Remove one entry matching `len`, or failing that the entry closest to it.
pub fn remove_length(remaining: &mut Vec<usize>, len: usize) -> Option<usize> {
    let idx = remaining.iter().position(|&l| l == len).or_else(|| {
        remaining
            .iter()
            .enumerate()
            .min_by_key(|&(_, &l)| l.abs_diff(len))
            .map(|(i, _)| i)
    })?;
    Some(remaining.remove(idx))
}

/// Bounding box of a set of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl Bounds {
    pub fn of(cells: &[Coordinate]) -> Option<Bounds> {
        let first = cells.first()?;
        let mut b = Bounds {
            min_row: first.row,
            max_row: first.row,
            min_col: first.col,
            max_col: first.col,
        };
        for c in &cells[1..] {
            b.min_row = b.min_row.min(c.row);
            b.max_row = b.max_row.max(c.row);
            b.min_col = b.min_col.min(c.col);
            b.max_col = b.max_col.max(c.col);
        }
        Some(b)
    }

    pub fn start(&self) -> Coordinate {
        Coordinate::new(self.min_row, self.min_col)
    }

    pub fn end(&self) -> Coordinate {
        Coordinate::new(self.max_row, self.max_col)
    }

    /// Confirmed axis: a single shared row or column spanning two or more cells.
    pub fn axis(&self) -> Option<Orientation> {
        let one_row = self.min_row == self.max_row;
        let one_col = self.min_col == self.max_col;
        match (one_row, one_col) {
            (true, false) => Some(Orientation::Horizontal),
            (false, true) => Some(Orientation::Vertical),
            _ => None,
        }
    }
}

/// Controller phase, derived from the cluster and axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No unresolved hits.
    Idle,
    /// Hits present, axis unknown: candidates come from the neighbour queue.
    Hunting,
    /// Axis confirmed: candidates extend the known line.
    Targeting,
}

/// Hunt-and-target bookkeeping for the current cluster.
#[derive(Debug, Clone)]
pub struct HuntTarget {
    queue: VecDeque<Coordinate>,
    bounds: Option<Bounds>,
    axis: Option<Orientation>,
    prefer_forward: bool,
    tried_forward: bool,
    tried_backward: bool,
    /// Origin of the next tentative step.
    previous: Option<Coordinate>,
    /// Tentative direction as (d_row, d_col), inverted on a miss.
    direction: Option<(isize, isize)>,
}

impl Default for HuntTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl HuntTarget {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            bounds: None,
            axis: None,
            prefer_forward: true,
            tried_forward: false,
            tried_backward: false,
            previous: None,
            direction: None,
        }
    }

    pub fn phase(&self, obs: &Observation) -> Phase {
        if obs.cluster().is_empty() {
            Phase::Idle
        } else if self.axis.is_some() {
            Phase::Targeting
        } else {
            Phase::Hunting
        }
    }

    pub fn axis(&self) -> Option<Orientation> {
        self.axis
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn queue(&self) -> impl Iterator<Item = &Coordinate> {
        self.queue.iter()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn direction(&self) -> Option<(isize, isize)> {
        self.direction
    }

    /// Cell one step past the far end of the cluster along the axis.
    pub fn forward_candidate(&self, size: usize) -> Option<Coordinate> {
        let (dr, dc) = axis_step(self.axis?);
        self.bounds?.end().offset(dr, dc, size)
    }

    /// Cell one step before the near end of the cluster along the axis.
    pub fn backward_candidate(&self, size: usize) -> Option<Coordinate> {
        let (dr, dc) = axis_step(self.axis?);
        self.bounds?.start().offset(-dr, -dc, size)
    }

    /// Feed the outcome of our own shot at `c`. The observation must already
    /// have `c` marked as fired.
    pub fn on_outcome(&mut self, obs: &mut Observation, c: Coordinate, outcome: Outcome) {
        match outcome {
            Outcome::Hit => self.on_hit(obs, c),
            Outcome::Sunk => {
                let len = obs.resolve_sunk(c);
                obs.clear_cluster();
                self.reset();
                log::debug!("target of length {} sunk at {}, back to idle", len, c);
            }
            Outcome::Miss => {
                if let Some((dr, dc)) = self.direction {
                    self.direction = Some((-dr, -dc));
                    self.previous = self.bounds.map(|b| b.start());
                    log::trace!("miss at {}, reversing direction", c);
                }
            }
            Outcome::GameOver => {
                obs.clear();
                self.reset();
            }
        }
    }

    fn on_hit(&mut self, obs: &mut Observation, c: Coordinate) {
        obs.record_hit(c);
        if let Some(prev) = self.previous {
            if self.direction.is_none() && prev != c {
                self.direction = Some((
                    c.row as isize - prev.row as isize,
                    c.col as isize - prev.col as isize,
                ));
            }
        }
        self.previous = Some(c);

        let was_confirmed = self.axis.is_some();
        self.refresh(obs);
        let size = obs.size();

        match self.axis {
            Some(axis) => {
                if let Some((dr, dc)) = self.direction {
                    self.prefer_forward = match axis {
                        Orientation::Horizontal => dc > 0,
                        Orientation::Vertical => dr > 0,
                    };
                }
                if !was_confirmed {
                    let line = self.bounds.map(|b| b.start());
                    let fired = obs.fired();
                    self.queue.retain(|q| {
                        let on_line = match (axis, line) {
                            (Orientation::Horizontal, Some(s)) => q.row == s.row,
                            (Orientation::Vertical, Some(s)) => q.col == s.col,
                            _ => false,
                        };
                        on_line && !fired.is_set(*q)
                    });
                    log::debug!("axis confirmed as {:?} after hit at {}", axis, c);
                }
                let ends = [self.forward_candidate(size), self.backward_candidate(size)];
                for end in ends.into_iter().flatten() {
                    self.enqueue(obs, end);
                }
            }
            None => {
                for n in c.neighbors(size) {
                    self.enqueue(obs, n);
                }
            }
        }
    }

    /// Next cell to finish the current cluster, or `None` when the cluster is
    /// empty or had to be abandoned. Does not mark the cell fired.
    pub fn next_target(&mut self, obs: &mut Observation) -> Option<Coordinate> {
        if obs.cluster().is_empty() {
            return None;
        }
        self.refresh(obs);
        let size = obs.size();

        if self.axis.is_some() {
            for _ in 0..2 {
                if self.prefer_forward {
                    if !self.tried_forward {
                        match self.forward_candidate(size) {
                            Some(f) if obs.is_open(f) => return Some(f),
                            _ => self.tried_forward = true,
                        }
                    }
                    self.prefer_forward = false;
                } else {
                    if !self.tried_backward {
                        match self.backward_candidate(size) {
                            Some(b) if obs.is_open(b) => return Some(b),
                            _ => self.tried_backward = true,
                        }
                    }
                    self.prefer_forward = true;
                }
            }
            if let Some(around) = first_open_neighbor(obs) {
                return Some(around);
            }
            self.abandon(obs);
            return None;
        }

        if let Some(next) = self.pop_open(obs) {
            return Some(next);
        }
        let cluster: Vec<Coordinate> = obs.cluster().to_vec();
        for h in cluster {
            for n in h.neighbors(size) {
                self.enqueue(obs, n);
            }
        }
        if let Some(next) = self.pop_open(obs) {
            return Some(next);
        }
        self.abandon(obs);
        None
    }

    /// Drop the cluster without consuming a remaining length.
    fn abandon(&mut self, obs: &mut Observation) {
        log::warn!(
            "abandoning cluster of {} hit(s) with no open neighbour",
            obs.cluster().len()
        );
        obs.clear_cluster();
        self.reset();
    }

    fn pop_open(&mut self, obs: &Observation) -> Option<Coordinate> {
        while let Some(next) = self.queue.pop_front() {
            if obs.is_open(next) {
                return Some(next);
            }
        }
        None
    }

    fn enqueue(&mut self, obs: &Observation, c: Coordinate) {
        if obs.is_open(c) && !self.queue.contains(&c) {
            self.queue.push_back(c);
        }
    }

    fn refresh(&mut self, obs: &Observation) {
        self.bounds = Bounds::of(obs.cluster());
        self.axis = self.bounds.and_then(|b| b.axis());
    }

    /// Clear every cluster-scoped field.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

fn axis_step(axis: Orientation) -> (isize, isize) {
    match axis {
        Orientation::Horizontal => (0, 1),
        Orientation::Vertical => (1, 0),
    }
}

fn first_open_neighbor(obs: &Observation) -> Option<Coordinate> {
    let size = obs.size();
    obs.cluster().iter().find_map(|h| {
        NEIGHBOR_STEPS
            .iter()
            .filter_map(|&(dr, dc)| h.offset(dr, dc, size))
            .find(|&n| obs.is_open(n))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_length_prefers_exact_then_closest() {
        let mut remaining = alloc::vec![5, 4, 3, 2];
        assert_eq!(remove_length(&mut remaining, 3), Some(3));
        assert_eq!(remaining, alloc::vec![5, 4, 2]);
        assert_eq!(remove_length(&mut remaining, 3), Some(4));
        assert_eq!(remaining, alloc::vec![5, 2]);
        let mut empty: Vec<usize> = Vec::new();
        assert_eq!(remove_length(&mut empty, 2), None);
    }

    #[test]
    fn cluster_length_uses_extent_when_aligned() {
        let row = [Coordinate::new(2, 1), Coordinate::new(2, 3), Coordinate::new(2, 2)];
        assert_eq!(cluster_length(&row), 3);
        let single = [Coordinate::new(4, 4)];
        assert_eq!(cluster_length(&single), 1);
        let scattered = [Coordinate::new(0, 0), Coordinate::new(1, 1)];
        assert_eq!(cluster_length(&scattered), 2);
    }

    #[test]
    fn sunk_resolves_only_connected_hits() {
        let mut obs = Observation::new(6, &[3, 2]);
        obs.record_hit(Coordinate::new(0, 0));
        obs.record_hit(Coordinate::new(4, 4));
        obs.record_hit(Coordinate::new(0, 1));
        let len = obs.resolve_sunk(Coordinate::new(0, 2));
        assert_eq!(len, 3);
        assert_eq!(obs.cluster(), &[Coordinate::new(4, 4)]);
        assert_eq!(obs.remaining(), &[2]);
    }
}
