//! Players and the automated attacker.

use alloc::boxed::Box;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::bitboard::BitBoard;
use crate::common::Outcome;
use crate::config::EngineConfig;
use crate::coord::Coordinate;
use crate::heuristic::{self, Heuristic, HeuristicKind, Uniform};
use crate::targeting::{HuntTarget, Observation, Phase};

/// Interface implemented by every kind of player.
pub trait Player: Send {
    /// Choose the next cell to attack, or `None` once every cell has been
    /// fired at.
    fn choose_attack(&mut self) -> Option<Coordinate>;

    /// Inform the player of the outcome of its own attack.
    fn on_attack_outcome(&mut self, coord: Coordinate, outcome: Outcome);

    /// Inform the player of an opponent attack against its board.
    fn on_defense_outcome(&mut self, _coord: Coordinate, _outcome: Outcome) {}

    fn name(&self) -> &str;
}

/// Automated attacker: an observation state, a heuristic, and optionally the
/// hunt-and-target controller in front of it.
pub struct Attacker {
    kind: HeuristicKind,
    rng: SmallRng,
    observation: Observation,
    heuristic: Box<dyn Heuristic>,
    hunt: Option<HuntTarget>,
}

impl Attacker {
    /// Build the attacker described by `config`. `smart` puts hunt-and-target
    /// in front of the heat map; every other kind uses its heuristic alone.
    pub fn new(config: &EngineConfig, rng: SmallRng) -> Self {
        let kind = config.heuristic;
        let hunt = matches!(kind, HeuristicKind::Smart).then(HuntTarget::new);
        log::debug!(
            "attacker '{}' on {}x{} grid, fleet {:?}",
            kind.name(),
            config.grid_size,
            config.grid_size,
            config.fleet
        );
        Self {
            kind,
            rng,
            observation: Observation::new(config.grid_size, &config.fleet),
            heuristic: heuristic::build(kind, config.samples()),
            hunt,
        }
    }

    /// Deterministic attacker for reproducible games.
    pub fn from_seed(config: &EngineConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }

    /// Compose an attacker from explicit parts.
    pub fn with_parts(
        size: usize,
        fleet: &[usize],
        heuristic: Box<dyn Heuristic>,
        hunt_target: bool,
        rng: SmallRng,
    ) -> Self {
        let kind = if hunt_target {
            HeuristicKind::Smart
        } else {
            HeuristicKind::from_name(heuristic.name())
        };
        Self {
            kind,
            rng,
            observation: Observation::new(size, fleet),
            heuristic,
            hunt: hunt_target.then(HuntTarget::new),
        }
    }

    pub fn kind(&self) -> HeuristicKind {
        self.kind
    }

    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    pub fn fired(&self) -> &BitBoard {
        self.observation.fired()
    }

    pub fn remaining(&self) -> &[usize] {
        self.observation.remaining()
    }

    /// The hunt-and-target controller, when this attacker uses one.
    pub fn hunt_target(&self) -> Option<&HuntTarget> {
        self.hunt.as_ref()
    }

    pub fn phase(&self) -> Phase {
        match &self.hunt {
            Some(h) => h.phase(&self.observation),
            None if self.observation.cluster().is_empty() => Phase::Idle,
            None => Phase::Hunting,
        }
    }

    fn delegate(&mut self) -> Option<Coordinate> {
        // While hunting, the controller owns the cluster; the heuristic only
        // ever sees an idle board.
        let hits: &[Coordinate] = if self.hunt.is_some() {
            &[]
        } else {
            self.observation.cluster()
        };
        let fired = self.observation.fired();
        let choice = self
            .heuristic
            .choose(&mut self.rng, fired, self.observation.remaining(), hits);
        match choice {
            Some(c) if fired.is_set(c) => {
                log::warn!("{} proposed fired cell {}, using uniform", self.heuristic.name(), c);
                Uniform::pick(&mut self.rng, fired)
            }
            other => other,
        }
    }
}

impl Player for Attacker {
    fn choose_attack(&mut self) -> Option<Coordinate> {
        let from_cluster = match self.hunt.as_mut() {
            Some(hunt) => hunt.next_target(&mut self.observation),
            None => None,
        };
        let target = match from_cluster {
            Some(c) => Some(c),
            None => self.delegate(),
        };
        match target {
            Some(c) => {
                self.observation.mark_fired(c);
                log::trace!("{} attacks {}", self.kind.name(), c);
                Some(c)
            }
            None => {
                log::debug!("{} has no cell left to attack", self.kind.name());
                None
            }
        }
    }

    fn on_attack_outcome(&mut self, coord: Coordinate, outcome: Outcome) {
        self.observation.mark_fired(coord);
        if let Some(hunt) = self.hunt.as_mut() {
            hunt.on_outcome(&mut self.observation, coord, outcome);
            return;
        }
        match outcome {
            Outcome::Hit => self.observation.record_hit(coord),
            Outcome::Sunk => {
                self.observation.resolve_sunk(coord);
            }
            Outcome::Miss => {}
            Outcome::GameOver => self.observation.clear(),
        }
    }

    fn name(&self) -> &str {
        self.kind.name()
    }
}
