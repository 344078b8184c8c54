//! Engine configuration: heuristic, sample budget, grid size and fleet.

use alloc::vec::Vec;
use core::fmt;

use crate::heuristic::HeuristicKind;

pub const DEFAULT_GRID_SIZE: usize = 10;
pub const MIN_GRID_SIZE: usize = 2;
pub const DEFAULT_SAMPLES: usize = 1000;
pub const DEFAULT_FLEET: [usize; 6] = [5, 4, 3, 3, 2, 2];

/// Errors returned by [`EngineConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    GridTooSmall { size: usize },
    EmptyFleet,
    ZeroLengthShip,
    ShipTooLong { length: usize, size: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::GridTooSmall { size } => {
                write!(f, "grid size {} is below the minimum of {}", size, MIN_GRID_SIZE)
            }
            ConfigError::EmptyFleet => write!(f, "fleet has no ships"),
            ConfigError::ZeroLengthShip => write!(f, "fleet contains a ship of length 0"),
            ConfigError::ShipTooLong { length, size } => {
                write!(f, "ship of length {} does not fit a {}x{} grid", length, size, size)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct EngineConfig {
    pub heuristic: HeuristicKind,
    pub samples: usize,
    pub grid_size: usize,
    pub fleet: Vec<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            heuristic: HeuristicKind::Uniform,
            samples: DEFAULT_SAMPLES,
            grid_size: DEFAULT_GRID_SIZE,
            fleet: DEFAULT_FLEET.to_vec(),
        }
    }
}

impl EngineConfig {
    /// Default configuration with the heuristic looked up by name.
    pub fn with_heuristic(name: &str) -> Self {
        Self {
            heuristic: HeuristicKind::from_name(name),
            ..Self::default()
        }
    }

    /// Check the grid/fleet pairing before an engine is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                size: self.grid_size,
            });
        }
        if self.fleet.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        for &length in &self.fleet {
            if length == 0 {
                return Err(ConfigError::ZeroLengthShip);
            }
            if length > self.grid_size {
                return Err(ConfigError::ShipTooLong {
                    length,
                    size: self.grid_size,
                });
            }
        }
        Ok(())
    }

    /// Sample budget, never below one.
    pub fn samples(&self) -> usize {
        self.samples.max(1)
    }
}

/// Keep only the ships that fit a `size`×`size` grid, preserving order.
pub fn fit_fleet(fleet: &[usize], size: usize) -> Vec<usize> {
    fleet
        .iter()
        .copied()
        .filter(|&l| l > 0 && l <= size)
        .collect()
}
