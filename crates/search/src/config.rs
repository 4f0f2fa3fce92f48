//! Search parameters and named presets.

use serde::{Deserialize, Serialize};

/// Discount applied to everything after the current move.
pub const GAMMA: f64 = 0.95;
/// Value of a topped-out position when only chains are rewarded.
pub const CHAIN_DEATH_VALUE: f64 = -10.0;
/// Value of a topped-out position under classic scoring.
pub const CLASSIC_DEATH_VALUE: f64 = -10_000.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies searched from the root, the root move included.
    pub depth: usize,
    /// Multiplier on the group heuristic at the leaves.
    pub factor: f64,
    pub gamma: f64,
    pub death_value: f64,
    /// Below this fraction of occupied cells the agent avoids moves that clear.
    pub occupation_threshold: f64,
}

impl SearchConfig {
    /// Single floor, deep and careful.
    pub fn small() -> Self {
        Self {
            depth: 4,
            factor: 0.22,
            gamma: GAMMA,
            death_value: CHAIN_DEATH_VALUE,
            occupation_threshold: 0.4,
        }
    }

    /// Single floor, one ply shallower, builds bigger before firing.
    pub fn wide() -> Self {
        Self {
            depth: 3,
            occupation_threshold: 0.66,
            ..Self::small()
        }
    }

    /// Two floors with classic scoring.
    pub fn tall() -> Self {
        Self {
            depth: 2,
            factor: 0.22,
            gamma: GAMMA,
            death_value: CLASSIC_DEATH_VALUE,
            occupation_threshold: 0.0,
        }
    }

    /// Two floors with classic scoring and the death line.
    pub fn tsu() -> Self {
        Self::tall()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::small()
    }
}
