//! Rule presets for the different field variants.

use puyo_core::bitboard::{Puyos, WIDTH};
use puyo_core::{EngineError, Stack};
use serde::{Deserialize, Serialize};

use crate::Resolution;

/// Top-floor row index of the ghost row.
pub const GHOST_ROW_INDEX: usize = 3;
/// Top-floor rows above the ghost row. Anything left here after gravity is removed.
pub const DEATH_ZONE: Puyos = (1 << (GHOST_ROW_INDEX * WIDTH)) - 1;
/// Cells on the ghost row persist but never take part in a clear.
pub const GHOST_ROW: Puyos = 0xFF << (GHOST_ROW_INDEX * WIDTH);
/// Top-floor rows below the ghost row, the only top-floor rows that clear
/// under the death line.
pub const LIFE_BLOCK: Puyos = !0 << ((GHOST_ROW_INDEX + 1) * WIDTH);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoringMode {
    /// Only chain length counts; a resolve is worth `chain²` to the search.
    ChainOnly,
    /// Classic score with chain power, color and group bonuses.
    Classic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rules {
    pub scoring: ScoringMode,
    /// "Tsu" death line: purge the top three rows, keep row 3 as a ghost row.
    pub death_line: bool,
}

impl Rules {
    /// Small 8x8 field scored by chain length.
    pub fn bottom() -> Self {
        Self {
            scoring: ScoringMode::ChainOnly,
            death_line: false,
        }
    }

    /// 8x16 field with classic scoring.
    pub fn tall() -> Self {
        Self {
            scoring: ScoringMode::Classic,
            death_line: false,
        }
    }

    /// 8x16 field with classic scoring and the death line.
    pub fn tsu() -> Self {
        Self {
            scoring: ScoringMode::Classic,
            death_line: true,
        }
    }

    pub fn validate(&self, floors: usize) -> Result<(), EngineError> {
        if self.death_line && floors < 2 {
            return Err(EngineError::DeathLineNeedsTallField(floors));
        }
        Ok(())
    }

    /// Cells allowed to form clearing groups.
    pub fn eligible<const FLOORS: usize>(&self) -> Stack<FLOORS> {
        let mut eligible = Stack::FULL;
        if self.death_line {
            eligible.0[0] = LIFE_BLOCK;
        }
        eligible
    }

    /// Value of a resolve as seen by the tree search.
    pub fn reward(&self, resolution: Resolution) -> f64 {
        match self.scoring {
            ScoringMode::ChainOnly => {
                let chain = resolution.chain as f64;
                chain * chain
            }
            ScoringMode::Classic => resolution.score as f64,
        }
    }

    /// First row (of the top floor) a placement must find empty.
    pub fn spawn_row(&self) -> usize {
        if self.death_line {
            GHOST_ROW_INDEX
        } else {
            0
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::bottom()
    }
}
