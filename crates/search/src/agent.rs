//! Move selection on top of the tree search.

use log::debug;
use smallvec::SmallVec;

use puyo_core::{Action, Deal, EngineError, Layout, Puyos, FLOOR_CELLS, NUM_ACTIONS};
use puyo_engine::{Field, Rules};

use crate::tree::iter_actions;
use crate::{SearchConfig, TreeSearch};

pub type ActionList = SmallVec<[Action; NUM_ACTIONS]>;

/// Picks the best-valued placements for the current deal.
///
/// While the field is emptier than the occupation threshold, placements that
/// clear cells are held back and only offered if nothing else survives.
#[derive(Clone, Debug)]
pub struct TreeSearchAgent {
    search: TreeSearch,
}

impl TreeSearchAgent {
    pub fn new(layout: Layout, rules: Rules, config: SearchConfig) -> Self {
        Self {
            search: TreeSearch::new(layout, rules, config),
        }
    }

    /// Single floor, depth 4.
    pub fn small(layout: Layout) -> Self {
        Self::new(layout, Rules::bottom(), SearchConfig::small())
    }

    /// Single floor, depth 3, waits longer before firing.
    pub fn wide(layout: Layout) -> Self {
        Self::new(layout, Rules::bottom(), SearchConfig::wide())
    }

    pub fn with_action_mask(self, action_mask: u64) -> Self {
        Self {
            search: self.search.with_action_mask(action_mask),
        }
    }

    pub fn search(&self) -> &TreeSearch {
        &self.search
    }

    /// Tied-best actions for `deals[0]`, the rest of `deals` as lookahead.
    ///
    /// Never empty: with no surviving placement every allowed action is
    /// returned.
    pub fn best_actions<const FLOORS: usize>(
        &self,
        board: &[Puyos],
        deals: &[Deal],
    ) -> Result<ActionList, EngineError> {
        let config = self.search.config();
        let values = self
            .search
            .evaluate_actions::<FLOORS>(board, deals, config.depth)?;
        let field = Field::<_, FLOORS>::new(board, self.search.layout())?;
        let base_cells = field.popcount();
        let capacity = (FLOORS * FLOOR_CELLS) as f64;
        let prevent_chains = (base_cells as f64) < config.occupation_threshold * capacity;

        let mut best = ActionList::new();
        let mut best_value = config.death_value;
        let mut fallback = ActionList::new();
        let mut fallback_value = config.death_value;
        for value in &values {
            let (list, top) = if prevent_chains && value.cells < base_cells {
                (&mut fallback, &mut fallback_value)
            } else {
                (&mut best, &mut best_value)
            };
            if value.value > *top {
                list.clear();
                list.push(value.action);
                *top = value.value;
            } else if value.value == *top {
                list.push(value.action);
            }
        }
        debug!(
            "best_actions: cells={} prevent_chains={} best={} ({}) fallback={} ({})",
            base_cells,
            prevent_chains,
            best.len(),
            best_value,
            fallback.len(),
            fallback_value
        );

        if !best.is_empty() {
            Ok(best)
        } else if !fallback.is_empty() {
            Ok(fallback)
        } else {
            Ok(iter_actions(self.search.action_mask()).collect())
        }
    }

    /// Uniform distribution over [`TreeSearchAgent::best_actions`], indexed by
    /// action.
    pub fn distribution<const FLOORS: usize>(
        &self,
        board: &[Puyos],
        deals: &[Deal],
    ) -> Result<[f64; NUM_ACTIONS], EngineError> {
        let actions = self.best_actions::<FLOORS>(board, deals)?;
        let mut dist = [0.0; NUM_ACTIONS];
        let weight = 1.0 / actions.len() as f64;
        for action in actions {
            dist[action.index()] = weight;
        }
        Ok(dist)
    }
}
