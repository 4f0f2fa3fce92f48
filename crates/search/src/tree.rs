//! Expectimax-style tree search over piece placements.
//!
//! Known deals are searched exhaustively; once they run out, every unordered
//! color pair is searched and the results averaged by draw probability.

use log::{debug, trace};
use smallvec::SmallVec;

use puyo_core::{
    Action, Deal, EngineError, Layout, Puyos, ALL_ACTIONS, HALF_ACTIONS, LOWER_ACTIONS, NUM_ACTIONS,
};
use puyo_engine::{Field, Rules};
use puyo_eval::group_heuristic;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{ScratchArena, SearchConfig};

/// Value of one root placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActionValue {
    pub action: Action,
    /// Immediate reward plus the discounted value of the rest of the search.
    pub value: f64,
    /// Occupied cells after the placement resolved.
    pub cells: u32,
}

pub type ActionValues = SmallVec<[ActionValue; NUM_ACTIONS]>;

/// Actions worth trying for `deal`. Swapped placements are identical when both
/// colors match, so only the lower half is kept then.
#[inline]
pub(crate) fn candidate_actions(valid: u64, deal: Deal) -> u64 {
    if deal.is_symmetric() {
        (valid | (valid >> HALF_ACTIONS)) & LOWER_ACTIONS
    } else {
        valid
    }
}

#[inline]
pub(crate) fn iter_actions(mut set: u64) -> impl Iterator<Item = Action> {
    std::iter::from_fn(move || {
        if set == 0 {
            return None;
        }
        let index = set.trailing_zeros() as usize;
        set &= set - 1;
        Some(Action::new_unchecked(index))
    })
}

#[derive(Clone, Debug)]
pub struct TreeSearch {
    layout: Layout,
    rules: Rules,
    config: SearchConfig,
    action_mask: u64,
}

impl TreeSearch {
    pub fn new(layout: Layout, rules: Rules, config: SearchConfig) -> Self {
        Self {
            layout,
            rules,
            config,
            action_mask: ALL_ACTIONS,
        }
    }

    /// Restrict the search to a subset of the 30 actions, e.g. for narrower
    /// fields.
    pub fn with_action_mask(mut self, action_mask: u64) -> Self {
        self.action_mask = action_mask & ALL_ACTIONS;
        self
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn action_mask(&self) -> u64 {
        self.action_mask
    }

    fn check<const FLOORS: usize>(
        &self,
        board: &[Puyos],
        deals: &[Deal],
    ) -> Result<(), EngineError> {
        self.rules.validate(FLOORS)?;
        Field::<_, FLOORS>::new(board, self.layout)?;
        for deal in deals {
            self.layout.check_color(deal.first())?;
            self.layout.check_color(deal.second())?;
        }
        Ok(())
    }

    /// Value of `board` searched `depth` plies deep.
    ///
    /// `deals` are the upcoming pieces in order; plies beyond them average over
    /// every possible piece. `arena` must hold at least
    /// [`ScratchArena::required`] words for `depth`.
    pub fn evaluate<const FLOORS: usize>(
        &self,
        board: &[Puyos],
        deals: &[Deal],
        depth: usize,
        arena: &mut ScratchArena,
    ) -> Result<f64, EngineError> {
        self.check::<FLOORS>(board, deals)?;
        let scratch = arena.slots(ScratchArena::required(depth, self.layout, FLOORS))?;
        let field = Field::<_, FLOORS>::from_parts(board, self.layout);
        Ok(self.search(&field, deals, depth, scratch))
    }

    fn search<const FLOORS: usize>(
        &self,
        field: &Field<&[Puyos], FLOORS>,
        deals: &[Deal],
        depth: usize,
        scratch: &mut [Puyos],
    ) -> f64 {
        let valid = field.action_mask(&self.rules) & self.action_mask;
        if valid == 0 {
            return self.config.death_value;
        }
        if depth == 0 {
            return self.config.factor * group_heuristic(field) as f64;
        }
        match deals.split_first() {
            Some((&deal, rest)) => self.best_placement(field, valid, deal, rest, depth, scratch),
            None => {
                let num_colors = self.layout.num_colors();
                let total: f64 = Deal::unordered(num_colors as u8)
                    .map(|(deal, weight)| {
                        weight as f64 * self.best_placement(field, valid, deal, &[], depth, scratch)
                    })
                    .sum();
                total / (num_colors * num_colors) as f64
            }
        }
    }

    fn best_placement<const FLOORS: usize>(
        &self,
        field: &Field<&[Puyos], FLOORS>,
        valid: u64,
        deal: Deal,
        rest: &[Deal],
        depth: usize,
        scratch: &mut [Puyos],
    ) -> f64 {
        let (slot, deeper) = scratch.split_at_mut(self.layout.words(FLOORS));
        let mut best = f64::NEG_INFINITY;
        for action in iter_actions(candidate_actions(valid, deal)) {
            slot.copy_from_slice(field.words());
            let mut child = Field::<_, FLOORS>::from_parts(&mut *slot, self.layout);
            child.place(action, deal);
            let reward = self.rules.reward(child.resolve(&self.rules));
            let child = Field::<_, FLOORS>::from_parts(&*slot, self.layout);
            let value = reward + self.config.gamma * self.search(&child, rest, depth - 1, deeper);
            best = best.max(value);
        }
        if best == f64::NEG_INFINITY {
            self.config.death_value
        } else {
            best
        }
    }

    /// Score every root placement of `deals[0]`.
    ///
    /// The remaining deals feed the search below each placement. An empty
    /// `deals` or a topped-out board yields no actions.
    pub fn evaluate_actions<const FLOORS: usize>(
        &self,
        board: &[Puyos],
        deals: &[Deal],
        depth: usize,
    ) -> Result<ActionValues, EngineError> {
        self.check::<FLOORS>(board, deals)?;
        let Some((&deal, rest)) = deals.split_first() else {
            return Ok(ActionValues::new());
        };
        let field = Field::<_, FLOORS>::from_parts(board, self.layout);
        let valid = field.action_mask(&self.rules) & self.action_mask;
        let actions: SmallVec<[Action; NUM_ACTIONS]> =
            iter_actions(candidate_actions(valid, deal)).collect();
        let child_depth = depth.saturating_sub(1);
        let arena_len = ScratchArena::required(child_depth, self.layout, FLOORS);
        debug!(
            "evaluate_actions: depth={} deals={} candidates={}",
            depth,
            deals.len(),
            actions.len()
        );

        let score = |arena: &mut ScratchArena, action: Action| -> ActionValue {
            let mut owned = field.to_owned();
            owned.place(action, deal);
            let reward = self.rules.reward(owned.resolve(&self.rules));
            let cells = owned.popcount();
            let child = Field::<_, FLOORS>::from_parts(owned.words(), self.layout);
            let continuation = self.search(&child, rest, child_depth, arena.words_mut());
            let value = reward + self.config.gamma * continuation;
            trace!("action {} reward={} value={}", action.index(), reward, value);
            ActionValue {
                action,
                value,
                cells,
            }
        };

        #[cfg(feature = "rayon")]
        let values: Vec<ActionValue> = actions
            .as_slice()
            .par_iter()
            .map_init(|| ScratchArena::new(arena_len), |arena, &action| score(arena, action))
            .collect();

        #[cfg(not(feature = "rayon"))]
        let values: Vec<ActionValue> = {
            let mut arena = ScratchArena::new(arena_len);
            actions.iter().map(|&action| score(&mut arena, action)).collect()
        };

        Ok(values.into_iter().collect())
    }
}
