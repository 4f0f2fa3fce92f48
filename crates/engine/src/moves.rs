//! Placement legality and piece placement.

use puyo_core::bitboard::{Puyos, TOP_ROW, WIDTH};
use puyo_core::{Action, Deal, EngineError, HALF_ACTIONS};

use crate::{Field, Rules};

/// Horizontal placements come first; vertical ones start at this bit.
const HORIZONTAL_MOVES: usize = WIDTH - 1;
const HORIZONTAL_MASK: u64 = (1 << HORIZONTAL_MOVES) - 1;

impl<S: AsRef<[Puyos]>, const FLOORS: usize> Field<S, FLOORS> {
    /// Legal placements for the first half of the action space.
    ///
    /// Bits `0..7` are horizontal pairs at columns `(i, i + 1)`, bits `7..15`
    /// vertical pairs at column `i - 7`. The other half of the action space
    /// covers the same cells, see [`Field::action_mask`].
    pub fn valid_moves(&self, rules: &Rules) -> u64 {
        let top = self.occupied().0[0];
        let open = TOP_ROW & !(top >> (rules.spawn_row() * WIDTH));
        if rules.death_line {
            // Only the ghost row matters; a pair fits if either half does.
            let horizontal = (open | (open >> 1)) & HORIZONTAL_MASK;
            return horizontal | (open << HORIZONTAL_MOVES);
        }
        let horizontal = open & (open >> 1);
        let vertical = TOP_ROW & !(top | (top >> WIDTH));
        horizontal | (vertical << HORIZONTAL_MOVES)
    }

    /// [`Field::valid_moves`] mirrored onto the full 30-action space.
    #[inline]
    pub fn action_mask(&self, rules: &Rules) -> u64 {
        let valid = self.valid_moves(rules);
        valid | (valid << HALF_ACTIONS)
    }
}

impl<S: AsRef<[Puyos]> + AsMut<[Puyos]>, const FLOORS: usize> Field<S, FLOORS> {
    /// Drop a piece into the top two rows: `first` on the pivot, `second` on
    /// the partner. Does not check occupancy; gravity does the rest.
    pub fn make_move(&mut self, action: usize, first: u8, second: u8) -> Result<(), EngineError> {
        let action = Action::new(action)?;
        self.layout.check_color(first)?;
        self.layout.check_color(second)?;
        self.place(action, Deal::new(first, second));
        Ok(())
    }

    #[inline(always)]
    pub fn place(&mut self, action: Action, deal: Deal) {
        debug_assert!(self.layout.check_color(deal.first()).is_ok());
        debug_assert!(self.layout.check_color(deal.second()).is_ok());
        let (pivot, partner) = action.cells();
        let words = self.words.as_mut();
        words[deal.first() as usize] |= pivot;
        words[deal.second() as usize] |= partner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puyo_core::bitboard::cell;
    use puyo_core::{Layout, Orientation, LOWER_ACTIONS};

    use crate::{BottomField, TallField};

    #[test]
    fn test_empty_field_allows_everything() {
        let field = BottomField::empty(Layout::colors(3).unwrap());
        assert_eq!(field.valid_moves(&Rules::bottom()), LOWER_ACTIONS);
        assert_eq!(field.action_mask(&Rules::bottom()), puyo_core::ALL_ACTIONS);
    }

    #[test]
    fn test_occupied_top_cell_blocks_its_column() {
        let mut field = BottomField::empty(Layout::colors(2).unwrap());
        field.words_mut()[0] = cell(0, 3);
        let valid = field.valid_moves(&Rules::bottom());
        let right_2 = Action::from_placement(2, Orientation::Right).unwrap();
        let right_3 = Action::from_placement(3, Orientation::Right).unwrap();
        let down_3 = Action::from_placement(3, Orientation::Down).unwrap();
        assert_eq!(valid & right_2.bit(), 0);
        assert_eq!(valid & right_3.bit(), 0);
        assert_eq!(valid & down_3.bit(), 0);
        assert_eq!(valid.count_ones(), 15 - 3);
    }

    #[test]
    fn test_second_row_blocks_vertical_only() {
        let mut field = BottomField::empty(Layout::colors(2).unwrap());
        field.words_mut()[1] = cell(1, 5);
        let valid = field.valid_moves(&Rules::bottom());
        let down_5 = Action::from_placement(5, Orientation::Down).unwrap();
        assert_eq!(valid, LOWER_ACTIONS & !down_5.bit());
    }

    #[test]
    fn test_tsu_looks_at_ghost_row() {
        let mut field = TallField::empty(Layout::colors(2).unwrap());
        // Rows above the ghost row never matter.
        field.words_mut()[0] = cell(0, 0) | cell(1, 0) | cell(3, 4);
        let valid = field.valid_moves(&Rules::tsu());
        let down_0 = Action::from_placement(0, Orientation::Down).unwrap();
        let down_4 = Action::from_placement(4, Orientation::Down).unwrap();
        assert_ne!(valid & down_0.bit(), 0);
        assert_eq!(valid & down_4.bit(), 0);
        // Horizontal pairs only need one open half.
        assert_eq!(valid & HORIZONTAL_MASK, HORIZONTAL_MASK);

        field.words_mut()[0] |= cell(3, 5);
        let right_4 = Action::from_placement(4, Orientation::Right).unwrap();
        assert_eq!(field.valid_moves(&Rules::tsu()) & right_4.bit(), 0);
    }

    #[test]
    fn test_make_move_places_colors() {
        let mut field = BottomField::empty(Layout::colors(3).unwrap());
        let up_2 = Action::from_placement(2, Orientation::Up).unwrap();
        field.make_move(up_2.index(), 0, 2).unwrap();
        assert_eq!(field.get(1, 2), Some(0));
        assert_eq!(field.get(0, 2), Some(2));
        assert_eq!(field.popcount(), 2);
    }

    #[test]
    fn test_make_move_rejects_bad_input() {
        let mut field = BottomField::empty(Layout::with_garbage(2).unwrap());
        assert_eq!(field.make_move(30, 0, 0), Err(EngineError::InvalidAction(30)));
        assert_eq!(
            field.make_move(0, 0, 2),
            Err(EngineError::ColorOutOfRange {
                color: 2,
                num_colors: 2
            })
        );
        assert_eq!(field.popcount(), 0);
    }
}
