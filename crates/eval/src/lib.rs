//! puyo-eval - static heuristics for leaf positions.

use puyo_core::{Puyos, Stack};
use puyo_engine::Field;

/// Sum of squared group sizes over every color layer.
///
/// Rewards keeping same-colored cells together without clearing them. Groups
/// connect across floors; garbage is ignored.
pub fn group_heuristic<S: AsRef<[Puyos]>, const FLOORS: usize>(field: &Field<S, FLOORS>) -> u32 {
    (0..field.layout().num_colors())
        .map(|color| squared_group_sizes(field.layer(color)))
        .sum()
}

fn squared_group_sizes<const FLOORS: usize>(mut remaining: Stack<FLOORS>) -> u32 {
    let mut score = 0;
    while !remaining.is_empty() {
        let group = remaining.lowest().flood(remaining);
        remaining ^= group;
        let size = group.popcount();
        score += size * size;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use puyo_core::bitboard::cell;
    use puyo_core::Layout;
    use puyo_engine::{parse_cells, BottomField, TallField};

    #[test]
    fn test_empty_field_scores_zero() {
        let field = TallField::empty(Layout::colors(4).unwrap());
        assert_eq!(group_heuristic(&field), 0);
    }

    #[test]
    fn test_groups_are_squared() {
        let layout = Layout::with_garbage(2).unwrap();
        let mut field = BottomField::empty(layout);
        let cells = parse_cells(
            "........
             ........
             ........
             ........
             ........
             1.......
             00#.1...
             001.11..",
            layout,
        )
        .unwrap();
        field.load_cells(&cells).unwrap();
        // Reds: one group of 4. Greens: 1, 1 and a group of 3.
        assert_eq!(group_heuristic(&field), 16 + 1 + 1 + 9);
    }

    #[test]
    fn test_groups_join_across_floors() {
        let layout = Layout::colors(1).unwrap();
        let mut field = TallField::empty(layout);
        field.words_mut()[0] = cell(7, 3);
        field.words_mut()[1] = cell(0, 3) | cell(0, 4);
        assert_eq!(group_heuristic(&field), 9);

        // Same cells on one floor, split: 1 + 4.
        let mut split = BottomField::empty(layout);
        split.words_mut()[0] = cell(0, 3) | cell(7, 3) | cell(7, 4);
        assert_eq!(group_heuristic(&split), 1 + 4);
    }
}
