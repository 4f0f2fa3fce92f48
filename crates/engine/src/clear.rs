//! Group detection and removal.

use puyo_core::bitboard::{Puyos, CLEAR_THRESHOLD};
use puyo_core::scoring::{group_bonus, pass_score};
use puyo_core::Stack;

use crate::config::DEATH_ZONE;
use crate::Field;

/// What one clearing pass removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClearReport<const FLOORS: usize> {
    /// Union of every removed cell, used to break adjacent garbage.
    pub cleared: Stack<FLOORS>,
    pub num_cleared: u32,
    /// Sum of per-group bonuses.
    pub group_bonus: u32,
    /// Bit `c` set when color `c` lost at least one group.
    pub color_flags: u64,
}

impl<const FLOORS: usize> ClearReport<FLOORS> {
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.num_cleared == 0
    }

    pub fn num_colors(&self) -> u32 {
        self.color_flags.count_ones()
    }

    /// Classic score for this pass at zero-based chain index `chain`.
    pub fn score(&self, chain: u32) -> u32 {
        if self.is_empty() {
            return 0;
        }
        pass_score(self.num_cleared, chain, self.num_colors(), self.group_bonus)
    }
}

impl<S: AsRef<[Puyos]> + AsMut<[Puyos]>, const FLOORS: usize> Field<S, FLOORS> {
    /// Remove every color group of at least four cells.
    ///
    /// Only cells inside `eligible` can form groups; the rest of each layer is
    /// left alone. Garbage never groups.
    pub fn clear_groups(&mut self, eligible: Stack<FLOORS>) -> ClearReport<FLOORS> {
        let mut report = ClearReport::default();
        for color in 0..self.layout.num_colors() {
            let mut puyos = self.layer(color);
            let mut remaining = puyos & eligible;
            let mut changed = false;
            while !remaining.is_empty() {
                let group = remaining.lowest().flood(remaining);
                remaining ^= group;
                let size = group.popcount();
                if size >= CLEAR_THRESHOLD {
                    puyos ^= group;
                    changed = true;
                    report.cleared |= group;
                    report.num_cleared += size;
                    report.group_bonus += group_bonus(size);
                    report.color_flags |= 1 << color;
                }
            }
            if changed {
                self.set_layer(color, puyos);
            }
        }
        report
    }

    /// Break garbage touching any cell in `cleared`.
    pub fn break_garbage(&mut self, cleared: Stack<FLOORS>) {
        if let Some(layer) = self.layout.garbage_layer() {
            let garbage = self.layer(layer) & !cleared.cross();
            self.set_layer(layer, garbage);
        }
    }

    /// Death line: drop colors left above the ghost row. Garbage stays.
    pub fn purge_death_zone(&mut self) {
        let num_colors = self.layout.num_colors();
        for word in &mut self.words.as_mut()[..num_colors] {
            *word &= !DEATH_ZONE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_cells, BottomField, TallField};
    use puyo_core::bitboard::cell;
    use puyo_core::Layout;

    fn bottom(text: &str, layout: Layout) -> BottomField<Vec<Puyos>> {
        let mut field = BottomField::empty(layout);
        field.load_cells(&parse_cells(text, layout).unwrap()).unwrap();
        field
    }

    #[test]
    fn test_clears_only_large_groups() {
        let layout = Layout::with_garbage(3).unwrap();
        let mut field = bottom(
            "........
             ........
             ........
             ....1...
             ....11..
             ..#.12..
             00#.12..
             00#.12..",
            layout,
        );
        let report = field.clear_groups(Stack::FULL);
        assert_eq!(report.num_cleared, 10);
        assert_eq!(report.color_flags, 0b011);
        assert_eq!(report.group_bonus, group_bonus(6));
        assert!(field.layer(0).is_empty());
        assert!(field.layer(1).is_empty());
        assert_eq!(field.layer(2).popcount(), 3);
        // Garbage stays until the caller breaks it.
        assert_eq!(field.layer(3).popcount(), 3);

        field.break_garbage(report.cleared);
        assert_eq!(field.layer(3), Stack([cell(5, 2)]));
    }

    #[test]
    fn test_nothing_to_clear() {
        let layout = Layout::colors(2).unwrap();
        let mut field = bottom(
            "........
             ........
             ........
             ........
             ........
             0.......
             0.......
             01110...",
            layout,
        );
        let before = field.clone();
        let report = field.clear_groups(Stack::FULL);
        assert!(report.is_empty());
        assert_eq!(report.score(0), 0);
        assert_eq!(field, before);
    }

    #[test]
    fn test_group_spanning_floors_clears() {
        let layout = Layout::colors(1).unwrap();
        let mut field = TallField::empty(layout);
        field.words_mut()[0] = cell(6, 1) | cell(7, 1);
        field.words_mut()[1] = cell(0, 1) | cell(1, 1);
        let report = field.clear_groups(Stack::FULL);
        assert_eq!(report.num_cleared, 4);
        assert!(field.layer(0).is_empty());
    }

    #[test]
    fn test_ineligible_cells_do_not_group() {
        let layout = Layout::colors(1).unwrap();
        let mut field = TallField::empty(layout);
        field.words_mut()[0] = cell(3, 0) | cell(4, 0) | cell(5, 0) | cell(6, 0);
        let eligible = Stack([crate::config::LIFE_BLOCK, !0]);
        let report = field.clear_groups(eligible);
        assert!(report.is_empty());
        assert_eq!(field.layer(0).popcount(), 4);
    }

    #[test]
    fn test_purge_death_zone_only_touches_top_rows() {
        let layout = Layout::colors(1).unwrap();
        let mut field = TallField::empty(layout);
        field.words_mut()[0] = cell(0, 0) | cell(2, 7) | cell(3, 3);
        field.words_mut()[1] = cell(0, 0);
        field.purge_death_zone();
        assert_eq!(field.words(), &[cell(3, 3), cell(0, 0)]);
    }

    #[test]
    fn test_purge_death_zone_keeps_garbage() {
        let layout = Layout::with_garbage(1).unwrap();
        let mut field = TallField::empty(layout);
        field.words_mut()[0] = cell(1, 1);
        field.words_mut()[1] = cell(1, 2) | cell(5, 2);
        field.purge_death_zone();
        assert_eq!(field.words(), &[0, cell(1, 2) | cell(5, 2), 0, 0]);
    }
}
