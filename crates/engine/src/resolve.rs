//! Chain resolution: gravity and clearing until the field is stable.

use puyo_core::bitboard::Puyos;
use puyo_core::scoring::ALL_CLEAR_BONUS;
use puyo_core::EngineError;
use serde::{Deserialize, Serialize};

use crate::{Field, Rules, ScoringMode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Clearing passes performed. 0 when nothing cleared.
    pub chain: u32,
    /// Classic score including the all-clear bonus; always 0 in chain-only mode.
    pub score: u32,
}

impl<S: AsRef<[Puyos]> + AsMut<[Puyos]>, const FLOORS: usize> Field<S, FLOORS> {
    /// Run gravity and clearing to a fixed point.
    ///
    /// Each pass drops the field, stops if it was already settled after a
    /// clear, applies the death line, clears groups and breaks adjacent
    /// garbage.
    ///
    /// Unchecked: `rules` must have passed [`Rules::validate`] for `FLOORS`.
    /// A death line on a single floor would purge its top rows. Use
    /// [`Field::try_resolve`] at a boundary.
    pub fn resolve(&mut self, rules: &Rules) -> Resolution {
        debug_assert!(rules.validate(FLOORS).is_ok());
        let eligible = rules.eligible::<FLOORS>();
        let mut chain = 0;
        let mut score = 0;
        loop {
            let iterations = self.apply_gravity();
            if iterations == 1 && chain > 0 {
                break;
            }
            if rules.death_line {
                self.purge_death_zone();
            }
            let report = self.clear_groups(eligible);
            if report.is_empty() {
                break;
            }
            self.break_garbage(report.cleared);
            if rules.scoring == ScoringMode::Classic {
                score += report.score(chain);
            }
            chain += 1;
        }
        if score > 0 && self.colored().is_empty() {
            score += ALL_CLEAR_BONUS;
        }
        Resolution { chain, score }
    }

    /// [`Field::resolve`] after checking `rules` against this field.
    pub fn try_resolve(&mut self, rules: &Rules) -> Result<Resolution, EngineError> {
        rules.validate(FLOORS)?;
        Ok(self.resolve(rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_cells, BottomField, TallField};
    use puyo_core::Layout;

    #[test]
    fn test_quiet_field_has_no_chain() {
        let layout = Layout::colors(2).unwrap();
        let mut field = BottomField::empty(layout);
        let cells = parse_cells(
            "........
             ........
             ........
             ........
             ........
             ........
             0.......
             01......",
            layout,
        )
        .unwrap();
        field.load_cells(&cells).unwrap();
        let before = field.clone();
        assert_eq!(field.resolve(&Rules::bottom()), Resolution::default());
        assert_eq!(field, before);
    }

    #[test]
    fn test_try_resolve_rejects_death_line_on_one_floor() {
        let layout = Layout::colors(1).unwrap();
        let mut field = BottomField::empty(layout);
        field.words_mut()[0] = 0x0101;
        let before = field.clone();
        assert_eq!(
            field.try_resolve(&Rules::tsu()),
            Err(EngineError::DeathLineNeedsTallField(1))
        );
        assert_eq!(field, before);

        let mut tall = TallField::empty(layout);
        tall.words_mut()[1] = 0x0F00_0000_0000_0000;
        assert_eq!(tall.try_resolve(&Rules::tsu()).map(|r| r.chain), Ok(1));
    }

    #[test]
    fn test_chain_only_never_scores() {
        let layout = Layout::colors(1).unwrap();
        let mut field = TallField::empty(layout);
        field.words_mut()[1] = 0x0F00_0000_0000_0000;
        let resolution = field.resolve(&Rules {
            scoring: ScoringMode::ChainOnly,
            death_line: false,
        });
        assert_eq!(resolution, Resolution { chain: 1, score: 0 });
    }

    #[test]
    fn test_all_clear_bonus() {
        let layout = Layout::colors(1).unwrap();
        let mut field = TallField::empty(layout);
        field.words_mut()[1] = 0x0F00_0000_0000_0000;
        let resolution = field.resolve(&Rules::tall());
        assert_eq!(resolution, Resolution { chain: 1, score: 40 + ALL_CLEAR_BONUS });
    }
}
