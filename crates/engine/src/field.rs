//! Field view over a caller-owned board buffer.
//!
//! The buffer is floor-major: all layers of floor 0 (the top floor), then all
//! layers of floor 1, and so on. `S` is anything that derefs to the words, so
//! the same engine runs on borrowed slices, mutable slices and owned vectors.

use std::fmt;

use puyo_core::bitboard::{Puyos, FLOOR_CELLS, FLOOR_HEIGHT, WIDTH};
use puyo_core::{EngineError, Layout, Stack};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field<S, const FLOORS: usize> {
    pub(crate) words: S,
    pub(crate) layout: Layout,
}

/// One 8x8 floor.
pub type BottomField<S> = Field<S, 1>;
/// Two stacked floors, 8x16.
pub type TallField<S> = Field<S, 2>;

impl<S: AsRef<[Puyos]>, const FLOORS: usize> Field<S, FLOORS> {
    pub const HEIGHT: usize = FLOORS * FLOOR_HEIGHT;
    pub const CELLS: usize = FLOORS * FLOOR_CELLS;

    pub fn new(words: S, layout: Layout) -> Result<Self, EngineError> {
        let expected = layout.words(FLOORS);
        let actual = words.as_ref().len();
        if actual != expected {
            return Err(EngineError::BufferLength { expected, actual });
        }
        Ok(Self { words, layout })
    }

    /// Skip the length check. For buffers the caller already sized from `layout`.
    #[inline(always)]
    pub fn from_parts(words: S, layout: Layout) -> Self {
        debug_assert_eq!(words.as_ref().len(), layout.words(FLOORS));
        Self { words, layout }
    }

    #[inline(always)]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[inline(always)]
    pub fn words(&self) -> &[Puyos] {
        self.words.as_ref()
    }

    pub fn into_inner(self) -> S {
        self.words
    }

    #[inline(always)]
    pub fn layer(&self, layer: usize) -> Stack<FLOORS> {
        Stack::gather(self.words.as_ref(), layer, self.layout.num_layers())
    }

    fn union(&self, layers: usize) -> Stack<FLOORS> {
        let num_layers = self.layout.num_layers();
        let words = self.words.as_ref();
        let mut out = [0; FLOORS];
        for (floor, acc) in out.iter_mut().enumerate() {
            let start = floor * num_layers;
            *acc = words[start..start + layers].iter().fold(0, |a, &w| a | w);
        }
        Stack(out)
    }

    /// Every occupied cell, garbage included.
    #[inline]
    pub fn occupied(&self) -> Stack<FLOORS> {
        self.union(self.layout.num_layers())
    }

    /// Every cell holding a color.
    #[inline]
    pub fn colored(&self) -> Stack<FLOORS> {
        self.union(self.layout.num_colors())
    }

    pub fn popcount(&self) -> u32 {
        self.occupied().popcount()
    }

    /// Layer occupying (`row`, `col`), rows counted from the top of the field.
    /// `None` for empty cells and for coordinates off the field.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= Self::HEIGHT || col >= WIDTH {
            return None;
        }
        let floor = row / FLOOR_HEIGHT;
        let bit = 1u64 << ((row % FLOOR_HEIGHT) * WIDTH + col);
        let num_layers = self.layout.num_layers();
        let start = floor * num_layers;
        self.words.as_ref()[start..start + num_layers]
            .iter()
            .position(|&w| w & bit != 0)
            .map(|layer| layer as u8)
    }

    pub fn to_owned(&self) -> Field<Vec<Puyos>, FLOORS> {
        Field {
            words: self.words.as_ref().to_vec(),
            layout: self.layout,
        }
    }
}

impl<S: AsRef<[Puyos]> + AsMut<[Puyos]>, const FLOORS: usize> Field<S, FLOORS> {
    #[inline(always)]
    pub fn words_mut(&mut self) -> &mut [Puyos] {
        self.words.as_mut()
    }

    #[inline(always)]
    pub fn set_layer(&mut self, layer: usize, puyos: Stack<FLOORS>) {
        let num_layers = self.layout.num_layers();
        puyos.scatter(self.words.as_mut(), layer, num_layers);
    }

    pub fn clear(&mut self) {
        self.words.as_mut().fill(0);
    }

    /// Copy another board of the same shape into this one.
    #[inline(always)]
    pub fn copy_from(&mut self, words: &[Puyos]) {
        self.words.as_mut().copy_from_slice(words);
    }
}

impl<const FLOORS: usize> Field<Vec<Puyos>, FLOORS> {
    pub fn empty(layout: Layout) -> Self {
        Self {
            words: vec![0; layout.words(FLOORS)],
            layout,
        }
    }
}

/// Human-readable dump, top row first: `.` empty, layer digit, `#` garbage.
impl<S: AsRef<[Puyos]>, const FLOORS: usize> fmt::Display for Field<S, FLOORS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let garbage = self.layout.garbage_layer();
        for row in 0..Self::HEIGHT {
            for col in 0..WIDTH {
                let c = match self.get(row, col) {
                    None => '.',
                    Some(layer) if Some(layer as usize) == garbage => '#',
                    Some(layer) => char::from_digit(layer as u32, 36).unwrap_or('?'),
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puyo_core::bitboard::cell;

    #[test]
    fn test_rejects_wrong_length() {
        let layout = Layout::colors(3).unwrap();
        let words = vec![0u64; 5];
        assert_eq!(
            TallField::new(&words[..], layout).unwrap_err(),
            EngineError::BufferLength {
                expected: 6,
                actual: 5
            }
        );
        assert!(BottomField::new(&words[..3], layout).is_ok());
    }

    #[test]
    fn test_get_across_floors() {
        let layout = Layout::colors(2).unwrap();
        let mut field = TallField::empty(layout);
        field.words_mut()[1] = cell(7, 2);
        field.words_mut()[2] = cell(0, 5);
        assert_eq!(field.get(7, 2), Some(1));
        assert_eq!(field.get(8, 5), Some(0));
        assert_eq!(field.get(8, 2), None);
        assert_eq!(field.popcount(), 2);
    }

    #[test]
    fn test_get_off_field() {
        let layout = Layout::colors(1).unwrap();
        let mut field = BottomField::empty(layout);
        field.words_mut()[0] = cell(1, 0) | cell(7, 7);
        assert_eq!(field.get(0, 8), None);
        assert_eq!(field.get(8, 0), None);
        assert_eq!(field.get(usize::MAX, usize::MAX), None);
        assert_eq!(field.get(7, 7), Some(0));
    }

    #[test]
    fn test_display_marks_garbage() {
        let layout = Layout::with_garbage(1).unwrap();
        let mut field = BottomField::empty(layout);
        field.words_mut()[0] = cell(7, 0);
        field.words_mut()[1] = cell(7, 1);
        let dump = field.to_string();
        assert_eq!(dump.lines().count(), 8);
        assert_eq!(dump.lines().last(), Some("0#......"));
    }

    #[test]
    fn test_colored_skips_garbage() {
        let layout = Layout::with_garbage(1).unwrap();
        let mut field = BottomField::empty(layout);
        field.words_mut()[1] = cell(7, 1);
        assert!(field.colored().is_empty());
        assert_eq!(field.occupied().popcount(), 1);
    }
}
