//! Row-major cell lists, top row first.
//!
//! A cell is `None` when empty or `Some(layer)`. Lists always cover whole rows
//! and may be shorter than the field, in which case they describe the top rows.

use puyo_core::bitboard::{Puyos, FLOOR_HEIGHT, WIDTH};
use puyo_core::{EngineError, Layout};

use crate::Field;

/// Parse a text picture: `.` empty, base-36 digit for a color, `#` for garbage.
/// Whitespace is ignored so pictures can be indented and split over lines.
///
/// Letters are colors 10 and up, so `x` with three colors is
/// [`EngineError::ColorOutOfRange`] rather than [`EngineError::UnknownCell`].
pub fn parse_cells(text: &str, layout: Layout) -> Result<Vec<Option<u8>>, EngineError> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '.' => Ok(None),
            '#' => layout
                .garbage_layer()
                .map(|layer| Some(layer as u8))
                .ok_or(EngineError::UnknownCell(c)),
            _ => {
                let color = c.to_digit(36).ok_or(EngineError::UnknownCell(c))?;
                let color = u8::try_from(color).map_err(|_| EngineError::UnknownCell(c))?;
                layout.check_color(color)?;
                Ok(Some(color))
            }
        })
        .collect()
}

impl<S: AsRef<[Puyos]>, const FLOORS: usize> Field<S, FLOORS> {
    /// Every cell, top row first.
    pub fn to_cells(&self) -> Vec<Option<u8>> {
        (0..Self::HEIGHT)
            .flat_map(|row| (0..WIDTH).map(move |col| (row, col)))
            .map(|(row, col)| self.get(row, col))
            .collect()
    }

    /// Per-layer masks for `cells`, laid out like the board buffer.
    fn cells_to_words(&self, cells: &[Option<u8>]) -> Result<Vec<Puyos>, EngineError> {
        if cells.len() % WIDTH != 0 || cells.len() > Self::CELLS {
            return Err(EngineError::InvalidCells {
                len: cells.len(),
                cells: Self::CELLS,
            });
        }
        let num_layers = self.layout.num_layers();
        let mut words = vec![0; self.layout.words(FLOORS)];
        for (index, &cell) in cells.iter().enumerate() {
            let Some(layer) = cell else { continue };
            if layer as usize >= num_layers {
                return Err(EngineError::ColorOutOfRange {
                    color: layer,
                    num_colors: num_layers,
                });
            }
            let row = index / WIDTH;
            let floor = row / FLOOR_HEIGHT;
            let bit = (row % FLOOR_HEIGHT) * WIDTH + index % WIDTH;
            words[floor * num_layers + layer as usize] |= 1 << bit;
        }
        Ok(words)
    }
}

impl<S: AsRef<[Puyos]> + AsMut<[Puyos]>, const FLOORS: usize> Field<S, FLOORS> {
    /// Replace the whole field with `cells`.
    pub fn load_cells(&mut self, cells: &[Option<u8>]) -> Result<(), EngineError> {
        let words = self.cells_to_words(cells)?;
        self.copy_from(&words);
        Ok(())
    }

    /// Add `cells` on top of the current contents.
    ///
    /// Returns `false`, leaving the field untouched, if any new cell lands on
    /// an occupied one.
    pub fn overlay(&mut self, cells: &[Option<u8>]) -> Result<bool, EngineError> {
        let words = self.cells_to_words(cells)?;
        let num_layers = self.layout.num_layers();
        let occupied = self.occupied();
        for (floor, chunk) in words.chunks_exact(num_layers).enumerate() {
            let incoming = chunk.iter().fold(0, |acc, &w| acc | w);
            if incoming & occupied.0[floor] != 0 {
                return Ok(false);
            }
        }
        for (mine, yours) in self.words.as_mut().iter_mut().zip(words) {
            *mine |= yours;
        }
        Ok(true)
    }
}
