//! Flat byte encoding and left-right mirroring.

use puyo_core::bitboard::{mirror_word, Puyos, FLOOR_CELLS};

use crate::Field;

impl<S: AsRef<[Puyos]>, const FLOORS: usize> Field<S, FLOORS> {
    /// One byte per cell per layer, `1` if occupied.
    ///
    /// Index is `layer * CELLS + floor * 64 + bit`, so each layer reads as a
    /// contiguous top-to-bottom image.
    pub fn encode(&self) -> Vec<u8> {
        let num_layers = self.layout.num_layers();
        let mut data = vec![0u8; num_layers * Self::CELLS];
        for (index, &word) in self.words.as_ref().iter().enumerate() {
            let floor = index / num_layers;
            let layer = index % num_layers;
            let start = layer * Self::CELLS + floor * FLOOR_CELLS;
            for (bit, byte) in data[start..start + FLOOR_CELLS].iter_mut().enumerate() {
                *byte = ((word >> bit) & 1) as u8;
            }
        }
        data
    }
}

impl<S: AsRef<[Puyos]> + AsMut<[Puyos]>, const FLOORS: usize> Field<S, FLOORS> {
    /// Flip every row left to right. Applying it twice is a no-op.
    pub fn mirror(&mut self) {
        for word in self.words.as_mut() {
            *word = mirror_word(*word);
        }
    }
}
