//! Gravity: unsupported cells drop one row per pass until nothing moves.

use puyo_core::bitboard::Puyos;
use puyo_core::Stack;

use crate::Field;

impl<S: AsRef<[Puyos]> + AsMut<[Puyos]>, const FLOORS: usize> Field<S, FLOORS> {
    /// Drop every layer, garbage included, until the field settles.
    ///
    /// Returns the number of passes, counting the final pass in which nothing
    /// moved. A field that was already settled returns 1.
    pub fn apply_gravity(&mut self) -> u32 {
        let num_layers = self.layout.num_layers();
        let mut iterations = 0;
        loop {
            iterations += 1;
            let support = self.occupied().up() | Stack::ground();
            let words = self.words.as_mut();
            let mut moved = false;
            for layer in 0..num_layers {
                let puyos = Stack::<FLOORS>::gather(words, layer, num_layers);
                let falling = puyos & !support;
                if !falling.is_empty() {
                    (falling.down() | (puyos & support)).scatter(words, layer, num_layers);
                    moved = true;
                }
            }
            if !moved {
                return iterations;
            }
        }
    }
}
