//! Color pairs handed to the player.

use serde::{Deserialize, Serialize};

/// An ordered (pivot, partner) color pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Deal(pub u8, pub u8);

impl Deal {
    pub fn new(first: u8, second: u8) -> Self {
        Self(first, second)
    }

    #[inline(always)]
    pub fn first(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub fn second(self) -> u8 {
        self.1
    }

    /// Both halves share a color, so mirrored placements are identical.
    #[inline(always)]
    pub fn is_symmetric(self) -> bool {
        self.0 == self.1
    }

    /// Every unordered pair `c0 <= c1` with its multiplicity among ordered
    /// draws. Weights sum to `num_colors * num_colors`.
    pub fn unordered(num_colors: u8) -> impl Iterator<Item = (Deal, u32)> {
        (0..num_colors).flat_map(move |c0| {
            (c0..num_colors).map(move |c1| (Deal(c0, c1), if c0 == c1 { 1 } else { 2 }))
        })
    }

    /// Pair up a flat color sequence `[a0, b0, a1, b1, ...]`.
    /// A trailing unpaired color is dropped.
    pub fn from_flat(colors: &[u8]) -> Vec<Deal> {
        colors.chunks_exact(2).map(|c| Deal(c[0], c[1])).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unordered_weights_cover_all_draws() {
        for n in 1..=6u8 {
            let total: u32 = Deal::unordered(n).map(|(_, w)| w).sum();
            assert_eq!(total, n as u32 * n as u32);
            assert_eq!(Deal::unordered(n).count(), (n as usize * (n as usize + 1)) / 2);
        }
    }

    #[test]
    fn test_from_flat() {
        let deals = Deal::from_flat(&[0, 1, 2, 2, 3]);
        assert_eq!(deals, vec![Deal(0, 1), Deal(2, 2)]);
        assert!(deals[1].is_symmetric());
    }
}
