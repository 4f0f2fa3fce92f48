//! Multi-floor bit masks.
//!
//! A taller field is a stack of 8x8 floors, floor 0 on top. `Stack<F>` holds
//! one word per floor and treats row 7 of floor `f` as sitting directly on
//! row 0 of floor `f + 1`, so flooding and gravity see one continuous column.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::bitboard::{
    Puyos, BOTTOM_ROW, FLOOR_CARRY, H_SHIFT, RIGHT_BLOCK, TOP_ROW, V_SHIFT,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Stack<const FLOORS: usize>(pub [Puyos; FLOORS]);

impl<const FLOORS: usize> Default for Stack<FLOORS> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<const FLOORS: usize> Stack<FLOORS> {
    pub const EMPTY: Self = Self([0; FLOORS]);
    pub const FULL: Self = Self([!0; FLOORS]);

    /// Bottom row of the last floor, the only row resting on solid ground.
    pub const fn ground() -> Self {
        let mut words = [0; FLOORS];
        words[FLOORS - 1] = BOTTOM_ROW;
        Self(words)
    }

    /// Collect one layer out of a floor-major buffer.
    #[inline(always)]
    pub fn gather(words: &[Puyos], layer: usize, num_layers: usize) -> Self {
        let mut out = [0; FLOORS];
        for (floor, word) in out.iter_mut().enumerate() {
            *word = words[floor * num_layers + layer];
        }
        Self(out)
    }

    /// Write one layer back into a floor-major buffer.
    #[inline(always)]
    pub fn scatter(self, words: &mut [Puyos], layer: usize, num_layers: usize) {
        for (floor, &word) in self.0.iter().enumerate() {
            words[floor * num_layers + layer] = word;
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    #[inline(always)]
    pub fn popcount(&self) -> u32 {
        self.0.iter().map(|w| w.count_ones()).sum()
    }

    /// Lowest set bit of the topmost non-empty floor.
    #[inline]
    pub fn lowest(&self) -> Self {
        let mut out = [0; FLOORS];
        for (floor, &word) in self.0.iter().enumerate() {
            if word != 0 {
                out[floor] = word & word.wrapping_neg();
                break;
            }
        }
        Self(out)
    }

    /// Shift every cell one row towards the ground, crossing floor boundaries.
    #[inline(always)]
    pub fn down(self) -> Self {
        let mut out = [0; FLOORS];
        for floor in 0..FLOORS {
            out[floor] = self.0[floor] << V_SHIFT;
            if floor > 0 {
                out[floor] |= self.0[floor - 1] >> FLOOR_CARRY;
            }
        }
        Self(out)
    }

    /// Shift every cell one row up, crossing floor boundaries.
    #[inline(always)]
    pub fn up(self) -> Self {
        let mut out = [0; FLOORS];
        for floor in 0..FLOORS {
            out[floor] = self.0[floor] >> V_SHIFT;
            if floor + 1 < FLOORS {
                out[floor] |= (self.0[floor + 1] & TOP_ROW) << FLOOR_CARRY;
            }
        }
        Self(out)
    }

    #[inline(always)]
    fn spread(self) -> Self {
        let mut out = self | self.down() | self.up();
        for (acc, &w) in out.0.iter_mut().zip(self.0.iter()) {
            *acc |= ((w & RIGHT_BLOCK) >> H_SHIFT) | ((w << H_SHIFT) & RIGHT_BLOCK);
        }
        out
    }

    /// Connected component of `target` reachable from `self`.
    #[inline]
    pub fn flood(self, target: Self) -> Self {
        let mut group = self & target;
        if group.is_empty() {
            return group;
        }
        loop {
            let next = group.spread() & target;
            if next == group {
                return group;
            }
            group = next;
        }
    }

    /// Orthogonal neighbours, excluding the cells themselves.
    #[inline]
    pub fn cross(self) -> Self {
        self.spread() & !self
    }
}

/// Two-floor flood fill.
#[inline]
pub fn flood_pair(seed: [Puyos; 2], target: [Puyos; 2]) -> [Puyos; 2] {
    Stack(seed).flood(Stack(target)).0
}

macro_rules! stack_binop {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl<const FLOORS: usize> $trait for Stack<FLOORS> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                let mut out = self.0;
                for (a, b) in out.iter_mut().zip(rhs.0.iter()) {
                    *a = *a $op *b;
                }
                Self(out)
            }
        }

        impl<const FLOORS: usize> $assign_trait for Stack<FLOORS> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }
    };
}

stack_binop!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
stack_binop!(BitOr, bitor, BitOrAssign, bitor_assign, |);
stack_binop!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl<const FLOORS: usize> Not for Stack<FLOORS> {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        Self(self.0.map(|w| !w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::{cell, flood};

    #[test]
    fn test_down_crosses_floor() {
        let s = Stack([cell(7, 3), 0]);
        assert_eq!(s.down(), Stack([0, cell(0, 3)]));
    }

    #[test]
    fn test_down_drops_off_ground() {
        let s = Stack([0, cell(7, 3)]);
        assert!(s.down().is_empty());
    }

    #[test]
    fn test_up_crosses_floor() {
        let s = Stack([0, cell(0, 5)]);
        assert_eq!(s.up(), Stack([cell(7, 5), 0]));
    }

    #[test]
    fn test_single_floor_matches_flood() {
        let target = cell(1, 1) | cell(2, 1) | cell(2, 2) | cell(6, 6);
        let single = Stack([cell(1, 1)]).flood(Stack([target]));
        assert_eq!(single.0[0], flood(cell(1, 1), target));
    }

    #[test]
    fn test_flood_pair_joins_floors() {
        let target = [cell(6, 0) | cell(7, 0), cell(0, 0) | cell(1, 0)];
        let group = flood_pair([cell(6, 0), 0], target);
        assert_eq!(group, target);
    }

    #[test]
    fn test_flood_pair_no_diagonal_link() {
        let target = [cell(7, 0), cell(0, 1)];
        assert_eq!(flood_pair([cell(7, 0), 0], target), [cell(7, 0), 0]);
    }

    #[test]
    fn test_cross_spans_floors() {
        let c = Stack([cell(7, 4), 0]).cross();
        assert_eq!(c.0[1], cell(0, 4));
        assert_eq!(c.popcount(), 4);
    }

    #[test]
    fn test_lowest_prefers_top_floor() {
        let s = Stack([cell(3, 2) | cell(5, 5), cell(0, 0)]);
        assert_eq!(s.lowest(), Stack([cell(3, 2), 0]));
        let s = Stack([0, cell(4, 1) | cell(6, 6)]);
        assert_eq!(s.lowest(), Stack([0, cell(4, 1)]));
    }

    #[test]
    fn test_ground() {
        assert_eq!(Stack::<2>::ground(), Stack([0, BOTTOM_ROW]));
        assert_eq!(Stack::<1>::ground(), Stack([BOTTOM_ROW]));
    }
}
