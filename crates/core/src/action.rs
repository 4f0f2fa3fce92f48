//! Action index <-> placement codec.
//!
//! A piece is a pivot cell (first color) plus a partner cell (second color),
//! dropped into the top two rows of the top floor. Actions are numbered by
//! orientation, then column:
//!
//! | range     | partner sits        | cells                          |
//! |-----------|---------------------|--------------------------------|
//! | `0..7`    | right of the pivot  | pivot (0, x), partner (0, x+1) |
//! | `7..15`   | below the pivot     | pivot (0, x), partner (1, x)   |
//! | `15..22`  | left of the pivot   | partner (0, x), pivot (0, x+1) |
//! | `22..30`  | above the pivot     | partner (0, x), pivot (1, x)   |
//!
//! Action `i` and `i + HALF_ACTIONS` cover the same two cells with the colors
//! swapped.

use serde::{Deserialize, Serialize};

use crate::bitboard::{cell, Puyos, WIDTH};
use crate::EngineError;

pub const NUM_ACTIONS: usize = 4 * WIDTH - 2;
pub const HALF_ACTIONS: usize = NUM_ACTIONS / 2;

/// Bitset with every action allowed.
pub const ALL_ACTIONS: u64 = (1 << NUM_ACTIONS) - 1;
/// The first half of the action space; enough when both colors match.
pub const LOWER_ACTIONS: u64 = (1 << HALF_ACTIONS) - 1;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Right,
    Down,
    Left,
    Up,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
        Orientation::Up,
    ];

    /// Number of columns the pivot can occupy.
    pub const fn columns(self) -> usize {
        match self {
            Self::Right | Self::Left => WIDTH - 1,
            Self::Down | Self::Up => WIDTH,
        }
    }

    const fn offset(self) -> usize {
        match self {
            Self::Right => 0,
            Self::Down => WIDTH - 1,
            Self::Left => 2 * WIDTH - 1,
            Self::Up => 3 * WIDTH - 2,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Down | Self::Up)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action(u8);

impl Action {
    pub fn new(index: usize) -> Result<Self, EngineError> {
        if index < NUM_ACTIONS {
            Ok(Self(index as u8))
        } else {
            Err(EngineError::InvalidAction(index))
        }
    }

    /// Caller guarantees `index < NUM_ACTIONS`.
    #[inline(always)]
    pub const fn new_unchecked(index: usize) -> Self {
        debug_assert!(index < NUM_ACTIONS);
        Self(index as u8)
    }

    pub fn from_placement(column: usize, orientation: Orientation) -> Result<Self, EngineError> {
        if column >= orientation.columns() {
            return Err(EngineError::InvalidPlacement {
                column,
                orientation,
            });
        }
        Ok(Self((orientation.offset() + column) as u8))
    }

    pub fn all() -> impl Iterator<Item = Action> {
        (0..NUM_ACTIONS).map(Self::new_unchecked)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub fn bit(self) -> u64 {
        1 << self.0
    }

    #[inline]
    pub fn decode(self) -> (usize, Orientation) {
        match self.index() {
            i @ 0..=6 => (i, Orientation::Right),
            i @ 7..=14 => (i - 7, Orientation::Down),
            i @ 15..=21 => (i - 15, Orientation::Left),
            i => (i - 22, Orientation::Up),
        }
    }

    pub fn column(self) -> usize {
        self.decode().0
    }

    pub fn orientation(self) -> Orientation {
        self.decode().1
    }

    /// Same cells, colors swapped.
    pub fn swapped(self) -> Self {
        let index = self.index();
        if index < HALF_ACTIONS {
            Self((index + HALF_ACTIONS) as u8)
        } else {
            Self((index - HALF_ACTIONS) as u8)
        }
    }

    /// Top-floor bits for (pivot, partner).
    #[inline]
    pub fn cells(self) -> (Puyos, Puyos) {
        let (x, orientation) = self.decode();
        match orientation {
            Orientation::Right => (cell(0, x), cell(0, x + 1)),
            Orientation::Down => (cell(0, x), cell(1, x)),
            Orientation::Left => (cell(0, x + 1), cell(0, x)),
            Orientation::Up => (cell(1, x), cell(0, x)),
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = EngineError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<Action> for usize {
    fn from(action: Action) -> usize {
        action.index()
    }
}
