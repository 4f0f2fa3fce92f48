//! puyo-core - bit-level building blocks for the Puyo Puyo engine.
//!
//! Packed floors, multi-floor masks, the action codec and scoring tables.

pub mod bitboard;
pub mod scoring;
pub mod stack;

mod action;
mod deal;
mod error;
mod layout;

pub use action::{Action, Orientation, ALL_ACTIONS, HALF_ACTIONS, LOWER_ACTIONS, NUM_ACTIONS};
pub use bitboard::{
    cross, flood, popcount, Puyos, CLEAR_THRESHOLD, FLOOR_CELLS, FLOOR_HEIGHT, WIDTH,
};
pub use deal::Deal;
pub use error::EngineError;
pub use layout::{Layout, MAX_LAYERS};
pub use stack::{flood_pair, Stack};
