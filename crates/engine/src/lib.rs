//! puyo-engine - Puyo Puyo field simulation.
//!
//! One generic [`Field`] covers the single-floor 8x8 field and the two-floor
//! 8x16 field: gravity, group clearing, chain resolution, placement and
//! encoding, all in place on a caller-owned buffer of `u64` words.

pub mod config;

mod cells;
mod clear;
mod encode;
mod field;
mod gravity;
mod moves;
mod resolve;

pub use cells::parse_cells;
pub use clear::ClearReport;
pub use config::{Rules, ScoringMode};
pub use field::{BottomField, Field, TallField};
pub use resolve::Resolution;
