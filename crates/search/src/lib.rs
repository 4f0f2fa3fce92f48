//! puyo-search - tree search and move selection.
//!
//! [`TreeSearch`] values a position by searching every placement of the known
//! deals and averaging over unknown ones. [`TreeSearchAgent`] turns root values
//! into a move choice.

mod agent;
mod arena;
mod config;
mod tree;

pub use agent::{ActionList, TreeSearchAgent};
pub use arena::ScratchArena;
pub use config::{SearchConfig, CHAIN_DEATH_VALUE, CLASSIC_DEATH_VALUE, GAMMA};
pub use tree::{ActionValue, ActionValues, TreeSearch};
