use thiserror::Error;

/// Boundary errors. The simulation itself is total; these only come from
/// arguments that would otherwise index out of bounds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("action index {0} is outside 0..{max}", max = crate::NUM_ACTIONS)]
    InvalidAction(usize),

    #[error("no placement at column {column} for orientation {orientation:?}")]
    InvalidPlacement {
        column: usize,
        orientation: crate::Orientation,
    },

    #[error("color {color} out of range for {num_colors} colors")]
    ColorOutOfRange { color: u8, num_colors: usize },

    #[error("invalid layer count {num_layers} (garbage layer: {has_garbage})")]
    InvalidLayerCount { num_layers: usize, has_garbage: bool },

    #[error("board buffer has {actual} words, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    #[error("death line rule needs at least two floors, field has {0}")]
    DeathLineNeedsTallField(usize),

    #[error("scratch arena holds {actual} words, search needs {needed}")]
    ScratchTooSmall { needed: usize, actual: usize },

    #[error("cell list of length {len} does not fit a field of {cells} cells in whole rows")]
    InvalidCells { len: usize, cells: usize },

    #[error("unknown cell character {0:?}")]
    UnknownCell(char),
}
