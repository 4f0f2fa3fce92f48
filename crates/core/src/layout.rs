//! Board buffer layout: how many words per floor and which one is garbage.

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Color flags are tracked in a single `u64`.
pub const MAX_LAYERS: usize = 64;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLayout")]
pub struct Layout {
    num_layers: usize,
    has_garbage: bool,
}

#[derive(Deserialize)]
struct RawLayout {
    num_layers: usize,
    has_garbage: bool,
}

impl TryFrom<RawLayout> for Layout {
    type Error = EngineError;

    fn try_from(raw: RawLayout) -> Result<Self, Self::Error> {
        Layout::new(raw.num_layers, raw.has_garbage)
    }
}

impl Layout {
    pub fn new(num_layers: usize, has_garbage: bool) -> Result<Self, EngineError> {
        let colors = num_layers.saturating_sub(has_garbage as usize);
        if colors == 0 || num_layers > MAX_LAYERS {
            return Err(EngineError::InvalidLayerCount {
                num_layers,
                has_garbage,
            });
        }
        Ok(Self {
            num_layers,
            has_garbage,
        })
    }

    /// Color layers only.
    pub fn colors(num_colors: usize) -> Result<Self, EngineError> {
        Self::new(num_colors, false)
    }

    /// Color layers followed by one garbage layer.
    pub fn with_garbage(num_colors: usize) -> Result<Self, EngineError> {
        Self::new(num_colors + 1, true)
    }

    #[inline(always)]
    pub fn num_layers(&self) -> usize {
        self.num_layers
    }

    #[inline(always)]
    pub fn num_colors(&self) -> usize {
        self.num_layers - self.has_garbage as usize
    }

    #[inline(always)]
    pub fn has_garbage(&self) -> bool {
        self.has_garbage
    }

    #[inline(always)]
    pub fn garbage_layer(&self) -> Option<usize> {
        self.has_garbage.then(|| self.num_layers - 1)
    }

    /// Words needed for a board with `floors` floors.
    #[inline(always)]
    pub fn words(&self, floors: usize) -> usize {
        self.num_layers * floors
    }

    pub fn check_color(&self, color: u8) -> Result<(), EngineError> {
        if (color as usize) < self.num_colors() {
            Ok(())
        } else {
            Err(EngineError::ColorOutOfRange {
                color,
                num_colors: self.num_colors(),
            })
        }
    }
}
