//! Preallocated scratch boards, one slot per remaining ply.

use puyo_core::{EngineError, Layout, Puyos};

/// Scratch memory for [`crate::TreeSearch`].
///
/// Each ply copies its parent into its own slot and hands the rest of the
/// buffer to the next ply, so the recursion never allocates.
#[derive(Clone, Debug, Default)]
pub struct ScratchArena {
    words: Vec<Puyos>,
}

impl ScratchArena {
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; len],
        }
    }

    /// Words needed to search `depth` plies on a `floors`-floor field.
    #[inline]
    pub fn required(depth: usize, layout: Layout, floors: usize) -> usize {
        depth * layout.words(floors)
    }

    /// Arena sized for `depth` plies.
    pub fn for_search(depth: usize, layout: Layout, floors: usize) -> Self {
        Self::new(Self::required(depth, layout, floors))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline(always)]
    pub(crate) fn words_mut(&mut self) -> &mut [Puyos] {
        &mut self.words
    }

    /// The first `needed` words, or an error if the arena is too small.
    pub fn slots(&mut self, needed: usize) -> Result<&mut [Puyos], EngineError> {
        let actual = self.words.len();
        self.words
            .get_mut(..needed)
            .ok_or(EngineError::ScratchTooSmall { needed, actual })
    }
}
