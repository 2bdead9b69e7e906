//! The title being animated.

use crate::jitter::Jitter;

/// An ordered row of glyphs that can be nudged individually.
///
/// Implementations exist for DOM elements (one child node per character) and
/// for the terminal demo. The animator never creates or removes glyphs.
pub trait Title {
    /// Number of glyphs currently in the title.
    fn glyph_count(&self) -> usize;

    /// Apply `jitter` to the glyph at `index`.
    fn apply(&mut self, index: usize, jitter: Jitter);

    /// Called once after every tick, whether or not any glyph moved.
    fn frame_done(&mut self) {}
}
