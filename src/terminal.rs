//! Terminal rendering of an animated title.
//!
//! A terminal cell cannot be nudged by a pixel or rotated, so only the
//! horizontal offset survives: each glyph is preceded by zero to two spaces
//! depending on its last `dx`.

use std::io::Write;

use title_jitter::{Jitter, Title};

/// A title whose glyphs are characters of a string, redrawn in place on one
/// terminal line after every tick.
pub struct TerminalTitle<W: Write> {
    glyphs: Vec<char>,
    jitter: Vec<Jitter>,
    out: W,
}

impl<W: Write> TerminalTitle<W> {
    pub fn new(text: &str, out: W) -> Self {
        let glyphs: Vec<char> = text.chars().collect();
        let jitter = vec![Jitter::default(); glyphs.len()];
        Self {
            glyphs,
            jitter,
            out,
        }
    }

    /// The title as it currently looks, without the carriage return.
    pub fn render(&self) -> String {
        let mut line = String::with_capacity(self.glyphs.len() * 3);
        for (glyph, jitter) in self.glyphs.iter().zip(&self.jitter) {
            let pad = (1 + jitter.dx).clamp(0, 2) as usize;
            line.extend(std::iter::repeat_n(' ', pad));
            line.push(*glyph);
        }
        line
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Title for TerminalTitle<W> {
    fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    fn apply(&mut self, index: usize, jitter: Jitter) {
        if let Some(slot) = self.jitter.get_mut(index) {
            *slot = jitter;
        }
    }

    fn frame_done(&mut self) {
        let line = self.render();
        // Trailing spaces clear leftovers from a wider previous frame
        let result = write!(self.out, "\r{line}  ").and_then(|()| self.out.flush());
        if let Err(e) = result {
            log::debug!("Failed to draw title: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_at_rest() {
        let title = TerminalTitle::new("abc", Vec::new());
        assert_eq!(title.render(), " a b c");
    }

    #[test]
    fn test_render_horizontal_offsets() {
        let mut title = TerminalTitle::new("abc", Vec::new());
        title.apply(0, Jitter::new(-1, 1, 3));
        title.apply(2, Jitter::new(1, 0, -2));
        assert_eq!(title.render(), "a b  c");
    }

    #[test]
    fn test_apply_out_of_range_ignored() {
        let mut title = TerminalTitle::new("ab", Vec::new());
        title.apply(5, Jitter::new(1, 1, 1));
        assert_eq!(title.render(), " a b");
    }

    #[test]
    fn test_frame_done_writes_line() {
        let mut title = TerminalTitle::new("hi", Vec::new());
        title.frame_done();
        let out = String::from_utf8(title.into_inner()).unwrap();
        assert_eq!(out, "\r h i  ");
    }
}
