//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::jitter::Jitter;
use crate::random::RandomSource;
use crate::title::Title;

/// Always returns the same value.
pub struct FixedRandom(pub f64);

impl RandomSource for FixedRandom {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// Cycles through a fixed list of values.
pub struct SequenceRandom {
    values: Vec<f64>,
    next: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, next: 0 }
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

/// Records every applied jitter. Clones share the same log.
#[derive(Clone)]
pub struct RecordingTitle {
    glyphs: usize,
    pub applied: Rc<RefCell<Vec<(usize, Jitter)>>>,
    pub frames: Rc<RefCell<u32>>,
}

impl RecordingTitle {
    pub fn new(glyphs: usize) -> Self {
        Self {
            glyphs,
            applied: Rc::new(RefCell::new(Vec::new())),
            frames: Rc::new(RefCell::new(0)),
        }
    }

    pub fn applied_count(&self) -> usize {
        self.applied.borrow().len()
    }
}

impl Title for RecordingTitle {
    fn glyph_count(&self) -> usize {
        self.glyphs
    }

    fn apply(&mut self, index: usize, jitter: Jitter) {
        self.applied.borrow_mut().push((index, jitter));
    }

    fn frame_done(&mut self) {
        *self.frames.borrow_mut() += 1;
    }
}
