//! Jitter values and their CSS representation.
//!
//! A [`Jitter`] is the numeric perturbation applied to one glyph of a title.
//! Drawing the numbers and turning them into style strings are kept apart so
//! the tick logic never touches units.

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;

/// Inclusive integer range a jitter component is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JitterRange {
    /// Lower bound (inclusive)
    pub from: i32,
    /// Upper bound (inclusive)
    pub to: i32,
}

impl JitterRange {
    pub const fn new(from: i32, to: i32) -> Self {
        Self { from, to }
    }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: i32) -> bool {
        self.from <= value && value <= self.to
    }

    /// Draw a value from the range.
    ///
    /// Maps one uniform draw onto `[from, to]` and rounds half up, so both
    /// bounds are reachable but only with half the weight of interior values.
    pub fn sample(&self, random: &mut dyn RandomSource) -> i32 {
        let span = f64::from(self.to) - f64::from(self.from);
        let raw = f64::from(self.from) + random.next_unit() * span;
        // Bounds may arrive inverted from an unvalidated config
        let (low, high) = (self.from.min(self.to), self.from.max(self.to));
        ((raw + 0.5).floor() as i32).clamp(low, high)
    }
}

/// Positional and rotational perturbation of a single glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Jitter {
    /// Horizontal offset in pixels
    pub dx: i32,
    /// Vertical offset in pixels
    pub dy: i32,
    /// Rotation in degrees
    pub rotation_deg: i32,
}

impl Jitter {
    pub const fn new(dx: i32, dy: i32, rotation_deg: i32) -> Self {
        Self {
            dx,
            dy,
            rotation_deg,
        }
    }

    /// Draw a jitter. Consumes three values from `random`: vertical offset,
    /// horizontal offset, rotation.
    pub fn draw(random: &mut dyn RandomSource, offset: JitterRange, rotation: JitterRange) -> Self {
        let dy = offset.sample(random);
        let dx = offset.sample(random);
        let rotation_deg = rotation.sample(random);
        Self {
            dx,
            dy,
            rotation_deg,
        }
    }

    /// Value for the `top` style property.
    pub fn css_top(&self) -> String {
        px(self.dy)
    }

    /// Value for the `left` style property.
    pub fn css_left(&self) -> String {
        px(self.dx)
    }

    /// Value for the `transform` style property.
    pub fn css_transform(&self) -> String {
        format!("rotate({})", deg(self.rotation_deg))
    }
}

fn px(value: i32) -> String {
    format!("{value}px")
}

fn deg(value: i32) -> String {
    format!("{value}deg")
}
