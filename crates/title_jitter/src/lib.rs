//! title_jitter - decaying jitter animation for page titles
//!
//! Nudges the glyphs of a title by a pixel or two and a few degrees of
//! rotation, less and less often, until the effect settles for good. The crate
//! is platform independent: the title, the timer and the random source are
//! injected, so the same tick logic runs against the DOM, a terminal, or a test.

mod animator;
mod config;
mod error;
mod jitter;
mod random;
mod scheduler;
mod title;

#[cfg(test)]
mod testing;

pub use animator::{Animation, Phase, Status, TitleAnimator};
pub use config::{
    AnimationConfig, DEFAULT_INITIAL_THRESHOLD, DEFAULT_INTERVAL_MS, DEFAULT_OFFSET_PX,
    DEFAULT_ROTATION_DEG, DEFAULT_STEP, DEFAULT_STOP_AT, DEFAULT_TITLE_ID, STOP_TOLERANCE,
};
pub use error::{AnimationError, Result, ScheduleError};
pub use jitter::{Jitter, JitterRange};
pub use random::{RandomSource, RngSource};
pub use scheduler::{LoopHandle, LoopScheduler, Scheduler, TaskCallback, TaskHandle};
pub use title::Title;

/// Re-exported so implementors of [`Scheduler`] can name the interval type.
pub use web_time::Duration;
