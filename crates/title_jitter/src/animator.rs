//! Title animator.
//!
//! Every tick each glyph of the title gets a fresh random draw; glyphs whose
//! draw beats the current threshold are jittered. The threshold rises by a
//! fixed step per tick, so fewer glyphs move each time, and once it reaches
//! the stop value the repeating task is cancelled for good.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{AnimationConfig, STOP_TOLERANCE};
use crate::error::Result;
use crate::jitter::Jitter;
use crate::random::RandomSource;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::title::Title;

/// Phase of an [`Animation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Terminal. No further glyph is touched.
    Stopped,
}

/// Tick state of one animation: the configuration plus the number of ticks
/// taken so far. The threshold is derived from the tick count.
#[derive(Debug, Clone)]
pub struct Animation {
    config: AnimationConfig,
    ticks: u32,
    phase: Phase,
}

impl Animation {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            ticks: 0,
            phase: Phase::Running,
        }
    }

    /// Current threshold, `min(initial + step * ticks, stop_at)`.
    pub fn threshold(&self) -> f64 {
        let raw = self.config.initial_threshold + self.config.step * f64::from(self.ticks);
        raw.min(self.config.stop_at)
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run one tick against `title`.
    ///
    /// Returns the phase after the tick. Once stopped, further calls are
    /// no-ops.
    pub fn tick(&mut self, title: &mut dyn Title, random: &mut dyn RandomSource) -> Phase {
        if self.phase == Phase::Stopped {
            return Phase::Stopped;
        }

        let threshold = self.threshold();
        let mut moved = 0;
        for index in 0..title.glyph_count() {
            if random.next_unit() > threshold {
                let jitter = Jitter::draw(random, self.config.offset_px, self.config.rotation_deg);
                title.apply(index, jitter);
                moved += 1;
            }
        }
        title.frame_done();

        self.ticks += 1;
        if self.threshold() >= self.config.stop_at - STOP_TOLERANCE {
            self.phase = Phase::Stopped;
        }

        log::trace!(
            "Tick {}: moved {} glyphs at threshold {:.2}",
            self.ticks,
            moved,
            threshold
        );
        self.phase
    }

    /// Move to the terminal phase without ticking.
    pub fn finish(&mut self) {
        self.phase = Phase::Stopped;
    }
}

/// Lifecycle of a [`TitleAnimator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    Stopped,
}

enum Slot<H> {
    Idle,
    /// `handle` is `None` only while the task is being registered
    Running { handle: Option<H> },
    Stopped,
}

/// Drives an [`Animation`] on a [`Scheduler`].
///
/// Starting is fire-and-forget: the scheduled task keeps the animation alive
/// on its own, so the animator may be dropped after [`start`](Self::start).
/// There is no restart; once stopped the animator stays stopped.
pub struct TitleAnimator<S: Scheduler> {
    config: AnimationConfig,
    scheduler: S,
    animation: Rc<RefCell<Animation>>,
    slot: Rc<RefCell<Slot<S::Handle>>>,
}

impl<S: Scheduler> TitleAnimator<S> {
    pub fn new(config: AnimationConfig, scheduler: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            animation: Rc::new(RefCell::new(Animation::new(config.clone()))),
            config,
            scheduler,
            slot: Rc::new(RefCell::new(Slot::Idle)),
        })
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn status(&self) -> Status {
        match &*self.slot.borrow() {
            Slot::Idle => Status::Idle,
            Slot::Running { .. } => Status::Running,
            Slot::Stopped => Status::Stopped,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.animation.borrow().threshold()
    }

    pub fn ticks(&self) -> u32 {
        self.animation.borrow().ticks()
    }

    /// Begin animating `title`.
    ///
    /// A missing title is a silent no-op so callers can pass the result of an
    /// element lookup straight through.
    pub fn start<T, R>(&self, title: Option<T>, random: R)
    where
        T: Title + 'static,
        R: RandomSource + 'static,
    {
        let Some(mut title) = title else {
            log::debug!(
                "Title '{}' not found, skipping animation",
                self.config.title_id
            );
            return;
        };

        match &*self.slot.borrow() {
            Slot::Idle => {}
            Slot::Running { .. } => {
                log::warn!("Title animation already running");
                return;
            }
            Slot::Stopped => {
                log::warn!("Title animation has finished and cannot be restarted");
                return;
            }
        }
        *self.slot.borrow_mut() = Slot::Running { handle: None };

        let animation = Rc::clone(&self.animation);
        let slot = Rc::clone(&self.slot);
        let mut random = random;
        let callback = Box::new(move || {
            let phase = animation.borrow_mut().tick(&mut title, &mut random);
            if phase == Phase::Stopped {
                release(&slot);
            }
        });

        match self
            .scheduler
            .schedule_repeating(self.config.interval(), callback)
        {
            Ok(handle) => {
                let mut slot = self.slot.borrow_mut();
                match &mut *slot {
                    Slot::Running { handle: pending } => *pending = Some(handle),
                    // Finished while being registered
                    _ => handle.cancel(),
                }
                log::debug!(
                    "Title animation started on '{}' every {} ms",
                    self.config.title_id,
                    self.config.interval_ms
                );
            }
            Err(e) => {
                log::warn!("Failed to schedule title animation: {}", e);
                self.animation.borrow_mut().finish();
                *self.slot.borrow_mut() = Slot::Stopped;
            }
        }
    }

    /// Stop the animation now. Same terminal state as running to completion.
    pub fn stop(&self) {
        self.animation.borrow_mut().finish();
        release(&self.slot);
    }
}

/// Enter the terminal state, cancelling the task if one is registered.
fn release<H: TaskHandle>(slot: &RefCell<Slot<H>>) {
    let previous = std::mem::replace(&mut *slot.borrow_mut(), Slot::Stopped);
    if let Slot::Running {
        handle: Some(handle),
    } = previous
    {
        handle.cancel();
        log::debug!("Title animation finished");
    }
}
