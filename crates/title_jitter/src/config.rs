//! Animation settings.

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::error::{AnimationError, Result};
use crate::jitter::JitterRange;

/// Default element id of the page title.
pub const DEFAULT_TITLE_ID: &str = "title";

/// Default starting threshold. Glyphs whose draw exceeds it are jittered.
pub const DEFAULT_INITIAL_THRESHOLD: f64 = 0.2;

/// Default threshold increase per tick.
pub const DEFAULT_STEP: f64 = 0.01;

/// Threshold at which the animation stops for good.
pub const DEFAULT_STOP_AT: f64 = 1.0;

/// Slack allowed when comparing the threshold against `stop_at`.
pub const STOP_TOLERANCE: f64 = 1e-9;

/// Default tick period in milliseconds.
pub const DEFAULT_INTERVAL_MS: u32 = 350;

/// Default pixel offset range for both axes.
pub const DEFAULT_OFFSET_PX: JitterRange = JitterRange::new(-1, 1);

/// Default rotation range in degrees.
pub const DEFAULT_ROTATION_DEG: JitterRange = JitterRange::new(-3, 3);

/// Settings for one title animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Identifier of the title element
    #[serde(default = "default_title_id")]
    pub title_id: String,

    /// Threshold before the first tick
    #[serde(default = "default_initial_threshold")]
    pub initial_threshold: f64,

    /// Threshold increase per tick
    #[serde(default = "default_step")]
    pub step: f64,

    /// Threshold that ends the animation
    #[serde(default = "default_stop_at")]
    pub stop_at: f64,

    /// Milliseconds between ticks
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u32,

    /// Offset range in pixels, used for both axes
    #[serde(default = "default_offset_px")]
    pub offset_px: JitterRange,

    /// Rotation range in degrees
    #[serde(default = "default_rotation_deg")]
    pub rotation_deg: JitterRange,
}

fn default_title_id() -> String {
    DEFAULT_TITLE_ID.to_string()
}

fn default_initial_threshold() -> f64 {
    DEFAULT_INITIAL_THRESHOLD
}

fn default_step() -> f64 {
    DEFAULT_STEP
}

fn default_stop_at() -> f64 {
    DEFAULT_STOP_AT
}

fn default_interval_ms() -> u32 {
    DEFAULT_INTERVAL_MS
}

fn default_offset_px() -> JitterRange {
    DEFAULT_OFFSET_PX
}

fn default_rotation_deg() -> JitterRange {
    DEFAULT_ROTATION_DEG
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            title_id: default_title_id(),
            initial_threshold: DEFAULT_INITIAL_THRESHOLD,
            step: DEFAULT_STEP,
            stop_at: DEFAULT_STOP_AT,
            interval_ms: DEFAULT_INTERVAL_MS,
            offset_px: DEFAULT_OFFSET_PX,
            rotation_deg: DEFAULT_ROTATION_DEG,
        }
    }
}

impl AnimationConfig {
    /// Tick period as a duration.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.interval_ms))
    }

    /// Upper bound on the number of ticks before the animation stops.
    pub fn max_ticks(&self) -> u32 {
        let remaining = (self.stop_at - self.initial_threshold).max(0.0);
        // Tolerate rounding in the division so 0.8 / 0.01 counts as 80 steps
        ((remaining / self.step) - STOP_TOLERANCE / self.step).ceil() as u32 + 1
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        if self.title_id.trim().is_empty() {
            return Err(AnimationError::invalid("title_id", "must not be empty"));
        }
        if !self.initial_threshold.is_finite() || !(0.0..=1.0).contains(&self.initial_threshold)
        {
            return Err(AnimationError::invalid(
                "initial_threshold",
                format!("{} is outside [0, 1]", self.initial_threshold),
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(AnimationError::invalid(
                "step",
                format!("{} must be a positive number", self.step),
            ));
        }
        if !self.stop_at.is_finite() || self.stop_at < self.initial_threshold {
            return Err(AnimationError::invalid(
                "stop_at",
                format!(
                    "{} must not be below the initial threshold {}",
                    self.stop_at, self.initial_threshold
                ),
            ));
        }
        if self.interval_ms == 0 {
            return Err(AnimationError::invalid("interval_ms", "must be greater than zero"));
        }
        for (field, range) in [("offset_px", self.offset_px), ("rotation_deg", self.rotation_deg)] {
            if range.from > range.to {
                return Err(AnimationError::invalid(
                    field,
                    format!("range start {} is after end {}", range.from, range.to),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AnimationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.interval(), Duration::from_millis(350));
        assert_eq!(config.max_ticks(), 81);
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_step = AnimationConfig {
            step: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            bad_step.validate(),
            Err(AnimationError::InvalidConfig { field: "step", .. })
        ));

        let bad_threshold = AnimationConfig {
            initial_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(bad_threshold.validate().is_err());

        let bad_range = AnimationConfig {
            rotation_deg: JitterRange::new(3, -3),
            ..Default::default()
        };
        assert!(matches!(
            bad_range.validate(),
            Err(AnimationError::InvalidConfig {
                field: "rotation_deg",
                ..
            })
        ));

        let bad_interval = AnimationConfig {
            interval_ms: 0,
            ..Default::default()
        };
        assert!(bad_interval.validate().is_err());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AnimationConfig = serde_json::from_str(r#"{"title_id": "heading"}"#).unwrap();
        assert_eq!(config.title_id, "heading");
        assert_eq!(config.step, DEFAULT_STEP);
        assert_eq!(config.offset_px, DEFAULT_OFFSET_PX);
    }
}
