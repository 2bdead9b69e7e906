use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AnimationError {
    #[error("Invalid animation setting '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl AnimationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("Scheduler rejected task: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, AnimationError>;
