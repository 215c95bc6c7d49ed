/// Error types for the schedule layout engine.
///
/// The layout pipeline itself never fails: malformed configuration is
/// logged and omitted. These errors are returned only by the explicit
/// parse and validation helpers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid break {start}-{end}: end must be after start")]
    InvalidBreak { start: String, end: String },

    #[error("Invalid break times: {0}")]
    InvalidBreakTimes(String),

    #[error("Invalid vacation: {0}")]
    InvalidVacation(String),

    #[error("Invalid layout options: {0}")]
    InvalidOptions(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
