//! Error types for u-timetable.
//!
//! Malformed records inside a payload never produce an error; they are
//! dropped or skipped. The only failure a caller sees from the pipeline is
//! a payload with no recognisable schedule in it at all.

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Structural pipeline failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Nothing in the payload could be read as a weekly schedule.
    #[error("payload is not a schedule: {reason}")]
    NotASchedule { reason: String },
}

impl ScheduleError {
    pub(crate) fn not_a_schedule(reason: impl Into<String>) -> Self {
        Self::NotASchedule {
            reason: reason.into(),
        }
    }
}
