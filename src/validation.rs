//! Diagnostic checks for canonical schedules.
//!
//! The grid never fails on bad data; it skips what it cannot place. This
//! pass reports every such problem in one go so a caller can surface them
//! (or ask the producer for a better schedule). Detects:
//! - Missing or unparseable time ranges
//! - Meetings starting outside the 7 AM - 9 PM grid
//! - Overlapping meetings on the same day
//! - Meetings sharing a start hour (only the first gets a grid cell)

use crate::grid::slot_for_hour;
use crate::models::{CanonicalSchedule, TimeRange, Weekday};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Day the problem was found on.
    pub day: Weekday,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A meeting has no time field.
    MissingTime,
    /// The time text does not parse, or start is not before end.
    InvalidTimeRange,
    /// The meeting starts outside the grid hours.
    OutsideGridHours,
    /// Two meetings on the same day overlap in time.
    OverlappingMeetings,
    /// Two meetings start in the same hour; the later one has no cell.
    SharedStartHour,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, day: Weekday, message: impl Into<String>) -> Self {
        Self {
            kind,
            day,
            message: message.into(),
        }
    }
}

/// Validates a canonical schedule.
///
/// Checks, per day:
/// 1. Every meeting has a time range
/// 2. Every time range parses with start before end
/// 3. Every meeting starts within grid hours
/// 4. No two meetings overlap
/// 5. No two meetings start in the same hour
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_schedule(schedule: &CanonicalSchedule) -> ValidationResult {
    let mut errors = Vec::new();

    for (day, classes) in schedule.days() {
        let mut timed: Vec<(&str, TimeRange)> = Vec::new();

        for (name, meeting) in classes.iter() {
            match meeting.parsed_time() {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::MissingTime,
                    day,
                    format!("'{name}' on {day} has no time"),
                )),
                Some(Err(e)) => errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidTimeRange,
                    day,
                    format!("'{name}' on {day}: {e}"),
                )),
                Some(Ok(range)) => {
                    if slot_for_hour(range.start_hour()).is_none() {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::OutsideGridHours,
                            day,
                            format!("'{name}' on {day} starts at {range}, outside grid hours"),
                        ));
                    }
                    timed.push((name, range));
                }
            }
        }

        // Pairwise; a day holds a handful of classes.
        for (i, (a_name, a)) in timed.iter().enumerate() {
            for (b_name, b) in &timed[i + 1..] {
                if a.overlaps(b) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::OverlappingMeetings,
                        day,
                        format!("'{a_name}' ({a}) overlaps '{b_name}' ({b}) on {day}"),
                    ));
                }
                if a.start_hour() == b.start_hour() {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::SharedStartHour,
                        day,
                        format!("'{a_name}' and '{b_name}' both start in hour {} on {day}", a.start_hour()),
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
