//! Class meeting model.
//!
//! A meeting is one class's occurrence on one weekday: a human-readable time
//! range plus descriptive fields. The time range is kept verbatim; it is only
//! interpreted when the meeting is placed on the grid.

use crate::models::TimeRange;
use crate::time::{parse_range, ParseError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A rating-like value that producers emit either as a number or a string
/// (`4.5`, `"4.5"`, `"N/A"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Number(f64),
    Text(String),
}

impl Score {
    /// Numeric value, if the score is a number or a numeric string.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Score::Number(n) => Some(*n),
            Score::Text(s) => s.trim().parse().ok(),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Score::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Number(n) => write!(f, "{n}"),
            Score::Text(s) => f.write_str(s),
        }
    }
}

/// One class's occurrence on one day.
///
/// Unknown producer fields are kept in `extra` under their original spelling
/// and serialized back inline, so nothing a producer sends is lost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMeeting {
    /// Time range text, e.g. `"9:00am - 10:15am"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_range: Option<String>,
    /// Room or building.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Instructor name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor: Option<String>,
    /// Instructor rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Score>,
    /// Historical average GPA for the course.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_gpa: Option<Score>,
    /// Reported difficulty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Score>,
    /// Fields no alias table recognised.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ClassMeeting {
    /// Creates a meeting with only a time range.
    pub fn new(time_range: impl Into<String>) -> Self {
        Self {
            time_range: Some(time_range.into()),
            ..Self::default()
        }
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the professor.
    pub fn with_professor(mut self, professor: impl Into<String>) -> Self {
        self.professor = Some(professor.into());
        self
    }

    /// Sets the rating.
    pub fn with_rating(mut self, rating: Score) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Adds an unrecognised attribute.
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Parses the time range.
    ///
    /// Returns `None` when the meeting has no time at all, and the parse
    /// error when the text is present but unusable.
    pub fn parsed_time(&self) -> Option<Result<TimeRange, ParseError>> {
        self.time_range.as_deref().map(parse_range)
    }

    /// Display line for the instructor: `"A. Smith (4.2)"`, or
    /// `"A. Smith (N/A)"` when no rating is known.
    pub fn professor_label(&self) -> Option<String> {
        let prof = self.professor.as_deref()?;
        let label = match self.rating.as_ref().filter(|r| !r.is_blank()) {
            Some(rating) => format!("{prof} ({rating})"),
            None => format!("{prof} (N/A)"),
        };
        Some(label)
    }
}
