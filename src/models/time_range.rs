//! Clock-time interval model.
//!
//! # Time Model
//! All times are minutes since midnight of the meeting day (0..1440).
//! Ranges never wrap past midnight.

use crate::time::format_clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A clock-time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
/// Constructed through [`parse_range`](crate::time::parse_range), which
/// guarantees `start_minutes < end_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Start of the meeting (minutes since midnight, inclusive).
    pub start_minutes: u32,
    /// End of the meeting (minutes since midnight, exclusive).
    pub end_minutes: u32,
}

impl TimeRange {
    /// Creates a new range. Callers are responsible for `start < end`.
    pub fn new(start_minutes: u32, end_minutes: u32) -> Self {
        Self {
            start_minutes,
            end_minutes,
        }
    }

    /// Length of the meeting in minutes.
    #[inline]
    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes.saturating_sub(self.start_minutes)
    }

    /// Hour of day (0..24) in which the meeting starts.
    #[inline]
    pub fn start_hour(&self) -> u32 {
        self.start_minutes / 60
    }

    /// Whether two ranges overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_minutes < other.end_minutes && other.start_minutes < self.end_minutes
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_clock(self.start_minutes),
            format_clock(self.end_minutes)
        )
    }
}
