//! Weekday model.
//!
//! The timetable covers the five teaching days only. Ordering follows the
//! calendar week, so a `BTreeMap<Weekday, _>` iterates Monday first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five teaching days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    /// All teaching days in week order.
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Canonical (full) day name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    /// Two-letter abbreviation used by section listings ("Mo", "Tu", ...).
    pub fn abbreviation(self) -> &'static str {
        &self.name()[..2]
    }

    /// Zero-based column index (Monday = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Looks up a day by its exact canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
