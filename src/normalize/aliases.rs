//! Alias tables for day and field keys.
//!
//! Keys are compared in lowercase. Tables are plain data so callers can
//! extend them for new producers without touching the normalizer.

use crate::models::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Meeting fields with a fixed canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    TimeRange,
    Location,
    Professor,
    Rating,
    AverageGpa,
    Difficulty,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::TimeRange,
        CanonicalField::Location,
        CanonicalField::Professor,
        CanonicalField::Rating,
        CanonicalField::AverageGpa,
        CanonicalField::Difficulty,
    ];

    /// Serialized name in the canonical shape.
    pub fn name(self) -> &'static str {
        match self {
            CanonicalField::TimeRange => "timeRange",
            CanonicalField::Location => "location",
            CanonicalField::Professor => "professor",
            CanonicalField::Rating => "rating",
            CanonicalField::AverageGpa => "averageGpa",
            CanonicalField::Difficulty => "difficulty",
        }
    }
}

const DAY_SPELLINGS: &[(&str, Weekday)] = &[
    ("mo", Weekday::Monday),
    ("mon", Weekday::Monday),
    ("monday", Weekday::Monday),
    ("tu", Weekday::Tuesday),
    ("tue", Weekday::Tuesday),
    ("tues", Weekday::Tuesday),
    ("tuesday", Weekday::Tuesday),
    ("we", Weekday::Wednesday),
    ("wed", Weekday::Wednesday),
    ("wednesday", Weekday::Wednesday),
    ("th", Weekday::Thursday),
    ("thu", Weekday::Thursday),
    ("thur", Weekday::Thursday),
    ("thurs", Weekday::Thursday),
    ("thursday", Weekday::Thursday),
    ("fr", Weekday::Friday),
    ("fri", Weekday::Friday),
    ("friday", Weekday::Friday),
];

const FIELD_SPELLINGS: &[(&str, CanonicalField)] = &[
    ("timerange", CanonicalField::TimeRange),
    ("time_range", CanonicalField::TimeRange),
    ("time", CanonicalField::TimeRange),
    ("times", CanonicalField::TimeRange),
    ("meeting_time", CanonicalField::TimeRange),
    ("location", CanonicalField::Location),
    ("loc", CanonicalField::Location),
    ("room", CanonicalField::Location),
    ("professor", CanonicalField::Professor),
    ("prof", CanonicalField::Professor),
    ("instructor", CanonicalField::Professor),
    ("teacher", CanonicalField::Professor),
    ("rating", CanonicalField::Rating),
    ("prof_rating", CanonicalField::Rating),
    ("averagegpa", CanonicalField::AverageGpa),
    ("average_gpa", CanonicalField::AverageGpa),
    ("avg_gpa", CanonicalField::AverageGpa),
    ("gpa", CanonicalField::AverageGpa),
    ("difficulty", CanonicalField::Difficulty),
];

/// Lowercase day spelling → canonical day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayAliases {
    table: HashMap<String, Weekday>,
}

impl Default for DayAliases {
    fn default() -> Self {
        Self {
            table: DAY_SPELLINGS
                .iter()
                .map(|(k, d)| ((*k).to_string(), *d))
                .collect(),
        }
    }
}

impl DayAliases {
    /// Registers an extra spelling.
    pub fn insert(&mut self, spelling: &str, day: Weekday) {
        self.table.insert(spelling.trim().to_lowercase(), day);
    }

    /// Resolves a raw key, ignoring case and surrounding whitespace.
    pub fn resolve(&self, key: &str) -> Option<Weekday> {
        self.table.get(&key.trim().to_lowercase()).copied()
    }
}

/// Lowercase field spelling → canonical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAliases {
    table: HashMap<String, CanonicalField>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        Self {
            table: FIELD_SPELLINGS
                .iter()
                .map(|(k, f)| ((*k).to_string(), *f))
                .collect(),
        }
    }
}

impl FieldAliases {
    /// Registers an extra spelling.
    pub fn insert(&mut self, spelling: &str, field: CanonicalField) {
        self.table.insert(spelling.trim().to_lowercase(), field);
    }

    /// Resolves a raw field name, ignoring case.
    pub fn resolve(&self, key: &str) -> Option<CanonicalField> {
        self.table.get(&key.trim().to_lowercase()).copied()
    }
}
