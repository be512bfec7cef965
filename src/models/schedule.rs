//! Canonical schedule model.
//!
//! The producer-independent form of a week of classes. Every teaching day
//! is always present (possibly empty) and classes keep the order in which
//! the producer listed them, which the grid relies on for its first-match
//! collision policy.

use crate::models::{ClassMeeting, Weekday};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Classes meeting on a single day, keyed by class name.
///
/// Insertion-ordered; a class name appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DaySchedule {
    classes: Vec<(String, ClassMeeting)>,
}

impl DaySchedule {
    /// Creates an empty day.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class. Returns `false` (and keeps the existing entry) if the
    /// name is already present.
    pub fn insert(&mut self, name: impl Into<String>, meeting: ClassMeeting) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.classes.push((name, meeting));
        true
    }

    /// Adds a class (builder form).
    pub fn with_class(mut self, name: impl Into<String>, meeting: ClassMeeting) -> Self {
        self.insert(name, meeting);
        self
    }

    /// Looks up a class by name.
    pub fn get(&self, name: &str) -> Option<&ClassMeeting> {
        self.classes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m)
    }

    /// Whether the day contains a class with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates classes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClassMeeting)> {
        self.classes.iter().map(|(n, m)| (n.as_str(), m))
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the day has no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Serialize for DaySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.classes.len()))?;
        for (name, meeting) in &self.classes {
            map.serialize_entry(name, meeting)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DaySchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DayVisitor;

        impl<'de> Visitor<'de> for DayVisitor {
            type Value = DaySchedule;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from class name to meeting")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<DaySchedule, A::Error> {
                let mut day = DaySchedule::new();
                while let Some((name, meeting)) = access.next_entry::<String, ClassMeeting>()? {
                    day.insert(name, meeting);
                }
                Ok(day)
            }
        }

        deserializer.deserialize_map(DayVisitor)
    }
}

/// A normalized week of classes.
///
/// Invariant: `classes_by_day` holds exactly the five teaching days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalSchedule {
    #[serde(deserialize_with = "deserialize_days")]
    classes_by_day: BTreeMap<Weekday, DaySchedule>,
}

/// Key whose presence marks a payload as already canonical.
pub const CANONICAL_MARKER: &str = "classesByDay";

fn deserialize_days<'de, D>(deserializer: D) -> Result<BTreeMap<Weekday, DaySchedule>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut days = BTreeMap::<Weekday, DaySchedule>::deserialize(deserializer)?;
    for day in Weekday::ALL {
        days.entry(day).or_default();
    }
    Ok(days)
}

impl Default for CanonicalSchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl CanonicalSchedule {
    /// Creates a schedule with five empty days.
    pub fn new() -> Self {
        Self {
            classes_by_day: Weekday::ALL
                .into_iter()
                .map(|d| (d, DaySchedule::new()))
                .collect(),
        }
    }

    /// Adds a class meeting to a day. First insertion of a name wins.
    pub fn add_class(
        &mut self,
        day: Weekday,
        name: impl Into<String>,
        meeting: ClassMeeting,
    ) -> bool {
        self.classes_by_day
            .entry(day)
            .or_default()
            .insert(name, meeting)
    }

    /// Adds a class meeting (builder form).
    pub fn with_class(mut self, day: Weekday, name: impl Into<String>, meeting: ClassMeeting) -> Self {
        self.add_class(day, name, meeting);
        self
    }

    /// Classes on a given day.
    pub fn day(&self, day: Weekday) -> &DaySchedule {
        // Every day is inserted at construction and never removed.
        &self.classes_by_day[&day]
    }

    /// Iterates days in week order.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &DaySchedule)> {
        self.classes_by_day.iter().map(|(d, s)| (*d, s))
    }

    /// Looks up one meeting.
    pub fn meeting(&self, day: Weekday, name: &str) -> Option<&ClassMeeting> {
        self.day(day).get(name)
    }

    /// Total number of meetings across the week.
    pub fn meeting_count(&self) -> usize {
        self.classes_by_day.values().map(DaySchedule::len).sum()
    }

    /// Whether no class meets on any day.
    pub fn is_empty(&self) -> bool {
        self.meeting_count() == 0
    }

    /// Distinct class names across the week, in first-seen order.
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (_, day) in self.days() {
            for (name, _) in day.iter() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}
