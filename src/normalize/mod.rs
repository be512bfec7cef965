//! Schema normalization.
//!
//! Maps a producer payload (`serde_json::Value`) onto [`CanonicalSchedule`].
//! Producers disagree on day spellings (`"Mo"`, `"monday"`) and field names
//! (`"prof"`, `"instructor"`); both are resolved through [`DayAliases`] and
//! [`FieldAliases`].
//!
//! # Tolerance
//!
//! - Unknown day keys are dropped.
//! - Unknown fields are kept in [`ClassMeeting::extra`] under their original
//!   spelling, whatever their value (including `null`).
//! - Class records that are not objects, and null or wrong-typed values for a
//!   known field, are dropped.
//! - Only a payload with no recognisable day map fails, with
//!   [`ScheduleError::NotASchedule`]. That includes a `class_data` envelope
//!   missing its `day_of_the_week` map.
//!
//! # Envelope
//!
//! The day map may sit at the top level or under `class_data.day_of_the_week`
//! (or `day_of_the_week`). A payload carrying the canonical marker
//! (`classesByDay`) is read as-is, which makes normalization idempotent.

mod aliases;

pub use aliases::{CanonicalField, DayAliases, FieldAliases};

use crate::error::{Result, ScheduleError};
use crate::models::{CanonicalSchedule, ClassMeeting, Score, Weekday, CANONICAL_MARKER};
use log::{debug, warn};
use serde_json::{Map, Value};

const ENVELOPE_KEY: &str = "class_data";
const DAY_MAP_KEY: &str = "day_of_the_week";

/// Normalizes a payload with the default alias tables.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use u_timetable::models::Weekday;
/// use u_timetable::normalize::normalize;
///
/// let raw = json!({ "Mo": { "CS 2100": { "time": "9:00am - 10:15am", "prof": "A. Smith" } } });
/// let schedule = normalize(&raw).unwrap();
/// let meeting = schedule.meeting(Weekday::Monday, "CS 2100").unwrap();
/// assert_eq!(meeting.professor.as_deref(), Some("A. Smith"));
/// ```
pub fn normalize(raw: &Value) -> Result<CanonicalSchedule> {
    Normalizer::default().normalize(raw)
}

/// Payload normalizer with configurable alias tables.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    days: DayAliases,
    fields: FieldAliases,
}

impl Normalizer {
    /// Creates a normalizer with the built-in alias tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a day spelling.
    pub fn with_day_alias(mut self, spelling: &str, day: Weekday) -> Self {
        self.days.insert(spelling, day);
        self
    }

    /// Adds a field spelling.
    pub fn with_field_alias(mut self, spelling: &str, field: CanonicalField) -> Self {
        self.fields.insert(spelling, field);
        self
    }

    /// Normalizes a payload.
    ///
    /// Returns [`ScheduleError::NotASchedule`] only when the payload is not an
    /// object, has a `class_data` envelope without a day map, or holds no
    /// recognisable day at all. An enveloped payload with an empty day map is a
    /// valid, empty schedule.
    pub fn normalize(&self, raw: &Value) -> Result<CanonicalSchedule> {
        let root = raw
            .as_object()
            .ok_or_else(|| ScheduleError::not_a_schedule("payload is not an object"))?;

        if let Some(inner) = root.get(CANONICAL_MARKER) {
            match serde_json::from_value::<CanonicalSchedule>(raw.clone()) {
                Ok(schedule) => return Ok(schedule),
                Err(e) => {
                    warn!("canonical payload did not deserialize ({e}); resolving aliases instead");
                    let days = inner.as_object().ok_or_else(|| {
                        ScheduleError::not_a_schedule(format!("'{CANONICAL_MARKER}' is not an object"))
                    })?;
                    return self.from_day_map(days, true);
                }
            }
        }

        let (days, enveloped) = locate_day_map(root)?;
        self.from_day_map(days, enveloped)
    }

    fn from_day_map(&self, days: &Map<String, Value>, enveloped: bool) -> Result<CanonicalSchedule> {
        let mut schedule = CanonicalSchedule::new();
        let mut recognised = 0usize;

        for (key, classes) in days {
            let Some(day) = self.days.resolve(key) else {
                debug!("dropping unrecognised day key '{key}'");
                continue;
            };
            recognised += 1;

            let Some(classes) = classes.as_object() else {
                debug!("dropping non-object class map under '{key}'");
                continue;
            };

            for (name, record) in classes {
                let Some(record) = record.as_object() else {
                    debug!("dropping non-object record for '{name}' on {day}");
                    continue;
                };
                if !schedule.add_class(day, name.as_str(), self.meeting_from_record(record)) {
                    debug!("duplicate class '{name}' on {day}; keeping the first");
                }
            }
        }

        if recognised == 0 && !enveloped {
            return Err(ScheduleError::not_a_schedule("no recognisable weekday keys"));
        }
        Ok(schedule)
    }

    fn meeting_from_record(&self, record: &Map<String, Value>) -> ClassMeeting {
        let mut meeting = ClassMeeting::default();

        for (key, value) in record {
            let Some(field) = self.fields.resolve(key) else {
                meeting.extra.insert(key.clone(), value.clone());
                continue;
            };
            if value.is_null() {
                continue;
            }

            let applied = match field {
                CanonicalField::TimeRange => set_once(&mut meeting.time_range, as_text(value)),
                CanonicalField::Location => set_once(&mut meeting.location, as_text(value)),
                CanonicalField::Professor => set_once(&mut meeting.professor, as_text(value)),
                CanonicalField::Rating => set_once(&mut meeting.rating, as_score(value)),
                CanonicalField::AverageGpa => set_once(&mut meeting.average_gpa, as_score(value)),
                CanonicalField::Difficulty => set_once(&mut meeting.difficulty, as_score(value)),
            };
            if !applied {
                debug!("dropping field '{key}' ({}): duplicate or unusable value", field.name());
            }
        }

        meeting
    }
}

/// Finds the day map inside the producer envelope, if any.
///
/// A `class_data` envelope without a `day_of_the_week` map is not a schedule.
fn locate_day_map(root: &Map<String, Value>) -> Result<(&Map<String, Value>, bool)> {
    if let Some(envelope) = root.get(ENVELOPE_KEY) {
        return envelope
            .get(DAY_MAP_KEY)
            .and_then(Value::as_object)
            .map(|days| (days, true))
            .ok_or_else(|| {
                ScheduleError::not_a_schedule(format!("'{ENVELOPE_KEY}' has no '{DAY_MAP_KEY}' map"))
            });
    }
    Ok(match root.get(DAY_MAP_KEY).and_then(Value::as_object) {
        Some(days) => (days, true),
        None => (root, false),
    })
}

fn set_once<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match (slot.is_none(), value) {
        (true, Some(v)) => {
            *slot = Some(v);
            true
        }
        _ => false,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_score(value: &Value) -> Option<Score> {
    match value {
        Value::Number(n) => n.as_f64().map(Score::Number),
        Value::String(s) => Some(Score::Text(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use serde_json::json;

    fn renormalize(schedule: &CanonicalSchedule) -> CanonicalSchedule {
        let value = serde_json::to_value(schedule).unwrap();
        normalize(&value).unwrap()
    }

    #[test]
    fn test_end_to_end_shape() {
        let raw = json!({ "Mo": { "CS 2100": { "time": "9:00am - 10:15am", "prof": "A. Smith" } } });
        let s = normalize(&raw).unwrap();
        let m = s.meeting(Weekday::Monday, "CS 2100").unwrap();
        assert_eq!(m.time_range.as_deref(), Some("9:00am - 10:15am"));
        assert_eq!(m.professor.as_deref(), Some("A. Smith"));
        assert!(m.extra.is_empty());
        assert_eq!(s.meeting_count(), 1);
    }

    #[test]
    fn test_abbreviated_and_full_day_keys_agree() {
        let short = json!({
            "Mo": { "CS 2100": { "time": "9:00am - 10:15am" } },
            "we": { "CS 2100": { "time": "9:00am - 10:15am" } },
            "FR": { "APMA 3080": { "time": "1:00pm - 1:50pm", "room": "Olsson 009" } }
        });
        let full = json!({
            "Monday": { "CS 2100": { "time": "9:00am - 10:15am" } },
            "wednesday": { "CS 2100": { "time": "9:00am - 10:15am" } },
            "Friday": { "APMA 3080": { "time": "1:00pm - 1:50pm", "room": "Olsson 009" } }
        });
        assert_eq!(normalize(&short).unwrap(), normalize(&full).unwrap());
    }

    #[test]
    fn test_unknown_days_dropped() {
        let raw = json!({
            "Sa": { "CS 1110": { "time": "9:00am - 10:00am" } },
            "Tu": { "CS 1110": { "time": "9:00am - 10:00am" } },
            "notes": "generated"
        });
        let s = normalize(&raw).unwrap();
        assert_eq!(s.meeting_count(), 1);
        assert!(s.meeting(Weekday::Tuesday, "CS 1110").is_some());
    }

    #[test]
    fn test_field_aliases_and_passthrough() {
        let raw = json!({ "Th": { "CS 3140": {
            "Instructor": "B. Jones",
            "Time": "2:00pm - 3:15pm",
            "location": "Rice 130",
            "rating": 4.2,
            "avg_gpa": "3.41",
            "difficulty": 3,
            "Section": "001",
            "Enrollment": 120
        } } });
        let s = normalize(&raw).unwrap();
        let m = s.meeting(Weekday::Thursday, "CS 3140").unwrap();
        assert_eq!(m.professor.as_deref(), Some("B. Jones"));
        assert_eq!(m.time_range.as_deref(), Some("2:00pm - 3:15pm"));
        assert_eq!(m.location.as_deref(), Some("Rice 130"));
        assert_eq!(m.rating, Some(Score::Number(4.2)));
        assert_eq!(m.average_gpa, Some(Score::Text("3.41".into())));
        assert_eq!(m.difficulty, Some(Score::Number(3.0)));
        assert_eq!(m.extra.get("Section"), Some(&json!("001")));
        assert_eq!(m.extra.get("Enrollment"), Some(&json!(120)));
    }

    #[test]
    fn test_duplicate_field_first_wins() {
        let raw = json!({ "Mo": { "X": { "prof": "First", "instructor": "Second", "time": null } } });
        let m = normalize(&raw).unwrap().meeting(Weekday::Monday, "X").cloned().unwrap();
        assert_eq!(m.professor.as_deref(), Some("First"));
        assert!(m.time_range.is_none());
        assert!(m.extra.is_empty());
    }

    #[test]
    fn test_envelope() {
        let raw = json!({
            "class_data": { "day_of_the_week": {
                "Monday": { "CS 2100": { "time": "9:00am - 10:15am" } }
            } },
            "message": "Here is your schedule"
        });
        let s = normalize(&raw).unwrap();
        assert!(s.meeting(Weekday::Monday, "CS 2100").is_some());

        let empty = json!({ "class_data": { "day_of_the_week": {} } });
        assert!(normalize(&empty).unwrap().is_empty());
    }

    #[test]
    fn test_not_a_schedule() {
        assert!(matches!(normalize(&json!([1, 2])), Err(ScheduleError::NotASchedule { .. })));
        assert!(matches!(normalize(&json!({})), Err(ScheduleError::NotASchedule { .. })));
        assert!(matches!(
            normalize(&json!({ "message": "sorry" })),
            Err(ScheduleError::NotASchedule { .. })
        ));
        assert!(matches!(
            normalize(&json!({ "class_data": {} })),
            Err(ScheduleError::NotASchedule { .. })
        ));
        assert!(matches!(
            normalize(&json!({ "class_data": { "message": "I could not build a schedule." } })),
            Err(ScheduleError::NotASchedule { .. })
        ));
        assert!(matches!(
            normalize(&json!({ "class_data": { "Monday": { "X": { "time": "9am - 10am" } } } })),
            Err(ScheduleError::NotASchedule { .. })
        ));
    }

    #[test]
    fn test_unknown_null_field_kept() {
        let raw = json!({ "Mo": { "X": { "time": "9am - 10am", "Notes": null, "prof": null } } });
        let s = normalize(&raw).unwrap();
        let m = s.meeting(Weekday::Monday, "X").unwrap();
        assert_eq!(m.extra.get("Notes"), Some(&Value::Null));
        assert!(m.professor.is_none());
        assert!(!m.extra.contains_key("prof"));
        assert_eq!(renormalize(&s), s);
    }

    #[test]
    fn test_malformed_records_are_dropped() {
        let raw = json!({
            "Mo": "not a map",
            "Tu": { "CS 2100": "9am", "CS 2150": { "time": "TBD" } }
        });
        let s = normalize(&raw).unwrap();
        assert_eq!(s.meeting_count(), 1);
        // Unparseable times stay in the canonical form.
        assert_eq!(
            s.meeting(Weekday::Tuesday, "CS 2150").unwrap().time_range.as_deref(),
            Some("TBD")
        );
    }

    #[test]
    fn test_merged_day_spellings_first_wins() {
        let raw = json!({
            "Mo": { "CS 2100": { "time": "9:00am - 10:15am" } },
            "Monday": { "CS 2100": { "time": "3:00pm - 4:15pm" }, "CS 2120": { "time": "11:00am - 11:50am" } }
        });
        let s = normalize(&raw).unwrap();
        let monday = s.day(Weekday::Monday);
        assert_eq!(monday.len(), 2);
        assert_eq!(monday.get("CS 2100").unwrap().time_range.as_deref(), Some("9:00am - 10:15am"));
    }

    #[test]
    fn test_idempotent() {
        let raw = json!({ "Mo": { "CS 2100": {
            "time": "9:00am - 10:15am", "prof": "A. Smith", "rating": "4.5", "Seats": 30
        } } });
        let once = normalize(&raw).unwrap();
        assert_eq!(renormalize(&once), once);
    }

    #[test]
    fn test_idempotent_random_payloads() {
        let day_keys = ["Mo", "tu", "Wednesday", "TH", "fri", "Sa", "junk"];
        let field_keys = [
            "time", "Prof", "instructor", "room", "gpa", "rating", "Notes", "Remarks", "difficulty",
        ];
        let values = [
            json!("9:00am - 10:15am"),
            json!("TBD"),
            json!(4.5),
            json!(3),
            json!(null),
            json!(true),
            json!({ "nested": 1 }),
        ];

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let mut payload = Map::new();
            for _ in 0..rng.random_range(1..5) {
                let mut classes = Map::new();
                for c in 0..rng.random_range(0..4) {
                    let mut record = Map::new();
                    for _ in 0..rng.random_range(0..5) {
                        let key = field_keys[rng.random_range(0..field_keys.len())];
                        let value = values[rng.random_range(0..values.len())].clone();
                        record.insert(key.to_string(), value);
                    }
                    classes.insert(format!("CLS {c}"), Value::Object(record));
                }
                let day = day_keys[rng.random_range(0..day_keys.len())];
                payload.insert(day.to_string(), Value::Object(classes));
            }

            let raw = Value::Object(payload);
            if let Ok(once) = normalize(&raw) {
                assert_eq!(renormalize(&once), once, "payload: {raw}");
            }
        }
    }

    #[test]
    fn test_canonical_marker_with_bad_shape_falls_back() {
        let raw = json!({ "classesByDay": { "Mo": { "X": { "time": "9am - 10am" } } } });
        let s = normalize(&raw).unwrap();
        assert_eq!(
            s.meeting(Weekday::Monday, "X").unwrap().time_range.as_deref(),
            Some("9am - 10am")
        );
    }

    #[test]
    fn test_custom_aliases() {
        let n = Normalizer::new()
            .with_day_alias("M", Weekday::Monday)
            .with_field_alias("lecturer", CanonicalField::Professor);
        let raw = json!({ "M": { "X": { "Lecturer": "C. Lee" } } });
        let s = n.normalize(&raw).unwrap();
        assert_eq!(s.meeting(Weekday::Monday, "X").unwrap().professor.as_deref(), Some("C. Lee"));

        // Built-in spellings still resolve alongside the added ones.
        let default = Normalizer::new();
        assert!(default.normalize(&json!({ "M": {} })).is_err());
        let both = json!({ "M": { "A": { "prof": "D. Park" } }, "Tu": { "B": { "lecturer": "E. Wu" } } });
        let s = n.normalize(&both).unwrap();
        assert_eq!(s.meeting(Weekday::Monday, "A").unwrap().professor.as_deref(), Some("D. Park"));
        assert_eq!(s.meeting(Weekday::Tuesday, "B").unwrap().professor.as_deref(), Some("E. Wu"));
    }
}
