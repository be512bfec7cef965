//! Time-range parsing.
//!
//! Converts producer time strings such as `"9:00am - 10:15am"` into
//! [`TimeRange`] values (minutes since midnight).
//!
//! # Accepted Forms
//!
//! A range is two clock tokens separated by a hyphen with optional
//! whitespace. Each token is an hour (1-12), optional two-digit minutes,
//! and exactly one AM/PM marker, which may follow the hour or the minutes:
//!
//! | Token | Minutes |
//! |-------|---------|
//! | `9:00am`, `9:00 AM` | 540 |
//! | `9am`, `9 AM` | 540 |
//! | `9am:30` | 570 |
//! | `12:00am` | 0 |
//! | `12:00pm` | 720 |
//!
//! Grid slot labels (`"7 AM"`, `"2 PM"`) are just clock tokens without
//! minutes, so [`parse_slot_label`] shares the same grammar.

use crate::models::TimeRange;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static RANGE_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*-\s*").expect("valid delimiter pattern"));

static CLOCK_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2})\s*(am|pm)?\s*(?::\s*(\d{2}))?\s*(am|pm)?\s*$")
        .expect("valid clock pattern")
});

/// Reasons a time string could not be turned into a range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text is not two tokens joined by a hyphen.
    #[error("expected '<start> - <end>', got '{text}'")]
    MissingDelimiter { text: String },
    /// The token is not an hour[:minute] value.
    #[error("cannot read a clock time from '{token}'")]
    InvalidTime { token: String },
    /// Neither AM nor PM was given.
    #[error("missing AM/PM marker in '{token}'")]
    MissingMarker { token: String },
    /// A marker was given after both the hour and the minutes.
    #[error("more than one AM/PM marker in '{token}'")]
    AmbiguousMarker { token: String },
    /// Hour outside 1-12.
    #[error("hour {hour} out of range in '{token}'")]
    HourOutOfRange { token: String, hour: u32 },
    /// Minute outside 0-59.
    #[error("minute {minute} out of range in '{token}'")]
    MinuteOutOfRange { token: String, minute: u32 },
    /// Start is not strictly before end.
    #[error("range is empty or reversed: start {start} >= end {end} (minutes)")]
    EmptyRange { start: u32, end: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    fn from_marker(marker: &str) -> Self {
        if marker.eq_ignore_ascii_case("pm") {
            Meridiem::Pm
        } else {
            Meridiem::Am
        }
    }
}

/// Parses a `"<start> - <end>"` range.
///
/// # Examples
///
/// ```
/// use u_timetable::time::parse_range;
///
/// let r = parse_range("9:00am - 10:15am").unwrap();
/// assert_eq!((r.start_minutes, r.end_minutes), (540, 615));
///
/// assert!(parse_range("TBD").is_err());
/// ```
pub fn parse_range(text: &str) -> Result<TimeRange, ParseError> {
    let parts: Vec<&str> = RANGE_DELIMITER.split(text.trim()).collect();
    let [start, end] = parts.as_slice() else {
        return Err(ParseError::MissingDelimiter {
            text: text.to_string(),
        });
    };

    let start = parse_clock(start)?;
    let end = parse_clock(end)?;
    if start >= end {
        return Err(ParseError::EmptyRange { start, end });
    }
    Ok(TimeRange::new(start, end))
}

/// Parses one clock token into minutes since midnight.
///
/// Hour normalization: 12 AM is 0, 12 PM stays 12, other PM hours add 12.
pub fn parse_clock(token: &str) -> Result<u32, ParseError> {
    let caps = CLOCK_TOKEN
        .captures(token)
        .ok_or_else(|| ParseError::InvalidTime {
            token: token.to_string(),
        })?;

    let meridiem = match (caps.get(2), caps.get(4)) {
        (Some(_), Some(_)) => {
            return Err(ParseError::AmbiguousMarker {
                token: token.to_string(),
            })
        }
        (Some(m), None) | (None, Some(m)) => Meridiem::from_marker(m.as_str()),
        (None, None) => {
            return Err(ParseError::MissingMarker {
                token: token.to_string(),
            })
        }
    };

    // Both groups are bounded digit runs, so parsing cannot overflow.
    let hour: u32 = caps[1].parse().map_err(|_| ParseError::InvalidTime {
        token: token.to_string(),
    })?;
    let minute: u32 = match caps.get(3) {
        Some(m) => m.as_str().parse().map_err(|_| ParseError::InvalidTime {
            token: token.to_string(),
        })?,
        None => 0,
    };

    if !(1..=12).contains(&hour) {
        return Err(ParseError::HourOutOfRange {
            token: token.to_string(),
            hour,
        });
    }
    if minute > 59 {
        return Err(ParseError::MinuteOutOfRange {
            token: token.to_string(),
            minute,
        });
    }

    let hour24 = match (meridiem, hour) {
        (Meridiem::Am, 12) => 0,
        (Meridiem::Am, h) => h,
        (Meridiem::Pm, 12) => 12,
        (Meridiem::Pm, h) => h + 12,
    };
    Ok(hour24 * 60 + minute)
}

/// Converts a grid label such as `"7 AM"` into minutes since midnight.
pub fn parse_slot_label(label: &str) -> Result<u32, ParseError> {
    parse_clock(label)
}

/// Renders minutes since midnight as a 12-hour clock string (`"9:05am"`).
pub fn format_clock(minutes: u32) -> String {
    let hour24 = (minutes / 60) % 24;
    let minute = minutes % 60;
    let marker = if hour24 < 12 { "am" } else { "pm" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12}:{minute:02}{marker}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn to_24(hour: u32, pm: bool) -> u32 {
        match (pm, hour) {
            (false, 12) => 0,
            (false, h) => h,
            (true, 12) => 12,
            (true, h) => h + 12,
        }
    }

    #[test]
    fn test_basic_range() {
        let r = parse_range("9:00am - 10:15am").unwrap();
        assert_eq!(r, TimeRange::new(540, 615));
    }

    #[test]
    fn test_midnight_and_noon() {
        assert_eq!(parse_clock("12:00am"), Ok(0));
        assert_eq!(parse_clock("12:00pm"), Ok(720));
        assert_eq!(parse_clock("12:30 AM"), Ok(30));
    }

    #[test]
    fn test_marker_position_invariance() {
        let minutes_side = parse_range("9:00am - 10:00am").unwrap();
        let hour_side = parse_range("9am:00 - 10am:00").unwrap();
        let spaced = parse_range("9:00 AM-10:00 AM").unwrap();
        let bare = parse_range("9am - 10am").unwrap();
        assert_eq!(minutes_side, hour_side);
        assert_eq!(minutes_side, spaced);
        assert_eq!(minutes_side, bare);
    }

    #[test]
    fn test_every_hour_and_marker() {
        for h in 1..=12u32 {
            for (m1, pm1) in [("am", false), ("pm", true)] {
                for (m2, pm2) in [("am", false), ("pm", true)] {
                    let next = if h == 12 { 1 } else { h + 1 };
                    let text = format!("{h}:00{m1} - {next}:00{m2}");
                    let start = to_24(h, pm1) * 60;
                    let end = to_24(next, pm2) * 60;
                    let parsed = parse_range(&text);
                    if start < end {
                        assert_eq!(parsed, Ok(TimeRange::new(start, end)), "{text}");
                    } else {
                        assert_eq!(parsed, Err(ParseError::EmptyRange { start, end }), "{text}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_random_tokens_match_format() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let minutes = rng.random_range(0..1440u32);
            let text = format_clock(minutes);
            assert_eq!(parse_clock(&text), Ok(minutes), "{text}");
            assert_eq!(parse_clock(&text.to_uppercase()), Ok(minutes), "{text}");
        }
    }

    #[test]
    fn test_reversed_range() {
        assert_eq!(
            parse_range("2:00pm - 1:00pm"),
            Err(ParseError::EmptyRange { start: 840, end: 780 })
        );
        assert!(matches!(
            parse_range("1:00pm - 1:00pm"),
            Err(ParseError::EmptyRange { .. })
        ));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(parse_range("TBD"), Err(ParseError::MissingDelimiter { .. })));
        assert!(matches!(
            parse_range("9:00 - 10:00"),
            Err(ParseError::MissingMarker { .. })
        ));
        assert!(matches!(
            parse_range("9am:00pm - 10:00am"),
            Err(ParseError::AmbiguousMarker { .. })
        ));
        assert!(matches!(
            parse_range("13:00pm - 2:00pm"),
            Err(ParseError::HourOutOfRange { hour: 13, .. })
        ));
        assert!(matches!(
            parse_range("9:75am - 10:00am"),
            Err(ParseError::MinuteOutOfRange { minute: 75, .. })
        ));
        assert!(matches!(
            parse_range("9:00am - 10:00am - 11:00am"),
            Err(ParseError::MissingDelimiter { .. })
        ));
        assert!(matches!(parse_range("noon - 1pm"), Err(ParseError::InvalidTime { .. })));
    }

    #[test]
    fn test_slot_labels() {
        assert_eq!(parse_slot_label("7 AM"), Ok(420));
        assert_eq!(parse_slot_label("12 PM"), Ok(720));
        assert_eq!(parse_slot_label("2 PM"), Ok(840));
        assert_eq!(parse_slot_label("9 PM"), Ok(1260));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "12:00am");
        assert_eq!(format_clock(545), "9:05am");
        assert_eq!(format_clock(720), "12:00pm");
        assert_eq!(format_clock(1439), "11:59pm");
    }
}
