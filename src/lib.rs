//! Weekly class timetable engine.
//!
//! Turns a class schedule from an upstream producer, whose day spellings,
//! field names and time formats are outside our control, into a canonical
//! schedule and a render-ready weekly grid.
//!
//! # Modules
//!
//! - **`normalize`**: Payload → `CanonicalSchedule` (day/field alias resolution)
//! - **`time`**: `"9:00am - 10:15am"` → minutes since midnight
//! - **`grid`**: `CanonicalSchedule` → 5 × 15 hourly grid plus layout blocks
//! - **`color`**: Deterministic per-class display colors
//! - **`validation`**: Diagnostics for data the grid had to skip
//! - **`catalog`**: Course catalog search with explicit readiness
//!
//! # Pipeline
//!
//! ```text
//! serde_json::Value ──normalize──▶ CanonicalSchedule ──build_grid──▶ Grid
//!                                         │
//!                                   (time::parse_range per meeting)
//! ```
//!
//! Every stage is a pure, synchronous function. A new payload yields a new
//! schedule and grid; nothing is updated in place.

pub mod catalog;
pub mod color;
pub mod error;
pub mod grid;
pub mod models;
pub mod normalize;
pub mod time;
pub mod validation;

pub use error::{Result, ScheduleError};

use crate::grid::{build_grid, Grid};
use crate::models::CanonicalSchedule;
use serde_json::Value;

/// Runs the whole pipeline on a raw payload.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use u_timetable::map_payload;
/// use u_timetable::models::Weekday;
///
/// let raw = json!({ "Mo": { "CS 2100": { "time": "9:00am - 10:15am", "prof": "A. Smith" } } });
/// let (schedule, grid) = map_payload(&raw).unwrap();
///
/// assert_eq!(schedule.meeting_count(), 1);
/// let block = grid.cell_at(Weekday::Monday, "9 AM").unwrap();
/// assert_eq!(block.placement.duration_units, 2.5);
/// ```
pub fn map_payload(raw: &Value) -> Result<(CanonicalSchedule, Grid)> {
    let schedule = normalize::normalize(raw)?;
    let grid = build_grid(&schedule);
    Ok((schedule, grid))
}
