//! Hourly slot sequence shared by every grid.

use serde::Serialize;
use std::sync::LazyLock;

/// First slot hour (7 AM).
pub const FIRST_HOUR: u32 = 7;
/// Last slot hour (9 PM), inclusive.
pub const LAST_HOUR: u32 = 21;
/// Number of hourly slots.
pub const SLOT_COUNT: usize = (LAST_HOUR - FIRST_HOUR + 1) as usize;

/// One hourly row of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    /// Hour of day (0..24).
    pub hour: u32,
    /// Display label, e.g. `"7 AM"`, `"12 PM"`.
    pub label: String,
}

impl TimeSlot {
    fn for_hour(hour: u32) -> Self {
        let marker = if hour < 12 { "AM" } else { "PM" };
        let display = if hour <= 12 { hour } else { hour - 12 };
        Self {
            hour,
            label: format!("{display} {marker}"),
        }
    }

    /// Slot start in minutes since midnight.
    #[inline]
    pub fn start_minutes(&self) -> u32 {
        self.hour * 60
    }
}

static SLOTS: LazyLock<Vec<TimeSlot>> =
    LazyLock::new(|| (FIRST_HOUR..=LAST_HOUR).map(TimeSlot::for_hour).collect());

/// The fifteen slots, 7 AM through 9 PM.
pub fn time_slots() -> &'static [TimeSlot] {
    &SLOTS
}

/// Slot index for an hour of day, if the grid covers it.
pub fn slot_for_hour(hour: u32) -> Option<usize> {
    (FIRST_HOUR..=LAST_HOUR)
        .contains(&hour)
        .then(|| (hour - FIRST_HOUR) as usize)
}
