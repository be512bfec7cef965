//! Calendar-grid mapping.
//!
//! Places canonical meetings onto the fixed weekly grid: five teaching days
//! by fifteen hourly slots (7 AM through 9 PM).
//!
//! # Two Views
//!
//! - **Cells** answer "what is in (day, slot)?". A meeting occupies the single
//!   slot whose hour equals its start hour; minutes are ignored for lookup.
//! - **Blocks** carry layout numbers for every meeting with a valid time, in
//!   30-minute units from the 7:00 AM origin. Callers turn these into pixels.
//!
//! # Collision Policy
//!
//! When two meetings on one day start in the same hour, the first in
//! schedule order keeps the cell and the later one is reported as
//! [`SkipReason::SlotOccupied`]. Both still get a block.

mod slots;

pub use slots::{slot_for_hour, time_slots, TimeSlot, FIRST_HOUR, LAST_HOUR, SLOT_COUNT};

use crate::models::{CanonicalSchedule, ClassMeeting, TimeRange, Weekday};
use crate::time::{parse_slot_label, ParseError};
use log::debug;
use serde::Serialize;

/// Minutes per layout unit.
pub const LAYOUT_UNIT_MINUTES: u32 = 30;

/// Vertical layout of a meeting, in 30-minute units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Units from the 7:00 AM origin to the start. Negative before 7 AM.
    pub offset_units: f64,
    /// Length in units.
    pub duration_units: f64,
}

impl Placement {
    /// Computes the placement of a time range.
    pub fn of(range: &TimeRange) -> Self {
        let origin = (FIRST_HOUR * 60) as f64;
        let unit = LAYOUT_UNIT_MINUTES as f64;
        Self {
            offset_units: (range.start_minutes as f64 - origin) / unit,
            duration_units: range.duration_minutes() as f64 / unit,
        }
    }
}

/// A meeting with a parsed time, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingBlock {
    pub day: Weekday,
    pub name: String,
    pub meeting: ClassMeeting,
    pub range: TimeRange,
    pub placement: Placement,
}

/// One (day, slot) position of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridCell {
    pub day: Weekday,
    /// Index into [`time_slots()`].
    pub slot: usize,
    /// Index into [`Grid::blocks`] of the occupying meeting.
    pub block: Option<usize>,
}

impl GridCell {
    /// Slot descriptor for this cell.
    pub fn time_slot(&self) -> &'static TimeSlot {
        &time_slots()[self.slot]
    }
}

/// Why a meeting has no cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SkipReason {
    /// The meeting has no time field.
    MissingTime,
    /// The time text could not be parsed.
    InvalidTime(String),
    /// Starts before 7 AM or after 9 PM.
    OutsideGrid,
    /// An earlier meeting already starts in the same hour.
    SlotOccupied { occupant: String },
}

impl From<ParseError> for SkipReason {
    fn from(e: ParseError) -> Self {
        SkipReason::InvalidTime(e.to_string())
    }
}

/// A meeting left out of the cell view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedMeeting {
    pub day: Weekday,
    pub name: String,
    pub reason: SkipReason,
}

/// The weekly grid derived from one schedule.
///
/// Built once by [`build_grid`] and never mutated; a new schedule yields a
/// new grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Grid {
    cells: Vec<GridCell>,
    blocks: Vec<MeetingBlock>,
    skipped: Vec<SkippedMeeting>,
}

/// Builds the grid for a schedule.
///
/// # Examples
///
/// ```
/// use u_timetable::grid::build_grid;
/// use u_timetable::models::{CanonicalSchedule, ClassMeeting, Weekday};
///
/// let schedule = CanonicalSchedule::new()
///     .with_class(Weekday::Monday, "CS 2100", ClassMeeting::new("9:00am - 10:15am"));
/// let grid = build_grid(&schedule);
///
/// let block = grid.cell_at(Weekday::Monday, "9 AM").unwrap();
/// assert_eq!(block.name, "CS 2100");
/// assert_eq!(block.placement.offset_units, 4.0);
/// assert_eq!(block.placement.duration_units, 2.5);
/// ```
pub fn build_grid(schedule: &CanonicalSchedule) -> Grid {
    let mut grid = Grid {
        cells: Vec::with_capacity(Weekday::ALL.len() * SLOT_COUNT),
        blocks: Vec::new(),
        skipped: Vec::new(),
    };
    for day in Weekday::ALL {
        for slot in 0..SLOT_COUNT {
            grid.cells.push(GridCell {
                day,
                slot,
                block: None,
            });
        }
    }

    for (day, classes) in schedule.days() {
        for (name, meeting) in classes.iter() {
            let range = match meeting.parsed_time() {
                Some(Ok(range)) => range,
                Some(Err(e)) => {
                    grid.skip(day, name, e.into());
                    continue;
                }
                None => {
                    grid.skip(day, name, SkipReason::MissingTime);
                    continue;
                }
            };

            let block_index = grid.blocks.len();
            grid.blocks.push(MeetingBlock {
                day,
                name: name.to_string(),
                meeting: meeting.clone(),
                range,
                placement: Placement::of(&range),
            });

            let Some(slot) = slot_for_hour(range.start_hour()) else {
                grid.skip(day, name, SkipReason::OutsideGrid);
                continue;
            };
            let cell = &mut grid.cells[Grid::cell_index(day, slot)];
            match cell.block {
                None => cell.block = Some(block_index),
                Some(occupant) => {
                    let occupant = grid.blocks[occupant].name.clone();
                    grid.skip(day, name, SkipReason::SlotOccupied { occupant });
                }
            }
        }
    }

    grid
}

impl Grid {
    #[inline]
    fn cell_index(day: Weekday, slot: usize) -> usize {
        day.index() * SLOT_COUNT + slot
    }

    fn skip(&mut self, day: Weekday, name: &str, reason: SkipReason) {
        debug!("{name} on {day} has no grid cell: {reason:?}");
        self.skipped.push(SkippedMeeting {
            day,
            name: name.to_string(),
            reason,
        });
    }

    /// All cells, day-major (Monday's 15 slots first).
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Every meeting with a valid time, in schedule order.
    pub fn blocks(&self) -> &[MeetingBlock] {
        &self.blocks
    }

    /// Meetings without a cell, with the reason.
    pub fn skipped(&self) -> &[SkippedMeeting] {
        &self.skipped
    }

    /// Cell for a day and slot index.
    pub fn cell(&self, day: Weekday, slot: usize) -> Option<&GridCell> {
        if slot >= SLOT_COUNT {
            return None;
        }
        self.cells.get(Self::cell_index(day, slot))
    }

    /// Meeting occupying a cell.
    pub fn occupant(&self, cell: &GridCell) -> Option<&MeetingBlock> {
        cell.block.and_then(|i| self.blocks.get(i))
    }

    /// Point lookup by slot label (`"9 AM"`, `"2 PM"`).
    ///
    /// Any clock text is accepted; only its hour is used. Labels outside the
    /// grid or that fail to parse return `None`.
    pub fn cell_at(&self, day: Weekday, slot_label: &str) -> Option<&MeetingBlock> {
        let minutes = parse_slot_label(slot_label).ok()?;
        let slot = slot_for_hour(minutes / 60)?;
        let cell = self.cell(day, slot)?;
        self.occupant(cell)
    }

    /// Cells of one slot row across the week, Monday first.
    pub fn row(&self, slot: usize) -> Vec<&GridCell> {
        Weekday::ALL
            .into_iter()
            .filter_map(|day| self.cell(day, slot))
            .collect()
    }

    /// Blocks on one day.
    pub fn blocks_on(&self, day: Weekday) -> impl Iterator<Item = &MeetingBlock> {
        self.blocks.iter().filter(move |b| b.day == day)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.block.is_some()).count()
    }
}
