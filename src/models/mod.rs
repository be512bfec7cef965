//! Timetable domain models.
//!
//! Provides the canonical data types produced by normalization and
//! consumed by the grid mapper.
//!
//! # Domain Mappings
//!
//! | u-timetable | Producer payload | Display |
//! |-------------|------------------|---------|
//! | Weekday | `"Mo"`, `"monday"`, ... | Column |
//! | ClassMeeting | Class record | Class block |
//! | TimeRange | `"9:00am - 10:15am"` | Block position and height |
//! | CanonicalSchedule | Whole payload | Week view |

mod meeting;
mod schedule;
mod time_range;
mod weekday;

pub use meeting::{ClassMeeting, Score};
pub use schedule::{CanonicalSchedule, DaySchedule, CANONICAL_MARKER};
pub use time_range::TimeRange;
pub use weekday::Weekday;
