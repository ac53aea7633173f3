//! # schedule-engine
//!
//! Conflict-free weekly class schedules from a course catalog.
//!
//! Given the offerings of the courses a student wants and the hours they
//! cannot attend, the engine tries every combination of one offering per
//! course, keeps those whose meetings never overlap each other or the
//! blocked hours, and ranks the rest.
//!
//! ## Modules
//!
//! - [`week`]: The canonical reference week and registrar day letters
//! - [`meeting`]: Minute-granularity meeting intervals and their text form
//! - [`offering`]: Course offering records
//! - [`timeset`]: Occupancy set with overlap-on-insert
//! - [`deadzone`]: Blocked-time baseline
//! - [`validator`]: Conflict check for one candidate
//! - [`enumerator`]: Cartesian product over course groups, filtering, ranking
//! - [`error`]: Error types

pub mod deadzone;
pub mod enumerator;
pub mod error;
pub mod meeting;
pub mod offering;
pub mod timeset;
pub mod validator;
pub mod week;

pub use deadzone::{DeadZones, CLASS_DAYS};
pub use enumerator::{
    group_contiguous, rank, Candidates, CourseGroup, Enumeration, Enumerator, Schedule,
    SearchStats,
};
pub use error::ScheduleError;
pub use meeting::{parse_meeting_times, MeetingInterval};
pub use offering::CourseOffering;
pub use timeset::WeekTimeSet;
pub use validator::{find_conflict, is_valid, Conflict};
