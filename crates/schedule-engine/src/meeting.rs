//! Meeting intervals and their resolution from registrar text.
//!
//! A [`MeetingInterval`] is one weekly slot of an offering, anchored on the
//! reference week (see [`crate::week`]). Both endpoints are truncated to
//! whole minutes on construction and the end must come strictly after the
//! start.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::week;

/// Drop the seconds and sub-second components of a timestamp.
pub fn truncate_to_minute(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(timestamp)
}

/// One recurring weekly meeting of an offering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct MeetingInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct RawInterval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<RawInterval> for MeetingInterval {
    type Error = ScheduleError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        MeetingInterval::new(raw.start, raw.end)
    }
}

impl MeetingInterval {
    /// Build an interval from two timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidRange`] if `end` is not strictly after
    /// `start` once both are truncated to the minute.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        let start = truncate_to_minute(start);
        let end = truncate_to_minute(end);
        if end <= start {
            return Err(ScheduleError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build an interval on `weekday` of the reference week.
    pub fn on(weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Result<Self> {
        Self::new(week::at(weekday, start), week::at(weekday, end))
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Length of the interval in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// The reference-week day the interval starts on, if it is anchored there.
    pub fn weekday(&self) -> Option<Weekday> {
        week::weekday_in_week(self.start)
    }
}

impl fmt::Display for MeetingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = match self.weekday().and_then(week::letter_for) {
            Some(letter) => letter.to_string(),
            None => self.start.format("%Y-%m-%d").to_string(),
        };
        write!(
            f,
            "{} {}-{}",
            day,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Resolve a registrar day code and time range into reference-week intervals.
///
/// `days` is a code like `"MWF"`; `times` is a range like
/// `"10:00 am-10:50 am"`. Either field being `"TBA"` (or blank) yields no
/// intervals.
///
/// # Errors
///
/// Returns [`ScheduleError::UnknownWeekday`] for an unrecognised day letter,
/// [`ScheduleError::InvalidTime`] if the range cannot be parsed, or
/// [`ScheduleError::InvalidRange`] if the range ends before it starts.
///
/// # Examples
///
/// ```
/// use schedule_engine::meeting::parse_meeting_times;
///
/// let slots = parse_meeting_times("TR", "09:30 am-10:45 am").unwrap();
/// assert_eq!(slots.len(), 2);
/// assert_eq!(slots[0].duration_minutes(), 75);
/// ```
pub fn parse_meeting_times(days: &str, times: &str) -> Result<Vec<MeetingInterval>> {
    let times = times.trim();
    if times.is_empty() || times.eq_ignore_ascii_case(week::TBA) {
        return Ok(Vec::new());
    }
    let weekdays = week::parse_day_code(days)?;
    if weekdays.is_empty() {
        return Ok(Vec::new());
    }

    let (start, end) = parse_time_range(times)?;
    weekdays
        .into_iter()
        .map(|day| MeetingInterval::on(day, start, end))
        .collect()
}

/// Parse `"10:00 am-10:50 am"` into its two wall-clock times.
pub fn parse_time_range(s: &str) -> Result<(NaiveTime, NaiveTime)> {
    let (start, end) = s
        .split_once('-')
        .ok_or_else(|| ScheduleError::InvalidTime(format!("expected 'start-end': '{s}'")))?;
    Ok((parse_clock_time(start)?, parse_clock_time(end)?))
}

/// Parse a single clock time: `"2:30 pm"`, `"2:30pm"`, or `"14:30"`.
pub fn parse_clock_time(s: &str) -> Result<NaiveTime> {
    let normalized = s.trim().to_uppercase();
    ["%I:%M %p", "%I:%M%p", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&normalized, fmt).ok())
        .ok_or_else(|| ScheduleError::InvalidTime(format!("'{}'", s.trim())))
}
