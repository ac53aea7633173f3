//! Dead zones: time that is blocked before any offering is considered.
//!
//! [`DeadZones`] collects blocked intervals on the reference week and seeds a
//! baseline [`WeekTimeSet`] from them. Every candidate schedule is checked
//! against a clone of that baseline.

use chrono::{NaiveTime, Timelike, Weekday};

use crate::error::{Result, ScheduleError};
use crate::meeting::{parse_meeting_times, MeetingInterval};
use crate::timeset::WeekTimeSet;

/// Days on which registrars schedule classes.
pub const CLASS_DAYS: [Weekday; 6] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Builder for the blocked-time baseline.
#[derive(Debug, Clone, Default)]
pub struct DeadZones {
    intervals: Vec<MeetingInterval>,
}

impl DeadZones {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block one interval.
    pub fn block(mut self, interval: MeetingInterval) -> Self {
        self.intervals.push(interval);
        self
    }

    /// Block everything strictly before `time` on each of `days`.
    ///
    /// Ranges are inclusive of their end minute, so the blocked range stops
    /// one minute short of `time` and a class starting exactly at `time`
    /// stays allowed.
    ///
    /// A blocked range needs at least two minutes, since its end must come
    /// after its start. `time` at or before 00:01 therefore blocks nothing,
    /// and minute 00:00 stays open for `00:01`.
    pub fn block_before(mut self, days: &[Weekday], time: NaiveTime) -> Result<Self> {
        let Some(last_blocked) = minute_before(time).filter(|t| *t > midnight()) else {
            return Ok(self);
        };
        for day in days {
            self.intervals
                .push(MeetingInterval::on(*day, midnight(), last_blocked)?);
        }
        Ok(self)
    }

    /// Block everything strictly after `time` on each of `days`, up to 23:59.
    ///
    /// As with [`DeadZones::block_before`], a lone minute cannot be blocked:
    /// `time` at or after 23:58 blocks nothing, so 23:59 stays open for
    /// `23:58`.
    pub fn block_after(mut self, days: &[Weekday], time: NaiveTime) -> Result<Self> {
        let time = truncate(time);
        let first_blocked = time + chrono::Duration::minutes(1);
        // Adding a minute to 23:59 wraps to midnight.
        if first_blocked <= time || first_blocked >= last_minute() {
            return Ok(self);
        }
        for day in days {
            self.intervals
                .push(MeetingInterval::on(*day, first_blocked, last_minute())?);
        }
        Ok(self)
    }

    /// Block a registrar-style slot such as `"MWF 12:00 pm-01:00 pm"`.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidTime`] if the text has no day code,
    /// plus any error from [`parse_meeting_times`].
    pub fn block_text(mut self, slot: &str) -> Result<Self> {
        let slot = slot.trim();
        let (days, times) = slot.split_once(char::is_whitespace).ok_or_else(|| {
            ScheduleError::InvalidTime(format!("expected '<DAYS> <start>-<end>': '{slot}'"))
        })?;
        self.intervals.extend(parse_meeting_times(days, times)?);
        Ok(self)
    }

    pub fn intervals(&self) -> &[MeetingInterval] {
        &self.intervals
    }

    /// Seed a baseline set from the blocked intervals.
    ///
    /// Dead zones may overlap one another; only overlaps with offerings
    /// matter, so the insert results are discarded here.
    pub fn build(&self) -> Result<WeekTimeSet> {
        let mut set = WeekTimeSet::new();
        for interval in &self.intervals {
            set.add_interval(interval)?;
        }
        Ok(set)
    }
}

fn midnight() -> NaiveTime {
    NaiveTime::default()
}

fn last_minute() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default()
}

fn truncate(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

fn minute_before(time: NaiveTime) -> Option<NaiveTime> {
    let time = truncate(time);
    (time > midnight()).then(|| time - chrono::Duration::minutes(1))
}
