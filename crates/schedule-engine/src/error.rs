//! Error types for schedule-engine operations.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid range: end {end} is not after start {start}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Range {start} to {end} would stretch the set past {limit} minutes")]
    SpanTooWide {
        start: NaiveDateTime,
        end: NaiveDateTime,
        limit: usize,
    },

    #[error("Unknown weekday code: {0}")]
    UnknownWeekday(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
