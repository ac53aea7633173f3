//! The canonical reference week.
//!
//! Meeting times are recurring weekly slots, not calendar events. Every slot
//! is anchored on one fixed week so that two slots can be compared as plain
//! timestamps. The week starts on Monday 2018-01-01; the date itself carries
//! no meaning beyond being a Monday.
//!
//! Registrar day codes use one letter per weekday:
//!
//! | Letter | Day       |
//! |--------|-----------|
//! | `M`    | Monday    |
//! | `T`    | Tuesday   |
//! | `W`    | Wednesday |
//! | `R`    | Thursday  |
//! | `F`    | Friday    |
//! | `S`    | Saturday  |

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::error::{Result, ScheduleError};

/// Number of minutes in one week.
pub const MINUTES_PER_WEEK: usize = 7 * 24 * 60;

/// Day code used by registrars for sections without a fixed meeting time.
pub const TBA: &str = "TBA";

const DAY_LETTERS: [(char, Weekday); 6] = [
    ('M', Weekday::Mon),
    ('T', Weekday::Tue),
    ('W', Weekday::Wed),
    ('R', Weekday::Thu),
    ('F', Weekday::Fri),
    ('S', Weekday::Sat),
];

/// The Monday that starts the reference week.
pub fn reference_monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// The reference-week date for `weekday`.
pub fn date_of(weekday: Weekday) -> NaiveDate {
    reference_monday() + chrono::Duration::days(weekday.num_days_from_monday() as i64)
}

/// Anchor a wall-clock time on `weekday` of the reference week.
pub fn at(weekday: Weekday, time: NaiveTime) -> NaiveDateTime {
    date_of(weekday).and_time(time)
}

/// The weekday of a timestamp that lies in the reference week, if it does.
pub fn weekday_in_week(timestamp: NaiveDateTime) -> Option<Weekday> {
    let offset = (timestamp.date() - reference_monday()).num_days();
    (0..7).contains(&offset).then(|| timestamp.weekday())
}

/// Map a single registrar day letter to its weekday.
pub fn weekday_from_letter(letter: char) -> Result<Weekday> {
    let upper = letter.to_ascii_uppercase();
    DAY_LETTERS
        .iter()
        .find(|(l, _)| *l == upper)
        .map(|(_, day)| *day)
        .ok_or_else(|| ScheduleError::UnknownWeekday(letter.to_string()))
}

/// The registrar letter for a weekday. Sunday has none.
pub fn letter_for(weekday: Weekday) -> Option<char> {
    DAY_LETTERS
        .iter()
        .find(|(_, day)| *day == weekday)
        .map(|(l, _)| *l)
}

/// Expand a day code such as `"MWF"` or `"TR"` into weekdays, in the order
/// written. `"TBA"` and blank codes expand to nothing.
pub fn parse_day_code(code: &str) -> Result<Vec<Weekday>> {
    let code = code.trim();
    if code.is_empty() || code.eq_ignore_ascii_case(TBA) {
        return Ok(Vec::new());
    }
    code.chars()
        .filter(|c| !c.is_whitespace())
        .map(weekday_from_letter)
        .collect()
}
