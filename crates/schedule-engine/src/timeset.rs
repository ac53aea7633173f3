//! Minute-granularity occupancy set for one week.
//!
//! [`WeekTimeSet`] records the union of every range inserted into it as a
//! bit vector: bit *i* is set when minute `epoch + i` is occupied. The epoch
//! is the earliest start seen so far. Inserting a range that begins before
//! the epoch moves the epoch back and shifts the stored bits up by the same
//! number of minutes, so earlier occupancy keeps its meaning.
//!
//! Insertion doubles as the overlap test: [`WeekTimeSet::add_range`] reports
//! whether the new range touched any minute that was already occupied, then
//! merges it in regardless. Inserting the same range twice therefore reports
//! an overlap the second time.
//!
//! Ranges are inclusive of their end minute. A 09:00–09:30 range occupies
//! minutes 09:00 through 09:30, so a section ending at 10:00 conflicts with
//! one starting at 10:00.
//!
//! The set covers at most [`MAX_SPAN_MINUTES`] from its earliest to its
//! latest occupied minute. Slots are anchored on the reference week, so a
//! range that would stretch past that is rejected rather than stored.

use chrono::NaiveDateTime;

use crate::error::{Result, ScheduleError};
use crate::meeting::{truncate_to_minute, MeetingInterval};
use crate::week::MINUTES_PER_WEEK;

const WORD_BITS: usize = u64::BITS as usize;

/// Widest span a set may cover: one week plus a day of slack for dead zones
/// that spill past Saturday.
pub const MAX_SPAN_MINUTES: usize = MINUTES_PER_WEEK + 24 * 60;

/// Union of minute ranges with overlap-on-insert.
#[derive(Debug, Clone, Default)]
pub struct WeekTimeSet {
    epoch: Option<NaiveDateTime>,
    latest: Option<NaiveDateTime>,
    words: Vec<u64>,
}

impl WeekTimeSet {
    /// An empty set with no epoch.
    pub fn new() -> Self {
        Self {
            epoch: None,
            latest: None,
            words: Vec::with_capacity(MAX_SPAN_MINUTES.div_ceil(WORD_BITS)),
        }
    }

    /// The minute that bit 0 stands for, or `None` before the first insert.
    pub fn epoch(&self) -> Option<NaiveDateTime> {
        self.epoch
    }

    pub fn is_empty(&self) -> bool {
        self.epoch.is_none()
    }

    /// Number of occupied minutes.
    pub fn occupied_minutes(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Insert the range `start..=end` and report whether it overlapped
    /// anything already in the set.
    ///
    /// Both endpoints are truncated to the minute first. The range is merged
    /// into the set whether or not it overlapped.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidRange`] if `end` is not strictly after
    /// `start` after truncation, and [`ScheduleError::SpanTooWide`] if
    /// keeping the range would make the set cover more than
    /// [`MAX_SPAN_MINUTES`]. In both cases the set is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use schedule_engine::WeekTimeSet;
    ///
    /// let day = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
    /// let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();
    ///
    /// let mut set = WeekTimeSet::new();
    /// assert!(!set.add_range(at(9, 0), at(9, 30)).unwrap());
    /// assert!(set.add_range(at(9, 15), at(9, 45)).unwrap());
    /// assert!(set.contains(at(9, 40)));
    /// ```
    pub fn add_range(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> Result<bool> {
        let start = truncate_to_minute(start);
        let end = truncate_to_minute(end);
        if end <= start {
            return Err(ScheduleError::InvalidRange { start, end });
        }

        let lo = self.epoch.map_or(start, |epoch| epoch.min(start));
        let hi = self.latest.map_or(end, |latest| latest.max(end));
        if minutes_between(lo, hi) >= MAX_SPAN_MINUTES {
            return Err(ScheduleError::SpanTooWide {
                start,
                end,
                limit: MAX_SPAN_MINUTES,
            });
        }
        self.latest = Some(hi);

        match self.epoch {
            None => self.epoch = Some(start),
            Some(epoch) if start < epoch => {
                self.shift_up(minutes_between(start, epoch));
                self.epoch = Some(start);
            }
            Some(_) => {}
        }

        let first = self.index_of(start);
        let last = self.index_of(end);
        let overlap = self.span_intersects(first, last);
        self.set_span(first, last);
        Ok(overlap)
    }

    /// Insert a meeting interval. See [`WeekTimeSet::add_range`].
    pub fn add_interval(&mut self, interval: &MeetingInterval) -> Result<bool> {
        self.add_range(interval.start(), interval.end())
    }

    /// Whether the minute containing `timestamp` is occupied.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        let Some(epoch) = self.epoch else {
            return false;
        };
        let timestamp = truncate_to_minute(timestamp);
        if timestamp < epoch {
            return false;
        }
        let idx = minutes_between(epoch, timestamp);
        self.words
            .get(idx / WORD_BITS)
            .is_some_and(|w| (w >> (idx % WORD_BITS)) & 1 == 1)
    }

    fn index_of(&self, timestamp: NaiveDateTime) -> usize {
        match self.epoch {
            Some(epoch) => minutes_between(epoch, timestamp),
            None => 0,
        }
    }

    /// Move every stored bit `delta` positions up.
    fn shift_up(&mut self, delta: usize) {
        if delta == 0 || self.words.is_empty() {
            return;
        }
        let word_shift = delta / WORD_BITS;
        let bit_shift = delta % WORD_BITS;

        if bit_shift != 0 {
            let mut carry = 0u64;
            for word in self.words.iter_mut() {
                let spill = *word >> (WORD_BITS - bit_shift);
                *word = (*word << bit_shift) | carry;
                carry = spill;
            }
            if carry != 0 {
                self.words.push(carry);
            }
        }
        if word_shift != 0 {
            self.words
                .splice(0..0, std::iter::repeat(0).take(word_shift));
        }
    }

    fn span_intersects(&self, first: usize, last: usize) -> bool {
        span_masks(first, last).any(|(word, mask)| {
            self.words
                .get(word)
                .is_some_and(|stored| stored & mask != 0)
        })
    }

    fn set_span(&mut self, first: usize, last: usize) {
        let needed = last / WORD_BITS + 1;
        if self.words.len() < needed {
            self.words.resize(needed, 0);
        }
        for (word, mask) in span_masks(first, last) {
            self.words[word] |= mask;
        }
    }
}

/// Whole minutes from `from` to `to`; callers guarantee `from <= to`.
fn minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> usize {
    (to - from).num_minutes().max(0) as usize
}

/// Per-word masks covering bit positions `first..=last`.
fn span_masks(first: usize, last: usize) -> impl Iterator<Item = (usize, u64)> {
    let first_word = first / WORD_BITS;
    let last_word = last / WORD_BITS;
    (first_word..=last_word).map(move |word| {
        let lo = if word == first_word { first % WORD_BITS } else { 0 };
        let hi = if word == last_word {
            last % WORD_BITS
        } else {
            WORD_BITS - 1
        };
        let mask = (u64::MAX >> (WORD_BITS - 1 - hi)) & (u64::MAX << lo);
        (word, mask)
    })
}
