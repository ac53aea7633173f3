//! Course offerings as delivered by the catalog.

use serde::{Deserialize, Serialize};

use crate::meeting::MeetingInterval;

/// One schedulable section of a course.
///
/// Offerings are built once by the catalog loader and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOffering {
    /// Registrar marks the section as closed.
    #[serde(default)]
    pub closed: bool,
    /// Course reference number, unique per section.
    pub crn: u32,
    /// Course code, e.g. `"CSC 4350"`.
    pub course: String,
    #[serde(default)]
    pub title: String,
    /// Weekly meeting slots on the reference week.
    #[serde(default)]
    pub times: Vec<MeetingInterval>,
    #[serde(default)]
    pub campus: String,
    #[serde(default)]
    pub capacity: i32,
    /// Open seats. Over-enrolled sections report negative values.
    #[serde(default)]
    pub remaining_capacity: i32,
    #[serde(default)]
    pub xlist_capacity: i32,
    #[serde(default)]
    pub xlist_remaining_capacity: i32,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub location: String,
}

impl CourseOffering {
    /// Minimal offering with only the fields the search depends on.
    pub fn new(crn: u32, course: impl Into<String>, times: Vec<MeetingInterval>) -> Self {
        Self {
            closed: false,
            crn,
            course: course.into(),
            title: String::new(),
            times,
            campus: String::new(),
            capacity: 0,
            remaining_capacity: 0,
            xlist_capacity: 0,
            xlist_remaining_capacity: 0,
            comments: String::new(),
            instructor: String::new(),
            location: String::new(),
        }
    }

    /// Set the seat counts.
    pub fn with_seats(mut self, capacity: i32, remaining: i32) -> Self {
        self.capacity = capacity;
        self.remaining_capacity = remaining;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Whether the section currently has at least one open seat.
    pub fn has_open_seats(&self) -> bool {
        self.remaining_capacity > 0
    }
}
