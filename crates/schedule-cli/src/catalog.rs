//! Catalog file loading.
//!
//! A catalog is a JSON array of offering records. Meeting times may be given
//! already resolved (`times`, start/end timestamps on the reference week) or
//! as registrar text (`meetings`, day code plus time range), or both:
//!
//! ```json
//! [
//!   {
//!     "crn": 10102,
//!     "course": "CSC 3320",
//!     "title": "System-Level Programming",
//!     "remaining_capacity": 4,
//!     "meetings": [{ "days": "TR", "times": "11:00 am-12:15 pm" }]
//!   }
//! ]
//! ```

use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use schedule_engine::{parse_meeting_times, CourseOffering};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    #[serde(flatten)]
    offering: CourseOffering,
    #[serde(default)]
    meetings: Vec<RawMeeting>,
}

#[derive(Debug, Deserialize)]
struct RawMeeting {
    days: String,
    times: String,
}

/// Read a catalog from `path`, or from stdin when `path` is `-`.
pub fn load(path: &Path) -> Result<Vec<CourseOffering>> {
    let text = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read catalog from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?
    };
    parse(&text).with_context(|| format!("invalid catalog {}", path.display()))
}

/// Parse catalog JSON and resolve every registrar meeting row.
pub fn parse(text: &str) -> Result<Vec<CourseOffering>> {
    let records: Vec<CatalogRecord> = serde_json::from_str(text)?;
    let mut offerings = Vec::with_capacity(records.len());
    for record in records {
        let mut offering = record.offering;
        for meeting in &record.meetings {
            let slots = parse_meeting_times(&meeting.days, &meeting.times).with_context(|| {
                format!(
                    "CRN {}: bad meeting '{} {}'",
                    offering.crn, meeting.days, meeting.times
                )
            })?;
            offering.times.extend(slots);
        }
        offerings.push(offering);
    }
    check_clustered(&offerings);
    debug!(offerings = offerings.len(), "Loaded catalog");
    Ok(offerings)
}

/// Sections of one course are expected to sit next to each other; a code
/// that comes back later is searched as a separate group.
fn check_clustered(offerings: &[CourseOffering]) {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut previous: Option<&str> = None;
    for offering in offerings {
        let course = offering.course.as_str();
        if previous != Some(course) && !seen.insert(course) {
            warn!(
                course,
                crn = offering.crn,
                "Course sections are not contiguous in the catalog"
            );
        }
        previous = Some(course);
    }
}
