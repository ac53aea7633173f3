//! Candidate enumeration and ranking.
//!
//! The catalog is filtered to the requested course codes and split into
//! groups, one per contiguous run of the same code. Every combination that
//! takes one offering from each group is a candidate. Candidates are produced
//! lazily by [`Candidates`], validated against the dead-zone baseline, and
//! the survivors are ranked.
//!
//! # Ranking
//!
//! Survivors are ordered by the number of selected offerings that still have
//! open seats, fewest first. Ties fall back to the selected course codes and
//! then the selected CRNs, both compared lexicographically, so the output
//! order never depends on how the product happened to be walked.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::meeting::MeetingInterval;
use crate::offering::CourseOffering;
use crate::timeset::WeekTimeSet;
use crate::validator::is_valid;

/// One full candidate: exactly one offering per requested course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schedule<'a> {
    offerings: Vec<&'a CourseOffering>,
}

impl<'a> Schedule<'a> {
    pub fn new(offerings: Vec<&'a CourseOffering>) -> Self {
        Self { offerings }
    }

    pub fn offerings(&self) -> &[&'a CourseOffering] {
        &self.offerings
    }

    /// Ranking key: how many selected sections have open seats.
    pub fn open_sections(&self) -> usize {
        self.offerings.iter().filter(|o| o.has_open_seats()).count()
    }

    pub fn course_codes(&self) -> Vec<&'a str> {
        self.offerings.iter().map(|o| o.course.as_str()).collect()
    }

    pub fn crns(&self) -> Vec<u32> {
        self.offerings.iter().map(|o| o.crn).collect()
    }

    /// Every meeting of the schedule in chronological order.
    pub fn meetings(&self) -> Vec<(&'a CourseOffering, MeetingInterval)> {
        let mut meetings: Vec<_> = self
            .offerings
            .iter()
            .flat_map(|&o| o.times.iter().map(move |t| (o, *t)))
            .collect();
        meetings.sort_by_key(|(o, t)| (*t, o.crn));
        meetings
    }
}

/// Offerings of one course code, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseGroup<'a> {
    pub course: &'a str,
    pub offerings: Vec<&'a CourseOffering>,
}

/// Split offerings into runs of equal course code.
///
/// Only adjacent offerings are merged: a code that shows up again after a
/// different one starts a new group.
pub fn group_contiguous<'a, I>(offerings: I) -> Vec<CourseGroup<'a>>
where
    I: IntoIterator<Item = &'a CourseOffering>,
{
    let mut groups: Vec<CourseGroup<'a>> = Vec::new();
    for offering in offerings {
        if let Some(group) = groups
            .last_mut()
            .filter(|g| g.course == offering.course)
        {
            group.offerings.push(offering);
            continue;
        }
        groups.push(CourseGroup {
            course: &offering.course,
            offerings: vec![offering],
        });
    }
    groups
}

/// Sort schedules into presentation order. See the module docs.
pub fn rank(schedules: &mut [Schedule<'_>]) {
    schedules.sort_by_cached_key(|s| (s.open_sections(), s.course_codes(), s.crns()));
}

/// Lazy cartesian product over course groups.
///
/// The last group varies fastest.
#[derive(Debug, Clone)]
pub struct Candidates<'e, 'a> {
    groups: &'e [CourseGroup<'a>],
    indices: Vec<usize>,
    exhausted: bool,
}

impl<'e, 'a> Candidates<'e, 'a> {
    fn new(groups: &'e [CourseGroup<'a>], exhausted: bool) -> Self {
        let exhausted =
            exhausted || groups.is_empty() || groups.iter().any(|g| g.offerings.is_empty());
        Self {
            groups,
            indices: vec![0; groups.len()],
            exhausted,
        }
    }

    fn advance(&mut self) {
        for (pos, group) in self.groups.iter().enumerate().rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < group.offerings.len() {
                return;
            }
            self.indices[pos] = 0;
        }
        self.exhausted = true;
    }
}

impl<'a> Iterator for Candidates<'_, 'a> {
    type Item = Vec<&'a CourseOffering>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let candidate = self
            .groups
            .iter()
            .zip(&self.indices)
            .map(|(group, &i)| group.offerings[i])
            .collect();
        self.advance();
        Some(candidate)
    }
}

/// Counters from one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Candidates run through the validator.
    pub evaluated: usize,
    /// Candidates the validator turned down.
    pub rejected: usize,
}

/// Ranked result of a full search.
#[derive(Debug, Clone, Serialize)]
pub struct Enumeration<'a> {
    pub schedules: Vec<Schedule<'a>>,
    pub stats: SearchStats,
}

/// Search driver over one catalog snapshot.
///
/// The enumerator holds only the grouping; every call to
/// [`Enumerator::candidates`] or [`Enumerator::enumerate`] walks the product
/// from the start.
#[derive(Debug, Clone)]
pub struct Enumerator<'a> {
    groups: Vec<CourseGroup<'a>>,
    missing: Vec<String>,
    dead_zones: &'a WeekTimeSet,
}

impl<'a> Enumerator<'a> {
    /// Prepare a search over the offerings of `courses` in `catalog`.
    ///
    /// Requested codes with no offering in the catalog are remembered; any
    /// such code makes the product empty.
    pub fn new<S: AsRef<str>>(
        catalog: &'a [CourseOffering],
        courses: &[S],
        dead_zones: &'a WeekTimeSet,
    ) -> Self {
        let requested: HashSet<&str> = courses.iter().map(|c| c.as_ref()).collect();
        let groups = group_contiguous(
            catalog
                .iter()
                .filter(|o| requested.contains(o.course.as_str())),
        );

        let mut missing: Vec<String> = Vec::new();
        for course in courses {
            let course = course.as_ref();
            if !groups.iter().any(|g| g.course == course) && !missing.iter().any(|m| m == course)
            {
                missing.push(course.to_string());
            }
        }

        Self {
            groups,
            missing,
            dead_zones,
        }
    }

    pub fn groups(&self) -> &[CourseGroup<'a>] {
        &self.groups
    }

    /// Requested course codes that matched nothing in the catalog.
    pub fn missing_courses(&self) -> &[String] {
        &self.missing
    }

    /// Size of the product: the product of every group's size, saturating.
    pub fn candidate_count(&self) -> usize {
        if !self.missing.is_empty() || self.groups.is_empty() {
            return 0;
        }
        self.groups
            .iter()
            .fold(1usize, |acc, g| acc.saturating_mul(g.offerings.len()))
    }

    /// Every candidate, valid or not, in product order.
    pub fn candidates(&self) -> Candidates<'_, 'a> {
        Candidates::new(&self.groups, !self.missing.is_empty())
    }

    /// Valid candidates in product order, unranked.
    ///
    /// Stops after the first error, which is yielded as the last item.
    pub fn valid_schedules(&self) -> impl Iterator<Item = Result<Schedule<'a>>> + '_ {
        let dead_zones = self.dead_zones;
        self.candidates()
            .scan(false, move |failed, candidate| {
                if *failed {
                    return None;
                }
                Some(match is_valid(&candidate, dead_zones) {
                    Ok(true) => Some(Ok(Schedule::new(candidate))),
                    Ok(false) => None,
                    Err(err) => {
                        *failed = true;
                        Some(Err(err))
                    }
                })
            })
            .flatten()
    }

    /// Run the whole search and rank the survivors.
    ///
    /// # Errors
    ///
    /// Any error from the occupancy set, such as
    /// [`crate::ScheduleError::InvalidRange`], aborts the run.
    pub fn enumerate(&self) -> Result<Enumeration<'a>> {
        info!(
            groups = self.groups.len(),
            candidates = self.candidate_count(),
            "Starting schedule search"
        );
        for group in &self.groups {
            debug!(
                course = group.course,
                offerings = group.offerings.len(),
                "Course group"
            );
        }
        if !self.missing.is_empty() {
            warn!(missing = ?self.missing, "Requested courses have no offerings");
        }

        let mut stats = SearchStats::default();
        let mut schedules = Vec::new();
        for candidate in self.candidates() {
            stats.evaluated += 1;
            if is_valid(&candidate, self.dead_zones)? {
                schedules.push(Schedule::new(candidate));
            } else {
                stats.rejected += 1;
            }
        }
        rank(&mut schedules);

        info!(
            evaluated = stats.evaluated,
            rejected = stats.rejected,
            valid = schedules.len(),
            "Schedule search finished"
        );
        Ok(Enumeration { schedules, stats })
    }
}
