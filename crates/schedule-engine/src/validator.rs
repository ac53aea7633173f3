//! Conflict check for one candidate schedule.
//!
//! Every meeting interval of every offering is replayed into a clone of the
//! dead-zone baseline. The first insert that overlaps ends the check.

use serde::Serialize;

use crate::error::Result;
use crate::meeting::MeetingInterval;
use crate::offering::CourseOffering;
use crate::timeset::WeekTimeSet;

/// The first interval of a candidate that collided with earlier occupancy,
/// either another offering in the candidate or a dead zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Conflict<'a> {
    pub offering: &'a CourseOffering,
    pub interval: MeetingInterval,
}

/// Find the first conflicting interval in `schedule`, if any.
///
/// Offerings are replayed in order and each offering's intervals in order;
/// the order only decides which conflict is reported, not whether one is.
///
/// # Errors
///
/// Propagates [`crate::ScheduleError::InvalidRange`] and
/// [`crate::ScheduleError::SpanTooWide`] from the occupancy set.
pub fn find_conflict<'a>(
    schedule: &[&'a CourseOffering],
    dead_zones: &WeekTimeSet,
) -> Result<Option<Conflict<'a>>> {
    let mut occupied = dead_zones.clone();
    for &offering in schedule {
        for interval in &offering.times {
            if occupied.add_interval(interval)? {
                return Ok(Some(Conflict {
                    offering,
                    interval: *interval,
                }));
            }
        }
    }
    Ok(None)
}

/// Whether `schedule` fits together and avoids every dead zone.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveTime, Weekday};
/// use schedule_engine::{is_valid, CourseOffering, MeetingInterval, WeekTimeSet};
///
/// let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let slot = |start, end| MeetingInterval::on(Weekday::Mon, start, end).unwrap();
/// let a = CourseOffering::new(1, "A", vec![slot(hm(10, 0), hm(11, 0))]);
/// let b = CourseOffering::new(2, "B", vec![slot(hm(10, 30), hm(11, 30))]);
///
/// assert!(!is_valid(&[&a, &b], &WeekTimeSet::new()).unwrap());
/// ```
pub fn is_valid(schedule: &[&CourseOffering], dead_zones: &WeekTimeSet) -> Result<bool> {
    Ok(find_conflict(schedule, dead_zones)?.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadzone::DeadZones;
    use chrono::{NaiveTime, Weekday};

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    type Slot = (Weekday, (u32, u32), (u32, u32));

    fn offering(crn: u32, course: &str, slots: &[Slot]) -> CourseOffering {
        let times = slots
            .iter()
            .map(|&(day, (sh, sm), (eh, em))| {
                MeetingInterval::on(day, hm(sh, sm), hm(eh, em)).unwrap()
            })
            .collect();
        CourseOffering::new(crn, course, times)
    }

    #[test]
    fn test_overlapping_pair_rejected() {
        let a = offering(1, "A", &[(Weekday::Mon, (10, 0), (11, 0))]);
        let b = offering(2, "B", &[(Weekday::Mon, (10, 30), (11, 30))]);
        assert!(!is_valid(&[&a, &b], &WeekTimeSet::new()).unwrap());
    }

    #[test]
    fn test_disjoint_schedule_accepted() {
        let a = offering(
            1,
            "A",
            &[(Weekday::Mon, (9, 0), (10, 0)), (Weekday::Wed, (9, 0), (10, 0))],
        );
        let b = offering(2, "B", &[(Weekday::Tue, (9, 0), (10, 0))]);
        let c = offering(3, "C", &[(Weekday::Mon, (13, 0), (14, 15))]);
        assert!(is_valid(&[&a, &b, &c], &WeekTimeSet::new()).unwrap());
    }

    #[test]
    fn test_dead_zone_rejects_early_class() {
        let dead = DeadZones::new()
            .block(MeetingInterval::on(Weekday::Mon, hm(0, 0), hm(9, 0)).unwrap())
            .build()
            .unwrap();
        let c = offering(7, "C", &[(Weekday::Mon, (8, 30), (9, 30))]);

        let conflict = find_conflict(&[&c], &dead).unwrap().unwrap();
        assert_eq!(conflict.offering.crn, 7);
        assert_eq!(conflict.interval.start().time(), hm(8, 30));
    }

    #[test]
    fn test_late_conflict_rejected_after_clean_prefix() {
        let a = offering(1, "A", &[(Weekday::Mon, (8, 0), (8, 50))]);
        let b = offering(2, "B", &[(Weekday::Tue, (8, 0), (8, 50))]);
        let c = offering(3, "C", &[(Weekday::Wed, (8, 0), (8, 50))]);
        let d = offering(
            4,
            "D",
            &[(Weekday::Thu, (8, 0), (8, 50)), (Weekday::Tue, (8, 40), (9, 30))],
        );

        let conflict = find_conflict(&[&a, &b, &c, &d], &WeekTimeSet::new())
            .unwrap()
            .unwrap();
        assert_eq!(conflict.offering.crn, 4);
        assert_eq!(conflict.interval.weekday(), Some(Weekday::Tue));
    }

    #[test]
    fn test_self_overlapping_offering_rejected() {
        let a = offering(
            1,
            "A",
            &[(Weekday::Fri, (9, 0), (11, 0)), (Weekday::Fri, (10, 0), (10, 30))],
        );
        assert!(!is_valid(&[&a], &WeekTimeSet::new()).unwrap());
    }

    #[test]
    fn test_dead_zones_not_mutated() {
        let dead = DeadZones::new()
            .block(MeetingInterval::on(Weekday::Sat, hm(0, 0), hm(23, 59)).unwrap())
            .build()
            .unwrap();
        let before = dead.occupied_minutes();
        let a = offering(1, "A", &[(Weekday::Mon, (9, 0), (10, 0))]);
        assert!(is_valid(&[&a], &dead).unwrap());
        assert_eq!(dead.occupied_minutes(), before);
        assert!(!dead.contains(crate::week::at(Weekday::Mon, hm(9, 30))));
    }

    #[test]
    fn test_offering_without_times_is_valid() {
        let tba = CourseOffering::new(9, "TBA 1000", vec![]);
        assert!(is_valid(&[&tba], &WeekTimeSet::new()).unwrap());
    }

    #[test]
    fn test_empty_schedule_is_valid() {
        assert!(is_valid(&[], &WeekTimeSet::new()).unwrap());
    }
}
