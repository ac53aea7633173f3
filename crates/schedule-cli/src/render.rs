//! Output formatting for ranked schedules.

use std::io::{self, Write};

use schedule_engine::{CourseOffering, Enumeration, Schedule, SearchStats};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct RankedSchedule<'a> {
    rank: usize,
    open_sections: usize,
    offerings: &'a [&'a CourseOffering],
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    stats: SearchStats,
    total: usize,
    schedules: Vec<RankedSchedule<'a>>,
}

/// Write schedules as pretty-printed JSON.
pub fn write_json<W: Write>(
    out: &mut W,
    result: &Enumeration<'_>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let schedules = shown(&result.schedules, limit)
        .iter()
        .enumerate()
        .map(|(i, s)| RankedSchedule {
            rank: i + 1,
            open_sections: s.open_sections(),
            offerings: s.offerings(),
        })
        .collect();
    let report = Report {
        stats: result.stats,
        total: result.schedules.len(),
        schedules,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

/// Write schedules as a plain-text listing.
pub fn write_text<W: Write>(
    out: &mut W,
    result: &Enumeration<'_>,
    limit: Option<usize>,
) -> io::Result<()> {
    let total = result.schedules.len();
    if total == 0 {
        writeln!(out, "No conflict-free schedules found.")?;
    }

    for (i, schedule) in shown(&result.schedules, limit).iter().enumerate() {
        write_schedule(out, i + 1, total, schedule)?;
    }

    writeln!(
        out,
        "{} valid schedule{} ({} candidates evaluated, {} rejected)",
        total,
        if total == 1 { "" } else { "s" },
        result.stats.evaluated,
        result.stats.rejected
    )
}

fn shown<'s, 'a>(schedules: &'s [Schedule<'a>], limit: Option<usize>) -> &'s [Schedule<'a>] {
    match limit {
        Some(n) if n < schedules.len() => &schedules[..n],
        _ => schedules,
    }
}

fn write_schedule<W: Write>(
    out: &mut W,
    rank: usize,
    total: usize,
    schedule: &Schedule<'_>,
) -> io::Result<()> {
    writeln!(
        out,
        "Schedule {rank} of {total} (open sections: {})",
        schedule.open_sections()
    )?;
    for offering in schedule.offerings() {
        writeln!(
            out,
            "  {:>6}  {:<10} {:<32} {:<20} seats {}/{}{}",
            offering.crn,
            offering.course,
            offering.title,
            offering.instructor,
            offering.remaining_capacity,
            offering.capacity,
            if offering.closed { "  [closed]" } else { "" }
        )?;
    }
    for (offering, interval) in schedule.meetings() {
        writeln!(out, "    {interval}  {}", offering.course)?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};
    use schedule_engine::MeetingInterval;

    fn offering(crn: u32, course: &str, day: Weekday, h: u32, remaining: i32) -> CourseOffering {
        let start = NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        let end = NaiveTime::from_hms_opt(h, 50, 0).unwrap();
        CourseOffering::new(crn, course, vec![MeetingInterval::on(day, start, end).unwrap()])
            .with_seats(25, remaining)
            .with_title("Intro")
    }

    #[test]
    fn test_text_lists_meetings_chronologically() {
        let a = offering(1, "A 100", Weekday::Wed, 9, 2);
        let b = offering(2, "B 200", Weekday::Mon, 14, 0);
        let result = Enumeration {
            schedules: vec![Schedule::new(vec![&a, &b])],
            stats: SearchStats {
                evaluated: 3,
                rejected: 2,
            },
        };
        let mut out = Vec::new();
        write_text(&mut out, &result, None).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Schedule 1 of 1 (open sections: 1)"));
        let mon = text.find("M 14:00-14:50").unwrap();
        let wed = text.find("W 09:00-09:50").unwrap();
        assert!(mon < wed);
        assert!(text.contains("1 valid schedule (3 candidates evaluated, 2 rejected)"));
    }

    #[test]
    fn test_text_empty_result() {
        let result = Enumeration {
            schedules: vec![],
            stats: SearchStats::default(),
        };
        let mut out = Vec::new();
        write_text(&mut out, &result, None).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("No conflict-free schedules found."));
    }

    #[test]
    fn test_json_respects_limit() {
        let a = offering(1, "A 100", Weekday::Mon, 9, 0);
        let b = offering(2, "A 100", Weekday::Tue, 9, 4);
        let result = Enumeration {
            schedules: vec![Schedule::new(vec![&a]), Schedule::new(vec![&b])],
            stats: SearchStats {
                evaluated: 2,
                rejected: 0,
            },
        };
        let mut out = Vec::new();
        write_json(&mut out, &result, Some(1)).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["schedules"].as_array().unwrap().len(), 1);
        assert_eq!(value["schedules"][0]["offerings"][0]["crn"], 1);
        assert_eq!(value["stats"]["evaluated"], 2);
    }
}
