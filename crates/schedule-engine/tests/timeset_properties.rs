use chrono::{Duration, NaiveDateTime};
use proptest::prelude::*;
use schedule_engine::week::{reference_monday, MINUTES_PER_WEEK};
use schedule_engine::WeekTimeSet;

fn minute(m: i64) -> NaiveDateTime {
    reference_monday().and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(m)
}

/// Inclusive minute range `(start, end)` with `end > start` inside one week.
fn range_strategy() -> impl Strategy<Value = (i64, i64)> {
    (0..(MINUTES_PER_WEEK as i64 - 1)).prop_flat_map(|start| {
        let max_len = (MINUTES_PER_WEEK as i64 - start).min(600);
        (Just(start), 1..max_len).prop_map(|(s, len)| (s, s + len))
    })
}

/// Pairwise disjoint inclusive ranges, in random insertion order.
fn disjoint_ranges() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((1i64..90, 1i64..180), 1..12)
        .prop_map(|steps| {
            let mut cursor = 0;
            steps
                .into_iter()
                .map(|(gap, len)| {
                    let start = cursor + gap;
                    let end = start + len;
                    cursor = end;
                    (start, end)
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

proptest! {
    #[test]
    fn inserted_minutes_are_members_and_others_are_not(ranges in disjoint_ranges()) {
        let mut set = WeekTimeSet::new();
        for &(s, e) in &ranges {
            prop_assert!(!set.add_range(minute(s), minute(e)).unwrap());
        }

        let lo = ranges.iter().map(|r| r.0).min().unwrap() - 5;
        let hi = ranges.iter().map(|r| r.1).max().unwrap() + 5;
        for m in lo..=hi {
            let inside = ranges.iter().any(|&(s, e)| s <= m && m <= e);
            prop_assert_eq!(set.contains(minute(m)), inside, "minute {}", m);
        }
    }

    #[test]
    fn overlap_reported_iff_ranges_share_a_minute(
        a in range_strategy(),
        b in range_strategy(),
    ) {
        let mut set = WeekTimeSet::new();
        prop_assert!(!set.add_range(minute(a.0), minute(a.1)).unwrap());
        let shares = a.0 <= b.1 && b.0 <= a.1;
        prop_assert_eq!(set.add_range(minute(b.0), minute(b.1)).unwrap(), shares);
    }

    #[test]
    fn reinserting_a_range_reports_overlap(r in range_strategy()) {
        let mut set = WeekTimeSet::new();
        prop_assert!(!set.add_range(minute(r.0), minute(r.1)).unwrap());
        prop_assert!(set.add_range(minute(r.0), minute(r.1)).unwrap());
    }

    #[test]
    fn earlier_insert_keeps_later_occupancy(
        later in (3000i64..9000, 1i64..300),
        before in 1i64..2900,
        len in 1i64..60,
    ) {
        let (a_start, a_len) = later;
        let a_end = a_start + a_len;
        let b_start = a_start - before - len - 1;
        prop_assume!(b_start >= 0);

        let mut set = WeekTimeSet::new();
        set.add_range(minute(a_start), minute(a_end)).unwrap();
        prop_assert!(!set.add_range(minute(b_start), minute(b_start + len)).unwrap());
        prop_assert_eq!(set.epoch(), Some(minute(b_start)));

        for m in a_start..=a_end {
            prop_assert!(set.contains(minute(m)));
        }
        prop_assert!(!set.contains(minute(a_start - 1)));
        prop_assert!(!set.contains(minute(a_end + 1)));
        prop_assert_eq!(set.occupied_minutes() as i64, (a_len + 1) + (len + 1));
    }

    #[test]
    fn clone_mutation_leaves_original_alone(
        base in range_strategy(),
        extra in prop::collection::vec(range_strategy(), 1..6),
    ) {
        let mut original = WeekTimeSet::new();
        original.add_range(minute(base.0), minute(base.1)).unwrap();
        let snapshot: Vec<bool> = (0..MINUTES_PER_WEEK as i64)
            .step_by(7)
            .map(|m| original.contains(minute(m)))
            .collect();

        let mut copy = original.clone();
        for (s, e) in extra {
            copy.add_range(minute(s), minute(e)).unwrap();
        }

        let after: Vec<bool> = (0..MINUTES_PER_WEEK as i64)
            .step_by(7)
            .map(|m| original.contains(minute(m)))
            .collect();
        prop_assert_eq!(snapshot, after);
        prop_assert_eq!(original.epoch(), Some(minute(base.0)));
    }
}
