//! Property-based tests for the scheduling core using proptest.
//!
//! These tests verify invariants that should hold for *any* valid schedule,
//! not just the specific scenarios in the other test files.

use chrono::NaiveDate;
use proptest::prelude::*;
use slot_engine::{
    adjust, find_conflicts, group_by_date, overlaps, sort_by_time, ClockTime, ScheduleItem,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_interval() -> impl Strategy<Value = (u32, u32)> {
    (0u32..1440).prop_flat_map(|start| (Just(start), (start + 1)..=1440))
}

fn arb_day() -> impl Strategy<Value = u32> {
    1u32..=3
}

fn arb_item() -> impl Strategy<Value = ScheduleItem> {
    (arb_day(), arb_interval(), 0u32..1000).prop_map(|(d, (start, end), n)| ScheduleItem {
        id: format!("id-{n}"),
        title: format!("activity {n}"),
        start_time: ClockTime::from_minutes(start).unwrap(),
        end_time: ClockTime::from_minutes(end).unwrap(),
        date: NaiveDate::from_ymd_opt(2026, 3, d).unwrap(),
        completed: false,
    })
}

fn arb_items() -> impl Strategy<Value = Vec<ScheduleItem>> {
    prop::collection::vec(arb_item(), 0..20)
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn overlap_is_symmetric(a in arb_interval(), b in arb_interval()) {
        prop_assert_eq!(overlaps(a.0, a.1, b.0, b.1), overlaps(b.0, b.1, a.0, a.1));
    }

    #[test]
    fn unconflicted_item_is_returned_unchanged(item in arb_item(), existing in arb_items()) {
        prop_assume!(find_conflicts(std::slice::from_ref(&item), &existing).is_empty());

        let adjusted = adjust(&item, &existing).unwrap();
        prop_assert_eq!(adjusted, item);
    }

    #[test]
    fn duration_is_preserved(item in arb_item(), existing in arb_items()) {
        let adjusted = adjust(&item, &existing).unwrap();
        prop_assert_eq!(adjusted.duration_minutes(), item.duration_minutes());
        prop_assert_eq!(&adjusted.id, &item.id);
        prop_assert_eq!(&adjusted.title, &item.title);
    }

    #[test]
    fn adjusted_item_is_conflict_free_on_its_day(item in arb_item(), existing in arb_items()) {
        let adjusted = adjust(&item, &existing).unwrap();

        if adjusted.date == item.date {
            prop_assert!(find_conflicts(std::slice::from_ref(&adjusted), &existing).is_empty());
            prop_assert!(adjusted.start_time >= item.start_time);
        } else {
            prop_assert_eq!(adjusted.date, item.date.succ_opt().unwrap());
            prop_assert_eq!(adjusted.start_time, item.start_time);
            prop_assert_eq!(adjusted.end_time, item.end_time);
        }
    }

    #[test]
    fn sort_is_ordered_and_stable(items in arb_items()) {
        // Tag each item with its input position so ties can be checked.
        let tagged: Vec<ScheduleItem> = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| ScheduleItem { id: i.to_string(), ..item })
            .collect();
        let sorted = sort_by_time(&tagged);
        prop_assert_eq!(sorted.len(), tagged.len());

        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!((a.date, a.start_time) <= (b.date, b.start_time));
            if (a.date, a.start_time) == (b.date, b.start_time) {
                let pos = |x: &ScheduleItem| x.id.parse::<usize>().unwrap();
                prop_assert!(pos(a) < pos(b));
            }
        }
    }

    #[test]
    fn grouping_partitions_the_input(items in arb_items()) {
        let grouped = group_by_date(&items);

        let total: usize = grouped.values().map(Vec::len).sum();
        prop_assert_eq!(total, items.len());

        for (date, bucket) in &grouped {
            prop_assert!(bucket.iter().all(|i| i.date == *date));
            let expected: Vec<&ScheduleItem> = items.iter().filter(|i| i.date == *date).collect();
            let actual: Vec<&ScheduleItem> = bucket.iter().collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
