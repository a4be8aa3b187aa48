//! Tests for greedy forward displacement and next-day rollover.

use chrono::NaiveDate;
use slot_engine::{
    adjust, adjust_with, adjust_with_policy, AdjustOptions, ClockTime, RolloverPolicy,
    ScheduleItem, SlotError,
};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn item(id: &str, date: NaiveDate, start: &str, end: &str) -> ScheduleItem {
    ScheduleItem {
        id: id.to_string(),
        title: format!("item {id}"),
        start_time: ClockTime::parse(start).unwrap(),
        end_time: ClockTime::parse(end).unwrap(),
        date,
        completed: false,
    }
}

fn times(item: &ScheduleItem) -> (String, String) {
    (item.start_time.to_string(), item.end_time.to_string())
}

#[test]
fn pushed_to_end_of_single_conflict() {
    let existing = vec![item("a", day(1), "09:00", "10:00")];
    let candidate = item("new", day(1), "09:30", "10:30");

    let adjusted = adjust(&candidate, &existing).unwrap();

    assert_eq!(times(&adjusted), ("10:00".into(), "11:00".into()));
    assert_eq!(adjusted.date, day(1));
}

#[test]
fn pushed_past_back_to_back_conflicts() {
    let existing = vec![
        item("a", day(1), "09:00", "10:00"),
        item("b", day(1), "10:00", "11:00"),
    ];
    let candidate = item("new", day(1), "09:30", "10:30");

    let adjusted = adjust(&candidate, &existing).unwrap();

    assert_eq!(times(&adjusted), ("11:00".into(), "12:00".into()));
    assert_eq!(adjusted.date, day(1));
}

#[test]
fn no_existing_items_returns_candidate_unchanged() {
    let candidate = item("new", day(1), "14:00", "15:00");

    let adjusted = adjust(&candidate, &[]).unwrap();

    assert_eq!(adjusted, candidate);
}

#[test]
fn items_on_other_dates_are_ignored() {
    let existing = vec![item("a", day(2), "14:00", "15:00")];
    let candidate = item("new", day(1), "14:00", "15:00");

    assert_eq!(adjust(&candidate, &existing).unwrap(), candidate);
}

#[test]
fn rolls_to_next_day_with_original_times_when_nothing_fits() {
    let existing = vec![item("a", day(1), "23:00", "23:45")];
    let candidate = item("new", day(1), "21:45", "23:15");

    let adjusted = adjust(&candidate, &existing).unwrap();

    assert_eq!(adjusted.date, day(2));
    assert_eq!(times(&adjusted), ("21:45".into(), "23:15".into()));
}

#[test]
fn may_end_exactly_at_midnight() {
    let existing = vec![item("a", day(1), "21:00", "22:00")];
    let candidate = item("new", day(1), "21:30", "23:30");

    let adjusted = adjust(&candidate, &existing).unwrap();

    assert_eq!(adjusted.date, day(1));
    assert_eq!(times(&adjusted), ("22:00".into(), "24:00".into()));
}

#[test]
fn fully_booked_day_rolls_over() {
    // 144 back-to-back ten-minute blocks cover the whole day.
    let existing: Vec<ScheduleItem> = (0..144u32)
        .map(|i| ScheduleItem {
            id: format!("b{i}"),
            title: format!("block {i}"),
            start_time: ClockTime::from_minutes(i * 10).unwrap(),
            end_time: ClockTime::from_minutes(i * 10 + 10).unwrap(),
            date: day(1),
            completed: false,
        })
        .collect();
    let candidate = item("new", day(1), "00:05", "00:35");

    let adjusted = adjust(&candidate, &existing).unwrap();

    assert_eq!(adjusted.date, day(2));
    assert_eq!(times(&adjusted), ("00:05".into(), "00:35".into()));
}

#[test]
fn identity_fields_are_preserved() {
    let existing = vec![item("a", day(1), "09:00", "10:00")];
    let mut candidate = item("keep-me", day(1), "09:15", "09:45");
    candidate.title = "Breathing exercise".to_string();
    candidate.completed = true;

    let adjusted = adjust(&candidate, &existing).unwrap();

    assert_eq!(adjusted.id, "keep-me");
    assert_eq!(adjusted.title, "Breathing exercise");
    assert!(adjusted.completed);
    assert_eq!(times(&adjusted), ("10:00".into(), "10:30".into()));
}

#[test]
fn reversed_interval_is_rejected() {
    // 23:00 to 00:30 would span midnight.
    let candidate = item("new", day(1), "23:00", "00:30");
    assert!(matches!(
        adjust(&candidate, &[]),
        Err(SlotError::InvalidDuration { .. })
    ));
}

#[test]
fn zero_length_interval_is_rejected() {
    let candidate = item("new", day(1), "10:00", "10:00");
    assert!(matches!(
        adjust(&candidate, &[]),
        Err(SlotError::InvalidDuration { .. })
    ));
}

#[test]
fn single_step_rollover_does_not_check_next_day() {
    let existing = vec![
        item("full", day(1), "00:00", "24:00"),
        item("next", day(2), "09:00", "10:00"),
    ];
    let candidate = item("new", day(1), "09:00", "10:00");

    let adjusted = adjust_with_policy(&candidate, &existing, RolloverPolicy::SingleStep).unwrap();

    assert_eq!(adjusted.date, day(2));
    assert_eq!(times(&adjusted), ("09:00".into(), "10:00".into()));
}

#[test]
fn cascade_rollover_resolves_next_day_conflicts() {
    let existing = vec![
        item("full", day(1), "00:00", "24:00"),
        item("next", day(2), "09:00", "10:00"),
    ];
    let candidate = item("new", day(1), "09:00", "10:00");

    let adjusted =
        adjust_with_policy(&candidate, &existing, RolloverPolicy::Cascade { max_days: 3 }).unwrap();

    assert_eq!(adjusted.date, day(2));
    assert_eq!(times(&adjusted), ("10:00".into(), "11:00".into()));
}

#[test]
fn cascade_gives_up_after_max_days() {
    let existing = vec![
        item("d1", day(1), "00:00", "24:00"),
        item("d2", day(2), "00:00", "24:00"),
        item("d3", day(3), "00:00", "24:00"),
    ];
    let candidate = item("new", day(1), "09:00", "10:00");

    let result = adjust_with_policy(&candidate, &existing, RolloverPolicy::Cascade { max_days: 2 });

    match result {
        Err(SlotError::NoFreeSlot { days, .. }) => assert_eq!(days, 2),
        other => panic!("expected NoFreeSlot, got {:?}", other),
    }
}

#[test]
fn search_step_bounds_the_number_of_pushes() {
    // Sixty 5-minute blocks cover 09:00-14:00; a 5-minute candidate needs sixty pushes.
    let existing: Vec<ScheduleItem> = (0..60u32)
        .map(|i| ScheduleItem {
            id: format!("b{i}"),
            title: format!("block {i}"),
            start_time: ClockTime::from_minutes(540 + i * 5).unwrap(),
            end_time: ClockTime::from_minutes(545 + i * 5).unwrap(),
            date: day(1),
            completed: false,
        })
        .collect();
    let candidate = item("new", day(1), "09:00", "09:05");

    // Default floor of 30 minutes allows 48 pushes, not enough.
    let rolled = adjust(&candidate, &existing).unwrap();
    assert_eq!(rolled.date, day(2));
    assert_eq!(times(&rolled), ("09:00".into(), "09:05".into()));

    let options = AdjustOptions {
        min_search_step_minutes: 5,
        ..AdjustOptions::default()
    };
    let adjusted = adjust_with(&candidate, &existing, &options).unwrap();
    assert_eq!(adjusted.date, day(1));
    assert_eq!(times(&adjusted), ("14:00".into(), "14:05".into()));
}
