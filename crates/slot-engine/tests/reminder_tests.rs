//! Tests for reminder lead-time computation.

use chrono::{NaiveDate, NaiveDateTime};
use slot_engine::reminder::{pending_reminders, reminder_at, DEFAULT_LEAD_MINUTES};
use slot_engine::{ClockTime, ScheduleItem};

fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, d)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn item(id: &str, d: u32, start: &str, end: &str, completed: bool) -> ScheduleItem {
    ScheduleItem {
        id: id.to_string(),
        title: format!("item {id}"),
        start_time: ClockTime::parse(start).unwrap(),
        end_time: ClockTime::parse(end).unwrap(),
        date: NaiveDate::from_ymd_opt(2026, 3, d).unwrap(),
        completed,
    }
}

#[test]
fn fires_lead_minutes_before_start() {
    let walk = item("a", 1, "09:00", "09:30", false);
    assert_eq!(reminder_at(&walk, DEFAULT_LEAD_MINUTES), at(1, 8, 45));
}

#[test]
fn early_items_remind_on_previous_day() {
    let early = item("a", 2, "00:10", "00:30", false);
    assert_eq!(reminder_at(&early, 15), at(1, 23, 55));
}

#[test]
fn pending_skips_completed_and_past_reminders() {
    let items = vec![
        item("later", 1, "18:00", "19:00", false),
        item("done", 1, "12:00", "13:00", true),
        item("past", 1, "08:00", "09:00", false),
        item("soon", 1, "10:30", "11:00", false),
    ];

    let pending = pending_reminders(&items, at(1, 10, 0), 15);

    let ids: Vec<&str> = pending.iter().map(|r| r.item_id.as_str()).collect();
    assert_eq!(ids, vec!["soon", "later"]);
    assert_eq!(pending[0].fire_at, at(1, 10, 15));
    assert_eq!(pending[0].message(), "Reminder: \"item soon\" is in 15 minutes!");
}

#[test]
fn reminder_exactly_now_is_not_pending() {
    let items = vec![item("a", 1, "10:15", "11:00", false)];
    assert!(pending_reminders(&items, at(1, 10, 0), 15).is_empty());
}
