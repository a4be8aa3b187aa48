//! Compute free time slots within one day.
//!
//! Sorts the day's items by start time, merges overlapping busy periods, then
//! computes the gaps between merged periods within `[00:00, 24:00)`.

use chrono::NaiveDate;
use serde::Serialize;

use crate::clock::{ClockTime, DAY_MINUTES};
use crate::item::ScheduleItem;

/// A free time slot on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeSlot {
    pub date: NaiveDate,
    pub start: ClockTime,
    pub end: ClockTime,
    pub duration_minutes: u32,
}

/// Merge overlapping or adjacent busy periods on `date`.
///
/// Returns a sorted, non-overlapping list of (start, end) minute intervals.
fn merge_busy_periods(items: &[ScheduleItem], date: NaiveDate) -> Vec<(u32, u32)> {
    let mut intervals: Vec<(u32, u32)> = items
        .iter()
        .filter(|item| item.date == date && item.start_time < item.end_time)
        .map(|item| (item.start_time.minutes(), item.end_time.minutes()))
        .collect();

    intervals.sort_unstable();

    let mut merged: Vec<(u32, u32)> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

/// Find free slots on `date` given the committed items.
///
/// Items on other dates are ignored. Returns slots sorted by start time.
pub fn find_free_slots(items: &[ScheduleItem], date: NaiveDate) -> Vec<FreeSlot> {
    let mut free_slots = Vec::new();
    let mut cursor = 0;

    for (busy_start, busy_end) in merge_busy_periods(items, date) {
        if cursor < busy_start {
            free_slots.push(slot(date, cursor, busy_start));
        }
        cursor = cursor.max(busy_end);
    }

    if cursor < DAY_MINUTES {
        free_slots.push(slot(date, cursor, DAY_MINUTES));
    }

    free_slots
}

/// The first free slot on `date` of at least `min_duration_minutes`.
pub fn find_first_free_slot(
    items: &[ScheduleItem],
    date: NaiveDate,
    min_duration_minutes: u32,
) -> Option<FreeSlot> {
    find_free_slots(items, date)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}

fn slot(date: NaiveDate, start: u32, end: u32) -> FreeSlot {
    FreeSlot {
        date,
        start: ClockTime::from_minutes(start).unwrap_or(ClockTime::END_OF_DAY),
        end: ClockTime::from_minutes(end).unwrap_or(ClockTime::END_OF_DAY),
        duration_minutes: end - start,
    }
}
