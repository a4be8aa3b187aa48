//! Reminder lead-time computation.
//!
//! Firing notifications is the caller's job; this module only decides when a
//! reminder is due, using the times the scheduler actually committed.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::item::ScheduleItem;

/// Minutes before `startTime` that a reminder fires by default.
pub const DEFAULT_LEAD_MINUTES: i64 = 15;

/// A reminder that has not fired yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub item_id: String,
    pub title: String,
    pub fire_at: NaiveDateTime,
    pub lead_minutes: i64,
}

impl Reminder {
    pub fn message(&self) -> String {
        format!(
            "Reminder: \"{}\" is in {} minutes!",
            self.title, self.lead_minutes
        )
    }
}

/// The instant a reminder for `item` should fire.
pub fn reminder_at(item: &ScheduleItem, lead_minutes: i64) -> NaiveDateTime {
    item.date.and_time(NaiveTime::MIN)
        + Duration::minutes(i64::from(item.start_time.minutes()) - lead_minutes)
}

/// Reminders for incomplete items whose fire time is still ahead of `now`,
/// earliest first.
pub fn pending_reminders(
    items: &[ScheduleItem],
    now: NaiveDateTime,
    lead_minutes: i64,
) -> Vec<Reminder> {
    let mut pending: Vec<Reminder> = items
        .iter()
        .filter(|item| !item.completed)
        .map(|item| Reminder {
            item_id: item.id.clone(),
            title: item.title.clone(),
            fire_at: reminder_at(item, lead_minutes),
            lead_minutes,
        })
        .filter(|reminder| reminder.fire_at > now)
        .collect();

    pending.sort_by_key(|reminder| reminder.fire_at);
    pending
}
