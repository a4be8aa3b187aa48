//! Schedule records and the id-less shapes they are created from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{self, ClockTime};
use crate::error::{Result, SlotError};

/// A committed activity on one calendar date.
///
/// Serializes with the same camelCase field names the application stores
/// (`startTime`, `endTime`), times as `"HH:MM"` and dates as `"YYYY-MM-DD"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    /// Opaque identifier assigned by the store; never reassigned.
    pub id: String,
    pub title: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub date: NaiveDate,
    #[serde(default)]
    pub completed: bool,
}

impl ScheduleItem {
    /// Signed length in minutes; non-positive for invalid items.
    pub fn duration_minutes(&self) -> i64 {
        i64::from(self.end_time.minutes()) - i64::from(self.start_time.minutes())
    }

    /// Check the title and `start_time < end_time` invariants.
    ///
    /// # Errors
    /// `SlotError::EmptyTitle` for a blank title, `SlotError::InvalidDuration` when
    /// the interval is empty or reversed.
    pub fn validate(&self) -> Result<()> {
        validate_parts(&self.title, self.start_time, self.end_time)
    }

    /// True when both items share a date and their intervals overlap.
    pub fn conflicts_with(&self, other: &ScheduleItem) -> bool {
        self.date == other.date
            && clock::overlaps(
                self.start_time.minutes(),
                self.end_time.minutes(),
                other.start_time.minutes(),
                other.end_time.minutes(),
            )
    }
}

/// An activity proposal without id or date: a manual entry or an AI suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub title: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl NewActivity {
    /// Parse and validate a proposal from raw strings.
    pub fn new(title: impl Into<String>, start_time: &str, end_time: &str) -> Result<Self> {
        let activity = NewActivity {
            title: title.into(),
            start_time: ClockTime::parse(start_time)?,
            end_time: ClockTime::parse(end_time)?,
        };
        validate_parts(&activity.title, activity.start_time, activity.end_time)?;
        Ok(activity)
    }

    /// Pin the proposal to a calendar date.
    pub fn on(self, date: NaiveDate) -> DraftItem {
        DraftItem {
            title: self.title,
            start_time: self.start_time,
            end_time: self.end_time,
            date,
        }
    }
}

/// A dated item that the store has not yet assigned an id to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
    pub title: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub date: NaiveDate,
}

impl DraftItem {
    pub fn validate(&self) -> Result<()> {
        validate_parts(&self.title, self.start_time, self.end_time)
    }

    /// A transient item with an empty id, usable as a conflict candidate.
    pub fn provisional(&self) -> ScheduleItem {
        self.clone().into_item(String::new())
    }

    pub fn into_item(self, id: String) -> ScheduleItem {
        ScheduleItem {
            id,
            title: self.title,
            start_time: self.start_time,
            end_time: self.end_time,
            date: self.date,
            completed: false,
        }
    }
}

impl From<ScheduleItem> for DraftItem {
    fn from(item: ScheduleItem) -> Self {
        DraftItem {
            title: item.title,
            start_time: item.start_time,
            end_time: item.end_time,
            date: item.date,
        }
    }
}

fn validate_parts(title: &str, start: ClockTime, end: ClockTime) -> Result<()> {
    if title.trim().is_empty() {
        return Err(SlotError::EmptyTitle);
    }
    if start >= end {
        return Err(SlotError::InvalidDuration {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}
