//! Greedy forward displacement of a conflicting item.
//!
//! The candidate keeps its duration and is pushed to the end of the first existing
//! item it overlaps, rescanning after every push, until it lands in a free slot.
//! When no slot fits before midnight the item rolls over to the next calendar date.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{self, ClockTime, DAY_MINUTES};
use crate::error::{Result, SlotError};
use crate::item::ScheduleItem;

/// Floor on the duration used to bound the number of pushes per day.
pub const DEFAULT_MIN_SEARCH_STEP_MINUTES: u32 = 30;

/// What happens when the item cannot fit on its own date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RolloverPolicy {
    /// Move to the next date with the original times, without checking that day.
    #[default]
    SingleStep,
    /// Re-run the search on each following date, up to `max_days` dates ahead.
    Cascade { max_days: u32 },
}

/// Tuning for [`adjust_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustOptions {
    pub min_search_step_minutes: u32,
    pub rollover: RolloverPolicy,
}

impl Default for AdjustOptions {
    fn default() -> Self {
        AdjustOptions {
            min_search_step_minutes: DEFAULT_MIN_SEARCH_STEP_MINUTES,
            rollover: RolloverPolicy::SingleStep,
        }
    }
}

/// Relocate `item` to the next free slot among `existing`, rolling over a single day
/// if nothing fits before midnight.
///
/// Returns a copy with the same `id`, `title`, `completed` and duration. An item that
/// conflicts with nothing comes back unchanged.
///
/// # Errors
/// `SlotError::InvalidDuration` if `item` ends at or before its start,
/// `SlotError::EmptyTitle` for a blank title,
/// `SlotError::InvalidDate` if the item would roll past the last representable date.
pub fn adjust(item: &ScheduleItem, existing: &[ScheduleItem]) -> Result<ScheduleItem> {
    adjust_with(item, existing, &AdjustOptions::default())
}

/// [`adjust`] with an explicit rollover policy.
pub fn adjust_with_policy(
    item: &ScheduleItem,
    existing: &[ScheduleItem],
    rollover: RolloverPolicy,
) -> Result<ScheduleItem> {
    let options = AdjustOptions {
        rollover,
        ..AdjustOptions::default()
    };
    adjust_with(item, existing, &options)
}

/// [`adjust`] with explicit options.
///
/// # Errors
/// In addition to the errors of [`adjust`], `RolloverPolicy::Cascade` fails with
/// `SlotError::NoFreeSlot` when none of the next `max_days` dates has room.
pub fn adjust_with(
    item: &ScheduleItem,
    existing: &[ScheduleItem],
    options: &AdjustOptions,
) -> Result<ScheduleItem> {
    item.validate()?;

    if let Some(placed) = place_within_day(item, existing, options.min_search_step_minutes) {
        return Ok(placed);
    }

    match options.rollover {
        RolloverPolicy::SingleStep => {
            let date = clock::next_day(item.date)?;
            debug!(
                title = %item.title,
                from = %item.date,
                to = %date,
                "no slot before midnight, rolling over"
            );
            Ok(ScheduleItem {
                date,
                ..item.clone()
            })
        }
        RolloverPolicy::Cascade { max_days } => {
            let mut date = item.date;
            for _ in 0..max_days {
                date = clock::next_day(date)?;
                let moved = ScheduleItem {
                    date,
                    ..item.clone()
                };
                if let Some(placed) =
                    place_within_day(&moved, existing, options.min_search_step_minutes)
                {
                    debug!(title = %item.title, from = %item.date, to = %date, "rolled over");
                    return Ok(placed);
                }
            }
            Err(SlotError::NoFreeSlot {
                title: item.title.clone(),
                date: item.date.to_string(),
                days: max_days,
            })
        }
    }
}

/// Search for a free slot on `item.date`, `None` if the item cannot fit before 24:00.
fn place_within_day(
    item: &ScheduleItem,
    existing: &[ScheduleItem],
    min_step: u32,
) -> Option<ScheduleItem> {
    let same_day: Vec<&ScheduleItem> = existing.iter().filter(|e| e.date == item.date).collect();

    // Validated by the caller, so the interval is non-empty.
    let duration = item.end_time.minutes() - item.start_time.minutes();
    let mut start = item.start_time.minutes();
    let mut end = start + duration;

    let max_attempts = DAY_MINUTES.div_ceil(duration.max(min_step).max(1));
    let first_blocker = |start: u32, end: u32| {
        same_day.iter().copied().find(|e| {
            clock::overlaps(start, end, e.start_time.minutes(), e.end_time.minutes())
        })
    };

    let mut free = false;
    for _ in 0..max_attempts {
        match first_blocker(start, end) {
            None => {
                free = true;
                break;
            }
            Some(blocker) => {
                debug!(
                    title = %item.title,
                    blocked_by = %blocker.title,
                    until = %blocker.end_time,
                    "pushing past conflict"
                );
                start = blocker.end_time.minutes();
                end = start + duration;
            }
        }
        if end > DAY_MINUTES {
            break;
        }
    }

    // The final push may have landed in a gap without being rescanned.
    if !free && end <= DAY_MINUTES {
        free = first_blocker(start, end).is_none();
    }
    if !free || end > DAY_MINUTES {
        return None;
    }

    Some(ScheduleItem {
        start_time: ClockTime::from_minutes(start)?,
        end_time: ClockTime::from_minutes(end)?,
        ..item.clone()
    })
}
