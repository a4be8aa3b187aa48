//! Detect, adjust and persist as one serialized step.
//!
//! The pure core computes against a snapshot of a day's items. If two callers (a
//! manual entry and an accepted AI suggestion, say) each take a snapshot and then
//! persist, the second can land on top of the first. [`Scheduler`] owns the store
//! behind a mutex and holds it for the whole list -> detect -> adjust -> create
//! sequence, so every placement sees the previous one. The store's own exclusive
//! guard is held for the same span, which extends that to other processes sharing
//! a file-backed store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::adjust;
use crate::clock::ClockTime;
use crate::config::SchedulerConfig;
use crate::conflict::{self, Conflict};
use crate::error::{Result, SlotError, StoreError};
use crate::freebusy::{self, FreeSlot};
use crate::item::{DraftItem, NewActivity, ScheduleItem};
use crate::ordering;
use crate::reminder::{self, Reminder};
use crate::store::ScheduleStore;

/// How the committed item relates to what was proposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    Unchanged,
    /// Pushed later on the same date.
    Moved { from_start: ClockTime, from_end: ClockTime },
    /// Moved to a later date.
    RolledOver { from_date: NaiveDate },
}

/// A persisted item together with how it got there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scheduled {
    pub item: ScheduleItem,
    pub placement: Placement,
    #[serde(skip)]
    pub conflicts: Vec<Conflict>,
}

impl Scheduled {
    /// User-facing notice for this placement.
    pub fn message(&self) -> String {
        match self.placement {
            Placement::Unchanged => format!("\"{}\" added to your schedule!", self.item.title),
            Placement::Moved { .. } => format!(
                "Schedule adjusted to {} - {} (conflict detected)",
                self.item.start_time, self.item.end_time
            ),
            Placement::RolledOver { .. } => format!(
                "Schedule adjusted to {} - {} on {} (conflict detected)",
                self.item.start_time, self.item.end_time, self.item.date
            ),
        }
    }
}

pub struct Scheduler<S> {
    store: Mutex<S>,
    config: SchedulerConfig,
}

impl<S: ScheduleStore> Scheduler<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, SchedulerConfig::default())
    }

    pub fn with_config(store: S, config: SchedulerConfig) -> Self {
        Scheduler {
            store: Mutex::new(store),
            config,
        }
    }

    pub fn into_inner(self) -> S {
        self.store.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // The store holds plain data, so a panic elsewhere leaves it usable.
    fn lock(&self) -> MutexGuard<'_, S> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Conflicts `activity` would have on `date`, without persisting anything.
    pub fn check(&self, activity: &NewActivity, date: NaiveDate) -> Result<Vec<Conflict>> {
        let candidate = activity.clone().on(date).provisional();
        let existing = self.lock().list(Some(date))?;
        Ok(conflict::find_conflicts(&[candidate], &existing))
    }

    /// Place `activity` on `date`, moving it past conflicts, and persist it.
    ///
    /// # Errors
    /// Validation errors from the activity, `SlotError::DuplicateTitle` when
    /// configured, rollover failures from the adjuster, and store failures.
    pub fn schedule(&self, activity: NewActivity, date: NaiveDate) -> Result<Scheduled> {
        let draft = activity.on(date);
        draft.validate()?;

        let mut store = self.lock();
        let _guard = store.lock_exclusive()?;
        let all = store.list(None)?;
        let existing = ordering::items_on(date, &all);

        self.reject_duplicate(&draft.title, date, &all)?;

        let candidate = draft.provisional();
        let conflicts = conflict::find_conflicts(std::slice::from_ref(&candidate), &existing);

        let (placed, placement) = if conflicts.is_empty() {
            (candidate, Placement::Unchanged)
        } else {
            debug!(
                title = %candidate.title,
                conflicts = conflicts.len(),
                "conflict detected"
            );
            let placed = adjust::adjust_with(&candidate, &all, &self.config.adjust_options())?;
            let placement = if placed.date != candidate.date {
                self.reject_duplicate(&placed.title, placed.date, &all)?;
                warn!(
                    title = %placed.title,
                    from = %candidate.date,
                    to = %placed.date,
                    "rolled over to a later date"
                );
                Placement::RolledOver {
                    from_date: candidate.date,
                }
            } else {
                Placement::Moved {
                    from_start: candidate.start_time,
                    from_end: candidate.end_time,
                }
            };
            (placed, placement)
        };

        let item = store.create(DraftItem::from(placed))?;
        info!(
            id = %item.id,
            title = %item.title,
            date = %item.date,
            start = %item.start_time,
            end = %item.end_time,
            "scheduled"
        );

        Ok(Scheduled {
            item,
            placement,
            conflicts,
        })
    }

    fn reject_duplicate(&self, title: &str, date: NaiveDate, all: &[ScheduleItem]) -> Result<()> {
        if self.config.reject_duplicate_titles
            && all.iter().any(|e| e.date == date && e.title == title)
        {
            return Err(SlotError::DuplicateTitle(title.to_string()));
        }
        Ok(())
    }

    /// Accept an AI-suggested activity for `today`. Same pipeline as [`Self::schedule`].
    pub fn accept_suggestion(&self, suggestion: NewActivity, today: NaiveDate) -> Result<Scheduled> {
        debug!(title = %suggestion.title, "accepting suggestion");
        self.schedule(suggestion, today)
    }

    /// Flip `completed` on the item with `id` and return the updated item.
    pub fn toggle_completed(&self, id: &str) -> Result<ScheduleItem> {
        let mut store = self.lock();
        let _guard = store.lock_exclusive()?;
        let mut item = store
            .list(None)?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        item.completed = !item.completed;
        store.update(item.clone())?;
        Ok(item)
    }

    pub fn remove(&self, id: &str) -> Result<()> {
        let mut store = self.lock();
        let _guard = store.lock_exclusive()?;
        store.remove(id)?;
        Ok(())
    }

    /// Items sorted by date and start time, optionally restricted to `date`.
    pub fn agenda(&self, date: Option<NaiveDate>) -> Result<Vec<ScheduleItem>> {
        let items = self.lock().list(date)?;
        Ok(ordering::sort_by_time(&items))
    }

    /// Free slots on `date` of at least `min_duration_minutes`.
    pub fn free_slots(&self, date: NaiveDate, min_duration_minutes: u32) -> Result<Vec<FreeSlot>> {
        let items = self.lock().list(Some(date))?;
        Ok(freebusy::find_free_slots(&items, date)
            .into_iter()
            .filter(|slot| slot.duration_minutes >= min_duration_minutes)
            .collect())
    }

    /// Reminders still due after `now`, using the configured lead time.
    pub fn pending_reminders(&self, now: NaiveDateTime) -> Result<Vec<Reminder>> {
        let items = self.lock().list(None)?;
        Ok(reminder::pending_reminders(
            &items,
            now,
            self.config.reminder_lead_minutes,
        ))
    }
}
