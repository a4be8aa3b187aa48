//! # slot-engine
//!
//! Deterministic, day-scoped scheduling for a personal wellness schedule.
//!
//! Given a proposed activity and the activities already committed for its date,
//! the engine decides whether it conflicts and, if so, pushes it forward to the
//! next free slot, rolling over to the following day when the current day is full.
//! Each day is an independent 1440-minute arena and intervals are half-open.
//!
//! ## Quick start
//!
//! ```rust
//! use slot_engine::{adjust, clock::parse_date, NewActivity};
//!
//! let day = parse_date("2026-03-01").unwrap();
//! let meeting = NewActivity::new("Standup", "09:00", "10:00").unwrap().on(day).into_item("a".into());
//! let walk = NewActivity::new("Walk", "09:30", "10:30").unwrap().on(day).provisional();
//!
//! let moved = adjust(&walk, &[meeting]).unwrap();
//! assert_eq!(moved.start_time.to_string(), "10:00");
//! assert_eq!(moved.end_time.to_string(), "11:00");
//! ```
//!
//! ## Modules
//!
//! - [`clock`] — `HH:MM` parsing, minute offsets, half-open overlap, date helpers
//! - [`item`] — `ScheduleItem` and the id-less shapes it is created from
//! - [`conflict`] — Find overlapping (candidate, existing) pairs on the same date
//! - [`adjust`] — Greedy forward displacement with next-day rollover
//! - [`ordering`] — Stable date/time sort and per-date grouping
//! - [`freebusy`] — Free slots within a day
//! - [`reminder`] — When a reminder for an item is due
//! - [`store`] — Persistence collaborator trait with memory and JSON-file stores
//! - [`scheduler`] — Serialized detect -> adjust -> persist orchestration
//! - [`config`] — Scheduler tunables
//! - [`error`] — Error types

pub mod adjust;
pub mod clock;
pub mod config;
pub mod conflict;
pub mod error;
pub mod freebusy;
pub mod item;
pub mod ordering;
pub mod reminder;
pub mod scheduler;
pub mod store;

pub use adjust::{adjust, adjust_with, adjust_with_policy, AdjustOptions, RolloverPolicy};
pub use clock::{overlaps, to_minutes, ClockTime};
pub use config::SchedulerConfig;
pub use conflict::{find_conflicts, Conflict};
pub use error::{SlotError, StoreError};
pub use item::{DraftItem, NewActivity, ScheduleItem};
pub use ordering::{group_by_date, sort_by_time};
pub use scheduler::{Placement, Scheduled, Scheduler};
pub use store::{JsonFileStore, MemoryStore, ScheduleStore};
