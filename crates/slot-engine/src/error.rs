//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid duration: {start}-{end} does not describe a positive interval")]
    InvalidDuration { start: String, end: String },

    #[error("Schedule item title must not be empty")]
    EmptyTitle,

    #[error("No free slot for '{title}' within {days} day(s) of {date}")]
    NoFreeSlot {
        title: String,
        date: String,
        days: u32,
    },

    #[error("An item titled '{0}' is already scheduled on that date")]
    DuplicateTitle(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures raised by [`crate::store::ScheduleStore`] implementations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No schedule item with id {0}")]
    NotFound(String),

    #[error("Stored item {id} is invalid: {reason}")]
    InvalidRecord { id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, SlotError>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;
