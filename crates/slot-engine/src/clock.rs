//! Clock-time and calendar-date arithmetic.
//!
//! Every schedule item lives inside a single day, treated as an independent
//! 1440-minute arena. Times are parsed once, up front, into [`ClockTime`] so that
//! malformed strings never reach interval arithmetic.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

/// Minutes in one calendar day.
pub const DAY_MINUTES: u32 = 24 * 60;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A time of day, stored as minutes since midnight.
///
/// Valid values are `00:00` through `23:59`, plus the `24:00` end-of-day bound
/// ([`ClockTime::END_OF_DAY`]) which may only close an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    pub const END_OF_DAY: ClockTime = ClockTime(DAY_MINUTES);

    /// Parse a strict 24-hour `HH:MM` string.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTime` unless the input is two digits, a colon and
    /// two digits, with hours in `00..=23` and minutes in `00..=59` (or exactly `24:00`).
    pub fn parse(time: &str) -> Result<Self> {
        let invalid = || SlotError::InvalidTime(time.to_string());

        let (hh, mm) = time.split_once(':').ok_or_else(invalid)?;
        let well_formed = hh.len() == 2
            && mm.len() == 2
            && hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(invalid());
        }

        let hours: u32 = hh.parse().map_err(|_| invalid())?;
        let minutes: u32 = mm.parse().map_err(|_| invalid())?;

        if hours == 24 && minutes == 0 {
            return Ok(Self::END_OF_DAY);
        }
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        Ok(ClockTime(hours * 60 + minutes))
    }

    /// Build a clock time from a minute offset, `None` past `24:00`.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        (minutes <= DAY_MINUTES).then_some(ClockTime(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    pub fn is_end_of_day(self) -> bool {
        self.0 == DAY_MINUTES
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        ClockTime::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = SlotError;

    fn try_from(value: String) -> Result<Self> {
        ClockTime::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(time: ClockTime) -> Self {
        time.to_string()
    }
}

/// Convert an `HH:MM` string to its minute offset within the day.
pub fn to_minutes(time: &str) -> Result<u32> {
    ClockTime::parse(time).map(ClockTime::minutes)
}

/// Half-open interval overlap test on minute offsets.
///
/// `[start_a, end_a)` and `[start_b, end_b)` overlap iff neither ends at or before
/// the other's start. Intervals that merely touch do not overlap.
pub fn overlaps(start_a: u32, end_a: u32, start_b: u32, end_b: u32) -> bool {
    !(end_a <= start_b || end_b <= start_a)
}

/// String form of [`overlaps`].
///
/// # Errors
/// Returns `SlotError::InvalidTime` for the first malformed argument.
pub fn times_overlap(start_a: &str, end_a: &str, start_b: &str, end_b: &str) -> Result<bool> {
    Ok(overlaps(
        to_minutes(start_a)?,
        to_minutes(end_a)?,
        to_minutes(start_b)?,
        to_minutes(end_b)?,
    ))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    if date.len() != 10 {
        return Err(SlotError::InvalidDate(date.to_string()));
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| SlotError::InvalidDate(date.to_string()))
}

/// The calendar day after `date`.
pub fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.succ_opt()
        .ok_or_else(|| SlotError::InvalidDate(format!("{date} has no following day")))
}
