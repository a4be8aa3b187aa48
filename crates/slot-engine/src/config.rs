//! Scheduler configuration.

use serde::{Deserialize, Serialize};

use crate::adjust::{AdjustOptions, RolloverPolicy, DEFAULT_MIN_SEARCH_STEP_MINUTES};
use crate::reminder::DEFAULT_LEAD_MINUTES;

/// Tunables for [`crate::scheduler::Scheduler`]. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Minutes before an item's start that its reminder fires.
    pub reminder_lead_minutes: i64,
    /// Duration floor used to bound the number of pushes per day.
    pub min_search_step_minutes: u32,
    pub rollover: RolloverPolicy,
    /// Refuse a second item with the same title on the same date.
    pub reject_duplicate_titles: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            reminder_lead_minutes: DEFAULT_LEAD_MINUTES,
            min_search_step_minutes: DEFAULT_MIN_SEARCH_STEP_MINUTES,
            rollover: RolloverPolicy::default(),
            reject_duplicate_titles: true,
        }
    }
}

impl SchedulerConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn adjust_options(&self) -> AdjustOptions {
        AdjustOptions {
            min_search_step_minutes: self.min_search_step_minutes,
            rollover: self.rollover,
        }
    }
}
