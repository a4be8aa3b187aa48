//! Detect overlapping schedule items on the same calendar date.
//!
//! Performs pairwise comparison between candidate and existing items to find time
//! overlaps. Items on different dates never conflict, and adjacent items (where one
//! ends exactly when another starts) are NOT conflicts.

use crate::item::ScheduleItem;

/// A detected conflict between a candidate and an existing item.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub candidate: ScheduleItem,
    pub existing: ScheduleItem,
    pub overlap_minutes: u32,
}

/// Find all conflicting (candidate, existing) pairs.
///
/// Results follow input order: candidates in the outer loop, existing items in the
/// inner loop. A candidate appears once per existing item it overlaps.
/// The overlap duration is `min(ends) - max(starts)`.
pub fn find_conflicts(candidates: &[ScheduleItem], existing: &[ScheduleItem]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for candidate in candidates {
        for other in existing {
            if candidate.conflicts_with(other) {
                let overlap_start = candidate.start_time.max(other.start_time).minutes();
                let overlap_end = candidate.end_time.min(other.end_time).minutes();

                conflicts.push(Conflict {
                    candidate: candidate.clone(),
                    existing: other.clone(),
                    overlap_minutes: overlap_end.saturating_sub(overlap_start),
                });
            }
        }
    }

    conflicts
}

/// True if `item` overlaps any existing item on its date.
pub fn has_conflict(item: &ScheduleItem, existing: &[ScheduleItem]) -> bool {
    existing.iter().any(|other| item.conflicts_with(other))
}
