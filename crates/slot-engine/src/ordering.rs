//! Display ordering and per-date grouping of schedule items.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::item::ScheduleItem;

/// Stable sort by date, then start time. Equal keys keep their input order.
pub fn sort_by_time(items: &[ScheduleItem]) -> Vec<ScheduleItem> {
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| (item.date, item.start_time));
    sorted
}

/// Bucket items by date, keys ascending, insertion order kept within a bucket.
pub fn group_by_date(items: &[ScheduleItem]) -> BTreeMap<NaiveDate, Vec<ScheduleItem>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<ScheduleItem>> = BTreeMap::new();
    for item in items {
        grouped.entry(item.date).or_default().push(item.clone());
    }
    grouped
}

/// The items that belong to `date`, in input order.
pub fn items_on(date: NaiveDate, items: &[ScheduleItem]) -> Vec<ScheduleItem> {
    items.iter().filter(|item| item.date == date).cloned().collect()
}
