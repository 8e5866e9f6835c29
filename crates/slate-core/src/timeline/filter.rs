//! Post-hoc date-window filter over projected items.

use super::Item;
use crate::date::normalize_date;
use chrono::NaiveDate;

/// Retain items overlapping the requested window: the effective end date
/// (end, or start when end is missing) must not be strictly before `from`,
/// and the effective start date must not be strictly after `to`. A missing
/// bound imposes no constraint on that side.
#[must_use]
pub fn filter_items(items: Vec<Item>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Vec<Item> {
    if from.is_none() && to.is_none() {
        return items;
    }

    items
        .into_iter()
        .filter(|item| {
            let start = normalize_date(item.start.as_deref());
            let end = normalize_date(item.end.as_deref()).or(start);
            if start.is_none() && end.is_none() {
                return false;
            }
            if matches!((from, end), (Some(from), Some(end)) if end < from) {
                return false;
            }
            if matches!((to, start), (Some(to), Some(start)) if start > to) {
                return false;
            }
            true
        })
        .collect()
}
