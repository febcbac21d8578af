//! Most-recent-first ordering for the sample table

use reviewpulse_formats::ReviewRecord;
use std::cmp::Ordering;

/// Indices into `records` ordered newest first; rows without a date sort
/// last, original order preserved within ties
pub fn sample_most_recent(records: &[ReviewRecord]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| {
        match (records[a].published_date, records[b].published_date) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    order
}
