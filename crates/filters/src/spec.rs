//! Filter specification and conjunctive predicate application
//!
//! A [`FilterSpec`] is the tuple of user-chosen predicate parameters: date
//! range, platform set, type set, and rating range. Records must satisfy
//! every predicate (logical AND). Comparisons against null fields yield
//! false, so rows with a null date or rating are excluded by the
//! corresponding range predicate.

use chrono::{Months, NaiveDate, NaiveDateTime};
use reviewpulse_formats::ReviewRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// User-chosen predicate parameters for one recompute pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Inclusive lower bound on the publication date
    pub start_date: NaiveDate,
    /// Inclusive upper bound on the publication date
    pub end_date: NaiveDate,
    /// Allowed platforms (membership test)
    pub platforms: BTreeSet<String>,
    /// Allowed review types (membership test)
    pub types: BTreeSet<String>,
    /// Inclusive lower bound on the rating
    pub rating_min: i64,
    /// Inclusive upper bound on the rating
    pub rating_max: i64,
}

impl FilterSpec {
    /// First-load defaults derived from the dataset: the last 12 months of
    /// data (clamped to the dataset range), every platform and type present,
    /// and the full observed rating range.
    ///
    /// An empty or fully-null dataset falls back to an epoch-day range and
    /// 1–5 ratings so the dashboard can still start.
    pub fn defaults_for(records: &[ReviewRecord]) -> Self {
        let dates: Vec<NaiveDate> = records
            .iter()
            .filter_map(|r| r.published_date.map(|ts| ts.date()))
            .collect();
        let min_date = dates.iter().min().copied().unwrap_or_default();
        let max_date = dates.iter().max().copied().unwrap_or_default();
        let year_back = max_date
            .checked_sub_months(Months::new(12))
            .unwrap_or(min_date);

        let ratings: Vec<i64> = records.iter().filter_map(|r| r.rating).collect();

        Self {
            start_date: min_date.max(year_back),
            end_date: max_date,
            platforms: records
                .iter()
                .map(|r| r.published_platform.clone())
                .collect(),
            types: records.iter().map(|r| r.review_type.clone()).collect(),
            rating_min: ratings.iter().min().copied().unwrap_or(1),
            rating_max: ratings.iter().max().copied().unwrap_or(5),
        }
    }

    /// Return a spec with a valid date range, swapping start/end when they
    /// arrived reversed. The flag tells the caller to surface a notice.
    pub fn normalized(&self) -> (FilterSpec, bool) {
        if self.start_date > self.end_date {
            debug!(
                "Swapping reversed date range {} > {}",
                self.start_date, self.end_date
            );
            let mut fixed = self.clone();
            std::mem::swap(&mut fixed.start_date, &mut fixed.end_date);
            (fixed, true)
        } else {
            (self.clone(), false)
        }
    }

    /// Conjunction of all four predicates
    pub fn matches(&self, record: &ReviewRecord) -> bool {
        opt_date_between(record.published_date, self.start_date, self.end_date)
            && self.platforms.contains(&record.published_platform)
            && self.types.contains(&record.review_type)
            && opt_between(record.rating, self.rating_min, self.rating_max)
    }

    /// Produce the independently readable subset of matching records.
    /// The source slice is never mutated; an empty result is not an error.
    pub fn apply(&self, records: &[ReviewRecord]) -> Vec<ReviewRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Inclusive range test with null propagation: `None` is never in range
pub fn opt_between<T: PartialOrd>(value: Option<T>, min: T, max: T) -> bool {
    match value {
        Some(v) => v >= min && v <= max,
        None => false,
    }
}

/// Inclusive date-range test on the timestamp's calendar date; a null
/// timestamp is never in range
pub fn opt_date_between(value: Option<NaiveDateTime>, start: NaiveDate, end: NaiveDate) -> bool {
    match value {
        Some(ts) => {
            let date = ts.date();
            date >= start && date <= end
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn review(date: Option<&str>, rating: Option<i64>, platform: &str, kind: &str) -> ReviewRecord {
        ReviewRecord {
            published_date: date.map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .unwrap()
                    .and_time(NaiveTime::MIN)
            }),
            rating,
            helpful_votes: 0,
            published_platform: platform.to_string(),
            review_type: kind.to_string(),
            title: None,
            text: None,
            source_line: 0,
        }
    }

    fn dataset() -> Vec<ReviewRecord> {
        vec![
            review(Some("2023-02-10"), Some(5), "Web", "review"),
            review(Some("2024-01-05"), Some(1), "App", "review"),
            review(Some("2024-03-20"), None, "Web", "question"),
            review(None, Some(3), "Web", "review"),
        ]
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_defaults_clamp_to_last_year_of_data() {
        let spec = FilterSpec::defaults_for(&dataset());

        // Max date is 2024-03-20; twelve months back is still after 2023-02-10
        assert_eq!(spec.start_date, date("2023-03-20"));
        assert_eq!(spec.end_date, date("2024-03-20"));
        assert_eq!(spec.rating_min, 1);
        assert_eq!(spec.rating_max, 5);
        assert!(spec.platforms.contains("Web"));
        assert!(spec.platforms.contains("App"));
        assert!(spec.types.contains("question"));
    }

    #[test]
    fn test_defaults_use_dataset_minimum_when_short() {
        let records = vec![
            review(Some("2024-01-01"), Some(2), "Web", "review"),
            review(Some("2024-03-01"), Some(4), "Web", "review"),
        ];
        let spec = FilterSpec::defaults_for(&records);

        // Less than a year of data: range starts at the dataset minimum
        assert_eq!(spec.start_date, date("2024-01-01"));
        assert_eq!(spec.end_date, date("2024-03-01"));
        assert_eq!(spec.rating_min, 2);
        assert_eq!(spec.rating_max, 4);
    }

    #[test]
    fn test_normalized_swaps_reversed_range() {
        let mut spec = FilterSpec::defaults_for(&dataset());
        spec.start_date = date("2024-03-01");
        spec.end_date = date("2024-01-01");

        let (fixed, swapped) = spec.normalized();
        assert!(swapped);
        assert_eq!(fixed.start_date, date("2024-01-01"));
        assert_eq!(fixed.end_date, date("2024-03-01"));

        let (unchanged, swapped) = fixed.normalized();
        assert!(!swapped);
        assert_eq!(unchanged, fixed);
    }

    #[test]
    fn test_swap_never_changes_the_subset() {
        let records = dataset();
        let mut reversed = FilterSpec::defaults_for(&records);
        reversed.start_date = date("2024-03-20");
        reversed.end_date = date("2023-03-20");

        let (fixed, _) = reversed.normalized();
        let mut forward = reversed.clone();
        forward.start_date = date("2023-03-20");
        forward.end_date = date("2024-03-20");

        assert_eq!(fixed.apply(&records), forward.apply(&records));
    }

    #[test]
    fn test_null_fields_are_excluded_by_range_predicates() {
        let records = dataset();
        let spec = FilterSpec {
            start_date: date("2023-01-01"),
            end_date: date("2024-12-31"),
            platforms: ["Web", "App"].iter().map(|s| s.to_string()).collect(),
            types: ["review", "question"].iter().map(|s| s.to_string()).collect(),
            rating_min: 1,
            rating_max: 5,
        };

        let filtered = spec.apply(&records);
        // Null rating fails the rating range; null date fails the date range
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.rating.is_some()));
        assert!(filtered.iter().all(|r| r.published_date.is_some()));
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let records = dataset();
        let spec = FilterSpec::defaults_for(&records);

        let once = spec.apply(&records);
        let twice = spec.apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_predicates_compose_conjunctively() {
        let records = dataset();
        let spec = FilterSpec {
            start_date: date("2023-01-01"),
            end_date: date("2024-02-01"),
            platforms: ["Web"].iter().map(|s| s.to_string()).collect(),
            types: ["review"].iter().map(|s| s.to_string()).collect(),
            rating_min: 4,
            rating_max: 5,
        };

        let filtered = spec.apply(&records);
        for r in &records {
            let by_each = opt_date_between(r.published_date, spec.start_date, spec.end_date)
                && spec.platforms.contains(&r.published_platform)
                && spec.types.contains(&r.review_type)
                && opt_between(r.rating, spec.rating_min, spec.rating_max);
            assert_eq!(by_each, filtered.contains(r));
        }
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let records = dataset();
        let mut spec = FilterSpec::defaults_for(&records);
        spec.platforms.clear();

        assert!(spec.apply(&records).is_empty());
    }

    #[test]
    fn test_empty_dataset_defaults() {
        let spec = FilterSpec::defaults_for(&[]);
        assert!(spec.start_date <= spec.end_date);
        assert_eq!((spec.rating_min, spec.rating_max), (1, 5));
        assert!(spec.platforms.is_empty());
    }

    #[test]
    fn test_end_date_is_inclusive_of_the_whole_day() {
        let record = ReviewRecord {
            published_date: date("2024-03-20").and_hms_opt(18, 45, 0),
            ..review(None, Some(5), "Web", "review")
        };
        assert!(opt_date_between(
            record.published_date,
            date("2024-03-01"),
            date("2024-03-20")
        ));
    }
}
