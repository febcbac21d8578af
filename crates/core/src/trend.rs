//! Review volume over time

use chrono::NaiveDate;
use reviewpulse_formats::ReviewRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Review count for one calendar month; `month` is the first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: NaiveDate,
    pub count: usize,
}

/// Counts of dated rows per calendar month, chronological
///
/// Rows without a publication date are skipped. Months with zero matching
/// rows are not emitted; the series has gaps rather than zero points.
pub fn monthly_trend(records: &[ReviewRecord]) -> Vec<MonthCount> {
    let mut months: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for r in records {
        if let Some(month) = r.month() {
            *months.entry(month).or_insert(0) += 1;
        }
    }
    months
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn review(date: Option<&str>) -> ReviewRecord {
        ReviewRecord {
            published_date: date.map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .unwrap()
                    .and_time(NaiveTime::MIN)
            }),
            rating: Some(4),
            helpful_votes: 0,
            published_platform: "Web".to_string(),
            review_type: "review".to_string(),
            title: None,
            text: None,
            source_line: 0,
        }
    }

    fn month(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_monthly_counts_are_chronological() {
        let records = vec![
            review(Some("2024-03-05")),
            review(Some("2024-01-20")),
            review(Some("2024-03-28")),
            review(Some("2024-01-02")),
        ];
        let trend = monthly_trend(&records);

        assert_eq!(
            trend,
            vec![
                MonthCount { month: month("2024-01-01"), count: 2 },
                MonthCount { month: month("2024-03-01"), count: 2 },
            ]
        );
    }

    #[test]
    fn test_gap_months_are_not_filled() {
        let records = vec![review(Some("2024-01-10")), review(Some("2024-04-10"))];
        let trend = monthly_trend(&records);

        // February and March have no rows and therefore no points
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].month, month("2024-01-01"));
        assert_eq!(trend[1].month, month("2024-04-01"));
    }

    #[test]
    fn test_undated_rows_are_skipped() {
        let records = vec![review(None), review(Some("2024-02-14"))];
        let trend = monthly_trend(&records);

        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].count, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(monthly_trend(&[]).is_empty());
    }
}
