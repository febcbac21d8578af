//! Typed review record produced by the loader

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single normalized review row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Publication timestamp, timezone-naive; `None` when the source value
    /// did not parse
    pub published_date: Option<NaiveDateTime>,
    /// Star rating; `None` when the source value did not parse
    pub rating: Option<i64>,
    /// Helpful-vote count; 0 when the source value was missing or unparseable
    pub helpful_votes: u64,
    /// Publishing platform; "Unknown" when missing
    pub published_platform: String,
    /// Review type; "Unknown" when missing
    #[serde(rename = "type")]
    pub review_type: String,
    pub title: Option<String>,
    pub text: Option<String>,
    /// 1-based data row number in the source file
    pub source_line: usize,
}

impl ReviewRecord {
    /// Rating is in the positive band {4, 5}
    pub fn is_positive(&self) -> bool {
        matches!(self.rating, Some(4) | Some(5))
    }

    /// Rating is in the negative band {1, 2}
    pub fn is_negative(&self) -> bool {
        matches!(self.rating, Some(1) | Some(2))
    }

    /// First day of the publication month, for trend grouping
    pub fn month(&self) -> Option<NaiveDate> {
        self.published_date
            .and_then(|ts| NaiveDate::from_ymd_opt(ts.year(), ts.month(), 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(rating: Option<i64>, date: Option<&str>) -> ReviewRecord {
        ReviewRecord {
            published_date: date.map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .unwrap()
                    .and_hms_opt(12, 30, 0)
                    .unwrap()
            }),
            rating,
            helpful_votes: 0,
            published_platform: "Web".to_string(),
            review_type: "review".to_string(),
            title: None,
            text: None,
            source_line: 1,
        }
    }

    #[test]
    fn test_sentiment_bands() {
        assert!(record(Some(5), None).is_positive());
        assert!(record(Some(4), None).is_positive());
        assert!(!record(Some(3), None).is_positive());
        assert!(record(Some(2), None).is_negative());
        assert!(record(Some(1), None).is_negative());
        assert!(!record(Some(3), None).is_negative());
        assert!(!record(None, None).is_positive());
        assert!(!record(None, None).is_negative());
    }

    #[test]
    fn test_month_truncation() {
        let r = record(Some(5), Some("2024-03-17"));
        assert_eq!(r.month(), NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(record(Some(5), None).month(), None);
    }
}
