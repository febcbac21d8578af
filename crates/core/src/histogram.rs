//! Grouped counts for the distribution charts

use reviewpulse_formats::ReviewRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// One rating-distribution bucket; `rating: None` is the unrated bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingBucket {
    pub rating: Option<i64>,
    pub count: usize,
}

/// Counts per distinct rating, ascending, with the unrated bucket last
pub fn rating_histogram(records: &[ReviewRecord]) -> Vec<RatingBucket> {
    let mut rated: BTreeMap<i64, usize> = BTreeMap::new();
    let mut unrated = 0usize;
    for r in records {
        match r.rating {
            Some(value) => *rated.entry(value).or_insert(0) += 1,
            None => unrated += 1,
        }
    }

    let mut buckets: Vec<RatingBucket> = rated
        .into_iter()
        .map(|(rating, count)| RatingBucket {
            rating: Some(rating),
            count,
        })
        .collect();
    if unrated > 0 {
        buckets.push(RatingBucket {
            rating: None,
            count: unrated,
        });
    }
    buckets
}

/// One reviews-by-platform bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformBucket {
    pub platform: String,
    pub count: usize,
}

/// Counts per platform, count descending, platform name ascending on ties
pub fn platform_histogram(records: &[ReviewRecord]) -> Vec<PlatformBucket> {
    let mut grouped: BTreeMap<String, usize> = BTreeMap::new();
    for r in records {
        *grouped.entry(r.published_platform.clone()).or_insert(0) += 1;
    }

    let mut buckets: Vec<PlatformBucket> = grouped
        .into_iter()
        .map(|(platform, count)| PlatformBucket { platform, count })
        .collect();
    // BTreeMap already yields names ascending; the stable sort keeps that
    // order within equal counts
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: Option<i64>, platform: &str) -> ReviewRecord {
        ReviewRecord {
            published_date: None,
            rating,
            helpful_votes: 0,
            published_platform: platform.to_string(),
            review_type: "review".to_string(),
            title: None,
            text: None,
            source_line: 0,
        }
    }

    #[test]
    fn test_rating_histogram_with_null_bucket() {
        let records = vec![
            review(Some(5), "Web"),
            review(Some(1), "App"),
            review(None, "Web"),
        ];
        let buckets = rating_histogram(&records);

        assert_eq!(
            buckets,
            vec![
                RatingBucket { rating: Some(1), count: 1 },
                RatingBucket { rating: Some(5), count: 1 },
                RatingBucket { rating: None, count: 1 },
            ]
        );
    }

    #[test]
    fn test_rating_histogram_omits_empty_null_bucket() {
        let records = vec![review(Some(3), "Web"), review(Some(3), "Web")];
        let buckets = rating_histogram(&records);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].rating, Some(3));
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn test_platform_histogram_order() {
        let records = vec![
            review(Some(5), "Web"),
            review(Some(4), "App"),
            review(Some(3), "Web"),
            review(Some(2), "Mobile"),
        ];
        let buckets = platform_histogram(&records);

        assert_eq!(buckets[0].platform, "Web");
        assert_eq!(buckets[0].count, 2);
        // App and Mobile tie at 1 and come out alphabetically
        assert_eq!(buckets[1].platform, "App");
        assert_eq!(buckets[2].platform, "Mobile");
    }

    #[test]
    fn test_empty_input() {
        assert!(rating_histogram(&[]).is_empty());
        assert!(platform_histogram(&[]).is_empty());
    }
}
