//! Summary metrics over a filtered review subset

use reviewpulse_formats::ReviewRecord;
use serde::Serialize;

/// Headline metrics for the current filtered subset
///
/// An empty subset is not an error: the optional metrics become `None`
/// ("not available") and the shares are exactly 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    /// Row count of the filtered subset
    pub total_count: usize,
    /// Arithmetic mean of the non-null ratings
    pub average_rating: Option<f64>,
    /// Median of the helpful-vote counts
    pub median_helpful_votes: Option<f64>,
    /// Percentage of rows rated 4 or 5
    pub positive_share: f64,
    /// Percentage of rows rated 1 or 2
    pub negative_share: f64,
}

impl ReviewSummary {
    pub fn compute(records: &[ReviewRecord]) -> Self {
        let total_count = records.len();

        let ratings: Vec<i64> = records.iter().filter_map(|r| r.rating).collect();
        let average_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<i64>() as f64 / ratings.len() as f64)
        };

        let median_helpful_votes = if total_count == 0 {
            None
        } else {
            let mut votes: Vec<u64> = records.iter().map(|r| r.helpful_votes).collect();
            votes.sort_unstable();
            Some(median_of_sorted(&votes))
        };

        let share = |count: usize| {
            if total_count == 0 {
                0.0
            } else {
                count as f64 / total_count as f64 * 100.0
            }
        };
        let positive = records.iter().filter(|r| r.is_positive()).count();
        let negative = records.iter().filter(|r| r.is_negative()).count();

        Self {
            total_count,
            average_rating,
            median_helpful_votes,
            positive_share: share(positive),
            negative_share: share(negative),
        }
    }

    /// One-line text summary for the dashboard banner
    pub fn banner(&self) -> String {
        if self.total_count == 0 {
            return "Filtered summary: 0 reviews for the selected filters.".to_string();
        }
        let average = match self.average_rating {
            Some(avg) => format!("{:.2}", avg),
            None => "N/A".to_string(),
        };
        format!(
            "Filtered summary: {} reviews, average rating {}. \
             Positive reviews (4-5): {:.1}%, negative reviews (1-2): {:.1}%.",
            fmt_count(self.total_count),
            average,
            self.positive_share,
            self.negative_share
        )
    }
}

fn median_of_sorted(sorted: &[u64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
    }
}

/// Thousands-separated count for the banner
fn fmt_count(n: usize) -> String {
    n.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(std::str::from_utf8)
        .collect::<Result<Vec<&str>, _>>()
        .unwrap_or_default()
        .join(",")
}
