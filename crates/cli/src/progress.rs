//! Progress reporting and text reports for the CLI

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use reviewpulse_core::{MonthCount, PlatformBucket, RatingBucket, ReviewSummary};
use reviewpulse_filters::FilterSpec;

/// Byte-based progress bar for dataset scans
pub fn byte_progress_bar(total_bytes: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_bytes);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

/// Print the full dashboard report as text
#[allow(clippy::too_many_arguments)]
pub fn print_dashboard_report(
    input: &Path,
    spec: &FilterSpec,
    swapped: bool,
    summary: &ReviewSummary,
    ratings: &[RatingBucket],
    platforms: &[PlatformBucket],
    trend: &[MonthCount],
    positive_keywords: &[(String, usize)],
    negative_keywords: &[(String, usize)],
) {
    println!("\n{}", "═".repeat(60));
    println!("Review Pulse");
    println!("{}", "═".repeat(60));
    println!("Input:            {}", input.display());
    println!(
        "Date range:       {} to {}{}",
        spec.start_date,
        spec.end_date,
        if swapped {
            "  (swapped so start is before end)"
        } else {
            ""
        }
    );
    println!("Platforms:        {}", join_names(spec.platforms.iter()));
    println!("Review types:     {}", join_names(spec.types.iter()));
    println!("Rating range:     {} to {}", spec.rating_min, spec.rating_max);
    println!("{}", "─".repeat(60));
    println!("{}", summary.banner());
    println!();
    println!("Reviews:              {}", summary.total_count);
    println!(
        "Average rating:       {}",
        summary
            .average_rating
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "N/A".to_string())
    );
    println!(
        "Median helpful votes: {}",
        summary
            .median_helpful_votes
            .map(|v| format!("{:.0}", v))
            .unwrap_or_else(|| "N/A".to_string())
    );

    println!("\nRating distribution:");
    for bucket in ratings {
        let label = bucket
            .rating
            .map(|v| v.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        println!("  {:>4}  {}", label, bucket.count);
    }

    println!("\nReviews by platform:");
    for bucket in platforms {
        println!("  {:<16} {}", bucket.platform, bucket.count);
    }

    println!("\nReview volume by month:");
    for point in trend {
        println!("  {}  {}", point.month.format("%Y-%m"), point.count);
    }

    println!("\nPositive keywords (4-5): {}", join_keywords(positive_keywords));
    println!("Negative keywords (1-2): {}", join_keywords(negative_keywords));
    println!("{}", "═".repeat(60));
}

fn join_names<'a>(names: impl Iterator<Item = &'a String>) -> String {
    let joined = names.cloned().collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined
    }
}

fn join_keywords(keywords: &[(String, usize)]) -> String {
    if keywords.is_empty() {
        return "(none)".to_string();
    }
    keywords
        .iter()
        .map(|(word, count)| format!("{} ({})", word, count))
        .collect::<Vec<_>>()
        .join(", ")
}
