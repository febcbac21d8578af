//! Aggregation engine for the review dashboard
//!
//! Derived summary metrics, grouped counts, trend series, and text corpora
//! computed from a filtered subset of reviews. Everything here is ephemeral
//! and recomputed per render cycle; all functions degrade gracefully on
//! empty input instead of erroring.

pub mod corpus;
pub mod histogram;
pub mod sample;
pub mod summary;
pub mod trend;

pub use corpus::{keyword_corpus, Sentiment, EMPTY_CORPUS_PLACEHOLDER};
pub use histogram::{platform_histogram, rating_histogram, PlatformBucket, RatingBucket};
pub use sample::sample_most_recent;
pub use summary::ReviewSummary;
pub use trend::{monthly_trend, MonthCount};
