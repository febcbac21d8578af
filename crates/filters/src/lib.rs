//! Filtering and keyword extraction for review exploration
//!
//! This crate turns user-chosen filter parameters into a filtered view of
//! the normalized dataset, and extracts frequency-ranked keywords from
//! review text for the sentiment panels.

pub mod keywords;
pub mod spec;

pub use keywords::{KeywordExtractor, DOMAIN_STOPWORDS};
pub use spec::{opt_between, opt_date_between, FilterSpec};
