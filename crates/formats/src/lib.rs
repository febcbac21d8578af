//! Review dataset loading and normalization
//!
//! This crate reads a reviews CSV into typed, null-safe records and keeps a
//! process-wide memoized copy so the dashboard can recompute filters without
//! re-reading the file.

pub mod cache;
pub mod error;
pub mod reader;
pub mod record;

pub use cache::cached_reviews;
pub use error::{Error, Result};
pub use reader::{load_reviews, ReviewReader, REQUIRED_COLUMNS};
pub use record::ReviewRecord;
