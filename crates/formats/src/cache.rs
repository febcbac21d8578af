//! Process-wide memoized dataset cache
//!
//! The normalized dataset is loaded once per source path and shared
//! read-only for the rest of the session; every interaction re-reads it
//! from here instead of re-parsing the file.

use crate::{load_reviews, Result, ReviewRecord};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::debug;

static CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<Vec<ReviewRecord>>>>> = OnceLock::new();

fn cache() -> &'static Mutex<HashMap<PathBuf, Arc<Vec<ReviewRecord>>>> {
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Fetch the normalized dataset for `path`, loading it on first access
///
/// Keys are canonicalized so different spellings of the same path share one
/// entry. Entries are never invalidated during the session; the returned
/// `Arc` is a cheap read-only handle.
pub fn cached_reviews<P: AsRef<Path>>(path: P) -> Result<Arc<Vec<ReviewRecord>>> {
    let path = path.as_ref();
    let key = path
        .canonicalize()
        .unwrap_or_else(|_| path.to_path_buf());

    let mut map = cache().lock().expect("dataset cache mutex poisoned");
    if let Some(hit) = map.get(&key) {
        debug!("Dataset cache hit: {:?}", key);
        return Ok(Arc::clone(hit));
    }

    let records = Arc::new(load_reviews(&key)?);
    map.insert(key, Arc::clone(&records));
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_dataset(rows: &[&str]) -> PathBuf {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().with_extension("csv");
        let mut file = File::create(&path).unwrap();
        writeln!(
            file,
            "published_date,rating,helpful_votes,published_platform,type,title,text"
        )
        .unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        path
    }

    #[test]
    fn test_same_path_loads_once() {
        let path = write_dataset(&["2024-01-01,5,0,Web,review,,"]);

        let first = cached_reviews(&path).unwrap();
        let second = cached_reviews(&path).unwrap();

        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file_is_not_cached() {
        assert!(cached_reviews("/nonexistent/reviews.csv").is_err());
        // A later valid load must still work
        let path = write_dataset(&["2024-01-01,4,0,App,review,,"]);
        assert_eq!(cached_reviews(&path).unwrap().len(), 1);
        std::fs::remove_file(path).unwrap();
    }
}
