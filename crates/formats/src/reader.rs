//! Streaming CSV reader for review datasets
//!
//! Reads a reviews table row by row with automatic gzip decompression,
//! normalizing each row into a typed [`ReviewRecord`]. Field-level parse
//! failures recover locally (null/default, row retained); structural
//! failures (missing file, missing column) abort the load.

use crate::{Error, Result, ReviewRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use csv::{ReaderBuilder, StringRecord};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Columns the input file must provide, a fixed contract with the data source
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "published_date",
    "rating",
    "helpful_votes",
    "published_platform",
    "type",
    "title",
    "text",
];

/// Header indices for the required columns
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    published_date: usize,
    rating: usize,
    helpful_votes: usize,
    published_platform: usize,
    review_type: usize,
    title: usize,
    text: usize,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| Error::MissingColumn(name.to_string()))
        };
        Ok(Self {
            published_date: find("published_date")?,
            rating: find("rating")?,
            helpful_votes: find("helpful_votes")?,
            published_platform: find("published_platform")?,
            review_type: find("type")?,
            title: find("title")?,
            text: find("text")?,
        })
    }
}

/// Streaming review reader that normalizes rows on the fly
pub struct ReviewReader<R: Read> {
    reader: csv::Reader<R>,
    columns: ColumnMap,
    row: StringRecord,
    records_read: usize,
    total_bytes: Option<u64>,
}

impl ReviewReader<Box<dyn Read>> {
    /// Open a reviews CSV file, auto-detecting gzip compression
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat("No file extension found".to_string()))?;

        match extension {
            "csv" => {
                debug!("Opening plain CSV file: {:?}", path);
                let file = File::open(path)?;
                let total_bytes = file.metadata()?.len();
                let reader: Box<dyn Read> = Box::new(file);
                Self::new(reader, Some(total_bytes))
            }
            "gz" => {
                debug!("Opening gzip-compressed CSV file: {:?}", path);
                let file = File::open(path)?;
                let reader: Box<dyn Read> = Box::new(GzDecoder::new(file));
                Self::new(reader, None)
            }
            _ => Err(Error::UnsupportedFormat(format!(
                "Unsupported file extension: {}",
                extension
            ))),
        }
    }
}

impl<R: Read> ReviewReader<R> {
    /// Create a reader from any byte source; reads and validates the header row
    pub fn new(reader: R, total_bytes: Option<u64>) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let columns = ColumnMap::from_headers(reader.headers()?)?;
        Ok(Self {
            reader,
            columns,
            row: StringRecord::new(),
            records_read: 0,
            total_bytes,
        })
    }

    /// Number of data rows normalized so far
    pub fn records_processed(&self) -> usize {
        self.records_read
    }

    /// Bytes consumed from the underlying source so far
    pub fn bytes_processed(&self) -> u64 {
        self.reader.position().byte()
    }

    /// Total file size in bytes, if known (unknown for gzip input)
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    fn normalize(&self, row: &StringRecord, source_line: usize) -> ReviewRecord {
        let cell = |idx: usize| row.get(idx).unwrap_or("").trim();

        let raw_date = cell(self.columns.published_date);
        let published_date = parse_timestamp(raw_date);
        if published_date.is_none() && !raw_date.is_empty() {
            debug!("Row {}: unparseable published_date {:?}", source_line, raw_date);
        }

        ReviewRecord {
            published_date,
            rating: parse_rating(cell(self.columns.rating)),
            helpful_votes: parse_votes(cell(self.columns.helpful_votes)),
            published_platform: fill_category(cell(self.columns.published_platform)),
            review_type: fill_category(cell(self.columns.review_type)),
            title: optional_text(cell(self.columns.title)),
            text: optional_text(cell(self.columns.text)),
            source_line,
        }
    }
}

impl<R: Read> Iterator for ReviewReader<R> {
    type Item = Result<ReviewRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_record(&mut self.row) {
                Ok(false) => return None,
                Ok(true) => {
                    self.records_read += 1;
                    let record = self.normalize(&self.row, self.records_read);
                    return Some(Ok(record));
                }
                Err(e) => {
                    if e.is_io_error() {
                        return Some(Err(Error::CsvParse(e)));
                    }
                    // Skip malformed rows and continue
                    warn!("Skipping malformed CSV row: {}", e);
                    continue;
                }
            }
        }
    }
}

/// Parse a timestamp, converting timezone-aware input to UTC and dropping
/// the zone marker. Unparseable input becomes `None`.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).naive_utc());
    }
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%z") {
        return Some(ts.with_timezone(&Utc).naive_utc());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(ts);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    None
}

/// Parse a rating as an integer; whole-number floats are accepted
fn parse_rating(raw: &str) -> Option<i64> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 => Some(f as i64),
        _ => None,
    }
}

/// Parse a helpful-vote count; missing or unparseable values become 0
fn parse_votes(raw: &str) -> u64 {
    if let Ok(n) = raw.parse::<u64>() {
        return n;
    }
    match raw.parse::<f64>() {
        Ok(f) if f >= 0.0 => f as u64,
        _ => 0,
    }
}

/// Fill a missing categorical value with the literal "Unknown"
fn fill_category(raw: &str) -> String {
    if raw.is_empty() {
        "Unknown".to_string()
    } else {
        raw.to_string()
    }
}

fn optional_text(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Load and normalize an entire review dataset
///
/// Fails with [`Error`] when the file is missing or the table cannot be
/// parsed; an input with a valid header but zero data rows is a successful
/// empty load.
pub fn load_reviews<P: AsRef<Path>>(path: P) -> Result<Vec<ReviewRecord>> {
    let path = path.as_ref();
    let mut reader = ReviewReader::open(path)?;
    let mut records = Vec::new();
    for result in reader.by_ref() {
        records.push(result?);
    }
    info!("Loaded {} reviews from {:?}", records.len(), path);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "published_date,rating,helpful_votes,published_platform,type,title,text";

    fn reader_for(data: &str) -> ReviewReader<&[u8]> {
        ReviewReader::new(data.as_bytes(), None).unwrap()
    }

    #[test]
    fn test_basic_normalization() {
        let data = format!(
            "{HEADER}\n2024-03-17 08:15:00,5,3,Web,review,Great,Loved the service\n"
        );
        let records: Vec<_> = reader_for(&data).collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.rating, Some(5));
        assert_eq!(r.helpful_votes, 3);
        assert_eq!(r.published_platform, "Web");
        assert_eq!(r.review_type, "review");
        assert_eq!(r.title.as_deref(), Some("Great"));
        assert_eq!(r.text.as_deref(), Some("Loved the service"));
        assert_eq!(r.source_line, 1);
        assert_eq!(
            r.published_date,
            NaiveDate::from_ymd_opt(2024, 3, 17)
                .unwrap()
                .and_hms_opt(8, 15, 0)
        );
    }

    #[test]
    fn test_timezone_converted_then_stripped() {
        let data = format!("{HEADER}\n2024-03-17T08:15:00+05:00,4,0,Web,review,,\n");
        let records: Vec<_> = reader_for(&data).collect::<Result<Vec<_>>>().unwrap();

        // +05:00 input lands at 03:15 UTC with no zone marker
        assert_eq!(
            records[0].published_date,
            NaiveDate::from_ymd_opt(2024, 3, 17)
                .unwrap()
                .and_hms_opt(3, 15, 0)
        );
    }

    #[test]
    fn test_bad_fields_recover_locally() {
        let data = format!("{HEADER}\nnot-a-date,not-a-number,also-bad,,,,\n");
        let records: Vec<_> = reader_for(&data).collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.published_date, None);
        assert_eq!(r.rating, None);
        assert_eq!(r.helpful_votes, 0);
        assert_eq!(r.published_platform, "Unknown");
        assert_eq!(r.review_type, "Unknown");
        assert_eq!(r.title, None);
        assert_eq!(r.text, None);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let data = format!("{HEADER}\n2024-01-01,3,1,App\n");
        let records: Vec<_> = reader_for(&data).collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].published_platform, "App");
        assert_eq!(records[0].review_type, "Unknown");
        assert_eq!(records[0].text, None);
    }

    #[test]
    fn test_float_rating_and_votes() {
        let data = format!("{HEADER}\n2024-01-01,4.0,2.0,Web,review,,\n");
        let records: Vec<_> = reader_for(&data).collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(records[0].rating, Some(4));
        assert_eq!(records[0].helpful_votes, 2);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let data = "published_date,rating,helpful_votes,published_platform,type,title\n";
        let result = ReviewReader::new(data.as_bytes(), None);
        assert!(matches!(result, Err(Error::MissingColumn(ref c)) if c == "text"));
    }

    #[test]
    fn test_load_reviews_missing_file() {
        let result = load_reviews("/nonexistent/reviews.csv");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_reviews_unsupported_extension() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().with_extension("txt");
        std::fs::write(&path, "x").unwrap();

        let result = load_reviews(&path);
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_reviews_from_file() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().with_extension("csv");
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "{HEADER}").unwrap();
            writeln!(file, "2024-01-01,5,0,Web,review,Good,Nice flight").unwrap();
            writeln!(file, "2024-02-01,1,2,App,review,Bad,Never again").unwrap();
        }

        let records = load_reviews(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].source_line, 2);

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_reviews_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().with_extension("csv.gz");
        {
            let file = File::create(&path).unwrap();
            let mut encoder = GzEncoder::new(file, Compression::default());
            writeln!(encoder, "{HEADER}").unwrap();
            writeln!(encoder, "2024-01-01,5,0,Web,review,,Compressed").unwrap();
            encoder.finish().unwrap();
        }

        let records = load_reviews(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text.as_deref(), Some("Compressed"));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_empty_table_is_not_an_error() {
        let data = format!("{HEADER}\n");
        let records: Vec<_> = reader_for(&data).collect::<Result<Vec<_>>>().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_progress_tracking() {
        let data = format!("{HEADER}\n2024-01-01,5,0,Web,review,,\n2024-01-02,4,0,Web,review,,\n");
        let mut reader = reader_for(&data);

        assert_eq!(reader.records_processed(), 0);
        let _ = reader.next();
        assert_eq!(reader.records_processed(), 1);
        assert!(reader.bytes_processed() > 0);
        let _ = reader.next();
        assert_eq!(reader.records_processed(), 2);
    }
}
