//! Sentiment text corpora for the keyword panels

use reviewpulse_formats::ReviewRecord;

/// Substituted when a sentiment band has no review text, so downstream
/// keyword extraction never sees empty input
pub const EMPTY_CORPUS_PLACEHOLDER: &str = "No data";

/// Rating band a keyword panel draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    /// Ratings 4–5
    Positive,
    /// Ratings 1–2
    Negative,
}

impl Sentiment {
    fn selects(self, record: &ReviewRecord) -> bool {
        match self {
            Sentiment::Positive => record.is_positive(),
            Sentiment::Negative => record.is_negative(),
        }
    }
}

/// Concatenation of all non-null review texts in the sentiment band, joined
/// by single spaces; the placeholder when the band is empty
pub fn keyword_corpus(records: &[ReviewRecord], sentiment: Sentiment) -> String {
    let corpus = records
        .iter()
        .filter(|r| sentiment.selects(r))
        .filter_map(|r| r.text.as_deref())
        .collect::<Vec<_>>()
        .join(" ");
    if corpus.is_empty() {
        EMPTY_CORPUS_PLACEHOLDER.to_string()
    } else {
        corpus
    }
}
