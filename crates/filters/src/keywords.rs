//! Keyword extraction for the review text panels
//!
//! Tokenizes a review corpus, folds accents, drops stopwords, and ranks the
//! remaining words by frequency. The stopword set is a standard English
//! list plus a fixed domain exclusion list, so panels surface what reviewers
//! said rather than what they reviewed.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Standard English stopwords
const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't",
    "did", "didn't", "do", "does", "doesn't", "doing", "don't", "down", "during", "each",
    "else", "ever", "few", "for", "from", "further", "get", "had", "hadn't", "has", "hasn't",
    "have", "haven't", "having", "he", "he'd", "he'll", "he's", "hence", "her", "here",
    "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "however", "http",
    "i", "i'd", "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's",
    "its", "itself", "just", "let's", "like", "me", "more", "most", "mustn't", "my",
    "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or", "other",
    "otherwise", "ought", "our", "ours", "ourselves", "out", "over", "own", "same", "shall",
    "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "since", "so",
    "some", "such", "than", "that", "that's", "the", "their", "theirs", "them",
    "themselves", "then", "there", "there's", "therefore", "these", "they", "they'd",
    "they'll", "they're", "they've", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've",
    "were", "weren't", "what", "what's", "when", "when's", "where", "where's", "which",
    "while", "who", "who's", "whom", "why", "why's", "with", "won't", "would", "wouldn't",
    "www", "you", "you'd", "you'll", "you're", "you've", "your", "yours", "yourself",
    "yourselves",
];

/// Domain terms excluded from every keyword panel
pub const DOMAIN_STOPWORDS: &[&str] = &[
    "airline",
    "flight",
    "flights",
    "plane",
    "airlines",
    "seat",
    "seats",
    "crew",
    "singapore",
    "air",
    "sia",
    "singaporeairlines",
];

static WORD_REGEX: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    // Two-plus characters, apostrophes allowed inside a word
    WORD_REGEX.get_or_init(|| Regex::new(r"\w[\w']+").expect("Failed to compile word regex"))
}

/// Word-frequency extractor with a configurable stopword set
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stopwords: HashSet<String>,
}

impl KeywordExtractor {
    /// Create an extractor with the standard English and domain stopwords
    pub fn new() -> Self {
        let stopwords = ENGLISH_STOPWORDS
            .iter()
            .chain(DOMAIN_STOPWORDS)
            .map(|s| s.to_string())
            .collect();
        Self { stopwords }
    }

    /// Create an extractor with additional stopwords on top of the defaults
    pub fn with_extra_stopwords<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut extractor = Self::new();
        extractor
            .stopwords
            .extend(extra.into_iter().map(|s| s.into().to_lowercase()));
        extractor
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Count non-stopword tokens in `text`
    ///
    /// Text is lowercased and NFKD-folded so "Café" and "cafe" count
    /// together. Purely numeric tokens are ignored.
    pub fn frequencies(&self, text: &str) -> HashMap<String, usize> {
        let folded: String = text
            .nfkd()
            .filter(|c| !is_combining_mark(*c))
            .collect::<String>()
            .to_lowercase();

        let mut counts = HashMap::new();
        for m in word_regex().find_iter(&folded) {
            let word = m.as_str();
            if self.is_stopword(word) || word.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// The `limit` most frequent keywords, count descending, then
    /// alphabetical so equal counts render in a stable order
    pub fn top_keywords(&self, text: &str, limit: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> = self.frequencies(text).into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}
