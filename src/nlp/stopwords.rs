//! Stopword filtering
//!
//! A fixed table of common English function words. There is no locale
//! support and no runtime extension: the same words are dropped by every
//! tokenizer in the crate.

use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// The closed list of English function words removed before vectorization.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    // Articles
    "the", "a", "an",
    // Conjunctions
    "and", "or", "but",
    // Prepositions
    "in", "on", "at", "to", "for", "of", "with", "by",
    // Auxiliary verbs
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "could", "should", "may", "might", "must", "can",
    // Demonstratives
    "this", "that", "these", "those",
];

fn english_set() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| ENGLISH_STOPWORDS.iter().copied().collect())
}

/// Stopword lookup over [`ENGLISH_STOPWORDS`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StopwordFilter;

impl StopwordFilter {
    /// Create a new filter
    pub fn new() -> Self {
        Self
    }

    /// Check whether `term` is a stopword.
    ///
    /// The lookup is exact; callers lowercase before asking.
    #[inline]
    pub fn is_stopword(&self, term: &str) -> bool {
        english_set().contains(term)
    }

    /// Number of words in the table
    pub fn len(&self) -> usize {
        english_set().len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        english_set().is_empty()
    }
}
