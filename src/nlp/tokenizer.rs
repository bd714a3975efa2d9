//! Term tokenization
//!
//! Turns free text into the normalized term sequence that feeds the
//! frequency vectors. Normalization is deliberately simple: lowercase,
//! punctuation becomes whitespace, short tokens and stopwords are dropped.
//! Word order is preserved so callers can rely on "first seen" ordering.

use crate::nlp::stopwords::StopwordFilter;
use crate::vector::TermVector;

/// Minimum term length used when matching sections against a query
pub const SIMILARITY_MIN_LENGTH: usize = 3;

/// Minimum term length used when extracting graph concepts
pub const CONCEPT_MIN_LENGTH: usize = 4;

/// A lowercase, punctuation-stripping tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// Minimum token length (in characters) to keep
    min_token_length: usize,
    stopwords: StopwordFilter,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a new tokenizer with the similarity-matching threshold
    pub fn new() -> Self {
        Self {
            min_token_length: SIMILARITY_MIN_LENGTH,
            stopwords: StopwordFilter::new(),
        }
    }

    /// Tokenizer used by the relevance ranker (terms of 3+ characters)
    pub fn similarity() -> Self {
        Self::new()
    }

    /// Tokenizer used by the concept graph (terms of 4+ characters)
    pub fn concepts() -> Self {
        Self::new().with_min_length(CONCEPT_MIN_LENGTH)
    }

    /// Set minimum token length
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_token_length = min_length;
        self
    }

    /// The configured minimum token length
    pub fn min_length(&self) -> usize {
        self.min_token_length
    }

    /// Tokenize text into filtered terms, in input order
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        normalize(text)
            .split_whitespace()
            .filter(|token| token.chars().count() >= self.min_token_length)
            .filter(|token| !self.stopwords.is_stopword(token))
            .map(str::to_string)
            .collect()
    }

    /// Tokenize and count in one step
    pub fn term_vector(&self, text: &str) -> TermVector {
        TermVector::from_terms(self.tokenize(text))
    }
}

/// Lowercase `text` and replace everything that is not a letter, digit or
/// whitespace with a space.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}
