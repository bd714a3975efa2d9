//! Relevance ranking of document sections against a query
//!
//! Each candidate's content is turned into a term-frequency vector and
//! compared to the query vector by cosine similarity. Results are sorted by
//! descending score with a stable sort, so candidates with equal scores keep
//! their input order.

use crate::nlp::tokenizer::Tokenizer;
use crate::types::{RankConfig, Section, SimilarityResult};
use crate::vector::{cosine_similarity, TermVector};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

/// Prefix of every explanation string
pub const EXPLANATION_PREFIX: &str = "Related through shared concepts: ";

/// Ranks sections by lexical similarity to a query
#[derive(Debug, Clone)]
pub struct RelevanceRanker {
    config: RankConfig,
    tokenizer: Tokenizer,
}

impl Default for RelevanceRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl RelevanceRanker {
    /// Create a new ranker with default config
    pub fn new() -> Self {
        Self::with_config(RankConfig::default())
    }

    /// Create with custom config
    pub fn with_config(config: RankConfig) -> Self {
        let tokenizer = Tokenizer::similarity().with_min_length(config.min_term_length);
        Self { config, tokenizer }
    }

    /// The active configuration
    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Cosine similarity of two texts in [0, 1]
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        cosine_similarity(&self.tokenizer.term_vector(a), &self.tokenizer.term_vector(b))
    }

    /// Rank `candidates` by similarity to `query`, highest first.
    ///
    /// Empty queries or contents score 0; they are never rejected.
    pub fn rank(&self, query: &str, candidates: &[Section]) -> Vec<SimilarityResult> {
        let query_terms = self.tokenizer.tokenize(query);
        let query_vector = TermVector::from_terms(query_terms.iter().cloned());

        let mut scored: Vec<(usize, f64, String)> = candidates
            .iter()
            .enumerate()
            .map(|(idx, section)| {
                let content_vector = self.tokenizer.term_vector(&section.content);
                let similarity = cosine_similarity(&query_vector, &content_vector);
                let explanation = explain(
                    &query_terms,
                    &content_vector,
                    self.config.max_explanation_terms,
                );
                trace!(section = %section.id, similarity, "scored section");
                (idx, similarity * 100.0, explanation)
            })
            .collect();

        // Stable: equal scores keep input order
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let limit = if self.config.top_n == 0 {
            usize::MAX
        } else {
            self.config.top_n
        };

        let results: Vec<SimilarityResult> = scored
            .into_iter()
            .filter(|(_, score, _)| *score >= self.config.min_score)
            .take(limit)
            .enumerate()
            .map(|(i, (idx, score, explanation))| SimilarityResult {
                section: candidates[idx].clone(),
                relevance_score: score,
                explanation,
                rank: i + 1,
            })
            .collect();

        debug!(
            query_terms = query_vector.len(),
            candidates = candidates.len(),
            returned = results.len(),
            "ranked sections"
        );

        results
    }

    /// Rank the same candidates against several queries.
    ///
    /// Queries are independent, so they are scored in parallel; the output
    /// is in query order and each entry equals `rank(query, candidates)`.
    pub fn rank_batch<S>(&self, queries: &[S], candidates: &[Section]) -> Vec<Vec<SimilarityResult>>
    where
        S: AsRef<str> + Sync,
    {
        queries
            .par_iter()
            .map(|query| self.rank(query.as_ref(), candidates))
            .collect()
    }
}

/// Render the explanation for one candidate: up to `max_terms` terms shared
/// with the query, in query order.
pub fn explain(query_terms: &[String], candidate: &TermVector, max_terms: usize) -> String {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let shared: Vec<&str> = query_terms
        .iter()
        .map(String::as_str)
        .filter(|term| candidate.contains(term) && seen.insert(*term))
        .take(max_terms)
        .collect();

    format!("{}{}", EXPLANATION_PREFIX, shared.join(", "))
}

/// Rank with the default configuration
pub fn rank_sections(query: &str, candidates: &[Section]) -> Vec<SimilarityResult> {
    RelevanceRanker::new().rank(query, candidates)
}
