//! Term-frequency vectors and cosine similarity
//!
//! A [`TermVector`] counts how often each term occurs in one text unit.
//! Entries are kept in first-seen order, which gives frequency rankings a
//! stable tie-breaker without a second pass over the text.

use rustc_hash::FxHashMap;

/// Mapping from term to occurrence count within one text unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermVector {
    /// Maps term -> position in `entries`
    index: FxHashMap<String, usize>,
    /// (term, count) in order of first occurrence
    entries: Vec<(String, u32)>,
}

impl TermVector {
    /// Create an empty vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a sequence of terms
    pub fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut vector = Self::new();
        for term in terms {
            vector.add(term);
        }
        vector
    }

    /// Record one occurrence of `term`
    pub fn add(&mut self, term: String) {
        if let Some(&idx) = self.index.get(&term) {
            self.entries[idx].1 += 1;
            return;
        }

        self.index.insert(term.clone(), self.entries.len());
        self.entries.push((term, 1));
    }

    /// Occurrence count of `term` (0 if absent)
    pub fn count(&self, term: &str) -> u32 {
        self.index
            .get(term)
            .map(|&idx| self.entries[idx].1)
            .unwrap_or(0)
    }

    /// Whether `term` occurs at least once
    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no term was counted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of occurrences across all terms
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c as u64).sum()
    }

    /// Iterate (term, count) pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(t, c)| (t.as_str(), *c))
    }

    /// Sum of squared counts
    pub fn squared_magnitude(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, c)| {
                let c = *c as f64;
                c * c
            })
            .sum()
    }

    /// Euclidean norm of the count vector
    pub fn magnitude(&self) -> f64 {
        self.squared_magnitude().sqrt()
    }

    /// Dot product with another vector.
    ///
    /// Terms missing from either side contribute zero, so iterating the
    /// smaller vector covers the union.
    pub fn dot(&self, other: &TermVector) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        small
            .iter()
            .map(|(term, count)| count as f64 * large.count(term) as f64)
            .sum()
    }

    /// The `k` most frequent terms, highest count first.
    ///
    /// Equal counts keep first-seen order.
    pub fn top_terms(&self, k: usize) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(k);
        ranked
    }
}

/// Cosine similarity of two term vectors, in [0, 1].
///
/// Returns 0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let sq_a = a.squared_magnitude();
    let sq_b = b.squared_magnitude();

    if sq_a == 0.0 || sq_b == 0.0 {
        return 0.0;
    }

    // One square root over the integer product keeps a self-match at exactly 1
    (a.dot(b) / (sq_a * sq_b).sqrt()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(terms: &[&str]) -> TermVector {
        TermVector::from_terms(terms.iter().map(|t| t.to_string()))
    }

    #[test]
    fn test_counts_and_order() {
        let v = vector(&["beta", "alpha", "beta", "gamma"]);

        assert_eq!(v.len(), 3);
        assert_eq!(v.total(), 4);
        assert_eq!(v.count("beta"), 2);
        assert_eq!(v.count("missing"), 0);

        let order: Vec<&str> = v.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["beta", "alpha", "gamma"]);
    }

    #[test]
    fn test_magnitude_and_dot() {
        let a = vector(&["x", "x", "y"]);
        let b = vector(&["x", "z"]);

        assert!((a.magnitude() - 5.0_f64.sqrt()).abs() < 1e-10);
        assert!((a.dot(&b) - 2.0).abs() < 1e-10);
        assert!((b.dot(&a) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_identical_is_one() {
        let a = vector(&["machine", "learning", "machine"]);

        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_identical_is_exactly_one() {
        for terms in [
            &["alpha", "beta"][..],
            &["alpha", "beta", "gamma"][..],
            &["machine", "learning", "machine", "vision", "data"][..],
        ] {
            let a = vector(terms);
            let b = vector(terms);
            assert_eq!(cosine_similarity(&a, &b), 1.0);
        }
    }

    #[test]
    fn test_cosine_disjoint_is_zero() {
        let a = vector(&["machine"]);
        let b = vector(&["poetry"]);

        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_zero_magnitude() {
        let empty = TermVector::new();
        let a = vector(&["machine"]);

        assert_eq!(cosine_similarity(&empty, &a), 0.0);
        assert_eq!(cosine_similarity(&a, &empty), 0.0);
        assert_eq!(cosine_similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn test_cosine_partial_overlap() {
        let a = vector(&["alpha", "beta"]);
        let b = vector(&["alpha", "gamma"]);

        // dot = 1, |a| = |b| = sqrt(2)
        assert!((cosine_similarity(&a, &b) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_top_terms_ties_keep_first_seen() {
        let v = vector(&["gamma", "alpha", "beta", "alpha", "beta", "delta"]);
        let top = v.top_terms(3);

        assert_eq!(top, vec![("alpha", 2), ("beta", 2), ("gamma", 1)]);
    }

    #[test]
    fn test_top_terms_larger_than_len() {
        let v = vector(&["alpha"]);

        assert_eq!(v.top_terms(20).len(), 1);
        assert!(TermVector::new().top_terms(5).is_empty());
    }
}
