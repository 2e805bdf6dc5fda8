//! Core traits for the title resolver.
//!
//! This module defines the `StringSimilarity` trait so the resolver can be
//! driven by different approximate string matching algorithms.

/// Scores how similar a query is to a candidate title.
///
/// Scores are in `[0, 1]`, where 1 means identical.
///
/// ## Design Note
/// - `Send + Sync` allows matchers to be shared across request threads
/// - `upper_bound` lets the resolver discard candidates with a cheap check
///   before paying for the full `similarity`
pub trait StringSimilarity: Send + Sync {
    /// Returns the name of this matcher (for logging/debugging)
    fn name(&self) -> &str;

    /// Similarity of `candidate` to `query`.
    fn similarity(&self, query: &str, candidate: &str) -> f64;

    /// A value guaranteed to be `>= similarity(query, candidate)`.
    fn upper_bound(&self, _query: &str, _candidate: &str) -> f64 {
        1.0
    }
}
