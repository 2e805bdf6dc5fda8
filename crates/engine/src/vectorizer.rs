//! TF-IDF vectorization of the profile corpus.
//!
//! ## Algorithm
//! 1. Lowercase each profile and split it into tokens of two or more word
//!    characters (`\b\w\w+\b`)
//! 2. Learn the vocabulary: every distinct token, sorted, term index = position
//! 3. Count document frequency `df(t)` across the corpus
//! 4. `idf(t) = ln((1 + N) / (1 + df(t))) + 1`
//! 5. Weight each term of a document by `tf(t, d) * idf(t)`, where `tf` is the
//!    raw count
//!
//! Vectors are sparse: profiles use a few dozen terms out of a vocabulary of
//! tens of thousands.

use rayon::prelude::*;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Split a profile into lowercase tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// A sparse TF-IDF vector.
///
/// `entries` holds `(term_index, weight)` pairs sorted by term index, with
/// no zero weights. `dim` is the vocabulary size shared by every vector of
/// the same model.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(u32, f32)>,
    norm: f32,
}

impl FeatureVector {
    /// Build a vector from `(term_index, weight)` pairs.
    ///
    /// Pairs may come in any order; zero weights are dropped.
    pub fn from_entries(dim: usize, mut entries: Vec<(u32, f32)>) -> Self {
        entries.retain(|&(_, weight)| weight != 0.0);
        entries.sort_unstable_by_key(|&(term, _)| term);
        let norm = entries
            .iter()
            .map(|&(_, w)| f64::from(w) * f64::from(w))
            .sum::<f64>()
            .sqrt() as f32;
        Self { dim, entries, norm }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    /// Euclidean magnitude
    pub fn norm(&self) -> f32 {
        self.norm
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight of a term, zero if absent
    pub fn weight(&self, term: u32) -> f32 {
        self.entries
            .binary_search_by_key(&term, |&(t, _)| t)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Dot product by merging the two sorted entry lists.
    ///
    /// Products are summed in term order, so `a.dot(b) == b.dot(a)` exactly.
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f64;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += f64::from(wa) * f64::from(wb);
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Result of fitting the vectorizer on a corpus.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    /// Term -> term index
    pub vocabulary: HashMap<String, u32>,
    /// `idf[term_index]`
    pub idf: Vec<f32>,
    /// One vector per document, in corpus order
    pub vectors: Vec<FeatureVector>,
}

impl TfidfModel {
    pub fn vocabulary_len(&self) -> usize {
        self.idf.len()
    }
}

/// Learns a vocabulary and TF-IDF weights from a corpus of profiles.
#[derive(Debug, Default, Clone)]
pub struct TfidfVectorizer;

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self
    }

    /// Fit on `corpus` and return one vector per document, in order.
    ///
    /// An all-empty corpus yields an empty vocabulary and zero vectors.
    pub fn fit_transform<S: AsRef<str> + Sync>(&self, corpus: &[S]) -> TfidfModel {
        let documents: Vec<Vec<String>> = corpus
            .par_iter()
            .map(|doc| tokenize(doc.as_ref()))
            .collect();

        let vocabulary: HashMap<String, u32> = documents
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term.to_string(), index as u32))
            .collect();
        let dim = vocabulary.len();

        // Term counts per document
        let counts: Vec<HashMap<u32, u32>> = documents
            .par_iter()
            .map(|tokens| {
                let mut tf: HashMap<u32, u32> = HashMap::new();
                for token in tokens {
                    if let Some(&term) = vocabulary.get(token) {
                        *tf.entry(term).or_insert(0) += 1;
                    }
                }
                tf
            })
            .collect();

        let mut document_frequency = vec![0u32; dim];
        for tf in &counts {
            for &term in tf.keys() {
                document_frequency[term as usize] += 1;
            }
        }

        let n = corpus.len() as f64;
        let idf: Vec<f32> = document_frequency
            .iter()
            .map(|&df| (((1.0 + n) / (1.0 + f64::from(df))).ln() + 1.0) as f32)
            .collect();

        let vectors = counts
            .into_par_iter()
            .map(|tf| {
                let entries = tf
                    .into_iter()
                    .map(|(term, count)| (term, count as f32 * idf[term as usize]))
                    .collect();
                FeatureVector::from_entries(dim, entries)
            })
            .collect();

        TfidfModel {
            vocabulary,
            idf,
            vectors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_tokenize_drops_short_tokens_and_punctuation() {
        assert_eq!(
            tokenize("Sci-Fi: A Space Odyssey, 2001!"),
            vec!["sci", "fi", "space", "odyssey", "2001"]
        );
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_tokenize_is_unicode_aware() {
        assert_eq!(tokenize("Amélie Poulain"), vec!["amélie", "poulain"]);
    }

    #[test]
    fn test_vocabulary_is_sorted() {
        let model = TfidfVectorizer::new().fit_transform(&["zebra apple", "mango apple"]);

        assert_eq!(model.vocabulary_len(), 3);
        assert_eq!(model.vocabulary["apple"], 0);
        assert_eq!(model.vocabulary["mango"], 1);
        assert_eq!(model.vocabulary["zebra"], 2);
    }

    #[test]
    fn test_smoothed_idf() {
        let model = TfidfVectorizer::new().fit_transform(&["apple banana", "apple", "cherry"]);

        // apple appears in 2 of 3 documents, banana in 1
        let apple = model.vocabulary["apple"] as usize;
        let banana = model.vocabulary["banana"] as usize;
        assert!(approx_eq(model.idf[apple], ((4.0f64 / 3.0).ln() + 1.0) as f32));
        assert!(approx_eq(model.idf[banana], ((4.0f64 / 2.0).ln() + 1.0) as f32));
        assert!(model.idf[banana] > model.idf[apple]);
    }

    #[test]
    fn test_term_frequency_counts_repeats() {
        let model = TfidfVectorizer::new().fit_transform(&["drama drama crime", "crime"]);
        let drama = model.vocabulary["drama"];

        let weight = model.vectors[0].weight(drama);
        assert!(approx_eq(weight, 2.0 * model.idf[drama as usize]));
        assert_eq!(model.vectors[1].weight(drama), 0.0);
    }

    #[test]
    fn test_vectors_share_dimension_and_order() {
        let corpus = ["action hero", "", "romance paris"];
        let model = TfidfVectorizer::new().fit_transform(&corpus);

        assert_eq!(model.vectors.len(), 3);
        assert!(model.vectors.iter().all(|v| v.dim() == 4));
        assert!(model.vectors[1].is_zero());
        assert!(model.vectors[0].weight(model.vocabulary["hero"]) > 0.0);
        assert!(model.vectors[2].weight(model.vocabulary["paris"]) > 0.0);
    }

    #[test]
    fn test_empty_corpus_text() {
        let model = TfidfVectorizer::new().fit_transform(&["    ", "", " "]);

        assert_eq!(model.vocabulary_len(), 0);
        assert_eq!(model.vectors.len(), 3);
        assert!(model.vectors.iter().all(|v| v.is_zero() && v.norm() == 0.0));
    }

    #[test]
    fn test_dot_is_symmetric() {
        let a = FeatureVector::from_entries(10, vec![(7, 0.5), (1, 2.0), (3, 1.5)]);
        let b = FeatureVector::from_entries(10, vec![(3, 4.0), (9, 1.0), (1, 0.25)]);

        assert_eq!(a.dot(&b), b.dot(&a));
        assert!((a.dot(&b) - (2.0 * 0.25 + 1.5 * 4.0)).abs() < 1e-9);
    }
}
