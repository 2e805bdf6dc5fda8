//! The content model: profiles, TF-IDF vectors and the similarity matrix,
//! built together from one catalog snapshot.

use crate::features::{FeatureBuilder, PROFILE_FIELDS};
use crate::ranker::Ranker;
use crate::similarity::SimilarityMatrix;
use crate::vectorizer::TfidfVectorizer;
use data_loader::Catalog;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Precomputed similarities for every pair of catalog items.
///
/// Immutable once built; share it behind an `Arc` to serve concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct ContentModel {
    matrix: SimilarityMatrix,
    vocabulary_len: usize,
}

impl ContentModel {
    /// Build the model for `catalog`.
    ///
    /// Cost is quadratic in the number of items; this runs once at startup.
    #[instrument(skip_all, fields(items = catalog.len()))]
    pub fn build(catalog: &Catalog) -> Self {
        let start = Instant::now();

        let corpus = FeatureBuilder::new().build_corpus(catalog);
        debug!(fields = ?PROFILE_FIELDS, "Built {} profiles", corpus.len());

        let tfidf = TfidfVectorizer::new().fit_transform(&corpus);
        let vocabulary_len = tfidf.vocabulary_len();
        if vocabulary_len == 0 && !catalog.is_empty() {
            warn!("Empty vocabulary: every similarity will be zero");
        }

        let matrix = SimilarityMatrix::from_vectors(&tfidf.vectors);

        info!(
            "Built content model: {} items, {} terms in {:?}",
            matrix.len(),
            vocabulary_len,
            start.elapsed()
        );

        Self {
            matrix,
            vocabulary_len,
        }
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn ranker(&self) -> Ranker<'_> {
        Ranker::new(&self.matrix)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary_len
    }

    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }
}
