//! # Recommendation Service
//!
//! Ties the engine together behind one call:
//! 1. Resolve the query to a catalog item (fuzzy title match)
//! 2. Rank every other item by content similarity
//! 3. Turn the top K into display summaries
//!
//! The content model is built once in `new`; after that the service is
//! read-only and can be shared across request threads behind an `Arc`.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use data_loader::Catalog;
use engine::{ContentModel, ResolverConfig, StringSimilarity, TitleMatch, TitleResolver};

use crate::summary::MovieSummary;

/// The movie a query resolved to and the movies most like it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub seed: TitleMatch,
    pub movies: Vec<MovieSummary>,
}

/// Content-based recommendations for free-text titles.
pub struct RecommendationService {
    catalog: Arc<Catalog>,
    model: ContentModel,
    resolver: TitleResolver,
}

impl RecommendationService {
    /// Build the service, including the full similarity matrix.
    ///
    /// Returns only once the service can answer requests.
    pub fn new(catalog: Arc<Catalog>, config: ResolverConfig) -> Self {
        let start = Instant::now();
        let model = ContentModel::build(&catalog);
        let resolver = TitleResolver::new(&catalog, config);

        info!(
            "Recommendation service ready: {} movies in {:.2?}",
            catalog.len(),
            start.elapsed()
        );

        Self {
            catalog,
            model,
            resolver,
        }
    }

    /// Use a different string similarity for title resolution.
    pub fn with_matcher(mut self, matcher: impl StringSimilarity + 'static) -> Self {
        self.resolver = self.resolver.with_matcher(matcher);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model(&self) -> &ContentModel {
        &self.model
    }

    /// The catalog item a query resolves to, if any
    pub fn resolve(&self, query: &str) -> Option<TitleMatch> {
        self.resolver.resolve(query)
    }

    /// Closest titles to a query, best first
    pub fn close_matches(&self, query: &str) -> Vec<TitleMatch> {
        self.resolver.close_matches(query)
    }

    /// Up to `k` movies similar to the one `query` names.
    ///
    /// An empty query, an unknown title or `k == 0` yield an empty list.
    pub fn recommend(&self, query: &str, k: usize) -> Result<Vec<MovieSummary>> {
        if k == 0 {
            return Ok(Vec::new());
        }
        Ok(self
            .recommend_with_seed(query, k)?
            .map(|found| found.movies)
            .unwrap_or_default())
    }

    /// Like `recommend`, but also reports which movie the query resolved to.
    ///
    /// `None` when nothing in the catalog matches `query`.
    #[instrument(skip(self))]
    pub fn recommend_with_seed(&self, query: &str, k: usize) -> Result<Option<Recommendations>> {
        let start = Instant::now();
        let Some(seed) = self.resolver.resolve(query) else {
            info!("No movie matched '{}'", query);
            return Ok(None);
        };
        debug!(
            "Resolved '{}' to '{}' (id {}, score {:.3})",
            query, seed.title, seed.id, seed.score
        );

        let ranked = self
            .model
            .ranker()
            .top_k(seed.id, k)
            .context("Failed to rank similar movies")?;

        let summaries = ranked
            .iter()
            .map(|entry| {
                self.catalog
                    .get_item(entry.id)
                    .map(MovieSummary::from_item)
                    .with_context(|| format!("Ranked movie {} is not in the catalog", entry.id))
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Recommended {} movies for '{}' in {:.2?}",
            summaries.len(),
            seed.title,
            start.elapsed()
        );
        Ok(Some(Recommendations {
            seed,
            movies: summaries,
        }))
    }
}
