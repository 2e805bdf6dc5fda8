//! Fuzzy title resolution.
//!
//! Maps a free-text query to catalog items by approximate string matching.
//! Every title is scored against the query; titles scoring at least
//! `cutoff` are candidates, ordered by score (descending) and then by
//! `ItemId` (ascending), so equal scores always resolve the same way.

use crate::matchers::GestaltMatcher;
use crate::traits::StringSimilarity;
use data_loader::{Catalog, ItemId};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Tuning knobs for `TitleResolver`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Minimum similarity in `[0, 1]` for a title to count as a match
    pub cutoff: f64,
    /// Compare lowercased query and titles
    pub ignore_case: bool,
    /// Strip surrounding whitespace from the query
    pub trim_query: bool,
    /// How many candidates `close_matches` returns at most
    pub max_matches: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cutoff: 0.6,
            ignore_case: false,
            trim_query: true,
            max_matches: 3,
        }
    }
}

/// A catalog title that matched a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleMatch {
    pub id: ItemId,
    pub title: String,
    pub score: f64,
}

/// Resolves queries to catalog items.
///
/// Holds its own copy of the titles (in `ItemId` order) so it can outlive
/// the catalog borrow it was built from.
pub struct TitleResolver {
    titles: Vec<String>,
    /// Titles as compared, lowercased when `ignore_case` is set
    keys: Vec<String>,
    config: ResolverConfig,
    matcher: Box<dyn StringSimilarity>,
}

impl TitleResolver {
    /// Create a resolver with the default gestalt matcher.
    pub fn new(catalog: &Catalog, config: ResolverConfig) -> Self {
        let titles: Vec<String> = catalog.titles().map(str::to_string).collect();
        let keys = titles
            .iter()
            .map(|title| normalize(title, config.ignore_case))
            .collect();
        Self {
            titles,
            keys,
            config,
            matcher: Box::new(GestaltMatcher::new()),
        }
    }

    /// Swap the string similarity used for scoring.
    pub fn with_matcher(mut self, matcher: impl StringSimilarity + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn matcher_name(&self) -> &str {
        self.matcher.name()
    }

    /// Best match for `query`, if any title scores at least `cutoff`.
    pub fn resolve(&self, query: &str) -> Option<TitleMatch> {
        self.scored(query).into_iter().next().map(|(id, score)| self.to_match(id, score))
    }

    /// Up to `max_matches` candidates for `query`, best first.
    pub fn close_matches(&self, query: &str) -> Vec<TitleMatch> {
        let mut scored = self.scored(query);
        scored.truncate(self.config.max_matches);
        scored
            .into_iter()
            .map(|(id, score)| self.to_match(id, score))
            .collect()
    }

    /// All titles at or above the cutoff, in resolution order.
    fn scored(&self, query: &str) -> Vec<(ItemId, f64)> {
        let query = if self.config.trim_query {
            query.trim()
        } else {
            query
        };
        if query.is_empty() {
            return Vec::new();
        }
        let query = normalize(query, self.config.ignore_case);
        let cutoff = self.config.cutoff;

        let mut scored: Vec<(ItemId, f64)> = self
            .keys
            .par_iter()
            .enumerate()
            .filter(|(_, key)| self.matcher.upper_bound(&query, key) >= cutoff)
            .filter_map(|(id, key)| {
                let score = self.matcher.similarity(&query, key);
                (score >= cutoff).then_some((id, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        debug!(
            matcher = self.matcher.name(),
            candidates = scored.len(),
            "Scored titles for '{}'",
            query
        );
        scored
    }

    fn to_match(&self, id: ItemId, score: f64) -> TitleMatch {
        TitleMatch {
            id,
            title: self.titles[id].clone(),
            score,
        }
    }
}

fn normalize(text: &str, ignore_case: bool) -> String {
    if ignore_case {
        text.to_lowercase()
    } else {
        text.to_string()
    }
}
