//! Content-based recommendation engine.
//!
//! Turns a `Catalog` into a model that answers "what is most like this
//! movie?" from item text alone.
//!
//! ## Pipeline
//! 1. `FeatureBuilder` concatenates each item's text fields into a profile
//! 2. `TfidfVectorizer` learns a vocabulary and weights the profiles
//! 3. `SimilarityMatrix` holds the cosine similarity of every pair
//! 4. `TitleResolver` maps a free-text query to an item
//! 5. `Ranker` returns the top-K items for that seed
//!
//! `ContentModel` bundles steps 1-3.

pub mod error;
pub mod features;
pub mod genres;
pub mod matchers;
pub mod model;
pub mod ranker;
pub mod resolver;
pub mod similarity;
pub mod traits;
pub mod vectorizer;

// Re-export main types
pub use error::{EngineError, Result};
pub use features::FeatureBuilder;
pub use genres::{format_genres, GenreField};
pub use matchers::{GestaltMatcher, LevenshteinMatcher};
pub use model::ContentModel;
pub use ranker::{RankedItem, Ranker};
pub use resolver::{ResolverConfig, TitleMatch, TitleResolver};
pub use similarity::{cosine_similarity, SimilarityMatrix};
pub use traits::StringSimilarity;
pub use vectorizer::{FeatureVector, TfidfModel, TfidfVectorizer};
