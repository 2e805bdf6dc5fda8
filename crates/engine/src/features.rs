//! Feature profiles for catalog items.
//!
//! Each item is reduced to one profile string: its descriptive text fields
//! concatenated in a fixed order. The profile corpus is what the vectorizer
//! learns its vocabulary from.

use data_loader::{Catalog, Item};
use rayon::prelude::*;

/// The text fields that make up a profile, in concatenation order.
pub const PROFILE_FIELDS: [&str; 5] = ["genres", "keywords", "tagline", "cast", "director"];

/// Builds profile strings from catalog items.
#[derive(Debug, Default, Clone, Copy)]
pub struct FeatureBuilder;

impl FeatureBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the profile of a single item.
    ///
    /// Missing fields count as empty strings, so the separators are always
    /// present: an item with only genres yields `"Drama    "`.
    pub fn build_profile(&self, item: &Item) -> String {
        let fields = [
            item.genres.as_deref(),
            item.keywords.as_deref(),
            item.tagline.as_deref(),
            item.cast.as_deref(),
            item.director.as_deref(),
        ];
        fields.map(|field| field.unwrap_or("")).join(" ")
    }

    /// Build profiles for the whole catalog.
    ///
    /// The returned vector is indexed by `ItemId`: `corpus[id]` is the
    /// profile of `catalog.get_item(id)`.
    pub fn build_corpus(&self, catalog: &Catalog) -> Vec<String> {
        catalog
            .items()
            .par_iter()
            .map(|item| self.build_profile(item))
            .collect()
    }
}
