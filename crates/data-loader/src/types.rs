//! Core domain types for the movie catalog.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - `ItemId`, the row position that doubles as the key into the similarity matrix
//! - `Item`, one catalog entry with its free-text metadata
//! - `Catalog`, the in-memory table with lookups by id and by title

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Stable identifier of a catalog item.
///
/// This is the item's row position in the loaded catalog. It is assigned once
/// by `Catalog::insert_item` and never re-derived, so the same number indexes
/// the feature corpus, the similarity matrix and the ranker output.
pub type ItemId = usize;

// =============================================================================
// Item
// =============================================================================

/// One movie in the catalog.
///
/// Free-text fields are `Option<String>`: an empty cell in the source table
/// is `None`, never an empty string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    /// Either plain text ("Action Adventure") or a list-like encoding
    /// ("[{'id': 28, 'name': 'Action'}]"), depending on the dataset export
    pub genres: Option<String>,
    pub keywords: Option<String>,
    pub tagline: Option<String>,
    pub cast: Option<String>,
    pub director: Option<String>,
    pub overview: Option<String>,
    /// Date-like string, usually `YYYY-MM-DD`
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
}

impl Item {
    /// Create an item with only a title set.
    ///
    /// The id is overwritten when the item is inserted into a `Catalog`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

// =============================================================================
// Catalog - The In-Memory Table
// =============================================================================

/// Ordered, in-memory table of items.
///
/// Items are stored in id order, so `items[id].id == id` always holds.
/// Titles are not required to be unique; `find_by_title` returns the first
/// row carrying the title.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) items: Vec<Item>,
    pub(crate) title_index: HashMap<String, ItemId>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            title_index: HashMap::new(),
        }
    }

    /// Append an item, assigning it the next `ItemId`.
    pub fn insert_item(&mut self, mut item: Item) -> ItemId {
        let id = self.items.len();
        item.id = id;
        self.title_index.entry(item.title.clone()).or_insert(id);
        self.items.push(item);
        id
    }

    /// Get an item by id
    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Get the first item whose title matches exactly
    pub fn find_by_title(&self, title: &str) -> Option<&Item> {
        self.title_index.get(title).and_then(|&id| self.items.get(id))
    }

    /// All items in id order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All titles in id order
    pub fn titles(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(|item| item.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Item> for Catalog {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for item in iter {
            catalog.insert_item(item);
        }
        catalog
    }
}
