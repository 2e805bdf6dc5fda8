//! # Data Loader Crate
//!
//! This crate loads the movie catalog into memory and exposes it as an
//! ordered, read-only table.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Item, Catalog, ItemId)
//! - **parser**: Parse the catalog CSV into items
//! - **index**: Build and validate the Catalog
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_csv(Path::new("data/movies.csv"))?;
//!
//! let avatar = catalog.find_by_title("Avatar").unwrap();
//! let same = catalog.get_item(avatar.id).unwrap();
//! println!("{} is item #{}", same.title, same.id);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{Catalog, Item, ItemId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();

        assert_eq!(catalog.len(), 0);
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_insert_item_assigns_row_ids() {
        let mut catalog = Catalog::new();

        let first = catalog.insert_item(Item::new("Heat"));
        let second = catalog.insert_item(Item {
            id: 42, // ignored, ids follow insertion order
            title: "Collateral".to_string(),
            director: Some("Michael Mann".to_string()),
            ..Default::default()
        });

        assert_eq!(first, 0);
        assert_eq!(second, 1);
        assert_eq!(catalog.get_item(1).unwrap().id, 1);
        assert_eq!(
            catalog.get_item(1).unwrap().director.as_deref(),
            Some("Michael Mann")
        );
    }

    #[test]
    fn test_find_by_title_returns_first_duplicate() {
        let catalog: Catalog = ["The Thing", "Heat", "The Thing"]
            .into_iter()
            .map(Item::new)
            .collect();

        assert_eq!(catalog.find_by_title("The Thing").unwrap().id, 0);
        assert_eq!(catalog.titles().collect::<Vec<_>>(), ["The Thing", "Heat", "The Thing"]);
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::new();

        // Querying non-existent data should return None
        assert!(catalog.get_item(999).is_none());
        assert!(catalog.find_by_title("Nothing").is_none());
    }
}
