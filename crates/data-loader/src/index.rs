//! Catalog building and validation.
//!
//! Turns parsed rows into a `Catalog`, assigning each item its `ItemId`
//! in row order, and checks the result is usable before the engine
//! vectorizes it.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::path::Path;
use std::time::Instant;
use tracing::info;

impl Catalog {
    /// Load the movie catalog from a CSV file.
    ///
    /// This is the main entry point for loading data.
    ///
    /// Steps:
    /// 1. Parse the CSV rows into items
    /// 2. Insert them in row order (this assigns the `ItemId`s)
    /// 3. Validate the catalog
    pub fn load_from_csv(path: &Path) -> Result<Self> {
        info!("Loading movie catalog from {:?}", path);
        let start = Instant::now();

        let items = parser::parse_catalog(path)?;
        let catalog: Catalog = items.into_iter().collect();
        catalog.validate()?;

        info!(
            "Loaded {} movies ({} distinct titles) in {:.2?}",
            catalog.len(),
            catalog.title_index.len(),
            start.elapsed()
        );
        Ok(catalog)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - The catalog is not empty
    /// - Every item's id matches its position
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(DataLoadError::ValidationError(
                "catalog contains no titled items".to_string(),
            ));
        }
        if let Some(item) = self
            .items
            .iter()
            .enumerate()
            .find_map(|(position, item)| (item.id != position).then_some(item))
        {
            return Err(DataLoadError::ValidationError(format!(
                "item '{}' has id {} out of row order",
                item.title, item.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_catalog() {
        let catalog = Catalog::new();
        assert!(matches!(
            catalog.validate(),
            Err(DataLoadError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_accepts_inserted_items() {
        let catalog: Catalog = ["Alien", "Aliens"].into_iter().map(Item::new).collect();
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_load_dataset() {
        // This test requires the actual dataset file
        // Place the TMDB export at ../../data/movies.csv
        let path = Path::new("../../data/movies.csv");

        if path.exists() {
            let catalog = Catalog::load_from_csv(path).unwrap();
            assert!(!catalog.is_empty());
            assert!(catalog.find_by_title("Avatar").is_some());
        }
    }
}
