//! Error types for the engine crate.

use data_loader::ItemId;
use thiserror::Error;

/// Errors surfaced by the content-based engine.
///
/// Everything else the engine can run into (empty vocabulary, no title
/// match, undecodable genres) is a normal outcome, not an error.
#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    /// An item id outside the similarity matrix was requested
    #[error("Unknown item {id} (catalog has {len} items)")]
    UnknownItem { id: ItemId, len: usize },
}

pub type Result<T> = std::result::Result<T, EngineError>;
