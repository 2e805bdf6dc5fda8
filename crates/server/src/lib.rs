//! Server crate for the ReelRecs content-based recommender.
//!
//! This crate contains the recommendation service that coordinates the
//! engine, the summary records it returns, and the HTTP API in front of it.

pub mod api;
pub mod config;
pub mod error;
pub mod service;
pub mod summary;

pub use config::ServerConfig;
pub use service::{RecommendationService, Recommendations};
pub use summary::MovieSummary;
