use std::sync::Arc;

use crate::service::RecommendationService;

/// Shared application state
///
/// Everything in here is read-only once the server is up.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<RecommendationService>,
    /// Used when a request doesn't say how many recommendations it wants
    pub default_k: usize,
}

impl AppState {
    pub fn new(service: RecommendationService, default_k: usize) -> Self {
        Self {
            service: Arc::new(service),
            default_k,
        }
    }
}
