use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ApiError, ApiResult};
use crate::summary::MovieSummary;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub movie_title: Option<String>,
    pub num_recommendations: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<MovieSummary>,
}

// Handlers

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "movies": state.service.catalog().len(),
        })),
    )
}

pub async fn recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> ApiResult<Json<RecommendResponse>> {
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))?;

    let title = request
        .movie_title
        .filter(|title| !title.is_empty())
        .ok_or_else(|| ApiError::InvalidInput("No movie_title provided".to_string()))?;

    let k = request.num_recommendations.unwrap_or(state.default_k);
    if k == 0 {
        return Err(ApiError::InvalidInput(
            "num_recommendations must be at least 1".to_string(),
        ));
    }

    // Ranking is CPU-bound; keep it off the async workers
    let service = state.service.clone();
    let recommendations = tokio::task::spawn_blocking(move || service.recommend(&title, k))
        .await
        .map_err(|e| ApiError::Internal(format!("Recommendation task failed: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("{:#}", e)))?;

    Ok(Json(RecommendResponse { recommendations }))
}
