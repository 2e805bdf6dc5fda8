//! HTTP API tests.
//!
//! These drive the axum router directly with `oneshot`, no socket needed.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use data_loader::{Catalog, Item};
use engine::ResolverConfig;
use server::api::{create_router, AppState};
use server::RecommendationService;

fn movie(title: &str, genres: &str, keywords: &str, director: &str) -> Item {
    Item {
        genres: Some(genres.to_string()),
        keywords: Some(keywords.to_string()),
        director: Some(director.to_string()),
        ..Item::new(title)
    }
}

fn create_test_app() -> Router {
    let catalog: Catalog = vec![
        Item {
            tagline: Some("A Los Angeles crime saga".to_string()),
            release_date: Some("1995-12-15".to_string()),
            vote_average: Some(7.7),
            ..movie("Heat", "Crime Drama", "heist robbery", "Michael Mann")
        },
        Item {
            genres: Some("[{'id': 80, 'name': 'Crime'}, {'id': 18, 'name': 'Drama'}]".to_string()),
            release_date: Some("2004-08-05".to_string()),
            vote_average: Some(7.2),
            ..movie("Collateral", "", "hitman taxi", "Michael Mann")
        },
        movie("Finding Nemo", "Animation Family", "fish ocean", "Andrew Stanton"),
        movie("WALL-E", "Animation Family", "robot space", "Andrew Stanton"),
        movie("Toy Story", "Animation Family Comedy", "toys", "John Lasseter"),
        movie("Ronin", "Action Crime", "heist mercenary", "John Frankenheimer"),
        movie("Amélie", "Comedy Romance", "paris cafe", "Jean-Pierre Jeunet"),
    ]
    .into_iter()
    .collect();

    let service = RecommendationService::new(Arc::new(catalog), ResolverConfig::default());
    create_router(AppState::new(service, 5))
}

async fn post_recommend(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/recommend")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["movies"], 7);
}

#[tokio::test]
async fn test_recommend_returns_summaries() {
    let (status, body) = post_recommend(
        create_test_app(),
        json!({ "movie_title": "Heat", "num_recommendations": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 2);

    let collateral = &recommendations[0];
    assert_eq!(collateral["title"], "Collateral");
    assert_eq!(collateral["genres"], "Crime, Drama");
    assert_eq!(collateral["year"], "2004");
    assert_eq!(collateral["rating"], 7.2);
    assert_eq!(collateral["director"], "Michael Mann");
    assert_eq!(collateral["tagline"], "");
    assert_eq!(collateral["overview"], "");
}

#[tokio::test]
async fn test_default_number_of_recommendations() {
    let (status, body) = post_recommend(create_test_app(), json!({ "movie_title": "WALL-E" })).await;

    assert_eq!(status, StatusCode::OK);
    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 5);
    assert_eq!(recommendations[0]["title"], "Finding Nemo");
    assert!(recommendations.iter().all(|r| r["title"] != "WALL-E"));
    assert_eq!(recommendations[0]["rating"], "");
}

#[tokio::test]
async fn test_unknown_title_is_empty_not_error() {
    let (status, body) = post_recommend(
        create_test_app(),
        json!({ "movie_title": "Totally Unknown Nonexistent Title 12345" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "recommendations": [] }));
}

#[tokio::test]
async fn test_missing_title_is_rejected() {
    for payload in [json!({}), json!({ "movie_title": "" }), json!({ "movie_title": null })] {
        let (status, body) = post_recommend(create_test_app(), payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No movie_title provided" }));
    }
}

#[tokio::test]
async fn test_zero_recommendations_is_rejected() {
    let (status, body) = post_recommend(
        create_test_app(),
        json!({ "movie_title": "Heat", "num_recommendations": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "num_recommendations must be at least 1");
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = create_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/recommend")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = create_test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/recommend")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
