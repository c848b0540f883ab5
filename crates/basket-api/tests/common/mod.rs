//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use basket_orchestration::application::ReservationPolicy;
use basket_remote::{HttpProductClient, HttpStockClient, build_client};
use basket_store::PgBasketRepository;
use basket_test_support::{FixedClock, SequenceIdGenerator, fixed_now};
use http_body_util::BodyExt;
use httpmock::MockServer;
use sqlx::PgPool;
use tower::ServiceExt;

use basket_api::routes;
use basket_api::state::AppState;

/// Build the full app router with a real `PgBasketRepository`, HTTP clients
/// pointed at `remote`, and a deterministic clock and id generator.
pub fn build_test_app(pool: PgPool, remote: &MockServer) -> Router {
    build_test_app_with_policy(pool, remote, ReservationPolicy::LeaveLine)
}

/// Same as `build_test_app` with an explicit reservation failure policy.
pub fn build_test_app_with_policy(
    pool: PgPool,
    remote: &MockServer,
    policy: ReservationPolicy,
) -> Router {
    let http = build_client(Duration::from_secs(5)).unwrap();
    let app_state = AppState::new(
        Arc::new(PgBasketRepository::new(pool)),
        Arc::new(HttpProductClient::new(http.clone(), remote.base_url())),
        Arc::new(HttpStockClient::new(http, remote.base_url())),
        Arc::new(FixedClock(fixed_now())),
        Arc::new(SequenceIdGenerator::new()),
        policy,
    );

    routes::router().with_state(app_state)
}

/// Product JSON as served by the product service.
pub fn product_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("Product {id}"),
        "code": format!("CODE-{id}"),
        "color": "red",
        "price": 9.99,
        "image_url": format!("https://img.example.com/{id}.png"),
        "type": "apparel",
        "created_at": "2026-01-15T10:00:00Z",
        "updated_at": "2026-01-15T10:00:00Z"
    })
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Count the stored lines of a basket directly in the database.
pub async fn line_count(pool: &PgPool, basket_id: &str) -> i64 {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM basket_products WHERE basket_id = $1")
        .bind(basket_id)
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}
