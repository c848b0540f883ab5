//! Route modules.

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::error::timeout_error_body;
use crate::state::AppState;

pub mod baskets;
pub mod health;

/// Returns every route of the service, unlayered and without state.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(baskets::router())
}

/// Wraps `router` in the service middleware: request timeout, tracing and
/// CORS. A timed-out request is answered 408 with the JSON error body.
pub fn with_layers<S>(router: Router<S>, request_timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // TODO: Replace CorsLayer::permissive() with the allowed storefront origins once they are configurable.
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::map_response(timeout_error_body))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
