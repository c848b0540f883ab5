//! Basket service entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use basket_api::config::AppConfig;
use basket_api::error::AppError;
use basket_api::state::AppState;
use basket_api::{routes, telemetry};
use basket_core::clock::SystemClock;
use basket_core::id::UuidGenerator;
use basket_orchestration::application::ReservationPolicy;
use basket_remote::{HttpProductClient, HttpStockClient, build_client};
use basket_store::PgBasketRepository;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let otlp_endpoint = std::env::var(telemetry::OTLP_ENDPOINT_ENV).ok();
    let telemetry = telemetry::init(otlp_endpoint.as_deref())?;

    tracing::info!("Starting basket service");

    let config = AppConfig::load()?;

    // Create database connection pool.
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    let http = build_client(config.http_client_timeout)
        .map_err(|e| AppError::Config(format!("could not build HTTP client: {e}")))?;

    let reservation_policy = if config.compensate_failed_reservations {
        ReservationPolicy::Compensate
    } else {
        ReservationPolicy::LeaveLine
    };

    let app_state = AppState::new(
        Arc::new(PgBasketRepository::new(pool)),
        Arc::new(HttpProductClient::new(
            http.clone(),
            config.product_api_url.clone(),
        )),
        Arc::new(HttpStockClient::new(http, config.stock_api_url.clone())),
        Arc::new(SystemClock),
        Arc::new(UuidGenerator),
        reservation_policy,
    );

    let app = routes::with_layers(routes::router(), config.request_timeout).with_state(app_state);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!(%addr, ?reservation_policy, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    telemetry.shutdown();
    Ok(())
}
