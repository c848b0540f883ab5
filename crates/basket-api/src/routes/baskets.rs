//! Routes for baskets.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use basket_core::basket::{BasketId, ProductId, UserId};
use basket_core::error::DomainError;
use basket_orchestration::application::BasketView;
use basket_orchestration::domain::commands;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /baskets.
#[derive(Debug, Deserialize)]
pub struct CreateBasketRequest {
    /// The future owner of the basket.
    #[serde(default)]
    pub user_id: String,
}

/// Request body for POST /baskets/{basket_id}.
#[derive(Debug, Deserialize)]
pub struct AddProductRequest {
    /// The user claiming ownership of the basket.
    #[serde(default)]
    pub user_id: String,
    /// The product to add.
    #[serde(default)]
    pub product_id: String,
    /// The requested quantity.
    #[serde(default)]
    pub quantity: i32,
}

/// One entry of a bulk request.
#[derive(Debug, Deserialize)]
pub struct BulkProductEntry {
    /// The product to add.
    pub id: String,
    /// The requested quantity.
    #[serde(default)]
    pub quantity: i32,
}

/// Request body for POST /baskets/{basket_id}/bulk.
#[derive(Debug, Deserialize)]
pub struct AddBulkProductRequest {
    /// The user claiming ownership of the basket.
    #[serde(default)]
    pub user_id: String,
    /// Lines to append, in order.
    #[serde(default)]
    pub products: Vec<BulkProductEntry>,
}

/// POST /baskets
#[instrument(skip_all)]
async fn create_basket(
    State(state): State<AppState>,
    request: Result<Json<CreateBasketRequest>, JsonRejection>,
) -> Result<Json<BasketView>, ApiError> {
    let Json(request) = request?;
    if request.user_id.is_empty() {
        return Err(DomainError::Validation("user_id must not be empty".to_owned()).into());
    }

    let command = commands::CreateBasket {
        correlation_id: Uuid::new_v4(),
        user_id: UserId::from(request.user_id),
    };

    info!(correlation_id = %command.correlation_id, "handling create_basket command");

    let view = state.orchestrator.create_basket(&command).await?;
    Ok(Json(view))
}

/// POST /baskets/{basket_id}
#[instrument(skip_all, fields(basket_id = %basket_id))]
async fn add_product_to_basket(
    State(state): State<AppState>,
    Path(basket_id): Path<String>,
    request: Result<Json<AddProductRequest>, JsonRejection>,
) -> Result<Json<BasketView>, ApiError> {
    let Json(request) = request?;
    let command = commands::AddProductToBasket {
        correlation_id: Uuid::new_v4(),
        basket_id: BasketId::from(basket_id),
        user_id: UserId::from(request.user_id),
        product_id: ProductId::from(request.product_id),
        quantity: request.quantity,
    };

    info!(correlation_id = %command.correlation_id, "handling add_product_to_basket command");

    let view = state.orchestrator.add_product_to_basket(&command).await?;
    Ok(Json(view))
}

/// GET /baskets/{basket_id}
#[instrument(skip_all, fields(basket_id = %basket_id))]
async fn get_basket(
    State(state): State<AppState>,
    Path(basket_id): Path<String>,
) -> Result<Json<BasketView>, ApiError> {
    let view = state
        .orchestrator
        .get_basket_by_id(&BasketId::from(basket_id))
        .await?;
    Ok(Json(view))
}

/// POST /baskets/{basket_id}/bulk
#[instrument(skip_all, fields(basket_id = %basket_id))]
async fn add_bulk_product_to_basket(
    State(state): State<AppState>,
    Path(basket_id): Path<String>,
    request: Result<Json<AddBulkProductRequest>, JsonRejection>,
) -> Result<Json<BasketView>, ApiError> {
    let Json(request) = request?;
    let command = commands::AddBulkProductToBasket {
        correlation_id: Uuid::new_v4(),
        basket_id: BasketId::from(basket_id),
        user_id: UserId::from(request.user_id),
        products: request
            .products
            .into_iter()
            .map(|entry| commands::BulkLine {
                product_id: ProductId::from(entry.id),
                quantity: entry.quantity,
            })
            .collect(),
    };

    info!(
        correlation_id = %command.correlation_id,
        lines = command.products.len(),
        "handling add_bulk_product_to_basket command"
    );

    let view = state.orchestrator.add_bulk_product_to_basket(&command).await?;
    Ok(Json(view))
}

/// Returns the router for baskets.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/baskets", post(create_basket))
        .route(
            "/baskets/{basket_id}",
            post(add_product_to_basket).get(get_basket),
        )
        .route("/baskets/{basket_id}/bulk", post(add_bulk_product_to_basket))
}
