//! HTTP adapter for the stock service.

use async_trait::async_trait;
use basket_core::basket::ProductId;
use basket_core::error::RemoteError;
use basket_core::stock::{Stock, StockClient};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::http::{decode, join, transport_error};

#[derive(Serialize)]
struct StockRequest<'a> {
    product_id: &'a ProductId,
    quantity: i32,
}

/// An absent `is_available` means unavailable.
#[derive(Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    is_available: bool,
}

/// `StockClient` backed by the stock service REST API.
#[derive(Debug, Clone)]
pub struct HttpStockClient {
    client: Client,
    base_url: String,
}

impl HttpStockClient {
    /// Creates a client talking to the stock service at `base_url`.
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl StockClient for HttpStockClient {
    #[instrument(skip_all, fields(product_id = %product_id, quantity = quantity))]
    async fn is_available(
        &self,
        product_id: &ProductId,
        quantity: i32,
    ) -> Result<bool, RemoteError> {
        let url = join(&self.base_url, "/api/v1/stocks/availability");
        let response = self
            .client
            .post(url)
            .json(&StockRequest {
                product_id,
                quantity,
            })
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        let body: AvailabilityResponse = decode(response).await?;
        Ok(body.is_available)
    }

    #[instrument(skip_all, fields(product_id = %product_id, quantity = quantity))]
    async fn reserve(&self, product_id: &ProductId, quantity: i32) -> Result<Stock, RemoteError> {
        let url = join(&self.base_url, "/api/v1/stocks/reserve");
        let response = self
            .client
            .put(url)
            .json(&StockRequest {
                product_id,
                quantity,
            })
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        decode(response).await
    }
}
