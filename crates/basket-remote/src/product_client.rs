//! HTTP adapter for the product service.

use async_trait::async_trait;
use basket_core::basket::ProductId;
use basket_core::error::RemoteError;
use basket_core::product::{Product, ProductClient};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::http::{decode, join, transport_error};

#[derive(Serialize)]
struct BulkRequest<'a> {
    ids: &'a [ProductId],
}

#[derive(Deserialize)]
struct BulkResponse {
    #[serde(default)]
    products: Vec<Product>,
}

/// `ProductClient` backed by the product service REST API.
#[derive(Debug, Clone)]
pub struct HttpProductClient {
    client: Client,
    base_url: String,
}

impl HttpProductClient {
    /// Creates a client talking to the product service at `base_url`.
    #[must_use]
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ProductClient for HttpProductClient {
    #[instrument(skip_all, fields(product_id = %product_id))]
    async fn get_by_id(&self, product_id: &ProductId) -> Result<Product, RemoteError> {
        let url = join(&self.base_url, &format!("/api/v1/products/{product_id}"));
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        decode(response).await
    }

    #[instrument(skip_all, fields(requested = product_ids.len()))]
    async fn get_by_ids(&self, product_ids: &[ProductId]) -> Result<Vec<Product>, RemoteError> {
        let url = join(&self.base_url, "/api/v1/products/bulk");
        let response = self
            .client
            .post(url)
            .json(&BulkRequest { ids: product_ids })
            .send()
            .await
            .map_err(|err| transport_error(&err))?;
        let body: BulkResponse = decode(response).await?;
        debug!(resolved = body.products.len(), "products resolved");
        Ok(body.products)
    }
}
