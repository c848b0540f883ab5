//! Test product clients.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use basket_core::basket::ProductId;
use basket_core::error::RemoteError;
use basket_core::product::{Product, ProductClient};

use crate::clock::fixed_now;

/// Builds a product with deterministic metadata derived from its id.
#[must_use]
pub fn sample_product(id: &str) -> Product {
    Product {
        id: ProductId::from(id),
        name: format!("Product {id}"),
        code: format!("CODE-{id}"),
        color: "red".to_owned(),
        price: 9.99,
        image_url: format!("https://img.example.com/{id}.png"),
        product_type: "apparel".to_owned(),
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

/// A product client answering from a fixed catalog. Unknown products yield
/// the product service's 404 error bag on single lookups and are left out of
/// bulk lookups. Bulk requests are recorded.
#[derive(Debug, Default)]
pub struct StubProductClient {
    catalog: HashMap<ProductId, Product>,
    fail_bulk: bool,
    bulk_requests: Mutex<Vec<Vec<ProductId>>>,
}

impl StubProductClient {
    /// Create a client knowing exactly `products`.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            catalog: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
            ..Self::default()
        }
    }

    /// Convenience constructor building `sample_product` entries for `ids`.
    #[must_use]
    pub fn with_ids(ids: &[&str]) -> Self {
        Self::new(ids.iter().map(|id| sample_product(id)).collect())
    }

    /// Make bulk lookups fail while single lookups keep working.
    #[must_use]
    pub fn failing_bulk_lookups(mut self) -> Self {
        self.fail_bulk = true;
        self
    }

    /// Returns a snapshot of the id batches passed to `get_by_ids`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn bulk_requests(&self) -> Vec<Vec<ProductId>> {
        self.bulk_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductClient for StubProductClient {
    async fn get_by_id(&self, product_id: &ProductId) -> Result<Product, RemoteError> {
        self.catalog
            .get(product_id)
            .cloned()
            .ok_or_else(|| RemoteError::Status {
                status: 404,
                code: Some(20_001),
                message: "Product not found.".to_owned(),
            })
    }

    async fn get_by_ids(&self, product_ids: &[ProductId]) -> Result<Vec<Product>, RemoteError> {
        self.bulk_requests.lock().unwrap().push(product_ids.to_vec());
        if self.fail_bulk {
            return Err(RemoteError::Transport("connection refused".into()));
        }
        Ok(product_ids
            .iter()
            .filter_map(|id| self.catalog.get(id).cloned())
            .collect())
    }
}

/// A product client whose every call fails at the transport level.
#[derive(Debug)]
pub struct FailingProductClient;

#[async_trait]
impl ProductClient for FailingProductClient {
    async fn get_by_id(&self, _product_id: &ProductId) -> Result<Product, RemoteError> {
        Err(RemoteError::Transport("connection refused".into()))
    }

    async fn get_by_ids(&self, _product_ids: &[ProductId]) -> Result<Vec<Product>, RemoteError> {
        Err(RemoteError::Transport("connection refused".into()))
    }
}
