//! Test stock clients.

use std::sync::Mutex;

use async_trait::async_trait;
use basket_core::basket::ProductId;
use basket_core::error::RemoteError;
use basket_core::stock::{Stock, StockClient};

use crate::clock::fixed_now;

/// A stock client with a fixed availability answer that records every
/// availability query and reservation it receives.
#[derive(Debug)]
pub struct StubStockClient {
    available: bool,
    fail_reservations: bool,
    checks: Mutex<Vec<(ProductId, i32)>>,
    reservations: Mutex<Vec<(ProductId, i32)>>,
}

impl StubStockClient {
    fn with(available: bool, fail_reservations: bool) -> Self {
        Self {
            available,
            fail_reservations,
            checks: Mutex::new(Vec::new()),
            reservations: Mutex::new(Vec::new()),
        }
    }

    /// Every product is available and every reservation succeeds.
    #[must_use]
    pub fn available() -> Self {
        Self::with(true, false)
    }

    /// No product is available.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::with(false, false)
    }

    /// Every product is available but every reservation fails.
    #[must_use]
    pub fn failing_reservations() -> Self {
        Self::with(true, true)
    }

    /// Returns a snapshot of the availability queries received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn checks(&self) -> Vec<(ProductId, i32)> {
        self.checks.lock().unwrap().clone()
    }

    /// Returns a snapshot of the reservation attempts received, failed ones
    /// included.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn reservations(&self) -> Vec<(ProductId, i32)> {
        self.reservations.lock().unwrap().clone()
    }
}

#[async_trait]
impl StockClient for StubStockClient {
    async fn is_available(
        &self,
        product_id: &ProductId,
        quantity: i32,
    ) -> Result<bool, RemoteError> {
        self.checks
            .lock()
            .unwrap()
            .push((product_id.clone(), quantity));
        Ok(self.available)
    }

    async fn reserve(&self, product_id: &ProductId, quantity: i32) -> Result<Stock, RemoteError> {
        self.reservations
            .lock()
            .unwrap()
            .push((product_id.clone(), quantity));
        if self.fail_reservations {
            return Err(RemoteError::Status {
                status: 400,
                code: Some(30_003),
                message: "Stock could not be reserved.".to_owned(),
            });
        }
        Ok(Stock {
            id: format!("stock-{product_id}"),
            product_id: product_id.clone(),
            quantity: 100,
            reserved_quantity: quantity,
            created_at: fixed_now(),
            updated_at: fixed_now(),
        })
    }
}

/// A stock client whose every call fails at the transport level.
#[derive(Debug)]
pub struct FailingStockClient;

#[async_trait]
impl StockClient for FailingStockClient {
    async fn is_available(
        &self,
        _product_id: &ProductId,
        _quantity: i32,
    ) -> Result<bool, RemoteError> {
        Err(RemoteError::Transport("connection refused".into()))
    }

    async fn reserve(&self, _product_id: &ProductId, _quantity: i32) -> Result<Stock, RemoteError> {
        Err(RemoteError::Transport("connection refused".into()))
    }
}
