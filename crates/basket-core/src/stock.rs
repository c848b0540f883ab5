//! Stock service port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::basket::ProductId;
use crate::error::RemoteError;

/// Stock counters for one product, as reported by the stock service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Stock record identifier.
    pub id: String,
    /// The product these counters belong to.
    pub product_id: ProductId,
    /// Units on hand.
    pub quantity: i32,
    /// Units already earmarked for baskets.
    pub reserved_quantity: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Availability queries and reservations against the stock service.
///
/// The stock service is the final arbiter of concurrent stock access; callers
/// perform no locking of their own.
#[async_trait]
pub trait StockClient: Send + Sync {
    /// Returns whether `quantity` units of the product are available.
    async fn is_available(&self, product_id: &ProductId, quantity: i32)
    -> Result<bool, RemoteError>;

    /// Reserves `quantity` units of the product.
    async fn reserve(&self, product_id: &ProductId, quantity: i32) -> Result<Stock, RemoteError>;
}
