//! Product service port.
//!
//! Products are owned by the product service. The basket service only reads
//! them to decorate basket views.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::basket::ProductId;
use crate::error::RemoteError;

/// Product metadata as published by the product service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Merchant product code.
    #[serde(default)]
    pub code: String,
    /// Color label.
    #[serde(default)]
    pub color: String,
    /// Unit price.
    #[serde(default)]
    pub price: f64,
    /// Image location.
    #[serde(alias = "imageURL", default)]
    pub image_url: String,
    /// Product type label.
    #[serde(rename = "type", default)]
    pub product_type: String,
    /// Creation timestamp in the product service. The Unix epoch when absent.
    #[serde(alias = "createdAt", default)]
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp in the product service. The Unix epoch when
    /// absent.
    #[serde(alias = "updatedAt", default)]
    pub updated_at: DateTime<Utc>,
}

/// Read access to the product service.
#[async_trait]
pub trait ProductClient: Send + Sync {
    /// Resolves a single product. A missing product is an error.
    async fn get_by_id(&self, product_id: &ProductId) -> Result<Product, RemoteError>;

    /// Resolves a batch of products in one call. Unknown ids are simply absent
    /// from the result.
    async fn get_by_ids(&self, product_ids: &[ProductId]) -> Result<Vec<Product>, RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_accepts_camel_case_keys() {
        // Arrange
        let json = r#"{
            "id": "p1",
            "name": "Shirt",
            "imageURL": "https://img/p1.png",
            "type": "apparel",
            "createdAt": "2024-03-01T10:00:00Z",
            "updatedAt": "2024-03-02T10:00:00Z"
        }"#;

        // Act
        let product: Product = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(product.image_url, "https://img/p1.png");
        assert_eq!(product.created_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
        assert_eq!(product.updated_at.to_rfc3339(), "2024-03-02T10:00:00+00:00");
    }

    #[test]
    fn test_product_without_timestamps_defaults_to_epoch() {
        let product: Product = serde_json::from_str(r#"{"id": "p1"}"#).unwrap();

        assert_eq!(product.created_at.timestamp(), 0);
        assert_eq!(product.updated_at.timestamp(), 0);
        assert!(product.name.is_empty());
    }
}
