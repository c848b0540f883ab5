//! Basket view assembly.
//!
//! Joins a basket's lines with the product metadata resolved for them. The
//! join never fails: a line whose product was not resolved keeps its quantity
//! and simply carries no product.

use std::collections::HashMap;

use basket_core::basket::{Basket, BasketId, ProductId, UserId};
use basket_core::product::Product;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Layout used for every timestamp rendered in a response.
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Renders a timestamp with `TIMESTAMP_LAYOUT`.
#[must_use]
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_LAYOUT).to_string()
}

/// Client-facing basket representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasketView {
    /// Basket identifier.
    pub id: BasketId,
    /// Owner of the basket.
    pub user_id: UserId,
    /// One entry per basket line, in line order. Omitted from JSON when the
    /// basket has no lines.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<ProductQuantityPair>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last modification timestamp.
    pub updated_at: String,
}

/// A basket line decorated with its product, when the product was resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductQuantityPair {
    /// The resolved product, absent when the product service did not return it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductView>,
    /// Quantity on the line.
    pub quantity: i32,
}

/// Product metadata as rendered inside a basket view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    /// Product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Merchant product code.
    pub code: String,
    /// Color label.
    pub color: String,
    /// Unit price.
    pub price: f64,
    /// Image location.
    pub image_url: String,
    /// Product type label.
    #[serde(rename = "type")]
    pub product_type: String,
    /// Creation timestamp, `YYYY-MM-DDTHH:MM:SSZ` in UTC.
    pub created_at: String,
    /// Last modification timestamp, `YYYY-MM-DDTHH:MM:SSZ` in UTC.
    pub updated_at: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            code: product.code.clone(),
            color: product.color.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            product_type: product.product_type.clone(),
            created_at: format_timestamp(&product.created_at),
            updated_at: format_timestamp(&product.updated_at),
        }
    }
}

impl BasketView {
    /// Builds the view of `basket`, pairing every line with the entry of
    /// `products` that has the same id.
    #[must_use]
    pub fn new(basket: &Basket, products: &[Product]) -> Self {
        let by_id: HashMap<&ProductId, &Product> = products.iter().map(|p| (&p.id, p)).collect();

        let pairs = basket
            .lines
            .iter()
            .map(|line| ProductQuantityPair {
                product: by_id.get(&line.product_id).map(|p| ProductView::from(*p)),
                quantity: line.quantity,
            })
            .collect();

        Self {
            id: basket.id.clone(),
            user_id: basket.user_id.clone(),
            products: pairs,
            created_at: format_timestamp(&basket.created_at),
            updated_at: format_timestamp(&basket.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use basket_core::basket::BasketLine;
    use basket_test_support::{fixed_now, sample_product};

    use super::*;

    fn basket_with(lines: &[(&str, i32)]) -> Basket {
        let mut basket = Basket::empty(BasketId::from("b-1"), UserId::from("user_1"), fixed_now());
        basket.lines = lines
            .iter()
            .zip(1..)
            .map(|((product_id, quantity), line_id)| BasketLine {
                line_id,
                basket_id: BasketId::from("b-1"),
                product_id: ProductId::from(*product_id),
                quantity: *quantity,
                created_at: fixed_now(),
                updated_at: fixed_now(),
            })
            .collect();
        basket
    }

    #[test]
    fn test_pairs_follow_line_order_with_quantities() {
        // Arrange
        let basket = basket_with(&[("p2", 5), ("p1", 2), ("p3", 1)]);
        let products = vec![
            sample_product("p1"),
            sample_product("p2"),
            sample_product("p3"),
        ];

        // Act
        let view = BasketView::new(&basket, &products);

        // Assert
        let ids: Vec<&str> = view
            .products
            .iter()
            .map(|pair| pair.product.as_ref().unwrap().id.as_str())
            .collect();
        let quantities: Vec<i32> = view.products.iter().map(|pair| pair.quantity).collect();
        assert_eq!(ids, vec!["p2", "p1", "p3"]);
        assert_eq!(quantities, vec![5, 2, 1]);
    }

    #[test]
    fn test_unresolved_product_keeps_quantity_without_product() {
        let basket = basket_with(&[("p1", 2), ("ghost", 7)]);

        let view = BasketView::new(&basket, &[sample_product("p1")]);

        assert_eq!(view.products.len(), 2);
        assert!(view.products[0].product.is_some());
        assert!(view.products[1].product.is_none());
        assert_eq!(view.products[1].quantity, 7);
    }

    #[test]
    fn test_duplicate_lines_each_get_the_product() {
        let basket = basket_with(&[("p1", 1), ("p1", 4)]);

        let view = BasketView::new(&basket, &[sample_product("p1")]);

        assert_eq!(view.products.len(), 2);
        assert!(view.products.iter().all(|pair| pair.product.is_some()));
    }

    #[test]
    fn test_timestamps_use_the_shared_layout() {
        let basket = basket_with(&[("p1", 1)]);

        let view = BasketView::new(&basket, &[sample_product("p1")]);

        assert_eq!(view.created_at, "2026-01-15T10:00:00Z");
        assert_eq!(view.updated_at, "2026-01-15T10:00:00Z");
        let product = view.products[0].product.as_ref().unwrap();
        assert_eq!(product.created_at, "2026-01-15T10:00:00Z");
    }

    #[test]
    fn test_json_shape_omits_empty_products_and_absent_product() {
        let empty = BasketView::new(&basket_with(&[]), &[]);
        let json = serde_json::to_value(&empty).unwrap();
        assert!(json.get("products").is_none());
        assert_eq!(json["id"], "b-1");
        assert_eq!(json["user_id"], "user_1");

        let unresolved = BasketView::new(&basket_with(&[("ghost", 3)]), &[]);
        let json = serde_json::to_value(&unresolved).unwrap();
        assert_eq!(json["products"][0], serde_json::json!({ "quantity": 3 }));
    }

    #[test]
    fn test_product_type_serializes_as_type() {
        let view = BasketView::new(&basket_with(&[("p1", 1)]), &[sample_product("p1")]);

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["products"][0]["product"]["type"], "apparel");
        assert_eq!(json["products"][0]["product"]["image_url"], "https://img.example.com/p1.png");
    }

    #[test]
    fn test_product_view_serializes_every_field() {
        let view = ProductView::from(&sample_product("p1"));

        let json = serde_json::to_value(&view).unwrap();

        let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "code",
                "color",
                "created_at",
                "id",
                "image_url",
                "name",
                "price",
                "type",
                "updated_at"
            ]
        );
    }
}
