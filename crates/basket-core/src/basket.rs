//! The basket model: identifiers, baskets, and basket lines.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns `true` if the identifier is empty.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Opaque basket identifier, generated when the basket is created.
    BasketId
);

string_id!(
    /// Identifier of the user owning a basket.
    UserId
);

string_id!(
    /// Identifier of a product in the product service.
    ProductId
);

/// A user-owned collection of product lines.
///
/// The id never changes after creation and a basket belongs to exactly one
/// user. Lines are kept in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Basket {
    /// Basket identifier.
    pub id: BasketId,
    /// Owner of the basket.
    pub user_id: UserId,
    /// Product lines, oldest first.
    pub lines: Vec<BasketLine>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Basket {
    /// Builds a basket with no lines, stamped with `now`.
    #[must_use]
    pub fn empty(id: BasketId, user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            lines: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns `true` if the basket belongs to `user_id`.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Product ids referenced by the basket's lines, first occurrence order,
    /// without repeats.
    #[must_use]
    pub fn product_ids(&self) -> Vec<ProductId> {
        let mut ids: Vec<ProductId> = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            if !ids.contains(&line.product_id) {
                ids.push(line.product_id.clone());
            }
        }
        ids
    }
}

/// One product/quantity association belonging to a basket.
///
/// Nothing prevents two lines for the same product: adding a product twice
/// yields two lines rather than one line with a summed quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketLine {
    /// Storage-assigned line identifier.
    pub line_id: i64,
    /// The basket this line belongs to.
    pub basket_id: BasketId,
    /// The product on this line.
    pub product_id: ProductId,
    /// Requested quantity. Expected to be positive but not enforced.
    pub quantity: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Basket row to persist on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBasket {
    /// Pre-generated basket identifier.
    pub id: BasketId,
    /// Owner of the basket.
    pub user_id: UserId,
}

/// Line to append to an existing basket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBasketLine {
    /// Target basket.
    pub basket_id: BasketId,
    /// Product to add.
    pub product_id: ProductId,
    /// Requested quantity.
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn line(line_id: i64, product_id: &str, quantity: i32) -> BasketLine {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        BasketLine {
            line_id,
            basket_id: BasketId::from("b-1"),
            product_id: ProductId::from(product_id),
            quantity,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_basket_has_no_lines_and_matching_timestamps() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();

        let basket = Basket::empty(BasketId::from("b-1"), UserId::from("user_1"), now);

        assert!(basket.lines.is_empty());
        assert_eq!(basket.created_at, now);
        assert_eq!(basket.updated_at, now);
    }

    #[test]
    fn test_is_owned_by_compares_user_ids() {
        let now = Utc::now();
        let basket = Basket::empty(BasketId::from("b-1"), UserId::from("user_1"), now);

        assert!(basket.is_owned_by(&UserId::from("user_1")));
        assert!(!basket.is_owned_by(&UserId::from("user_2")));
    }

    #[test]
    fn test_product_ids_skips_repeated_products_and_keeps_order() {
        let mut basket = Basket::empty(BasketId::from("b-1"), UserId::from("u"), Utc::now());
        basket.lines = vec![line(1, "p2", 1), line(2, "p1", 3), line(3, "p2", 4)];

        let ids = basket.product_ids();

        assert_eq!(ids, vec![ProductId::from("p2"), ProductId::from("p1")]);
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let json = serde_json::to_value(ProductId::from("p1")).unwrap();

        assert_eq!(json, serde_json::json!("p1"));
    }
}
