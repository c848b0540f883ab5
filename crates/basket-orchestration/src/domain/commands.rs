//! Commands for the basket context.

use basket_core::basket::{BasketId, ProductId, UserId};
use basket_core::command::Command;
use uuid::Uuid;

/// Command to create an empty basket for a user.
#[derive(Debug, Clone)]
pub struct CreateBasket {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The future owner of the basket.
    pub user_id: UserId,
}

/// Command to add one product line to a basket, checking and reserving stock.
#[derive(Debug, Clone)]
pub struct AddProductToBasket {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target basket.
    pub basket_id: BasketId,
    /// The user claiming ownership of the basket.
    pub user_id: UserId,
    /// The product to add.
    pub product_id: ProductId,
    /// The requested quantity.
    pub quantity: i32,
}

/// One entry of a bulk addition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkLine {
    /// The product to add.
    pub product_id: ProductId,
    /// The requested quantity.
    pub quantity: i32,
}

/// Command to append several product lines to a basket in input order.
///
/// Unlike `AddProductToBasket`, no product lookup and no stock check or
/// reservation happens for these lines.
#[derive(Debug, Clone)]
pub struct AddBulkProductToBasket {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The target basket.
    pub basket_id: BasketId,
    /// The user claiming ownership of the basket.
    pub user_id: UserId,
    /// Lines to append, in order.
    pub products: Vec<BulkLine>,
}

impl Command for CreateBasket {
    fn command_type(&self) -> &'static str {
        "basket.create_basket"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for AddProductToBasket {
    fn command_type(&self) -> &'static str {
        "basket.add_product_to_basket"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for AddBulkProductToBasket {
    fn command_type(&self) -> &'static str {
        "basket.add_bulk_product_to_basket"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
