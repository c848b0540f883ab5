//! Domain and port error types.

use thiserror::Error;

use crate::basket::{BasketId, ProductId};

/// Machine-readable code for unexpected or infrastructure-level failures.
pub const PROCESSING_ERR_CODE: u32 = 10_000;
/// Machine-readable code for request bodies that could not be parsed.
pub const BODY_PARSER_ERR_CODE: u32 = 10_001;
/// Machine-readable code for request validation failures.
pub const VALIDATION_ERR_CODE: u32 = 10_002;
/// Machine-readable code for a missing (or foreign) basket.
pub const BASKET_NOT_FOUND_ERR_CODE: u32 = 10_100;
/// Machine-readable code for a stock availability rejection.
pub const PRODUCT_NOT_HAS_ENOUGH_STOCK_ERR_CODE: u32 = 10_101;
/// Machine-readable code for a failed reservation that could not be undone.
pub const RECONCILIATION_ERR_CODE: u32 = 10_102;

/// Top-level domain error type returned by every basket operation.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The basket does not exist, could not be loaded, or belongs to
    /// another user.
    #[error("basket not found: {0}")]
    BasketNotFound(BasketId),

    /// The stock service reported the product unavailable in the requested
    /// quantity.
    #[error("product {product_id} does not have enough stock for quantity {quantity}")]
    ProductNotHasEnoughStock {
        /// The rejected product.
        product_id: ProductId,
        /// The requested quantity.
        quantity: i32,
    },

    /// Catch-all for persistence failures, remote-dependency failures, and
    /// unexpected states.
    #[error("processing error: {0}")]
    Processing(String),

    /// A request failed validation before reaching the domain.
    #[error("validation error: {0}")]
    Validation(String),

    /// A stock reservation failed after the line was written and the
    /// compensating removal failed as well; basket and stock now disagree.
    #[error(
        "reservation for product {product_id} failed and line {line_id} could not be removed from basket {basket_id}"
    )]
    Reconciliation {
        /// The basket left holding the orphaned line.
        basket_id: BasketId,
        /// The orphaned line.
        line_id: i64,
        /// The product whose reservation failed.
        product_id: ProductId,
    },
}

impl DomainError {
    /// Stable numeric code exposed to clients.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::BasketNotFound(_) => BASKET_NOT_FOUND_ERR_CODE,
            Self::ProductNotHasEnoughStock { .. } => PRODUCT_NOT_HAS_ENOUGH_STOCK_ERR_CODE,
            Self::Processing(_) => PROCESSING_ERR_CODE,
            Self::Validation(_) => VALIDATION_ERR_CODE,
            Self::Reconciliation { .. } => RECONCILIATION_ERR_CODE,
        }
    }

    /// Snake-case error kind exposed to clients.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BasketNotFound(_) => "basket_not_found",
            Self::ProductNotHasEnoughStock { .. } => "product_not_has_enough_stock",
            Self::Processing(_) => "processing_error",
            Self::Validation(_) => "validation_error",
            Self::Reconciliation { .. } => "reconciliation_error",
        }
    }

    /// Human-readable message safe to show to clients. Processing details
    /// stay in the logs.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::BasketNotFound(_) => "basket not found".to_owned(),
            Self::ProductNotHasEnoughStock { .. } => "Product not has enough stock.".to_owned(),
            Self::Processing(_) => "An error occurred while processing the request.".to_owned(),
            Self::Validation(message) => message.clone(),
            Self::Reconciliation { .. } => self.to_string(),
        }
    }
}

/// Errors raised by a `BasketRepository` implementation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A write or read that was expected to yield a row yielded none.
    #[error("no rows in result set")]
    NoRows,

    /// Any other storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors raised by the product and stock service clients.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request never produced a response (connect, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The remote answered with a non-success status.
    #[error("remote responded with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Remote machine-readable error code, when the body carried one.
        code: Option<u32>,
        /// Remote error message, or the status reason.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),
}
