//! Basket repository abstraction.

use async_trait::async_trait;

use crate::basket::{Basket, BasketId, NewBasket, NewBasketLine};
use crate::error::RepositoryError;

/// Outcome of appending a line: the new line's id and the reloaded basket.
#[derive(Debug, Clone, PartialEq)]
pub struct AddedLine {
    /// Storage-assigned id of the line just written.
    pub line_id: i64,
    /// The basket reloaded with all of its lines, including the new one.
    pub basket: Basket,
}

/// Persistence port for baskets and their lines.
///
/// Every read and write returns a fully hydrated basket. The repository is the
/// sole source of truth for basket existence and contents.
#[async_trait]
pub trait BasketRepository: Send + Sync {
    /// Persists a basket with no lines and returns it as stored.
    async fn create_basket(&self, basket: &NewBasket) -> Result<Basket, RepositoryError>;

    /// Loads a basket with its lines. Returns `Ok(None)` for an unknown id.
    async fn get_basket_by_id(&self, basket_id: &BasketId)
    -> Result<Option<Basket>, RepositoryError>;

    /// Appends one line to a basket and returns the reloaded basket.
    async fn add_product_to_basket(
        &self,
        line: &NewBasketLine,
    ) -> Result<AddedLine, RepositoryError>;

    /// Deletes a single line. Removing a line that does not exist is not an
    /// error.
    async fn remove_line(&self, basket_id: &BasketId, line_id: i64)
    -> Result<(), RepositoryError>;
}
