//! The basket orchestrator: the handlers bundled with their collaborators.

use std::sync::Arc;

use basket_core::basket::BasketId;
use basket_core::clock::Clock;
use basket_core::error::DomainError;
use basket_core::id::IdGenerator;
use basket_core::product::ProductClient;
use basket_core::repository::BasketRepository;
use basket_core::stock::StockClient;

use crate::application::command_handlers::{
    ReservationPolicy, handle_add_bulk_product_to_basket, handle_add_product_to_basket,
    handle_create_basket,
};
use crate::application::query_handlers;
use crate::application::response::BasketView;
use crate::domain::commands::{AddBulkProductToBasket, AddProductToBasket, CreateBasket};

/// Entry point for the four basket use cases.
///
/// Holds no mutable state; collaborators are shared and safe to call from many
/// requests at once. Cloning is cheap.
#[derive(Clone)]
pub struct BasketOrchestrator {
    repository: Arc<dyn BasketRepository>,
    products: Arc<dyn ProductClient>,
    stock: Arc<dyn StockClient>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    reservation_policy: ReservationPolicy,
}

impl BasketOrchestrator {
    /// Create an orchestrator that leaves lines in place when a reservation
    /// fails.
    #[must_use]
    pub fn new(
        repository: Arc<dyn BasketRepository>,
        products: Arc<dyn ProductClient>,
        stock: Arc<dyn StockClient>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            repository,
            products,
            stock,
            clock,
            ids,
            reservation_policy: ReservationPolicy::default(),
        }
    }

    /// Replace the reservation failure policy.
    #[must_use]
    pub fn with_reservation_policy(mut self, policy: ReservationPolicy) -> Self {
        self.reservation_policy = policy;
        self
    }

    /// The active reservation failure policy.
    #[must_use]
    pub fn reservation_policy(&self) -> ReservationPolicy {
        self.reservation_policy
    }

    /// Creates an empty basket.
    ///
    /// # Errors
    ///
    /// See [`handle_create_basket`].
    pub async fn create_basket(&self, command: &CreateBasket) -> Result<BasketView, DomainError> {
        handle_create_basket(
            command,
            self.ids.as_ref(),
            self.clock.as_ref(),
            self.repository.as_ref(),
        )
        .await
    }

    /// Adds one product to a basket after checking stock, then reserves it.
    ///
    /// # Errors
    ///
    /// See [`handle_add_product_to_basket`].
    pub async fn add_product_to_basket(
        &self,
        command: &AddProductToBasket,
    ) -> Result<BasketView, DomainError> {
        handle_add_product_to_basket(
            command,
            self.reservation_policy,
            self.repository.as_ref(),
            self.products.as_ref(),
            self.stock.as_ref(),
        )
        .await
    }

    /// Returns the view of a basket.
    ///
    /// # Errors
    ///
    /// See [`query_handlers::get_basket_by_id`].
    pub async fn get_basket_by_id(&self, basket_id: &BasketId) -> Result<BasketView, DomainError> {
        query_handlers::get_basket_by_id(basket_id, self.repository.as_ref(), self.products.as_ref())
            .await
    }

    /// Appends several lines to a basket without stock checks.
    ///
    /// # Errors
    ///
    /// See [`handle_add_bulk_product_to_basket`].
    pub async fn add_bulk_product_to_basket(
        &self,
        command: &AddBulkProductToBasket,
    ) -> Result<BasketView, DomainError> {
        handle_add_bulk_product_to_basket(
            command,
            self.repository.as_ref(),
            self.products.as_ref(),
        )
        .await
    }
}
