//! Shared application state.

use std::sync::Arc;

use basket_core::clock::Clock;
use basket_core::id::IdGenerator;
use basket_core::product::ProductClient;
use basket_core::repository::BasketRepository;
use basket_core::stock::StockClient;
use basket_orchestration::application::{BasketOrchestrator, ReservationPolicy};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The basket use cases, wired to their ports.
    pub orchestrator: Arc<BasketOrchestrator>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        repository: Arc<dyn BasketRepository>,
        products: Arc<dyn ProductClient>,
        stock: Arc<dyn StockClient>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        reservation_policy: ReservationPolicy,
    ) -> Self {
        let orchestrator = BasketOrchestrator::new(repository, products, stock, clock, ids)
            .with_reservation_policy(reservation_policy);
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}
