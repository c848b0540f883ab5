//! In-memory and failing `BasketRepository` implementations.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use basket_core::basket::{Basket, BasketId, BasketLine, NewBasket, NewBasketLine};
use basket_core::error::RepositoryError;
use basket_core::repository::{AddedLine, BasketRepository};
use chrono::{DateTime, Utc};

#[derive(Debug, Default)]
struct State {
    baskets: HashMap<BasketId, Basket>,
    next_line_id: i64,
    adds_remaining: Option<usize>,
    add_calls: usize,
}

/// A map-backed repository that behaves like the Postgres one, with knobs for
/// injecting failures at specific points.
///
/// All timestamps it writes are the `now` passed at construction.
#[derive(Debug)]
pub struct InMemoryBasketRepository {
    now: DateTime<Utc>,
    state: Mutex<State>,
    no_rows_on_create: bool,
    fail_removals: bool,
}

impl InMemoryBasketRepository {
    /// Create an empty repository stamping rows with `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            state: Mutex::new(State::default()),
            no_rows_on_create: false,
            fail_removals: false,
        }
    }

    /// Seed a basket (lines included) as if it had been stored earlier.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_basket(self, basket: Basket) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let max_line = basket.lines.iter().map(|l| l.line_id).max().unwrap_or(0);
            state.next_line_id = state.next_line_id.max(max_line);
            state.baskets.insert(basket.id.clone(), basket);
        }
        self
    }

    /// Let the next `successful` line additions succeed, then fail every
    /// later one with a storage error.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn fail_adds_after(self, successful: usize) -> Self {
        self.state.lock().unwrap().adds_remaining = Some(successful);
        self
    }

    /// Make `create_basket` report `RepositoryError::NoRows` without storing
    /// anything.
    #[must_use]
    pub fn no_rows_on_create(mut self) -> Self {
        self.no_rows_on_create = true;
        self
    }

    /// Make `remove_line` fail with a storage error.
    #[must_use]
    pub fn failing_removals(mut self) -> Self {
        self.fail_removals = true;
        self
    }

    /// Returns a snapshot of a stored basket.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn basket(&self, basket_id: &BasketId) -> Option<Basket> {
        self.state.lock().unwrap().baskets.get(basket_id).cloned()
    }

    /// Number of lines currently stored for a basket (zero if unknown).
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn line_count(&self, basket_id: &BasketId) -> usize {
        self.basket(basket_id).map_or(0, |b| b.lines.len())
    }

    /// Number of `add_product_to_basket` calls received, failed ones included.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn add_calls(&self) -> usize {
        self.state.lock().unwrap().add_calls
    }
}

#[async_trait]
impl BasketRepository for InMemoryBasketRepository {
    async fn create_basket(&self, basket: &NewBasket) -> Result<Basket, RepositoryError> {
        if self.no_rows_on_create {
            return Err(RepositoryError::NoRows);
        }
        let mut state = self.state.lock().unwrap();
        if state.baskets.contains_key(&basket.id) {
            return Err(RepositoryError::Storage(format!(
                "duplicate key value violates unique constraint \"baskets_pkey\": {}",
                basket.id
            )));
        }
        let stored = Basket::empty(basket.id.clone(), basket.user_id.clone(), self.now);
        state.baskets.insert(basket.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_basket_by_id(
        &self,
        basket_id: &BasketId,
    ) -> Result<Option<Basket>, RepositoryError> {
        Ok(self.state.lock().unwrap().baskets.get(basket_id).cloned())
    }

    async fn add_product_to_basket(
        &self,
        line: &NewBasketLine,
    ) -> Result<AddedLine, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.add_calls += 1;
        if let Some(remaining) = state.adds_remaining.as_mut() {
            if *remaining == 0 {
                return Err(RepositoryError::Storage("connection reset by peer".into()));
            }
            *remaining -= 1;
        }
        state.next_line_id += 1;
        let line_id = state.next_line_id;
        let now = self.now;
        let basket = state
            .baskets
            .get_mut(&line.basket_id)
            .ok_or_else(|| RepositoryError::Storage("foreign key violation".into()))?;
        basket.lines.push(BasketLine {
            line_id,
            basket_id: line.basket_id.clone(),
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            created_at: now,
            updated_at: now,
        });
        basket.updated_at = now;
        Ok(AddedLine {
            line_id,
            basket: basket.clone(),
        })
    }

    async fn remove_line(&self, basket_id: &BasketId, line_id: i64) -> Result<(), RepositoryError> {
        if self.fail_removals {
            return Err(RepositoryError::Storage("connection reset by peer".into()));
        }
        if let Some(basket) = self.state.lock().unwrap().baskets.get_mut(basket_id) {
            basket.lines.retain(|l| l.line_id != line_id);
        }
        Ok(())
    }
}

/// A repository that always returns a storage error. Useful for testing
/// error-handling paths.
#[derive(Debug)]
pub struct FailingBasketRepository;

#[async_trait]
impl BasketRepository for FailingBasketRepository {
    async fn create_basket(&self, _basket: &NewBasket) -> Result<Basket, RepositoryError> {
        Err(RepositoryError::Storage("connection refused".into()))
    }

    async fn get_basket_by_id(
        &self,
        _basket_id: &BasketId,
    ) -> Result<Option<Basket>, RepositoryError> {
        Err(RepositoryError::Storage("connection refused".into()))
    }

    async fn add_product_to_basket(
        &self,
        _line: &NewBasketLine,
    ) -> Result<AddedLine, RepositoryError> {
        Err(RepositoryError::Storage("connection refused".into()))
    }

    async fn remove_line(
        &self,
        _basket_id: &BasketId,
        _line_id: i64,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Storage("connection refused".into()))
    }
}
