//! Predictable basket ids for tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use basket_core::basket::BasketId;
use basket_core::id::IdGenerator;

/// Hands out `basket-1`, `basket-2`, ... in call order.
#[derive(Debug, Default)]
pub struct SequenceIdGenerator {
    issued: AtomicUsize,
}

impl SequenceIdGenerator {
    /// Create a generator whose first id is `basket-1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn next_basket_id(&self) -> BasketId {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        BasketId::new(format!("basket-{n}"))
    }
}
