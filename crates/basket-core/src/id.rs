//! Basket identifier generation.
//!
//! Production code hands out random UUIDs. Tests inject a generator with a
//! predictable sequence so created baskets have known ids.

use uuid::Uuid;

use crate::basket::BasketId;

/// Abstraction over basket id generation.
pub trait IdGenerator: Send + Sync {
    /// Returns a new, globally unique basket id.
    fn next_basket_id(&self) -> BasketId;
}

/// Generates basket ids from random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_basket_id(&self) -> BasketId {
        BasketId::new(Uuid::new_v4().to_string())
    }
}
