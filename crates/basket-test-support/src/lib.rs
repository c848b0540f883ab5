//! Shared test doubles and utilities for the basket service.

mod clock;
mod id;
mod product;
mod repository;
mod stock;

pub use clock::{FixedClock, fixed_now};
pub use id::SequenceIdGenerator;
pub use product::{FailingProductClient, StubProductClient, sample_product};
pub use repository::{FailingBasketRepository, InMemoryBasketRepository};
pub use stock::{FailingStockClient, StubStockClient};
