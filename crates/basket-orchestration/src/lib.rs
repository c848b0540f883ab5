//! Basket orchestration.
//!
//! Coordinates the basket repository, the product service, and the stock
//! service to create baskets, add products to them (singly or in bulk), and
//! produce the denormalized basket view returned to clients.

pub mod application;
pub mod domain;
