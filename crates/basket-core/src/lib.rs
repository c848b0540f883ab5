//! Basket Core: shared domain types and capability traits.
//!
//! This crate defines the basket model, the error taxonomy, and the ports
//! (repository, product service, stock service, clock, id generation) that the
//! orchestration layer is written against. It contains no infrastructure code.

pub mod basket;
pub mod clock;
pub mod command;
pub mod error;
pub mod id;
pub mod product;
pub mod repository;
pub mod stock;
