//! Basket Store: `PostgreSQL` persistence for baskets and their lines.

pub mod pg_basket_repository;
pub mod schema;

pub use pg_basket_repository::PgBasketRepository;
