//! Basket API: HTTP transport, configuration and telemetry for the basket
//! service.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;
