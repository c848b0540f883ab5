//! Application layer: handlers, the orchestrator facade, and view assembly.

pub mod command_handlers;
pub mod orchestrator;
pub mod query_handlers;
pub mod response;

pub use command_handlers::ReservationPolicy;
pub use orchestrator::BasketOrchestrator;
pub use response::BasketView;
