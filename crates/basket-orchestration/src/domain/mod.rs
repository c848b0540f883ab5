//! Commands accepted by the orchestrator.

pub mod commands;
