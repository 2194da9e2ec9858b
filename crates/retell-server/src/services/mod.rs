//! Business logic behind the HTTP handlers.

pub mod agents;
pub mod health;
pub mod metrics;
