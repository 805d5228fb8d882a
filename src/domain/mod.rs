//! Domain entities shared across the gateway and controllers.

pub mod campaign;
pub mod feed;
pub mod stats;
pub mod types;
