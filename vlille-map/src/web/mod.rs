//! Web layer for the V'Lille station map.
//!
//! Serves the map page and JSON endpoints for listing, ranking and
//! searching stations.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
