//! Web layer for the tram planner.
//!
//! Provides a small JSON API over the catalog and the planner.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
