//! Web layer for the metro network.
//!
//! Provides JSON endpoints for managing stations, lines and sections and
//! for querying shortest paths and fares.

mod dto;
mod error;
mod routes;
mod state;

pub use dto::*;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
