//! Web layer for the layover planner.
//!
//! Serves the HTML form and plan pages plus a JSON API for validation,
//! planning and chat.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
