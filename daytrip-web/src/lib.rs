//! HTTP front end for Daytrip.
//!
//! Serves the single planner page, the form endpoints behind it and a JSON
//! variant of the recommendation endpoint.

pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod logging;
pub mod render;
pub mod routes;
pub mod session_cookie;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
