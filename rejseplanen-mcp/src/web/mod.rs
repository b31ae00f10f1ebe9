//! Web layer for the adapter.
//!
//! Exposes the MCP endpoint and a health check over HTTP.

mod routes;
mod state;

pub use routes::{MCP_PATH, create_router};
pub use state::AppState;
