//! Application state for the web layer.

use std::sync::Arc;

use crate::mcp::McpServer;

/// Shared application state.
///
/// Holds nothing mutable: every request is served independently.
#[derive(Debug, Clone)]
pub struct AppState {
    /// JSON-RPC dispatcher
    pub mcp: Arc<McpServer>,
}

impl AppState {
    pub fn new(mcp: McpServer) -> Self {
        Self { mcp: Arc::new(mcp) }
    }
}
