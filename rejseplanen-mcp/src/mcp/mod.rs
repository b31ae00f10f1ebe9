//! Model Context Protocol exposure over JSON-RPC 2.0.
//!
//! Only the tool surface is implemented: `initialize`, `ping`,
//! `tools/list` and `tools/call`. Notifications are accepted and ignored.

mod protocol;
mod server;

pub use protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JsonRpcError, JsonRpcId, JsonRpcRequest,
    JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR,
};
pub use server::{McpServer, SUPPORTED_PROTOCOL_VERSIONS};
