//! MCP method dispatch.
//!
//! Stateless: every request is answered on its own, with no session and no
//! memory of earlier requests. `initialize` is accepted but not required.

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::adapter::{AdapterError, SERVER_NAME, VERSION};
use crate::tools::{Arguments, ToolCallError, ToolRegistry};

use super::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse,
    METHOD_NOT_FOUND, PARSE_ERROR,
};

/// Protocol revisions this server speaks, newest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2025-06-18", "2025-03-26", "2024-11-05"];

const INSTRUCTIONS: &str = "Danish public transport journey planning. Use location_search \
    to find stop IDs, then trip_search or departure_board with those IDs. nearby_stops \
    finds stops around a coordinate.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeParams {
    protocol_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// Routes MCP methods to the tool registry.
#[derive(Debug, Clone)]
pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    /// Create a server dispatching tool calls to `registry`.
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// The tools this server exposes.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle a raw request body.
    ///
    /// Returns `None` when there is nothing to send back (notifications).
    pub async fn handle_bytes(&self, body: &[u8]) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "unparseable request body");
                return Some(JsonRpcResponse::error(
                    JsonRpcId::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("Parse error: {e}")),
                ));
            }
        };

        match JsonRpcRequest::from_value(value) {
            Ok(request) => self.handle(request).await,
            Err((id, error)) => Some(JsonRpcResponse::error(id, error)),
        }
    }

    /// Handle one parsed request or notification.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "notification received");
            return None;
        };

        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize(request.params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(request.params).await,
            other => {
                debug!(method = other, "unknown method");
                Err(JsonRpcError::new(
                    METHOD_NOT_FOUND,
                    format!("Method not found: {other}"),
                ))
            }
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn initialize(&self, params: Option<Value>) -> Value {
        let requested = params
            .and_then(|p| serde_json::from_value::<InitializeParams>(p).ok())
            .and_then(|p| p.protocol_version);
        let version = requested
            .as_deref()
            .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
            .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0]);

        info!(protocol_version = version, "client initialized");
        json!({
            "protocolVersion": version,
            "capabilities": {"tools": {"listChanged": false}},
            "serverInfo": {"name": SERVER_NAME, "version": VERSION},
            "instructions": INSTRUCTIONS,
        })
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .registry
            .specs()
            .iter()
            .map(|spec| {
                json!({
                    "name": spec.name,
                    "description": spec.description,
                    "inputSchema": spec.input_schema,
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params: CallToolParams = params
            .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "tools/call requires params"))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| {
                    JsonRpcError::new(INVALID_PARAMS, format!("invalid tools/call params: {e}"))
                })
            })?;

        let arguments = Arguments::from_value(params.arguments)
            .map_err(|e| JsonRpcError::new(INVALID_PARAMS, e.to_string()))?;

        match self.registry.call(&params.name, arguments).await {
            Ok(value) => Ok(tool_result(value)),
            Err(ToolCallError::UnknownTool(name)) => Err(JsonRpcError::new(
                INVALID_PARAMS,
                format!("Unknown tool: {name}"),
            )),
            Err(ToolCallError::Failed(AdapterError::Internal(message))) => {
                Err(JsonRpcError::new(INTERNAL_ERROR, message)
                    .with_data(json!({"tool": params.name})))
            }
            Err(ToolCallError::Failed(err)) => {
                info!(
                    tool = %params.name,
                    error_type = err.kind(),
                    error = %err,
                    "tool call failed"
                );
                Ok(tool_error(&err))
            }
        }
    }
}

/// Successful tool result: JSON text plus the structured value.
fn tool_result(value: Value) -> Value {
    json!({
        "content": [{"type": "text", "text": value.to_string()}],
        "structuredContent": value,
        "isError": false,
    })
}

/// Failed tool result, reported in-band so the caller's model can see it.
fn tool_error(err: &AdapterError) -> Value {
    json!({
        "content": [{"type": "text", "text": err.to_string()}],
        "isError": true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapter::TransitAdapter;
    use crate::config::ServerConfig;
    use crate::rejseplanen::mock::StubFetch;

    fn server(stub: &Arc<StubFetch>) -> McpServer {
        let config = Arc::new(ServerConfig::default().with_base_url("http://stub"));
        let adapter = Arc::new(TransitAdapter::new(config, stub.clone()));
        McpServer::new(ToolRegistry::new(adapter))
    }

    async fn send(server: &McpServer, body: Value) -> JsonRpcResponse {
        server
            .handle_bytes(body.to_string().as_bytes())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn initialize_negotiates_version() {
        let server = server(&Arc::new(StubFetch::new()));

        let resp = send(
            &server,
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize",
                   "params": {"protocolVersion": "2025-03-26", "capabilities": {}}}),
        )
        .await;
        let result = resp.result.unwrap();
        assert_eq!(result["protocolVersion"], "2025-03-26");
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(result["capabilities"]["tools"]["listChanged"], false);

        let resp = send(
            &server,
            json!({"jsonrpc": "2.0", "id": 2, "method": "initialize",
                   "params": {"protocolVersion": "1999-01-01"}}),
        )
        .await;
        assert_eq!(
            resp.result.unwrap()["protocolVersion"],
            SUPPORTED_PROTOCOL_VERSIONS[0]
        );
    }

    #[tokio::test]
    async fn list_tools() {
        let server = server(&Arc::new(StubFetch::new()));
        let resp = send(&server, json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})).await;

        let result = resp.result.unwrap();
        let names: Vec<&str> = result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            [
                "location_search",
                "trip_search",
                "departure_board",
                "nearby_stops",
                "get_server_info"
            ]
        );
        assert_eq!(result["tools"][0]["inputSchema"]["required"], json!(["query"]));
    }

    #[tokio::test]
    async fn call_tool_success() {
        let payload = json!({"DepartureBoard": {"Departure": [
            {"name": "Re 1234", "type": "REG", "direction": "Helsingør St.", "time": "12:01", "rtTime": "12:03"},
            {"name": "M2", "type": "M", "direction": "Lufthavnen", "time": "12:02"}
        ]}});
        let stub = Arc::new(StubFetch::new().with_json("departureBoard", 200, &payload));
        let server = server(&stub);

        let resp = send(
            &server,
            json!({"jsonrpc": "2.0", "id": "a", "method": "tools/call",
                   "params": {"name": "departure_board", "arguments": {"station_id": "008600626"}}}),
        )
        .await;

        assert_eq!(resp.id, JsonRpcId::String("a".into()));
        let result = resp.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["structuredContent"], payload);
        let text = result["content"][0]["text"].as_str().unwrap();
        assert_eq!(serde_json::from_str::<Value>(text).unwrap(), payload);
    }

    #[tokio::test]
    async fn call_tool_validation_error_is_in_band() {
        let stub = Arc::new(StubFetch::new());
        let server = server(&stub);

        let resp = send(
            &server,
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call",
                   "params": {"name": "location_search", "arguments": {"query": "   "}}}),
        )
        .await;

        let result = resp.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"].as_str().unwrap().contains("query"));
        assert_eq!(stub.request_count(), 0);
    }

    #[tokio::test]
    async fn call_tool_upstream_500() {
        let stub = Arc::new(StubFetch::new().with_body("trip", 500, "Internal Server Error"));
        let server = server(&stub);

        let resp = send(
            &server,
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call",
                   "params": {"name": "trip_search",
                              "arguments": {"origin_id": "008600626", "dest_id": "008600053"}}}),
        )
        .await;

        let result = resp.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"].as_str().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn call_tool_panic_is_internal_error() {
        let config = Arc::new(ServerConfig::default().with_base_url("http://stub"));
        let adapter = Arc::new(TransitAdapter::new(config, Arc::new(StubFetch::new())));
        let server =
            McpServer::new(ToolRegistry::new(adapter).with_tool(crate::tools::exploding_tool()));

        let resp = send(
            &server,
            json!({"jsonrpc": "2.0", "id": 9, "method": "tools/call",
                   "params": {"name": "explode", "arguments": {}}}),
        )
        .await;
        assert_eq!(resp.id, JsonRpcId::Number(9));
        let error = resp.error.unwrap();
        assert_eq!(error.code, INTERNAL_ERROR);
        assert_eq!(error.data, Some(json!({"tool": "explode"})));

        let resp = send(&server, json!({"jsonrpc": "2.0", "id": 10, "method": "ping"})).await;
        assert_eq!(resp.result, Some(json!({})));
    }

    #[tokio::test]
    async fn call_unknown_tool() {
        let server = server(&Arc::new(StubFetch::new()));
        let resp = send(
            &server,
            json!({"jsonrpc": "2.0", "id": 5, "method": "tools/call", "params": {"name": "nope"}}),
        )
        .await;
        assert_eq!(resp.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn call_without_params() {
        let server = server(&Arc::new(StubFetch::new()));
        let resp = send(&server, json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call"})).await;
        assert_eq!(resp.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn unknown_method() {
        let server = server(&Arc::new(StubFetch::new()));
        let resp = send(
            &server,
            json!({"jsonrpc": "2.0", "id": 7, "method": "resources/list"}),
        )
        .await;
        assert_eq!(resp.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let server = server(&Arc::new(StubFetch::new()));
        let body = json!({"jsonrpc": "2.0", "method": "notifications/initialized"});
        assert!(server.handle_bytes(body.to_string().as_bytes()).await.is_none());
    }

    #[tokio::test]
    async fn parse_error() {
        let server = server(&Arc::new(StubFetch::new()));
        let resp = server.handle_bytes(b"{not json").await.unwrap();
        assert_eq!(resp.id, JsonRpcId::Null);
        assert_eq!(resp.error.unwrap().code, PARSE_ERROR);
    }

    #[tokio::test]
    async fn ping() {
        let server = server(&Arc::new(StubFetch::new()));
        let resp = send(&server, json!({"jsonrpc": "2.0", "id": 8, "method": "ping"})).await;
        assert_eq!(resp.result, Some(json!({})));
    }
}
