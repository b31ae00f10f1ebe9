//! JSON-RPC 2.0 envelope types.
//!
//! - Requests have `id`, `method`, and optional `params`
//! - Notifications are requests without `id`
//! - `id` type (string or integer) is preserved in responses

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// Request identifier: string, integer, or null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcId {
    Number(i64),
    String(String),
    Null,
}

impl JsonRpcId {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(JsonRpcId::Number),
            Value::String(s) => Some(JsonRpcId::String(s.clone())),
            Value::Null => Some(JsonRpcId::Null),
            _ => None,
        }
    }
}

/// A parsed request or notification.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcRequest {
    /// `None` for notifications.
    pub id: Option<JsonRpcId>,
    pub method: String,
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Classify a parsed JSON value as a request.
    ///
    /// On failure, returns the error together with whatever id could be
    /// recovered, so the error response can still be correlated.
    pub fn from_value(value: Value) -> Result<Self, (JsonRpcId, JsonRpcError)> {
        let is_batch = value.is_array();
        let Value::Object(mut object) = value else {
            let message = if is_batch {
                "batch requests are not supported"
            } else {
                "request must be a JSON object"
            };
            return Err((
                JsonRpcId::Null,
                JsonRpcError::new(INVALID_REQUEST, message),
            ));
        };

        let id = match object.get("id") {
            None => None,
            Some(raw) => Some(JsonRpcId::from_value(raw).ok_or_else(|| {
                (
                    JsonRpcId::Null,
                    JsonRpcError::new(INVALID_REQUEST, "id must be a string, integer, or null"),
                )
            })?),
        };
        let reply_id = id.clone().unwrap_or(JsonRpcId::Null);

        if object.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            return Err((
                reply_id,
                JsonRpcError::new(INVALID_REQUEST, "missing or invalid jsonrpc version field"),
            ));
        }

        let method = match object.remove("method") {
            Some(Value::String(method)) => method,
            _ => {
                return Err((
                    reply_id,
                    JsonRpcError::new(INVALID_REQUEST, "method must be a string"),
                ));
            }
        };

        Ok(Self {
            id,
            method,
            params: object.remove("params"),
        })
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// JSON-RPC 2.0 response: exactly one of `result` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: JsonRpcId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: JsonRpcId, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: JsonRpcId, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_request() {
        let req = JsonRpcRequest::from_value(
            json!({"jsonrpc": "2.0", "id": 7, "method": "tools/list"}),
        )
        .unwrap();
        assert_eq!(req.id, Some(JsonRpcId::Number(7)));
        assert_eq!(req.method, "tools/list");
        assert_eq!(req.params, None);
        assert!(!req.is_notification());
    }

    #[test]
    fn parse_notification() {
        let req = JsonRpcRequest::from_value(
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
        )
        .unwrap();
        assert!(req.is_notification());
    }

    #[test]
    fn string_id_preserved() {
        let req = JsonRpcRequest::from_value(
            json!({"jsonrpc": "2.0", "id": "abc-123", "method": "ping"}),
        )
        .unwrap();
        let resp = JsonRpcResponse::success(req.id.unwrap(), json!({}));
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["id"], "abc-123");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn reject_wrong_version() {
        let (id, err) =
            JsonRpcRequest::from_value(json!({"jsonrpc": "1.0", "id": 1, "method": "x"}))
                .unwrap_err();
        assert_eq!(id, JsonRpcId::Number(1));
        assert_eq!(err.code, INVALID_REQUEST);
    }

    #[test]
    fn reject_batch() {
        let (_, err) = JsonRpcRequest::from_value(json!([{"jsonrpc": "2.0"}])).unwrap_err();
        assert_eq!(err.code, INVALID_REQUEST);
        assert!(err.message.contains("batch"));
    }

    #[test]
    fn reject_float_id() {
        let (id, err) =
            JsonRpcRequest::from_value(json!({"jsonrpc": "2.0", "id": 1.5, "method": "x"}))
                .unwrap_err();
        assert_eq!(id, JsonRpcId::Null);
        assert_eq!(err.code, INVALID_REQUEST);
    }

    #[test]
    fn error_serialization_omits_empty_data() {
        let resp = JsonRpcResponse::error(
            JsonRpcId::Null,
            JsonRpcError::new(PARSE_ERROR, "Parse error"),
        );
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("\"data\""));
        assert!(!json.contains("\"result\""));
        assert!(json.contains("-32700"));
    }
}
