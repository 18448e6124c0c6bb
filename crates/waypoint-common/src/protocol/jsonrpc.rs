//! JSON-RPC 2.0 Envelope Types
//!
//! Request and response envelopes as exchanged with the waypoint library
//! service.
//!
//! - Request format: `{"jsonrpc": "2.0", "method": "...", "params": [...], "id": N}`
//! - Response format: `{"result": ...}` on success, `{"error": ...}` on failure
//!
//! The service decides the shape of `error`; the client only checks whether
//! it is there and otherwise treats it as opaque.
//!
//! # Example
//!
//! ```
//! use waypoint_common::protocol::jsonrpc::{JsonRpcRequest, JsonRpcResponse};
//! use serde_json::json;
//!
//! let request = JsonRpcRequest::new("remove", vec![json!("Tempe")], 0);
//! assert_eq!(request.jsonrpc, "2.0");
//!
//! let response = JsonRpcResponse::success(json!(0), json!(true));
//! assert_eq!(response.into_result().unwrap(), json!(true));
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::{Result, WaypointError};

/// Protocol version carried in every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request
///
/// Parameters are always positional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,
    /// Name of the remote method
    pub method: String,
    /// Positional parameter values
    pub params: Vec<Value>,
    /// Call identifier
    pub id: u64,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.into(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC 2.0 response
///
/// Every member is optional on the wire. A response is a failure whenever
/// it carries an `error` member, whatever its value; `"error": null` is
/// kept as `Some(Value::Null)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.into()),
            result: Some(result),
            error: None,
            id: Some(id),
        }
    }

    /// Create an error response
    pub fn failure(id: Value, error: Value) -> Self {
        Self {
            jsonrpc: Some(JSONRPC_VERSION.into()),
            result: None,
            error: Some(error),
            id: Some(id),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Unwraps the envelope.
    ///
    /// Returns [`WaypointError::Service`] with the opaque error value if the
    /// service reported a failure. A success without a `result` member yields
    /// `Value::Null`.
    pub fn into_result(self) -> Result<Value> {
        match self.error {
            Some(error) => Err(WaypointError::Service(error)),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

/// Wraps any member that is on the wire, `null` included.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
