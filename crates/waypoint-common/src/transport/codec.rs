use serde_json::Value;

use crate::protocol::error::{Result, WaypointError};
use crate::protocol::{JsonRpcRequest, JsonRpcResponse};

/// JSON codec for JSON-RPC envelopes.
///
/// # Example
///
/// ```
/// use waypoint_common::transport::JsonCodec;
/// use waypoint_common::protocol::JsonRpcRequest;
///
/// let request = JsonRpcRequest::new("getNames", Vec::new(), 0);
/// let encoded = JsonCodec::encode_request(&request).unwrap();
///
/// let response = JsonCodec::decode_response(r#"{"result": ["Tempe"]}"#).unwrap();
/// assert!(!response.is_error());
/// ```
pub struct JsonCodec;

impl JsonCodec {
    /// Encode a request to bytes
    pub fn encode_request(request: &JsonRpcRequest) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(request)?)
    }

    /// Decode a response envelope from text
    ///
    /// The text must be a JSON object; anything else is an
    /// [`WaypointError::InvalidResponse`].
    pub fn decode_response(text: &str) -> Result<JsonRpcResponse> {
        let value: Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(WaypointError::InvalidResponse(format!(
                "expected a JSON object, got: {}",
                truncate(text, 120)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
