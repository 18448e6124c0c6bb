//! Waypoint Transport Layer
//!
//! This module moves JSON-RPC envelopes between the client and the
//! waypoint library service.
//!
//! # Components
//!
//! - **[`JsonCodec`]**: Encode requests and decode response envelopes
//! - **[`HttpTransport`]**: Blocking HTTP POST with gzip response support
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use waypoint_common::protocol::JsonRpcRequest;
//! use waypoint_common::transport::{HttpTransport, JsonCodec};
//!
//! let transport = HttpTransport::new().unwrap();
//! let request = JsonRpcRequest::new("getNames", Vec::new(), 0);
//! let body = JsonCodec::encode_request(&request).unwrap();
//! let text = transport.post("http://127.0.0.1:8080", &HashMap::new(), body).unwrap();
//! let response = JsonCodec::decode_response(&text).unwrap();
//! ```

pub mod codec;
pub mod http;

pub use codec::JsonCodec;
pub use http::HttpTransport;
