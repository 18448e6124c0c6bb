//! HTTP Transport
//!
//! Blocking HTTP POST of a JSON-RPC request body to the service URL.
//!
//! # Behaviour
//!
//! - Every configured header is sent, plus a fixed `Accept-Encoding: gzip`
//! - A status other than 200 is a [`WaypointError::HttpStatus`]
//! - A `Content-Encoding: gzip` response (case-insensitive) is gunzipped;
//!   any other encoding is passed through untouched
//! - Connections are not kept alive between calls
//!
//! # Example
//!
//! ```no_run
//! use std::collections::HashMap;
//! use waypoint_common::transport::HttpTransport;
//!
//! let transport = HttpTransport::new().unwrap();
//! let body = br#"{"jsonrpc":"2.0","method":"getNames","params":[],"id":0}"#.to_vec();
//! let text = transport.post("http://127.0.0.1:8080", &HashMap::new(), body).unwrap();
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE};
use reqwest::StatusCode;

use crate::protocol::error::{Result, WaypointError};

/// Blocking HTTP transport for JSON-RPC calls.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the HTTP library's default timeouts.
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Creates a transport with an optional overall request timeout.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| WaypointError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// POSTs `body` to `url` and returns the decoded response text.
    ///
    /// # Errors
    ///
    /// - [`WaypointError::Transport`] if the request cannot be sent or the
    ///   body cannot be read
    /// - [`WaypointError::HttpStatus`] for any status other than 200
    /// - [`WaypointError::Io`] if a gzip body is corrupt
    /// - [`WaypointError::InvalidResponse`] if the body is not UTF-8
    pub fn post(&self, url: &str, headers: &HashMap<String, String>, body: Vec<u8>) -> Result<String> {
        let mut request = self.client.post(url);

        let has_content_type = headers.keys().any(|name| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
        if !has_content_type {
            request = request.header(CONTENT_TYPE, "application/json");
        }
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        request = request.header(ACCEPT_ENCODING, "gzip");

        let response = request
            .body(body)
            .send()
            .map_err(|e| WaypointError::Transport(format!("HTTP request to {} failed: {}", url, e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(WaypointError::HttpStatus(status.as_u16()));
        }

        let encoding = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_string());

        let bytes = response
            .bytes()
            .map_err(|e| WaypointError::Transport(format!("Failed to read response: {}", e)))?;

        let text = Self::decode_body(encoding.as_deref(), &bytes)?;
        tracing::debug!(url, response = %text, "JSON-RPC response received");
        Ok(text)
    }

    /// Turns a raw response body into text, gunzipping it first when the
    /// content encoding is `gzip`.
    pub fn decode_body(content_encoding: Option<&str>, bytes: &[u8]) -> Result<String> {
        let encoding = content_encoding.map(str::trim).unwrap_or("");

        let raw = if encoding.eq_ignore_ascii_case("gzip") {
            let mut decoded = Vec::new();
            GzDecoder::new(bytes).read_to_end(&mut decoded)?;
            decoded
        } else {
            bytes.to_vec()
        };

        String::from_utf8(raw)
            .map_err(|e| WaypointError::InvalidResponse(format!("Response body is not UTF-8: {}", e)))
    }
}
