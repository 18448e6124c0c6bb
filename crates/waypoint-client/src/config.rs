use std::collections::HashMap;
use std::time::Duration;

use waypoint_common::CallIdCounter;

/// Default service URL.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8080";

/// Client configuration.
///
/// Controls where calls go, which extra headers they carry, how long a call
/// may take, and which call-id sequence the client draws from.
///
/// # Default Configuration
///
/// - `url`: `http://127.0.0.1:8080`
/// - `headers`: none
/// - `timeout`: none (the HTTP library's defaults apply)
/// - `call_ids`: the process-wide counter
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use waypoint_client::ClientConfig;
///
/// let config = ClientConfig::new("http://127.0.0.1:8080")
///     .with_header("X-Client", "cli")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.headers.get("X-Client").map(String::as_str), Some("cli"));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service endpoint the JSON-RPC requests are posted to
    pub url: String,
    /// Extra HTTP headers sent with every call
    pub headers: HashMap<String, String>,
    /// Overall per-call timeout
    pub timeout: Option<Duration>,
    /// Source of call identifiers
    pub call_ids: CallIdCounter,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Draw call ids from `call_ids` instead of the process-wide counter.
    pub fn with_call_ids(mut self, call_ids: CallIdCounter) -> Self {
        self.call_ids = call_ids;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            headers: HashMap::new(),
            timeout: None,
            call_ids: CallIdCounter::process_wide(),
        }
    }
}
