use serde_json::{json, Value};
use waypoint_common::protocol::error::{Result, WaypointError};
use waypoint_common::protocol::{CallIdCounter, JsonRpcRequest};
use waypoint_common::transport::{HttpTransport, JsonCodec};
use waypoint_common::Waypoint;

use crate::config::ClientConfig;

/// Remote method names understood by the waypoint library service.
pub mod methods {
    pub const ADD: &str = "add";
    pub const REMOVE: &str = "remove";
    pub const GET: &str = "get";
    pub const GET_NAMES: &str = "getNames";
    pub const GET_BY_ID: &str = "getById";
    pub const RESET_FROM_JSON_FILE: &str = "resetFromJsonFile";
    pub const SAVE_TO_JSON_FILE: &str = "saveToJsonFile";
    pub const UPDATE_WAYPOINT: &str = "updateWaypoint";
    pub const DISTANCE_AND_BEARING: &str = "distanceAndBearing";
}

/// JSON-RPC client for a remote waypoint library.
///
/// Every operation is one blocking HTTP round trip on a fresh connection and
/// returns a typed result. Use [`WaypointLibraryProxy`](crate::WaypointLibraryProxy)
/// for the placeholder-value interface.
pub struct WaypointLibraryClient {
    config: ClientConfig,
    transport: HttpTransport,
}

impl WaypointLibraryClient {
    /// Create a client for the service at `url` with default settings
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(url))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_timeout(config.timeout)?;
        Ok(Self { config, transport })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn call_ids(&self) -> &CallIdCounter {
        &self.config.call_ids
    }

    /// Adds or replaces an outbound header for subsequent calls.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.config.headers.insert(name.into(), value.into());
    }

    /// Call a remote method
    ///
    /// Takes the next call id, posts the request and unwraps the response.
    /// The id is consumed even if the call fails.
    ///
    /// # Errors
    ///
    /// - transport failures and non-200 statuses
    /// - a body that is not a JSON object
    /// - [`WaypointError::Service`] if the response carries an `error`
    pub fn call(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let request = JsonRpcRequest::new(method, params, self.config.call_ids.next_id());
        let body = JsonCodec::encode_request(&request)?;

        tracing::debug!(
            url = %self.config.url,
            method,
            id = request.id,
            body = %String::from_utf8_lossy(&body),
            "Sending JSON-RPC request"
        );

        let text = self.transport.post(&self.config.url, &self.config.headers, body)?;
        JsonCodec::decode_response(&text)?.into_result()
    }

    /// Sends the waypoint document.
    ///
    /// A NaN or infinite field fails with [`WaypointError::NonFinite`] before
    /// anything is sent.
    pub fn add(&self, waypoint: &Waypoint) -> Result<bool> {
        waypoint.check_finite()?;
        let result = self.call(methods::ADD, vec![waypoint.to_document()])?;
        Ok(read_bool(&result))
    }

    /// Parses the numeric fields locally, then [`add`](Self::add)s the
    /// waypoint.
    ///
    /// A malformed number fails with [`WaypointError::InvalidNumber`] before
    /// anything is sent.
    pub fn add_new(&self, lat: &str, lon: &str, ele: &str, name: &str, address: &str) -> Result<bool> {
        let waypoint = Waypoint::parse(lat, lon, ele, name, address)?;
        self.add(&waypoint)
    }

    pub fn remove(&self, name: &str) -> Result<bool> {
        let result = self.call(methods::REMOVE, vec![json!(name)])?;
        Ok(read_bool(&result))
    }

    pub fn get(&self, name: &str) -> Result<Waypoint> {
        let result = self.call(methods::GET, vec![json!(name)])?;
        Waypoint::from_document(&result)
    }

    /// Names of every stored waypoint, without empty names, sorted ascending.
    ///
    /// Entries are read like [`get_by_id`](Self::get_by_id) results, so a
    /// `null` entry is dropped and a number becomes its decimal text.
    pub fn get_names(&self) -> Result<Vec<String>> {
        let result = self.call(methods::GET_NAMES, Vec::new())?;
        let entries = match result {
            Value::Array(entries) => entries,
            other => return Err(unexpected(methods::GET_NAMES, "an array", &other)),
        };

        let mut names: Vec<String> = entries.into_iter().map(read_string).collect();
        names.retain(|name| !name.is_empty());
        names.sort();
        Ok(names)
    }

    pub fn get_by_id(&self, id: i64) -> Result<String> {
        let result = self.call(methods::GET_BY_ID, vec![json!(id)])?;
        Ok(read_string(result))
    }

    /// Asks the service to reload its library from its JSON file.
    pub fn restore_from_file(&self) -> Result<bool> {
        let result = self.call(methods::RESET_FROM_JSON_FILE, Vec::new())?;
        Ok(read_bool(&result))
    }

    /// Asks the service to write its library to its JSON file.
    pub fn save_to_file(&self) -> Result<bool> {
        let result = self.call(methods::SAVE_TO_JSON_FILE, Vec::new())?;
        Ok(read_bool(&result))
    }

    /// Replaces the stored waypoint that has the same name.
    ///
    /// The service takes all five fields as strings. A NaN or infinite field
    /// fails with [`WaypointError::NonFinite`] before anything is sent.
    pub fn update_waypoint(&self, waypoint: &Waypoint) -> Result<bool> {
        waypoint.check_finite()?;
        let params = vec![
            json!(waypoint.latitude().to_string()),
            json!(waypoint.longitude().to_string()),
            json!(waypoint.elevation().to_string()),
            json!(waypoint.name()),
            json!(waypoint.address()),
        ];
        let result = self.call(methods::UPDATE_WAYPOINT, params)?;
        Ok(read_bool(&result))
    }

    /// The service's distance-and-bearing text for two stored waypoints.
    pub fn distance_and_bearing(&self, from: &str, to: &str) -> Result<String> {
        let result = self.call(methods::DISTANCE_AND_BEARING, vec![json!(from), json!(to)])?;
        Ok(read_string(result))
    }
}

/// A boolean, or the text `"true"`/`"false"` in any case. Anything else,
/// including a missing result, reads as `false`.
fn read_bool(result: &Value) -> bool {
    match result {
        Value::Bool(value) => *value,
        Value::String(text) => text.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Strings as they are, `null` as `""`, anything else as its JSON text.
fn read_string(result: Value) -> String {
    match result {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn unexpected(method: &str, expected: &str, found: &Value) -> WaypointError {
    WaypointError::InvalidResponse(format!("{} returned {}, expected {}", method, found, expected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_common::ErrorCategory;

    #[test]
    fn test_client_creation() {
        // No connection is made until the first call
        let client = WaypointLibraryClient::new("http://127.0.0.1:8080");
        assert!(client.is_ok());
        assert_eq!(client.unwrap().url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_set_header_overwrites() {
        let mut client = WaypointLibraryClient::new("http://127.0.0.1:8080").unwrap();
        client.set_header("X-Trace", "1");
        client.set_header("X-Trace", "2");
        assert_eq!(client.config.headers.len(), 1);
        assert_eq!(client.config.headers["X-Trace"], "2");
    }

    #[test]
    fn test_add_new_rejects_malformed_number_before_sending() {
        let ids = CallIdCounter::new();
        let config = ClientConfig::new("http://127.0.0.1:1").with_call_ids(ids.clone());
        let client = WaypointLibraryClient::with_config(config).unwrap();

        let err = client.add_new("not-a-number", "0", "0", "n", "a").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(ids.peek(), 0, "no call id should have been taken");
    }

    #[test]
    fn test_add_rejects_non_finite_before_sending() {
        let ids = CallIdCounter::new();
        let config = ClientConfig::new("http://127.0.0.1:1").with_call_ids(ids.clone());
        let client = WaypointLibraryClient::with_config(config).unwrap();

        let wp = Waypoint::new(f64::NAN, 0.0, 0.0, "n", "a");
        assert_eq!(client.add(&wp).unwrap_err().category(), ErrorCategory::Validation);
        assert_eq!(client.update_waypoint(&wp).unwrap_err().category(), ErrorCategory::Validation);

        // "inf" parses as a number but cannot be sent
        let err = client.add_new("0", "inf", "0", "n", "a").unwrap_err();
        assert!(matches!(err, WaypointError::NonFinite { field: "lon", .. }));
        assert_eq!(ids.peek(), 0, "no call id should have been taken");
    }

    #[test]
    fn test_read_bool() {
        assert!(read_bool(&json!(true)));
        assert!(!read_bool(&json!(false)));
        assert!(read_bool(&json!("true")));
        assert!(read_bool(&json!("TRUE")));
        assert!(!read_bool(&json!("false")));
        assert!(!read_bool(&json!("yes")));
        assert!(!read_bool(&json!(1)));
        assert!(!read_bool(&Value::Null));
    }

    #[test]
    fn test_read_string() {
        assert_eq!(read_string(json!("Tempe")), "Tempe");
        assert_eq!(read_string(json!(7)), "7");
        assert_eq!(read_string(json!(true)), "true");
        assert_eq!(read_string(Value::Null), "");
    }
}
