//! Placeholder-value interface to the waypoint library.
//!
//! [`WaypointLibraryProxy`] wraps a [`WaypointLibraryClient`] and never
//! returns an error for a failed call. Transport failures, undecodable
//! responses, service errors (any `error` member, `null` included) and
//! waypoints with a NaN or infinite field are logged and replaced by a
//! fixed value:
//!
//! | operation | on failure |
//! |---|---|
//! | `add`, `remove`, `update_waypoint`, `restore_from_file`, `save_to_file` | `false` |
//! | `get` | [`Waypoint::unknown()`] |
//! | `get_names` | empty list |
//! | `get_by_id`, `distance_and_bearing` | `"unknown"` |
//!
//! The one error that still reaches the caller is a malformed number passed
//! to [`add_new`](WaypointLibraryProxy::add_new), since it is rejected
//! before any call is made.

use waypoint_common::protocol::error::Result;
use waypoint_common::waypoint::UNKNOWN;
use waypoint_common::{Waypoint, WaypointError};

use crate::client::WaypointLibraryClient;
use crate::config::ClientConfig;

/// How [`WaypointLibraryProxy::add`] reports success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddResultPolicy {
    /// Return the service's boolean `result`.
    #[default]
    ReadResult,
    /// Always return `false` once the call completes, whatever the service
    /// answered. Matches older clients that never read the result.
    AlwaysFalse,
}

pub struct WaypointLibraryProxy {
    client: WaypointLibraryClient,
    add_result: AddResultPolicy,
}

impl WaypointLibraryProxy {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self::from_client(WaypointLibraryClient::new(url)?))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self::from_client(WaypointLibraryClient::with_config(config)?))
    }

    pub fn from_client(client: WaypointLibraryClient) -> Self {
        Self {
            client,
            add_result: AddResultPolicy::default(),
        }
    }

    pub fn with_add_result(mut self, policy: AddResultPolicy) -> Self {
        self.add_result = policy;
        self
    }

    pub fn add_result(&self) -> AddResultPolicy {
        self.add_result
    }

    pub fn client(&self) -> &WaypointLibraryClient {
        &self.client
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.client.set_header(name, value);
    }

    pub fn add(&self, waypoint: &Waypoint) -> bool {
        let added = or_fallback(
            "add",
            waypoint.name(),
            self.client.add(waypoint),
            false,
        );
        match self.add_result {
            AddResultPolicy::ReadResult => added,
            AddResultPolicy::AlwaysFalse => false,
        }
    }

    /// Parses the numeric fields and [`add`](Self::add)s the waypoint.
    ///
    /// # Errors
    ///
    /// [`WaypointError::InvalidNumber`] if a number is malformed. Nothing is
    /// sent in that case.
    pub fn add_new(&self, lat: &str, lon: &str, ele: &str, name: &str, address: &str) -> Result<bool> {
        let waypoint = Waypoint::parse(lat, lon, ele, name, address)?;
        Ok(self.add(&waypoint))
    }

    pub fn remove(&self, name: &str) -> bool {
        or_fallback("remove", name, self.client.remove(name), false)
    }

    pub fn get(&self, name: &str) -> Waypoint {
        or_fallback("get", name, self.client.get(name), Waypoint::unknown())
    }

    pub fn get_names(&self) -> Vec<String> {
        or_fallback("getNames", "", self.client.get_names(), Vec::new())
    }

    pub fn get_by_id(&self, id: i64) -> String {
        or_fallback("getById", &id.to_string(), self.client.get_by_id(id), UNKNOWN.to_string())
    }

    pub fn restore_from_file(&self) -> bool {
        or_fallback("resetFromJsonFile", "", self.client.restore_from_file(), false)
    }

    pub fn save_to_file(&self) -> bool {
        or_fallback("saveToJsonFile", "", self.client.save_to_file(), false)
    }

    pub fn update_waypoint(&self, waypoint: &Waypoint) -> bool {
        or_fallback(
            "updateWaypoint",
            waypoint.name(),
            self.client.update_waypoint(waypoint),
            false,
        )
    }

    pub fn distance_and_bearing(&self, from: &str, to: &str) -> String {
        or_fallback(
            "distanceAndBearing",
            &format!("{} -> {}", from, to),
            self.client.distance_and_bearing(from, to),
            UNKNOWN.to_string(),
        )
    }
}

fn or_fallback<T>(operation: &str, subject: &str, result: Result<T>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            log_failure(operation, subject, &e);
            fallback
        }
    }
}

fn log_failure(operation: &str, subject: &str, error: &WaypointError) {
    tracing::warn!(
        operation,
        subject,
        category = ?error.category(),
        error = %error,
        "Waypoint library call failed"
    );
}
