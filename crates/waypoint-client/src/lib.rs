//! Blocking JSON-RPC client for a remote waypoint library.
//!
//! [`WaypointLibraryClient`] returns typed results; [`WaypointLibraryProxy`]
//! wraps it and substitutes placeholder values on failure.

pub mod client;
pub mod config;
pub mod proxy;

pub use client::WaypointLibraryClient;
pub use config::ClientConfig;
pub use proxy::{AddResultPolicy, WaypointLibraryProxy};
