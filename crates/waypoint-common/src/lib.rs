//! Waypoint Common Types and Transport
//!
//! This crate provides the waypoint entity, the JSON-RPC protocol
//! definitions and the HTTP transport shared by the waypoint library client
//! and its command-line front end.
//!
//! # Overview
//!
//! - **Waypoint**: a named geographic point with great-circle distance and
//!   initial bearing computations
//! - **Protocol Layer**: JSON-RPC 2.0 envelopes, call-id sequencing and the
//!   error type
//! - **Transport Layer**: blocking HTTP POST with gzip response handling
//!
//! # Architecture
//!
//! The wire protocol is plain JSON-RPC 2.0 over HTTP:
//! - **Request**: `{"jsonrpc": "2.0", "method": ..., "params": [...], "id": N}`
//! - **Response**: `{"result": ...}` or `{"error": ...}`
//! - **Compression**: responses may be gzip-encoded
//!
//! # Components
//!
//! - [`waypoint`] - The [`Waypoint`] entity and [`DistanceUnit`]
//! - [`protocol`] - Envelopes, [`CallIdCounter`] and [`WaypointError`]
//! - [`transport`] - [`transport::JsonCodec`] and [`transport::HttpTransport`]
//!
//! # Example
//!
//! ```
//! use waypoint_common::{DistanceUnit, Waypoint};
//!
//! let tempe = Waypoint::new(33.4255, -111.9400, 1180.0, "Tempe", "ASU");
//! let glendale = Waypoint::new(33.5722, -112.0880, 1100.0, "Glendale", "");
//!
//! let km = tempe.distance_great_circle(&glendale, DistanceUnit::Kilometer);
//! assert!(km > 20.0 && km < 22.0);
//! ```

pub mod protocol;
pub mod transport;
pub mod waypoint;

pub use protocol::*;
pub use waypoint::{DistanceUnit, Waypoint};
