// Copyright 2026 Waypoint Client Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Waypoint CLI
//!
//! Command-line front end for a remote waypoint library.
//!
//! The `waypoint` binary exposes every client operation as a subcommand:
//!
//! - `add`, `update`, `remove`, `get`: manage single waypoints
//! - `names`, `by-id`: list and look up stored names
//! - `save`, `restore`: ask the service to write or reload its JSON file
//! - `distance`: fetch two waypoints and compute distance and bearing locally
//! - `route`: ask the service for its distance-and-bearing text
//!
//! ## Configuration
//!
//! The service URL comes from `--url`, then the `WAYPOINT_SERVICE_URL`
//! environment variable, then `http://127.0.0.1:8080`. Extra headers are
//! given as repeated `--header name:value` options.

pub mod render;
pub mod settings;
