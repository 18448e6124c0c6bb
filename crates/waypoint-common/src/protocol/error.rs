use std::num::ParseFloatError;

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaypointError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected status from post: {0}")]
    HttpStatus(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Service returned an error: {0}")]
    Service(Value),

    #[error("Invalid number '{input}': {source}")]
    InvalidNumber {
        input: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("Waypoint {field} is not a finite number: {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// Broad failure families a caller may want to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection failure, non-200 status, or I/O while sending/receiving.
    Transport,
    /// The response (or a document inside it) could not be decoded.
    Decode,
    /// The service answered with an `error` member.
    Protocol,
    /// Caller input was rejected before anything was sent.
    Validation,
}

impl WaypointError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            WaypointError::Transport(_) | WaypointError::HttpStatus(_) | WaypointError::Io(_) => {
                ErrorCategory::Transport
            }
            WaypointError::JsonSerialization(_) | WaypointError::InvalidResponse(_) => {
                ErrorCategory::Decode
            }
            WaypointError::Service(_) => ErrorCategory::Protocol,
            WaypointError::InvalidNumber { .. } | WaypointError::NonFinite { .. } => {
                ErrorCategory::Validation
            }
        }
    }
}

impl From<reqwest::Error> for WaypointError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => WaypointError::HttpStatus(status.as_u16()),
            None => WaypointError::Transport(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, WaypointError>;
