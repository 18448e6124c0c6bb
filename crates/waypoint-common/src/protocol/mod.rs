pub mod call_id;
pub mod error;
pub mod jsonrpc;


pub use call_id::CallIdCounter;
pub use error::{ErrorCategory, Result, WaypointError};
pub use jsonrpc::{JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
