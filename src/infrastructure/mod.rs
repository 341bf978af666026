//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `rpc/` - NEAR JSON-RPC client (reqwest)
//! - `keystore` - Credential files under `~/.near-credentials`
//! - `events/` - Deploy event sinks (console, NDJSON)

pub mod events;
pub mod keystore;
pub mod rpc;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use keystore::FileKeyStore;
pub use rpc::JsonRpcClient;
