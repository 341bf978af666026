//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod credential_store;
pub mod deploy_events;
pub mod network;

pub use credential_store::CredentialStore;
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use network::NetworkClient;
