//! Storefront - deployment orchestrator for the tokenized card storefront
//!
//! Deploys the storefront's contracts to NEAR, initializes the token
//! contract, creates sub-accounts and reports balances, from the command
//! line or over a small HTTP surface.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod server;

// Re-exports for convenience
pub use application::{DeployPipeline, Orchestrator, SubAccountPolicy};
pub use config::{Config, NetworkConfig};
pub use domain::value_objects::{AccountId, NearToken};
pub use error::{ErrorKind, StorefrontError, StorefrontResult};
