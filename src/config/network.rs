//! Resolved connection settings

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::domain::value_objects::AccountId;
use crate::error::{StorefrontError, StorefrontResult};

/// Built-in endpoints for well-known networks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkPreset {
    pub rpc_url: &'static str,
    pub explorer_url: Option<&'static str>,
    pub helper_url: Option<&'static str>,
}

impl NetworkPreset {
    pub fn for_network(network_id: &str) -> Option<Self> {
        match network_id {
            "testnet" => Some(Self {
                rpc_url: "https://rpc.testnet.near.org",
                explorer_url: Some("https://explorer.testnet.near.org"),
                helper_url: Some("https://helper.testnet.near.org"),
            }),
            "mainnet" => Some(Self {
                rpc_url: "https://rpc.mainnet.near.org",
                explorer_url: Some("https://explorer.near.org"),
                helper_url: Some("https://helper.mainnet.near.org"),
            }),
            "localnet" => Some(Self {
                rpc_url: "http://127.0.0.1:3030",
                explorer_url: None,
                helper_url: None,
            }),
            _ => None,
        }
    }
}

/// Immutable connection config, built once and passed by reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkConfig {
    pub network_id: String,
    pub rpc_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_url: Option<String>,
    pub credentials_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    #[serde(serialize_with = "as_secs")]
    pub timeout: Duration,
}

impl NetworkConfig {
    /// The configured signing account, required by every operation
    pub fn account_id(&self) -> StorefrontResult<&AccountId> {
        self.account_id.as_ref().ok_or_else(|| {
            StorefrontError::Config(
                "no account configured; pass --account, set STOREFRONT_ACCOUNT or [account] id"
                    .to_string(),
            )
        })
    }

    pub fn is_mainnet(&self) -> bool {
        self.network_id == "mainnet"
    }
}

fn as_secs<S: serde::Serializer>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(timeout.as_secs())
}
