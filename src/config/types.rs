//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::{ContractStep, SubAccountPolicy};
use crate::domain::entities::{CallBudget, InitArgs, NftMetadata};
use crate::domain::value_objects::{as_near, AccountId, Gas, NearToken};
use crate::error::{StorefrontError, StorefrontResult};

use super::loader::{self, ConfigWarning};
use super::network::{NetworkConfig, NetworkPreset};

/// `[network]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSection {
    #[serde(default = "default_network_id")]
    pub id: String,

    /// Overrides the preset RPC endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_url: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NetworkSection {
    fn default() -> Self {
        Self {
            id: default_network_id(),
            rpc_url: None,
            explorer_url: None,
            helper_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_network_id() -> String {
    "testnet".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// `[account]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountSection {
    /// Account that signs everything; validated when resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Root of the credential store (defaults to `~/.near-credentials`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<PathBuf>,

    /// Balance given to accounts created by `new-account` and `/new-wallet`
    #[serde(default = "default_sub_account_balance", with = "as_near")]
    pub sub_account_balance: NearToken,
}

impl Default for AccountSection {
    fn default() -> Self {
        Self {
            id: None,
            credentials_path: None,
            sub_account_balance: default_sub_account_balance(),
        }
    }
}

fn default_sub_account_balance() -> NearToken {
    NearToken::from_near(10)
}

/// `[init]` section: arguments for the token contract's `new`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitSection {
    #[serde(default = "default_spec")]
    pub spec: String,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_symbol")]
    pub symbol: String,

    #[serde(default = "default_total_supply")]
    pub total_supply: u64,

    #[serde(default = "default_cost_per_token")]
    pub cost_per_token: u64,

    #[serde(default)]
    pub gas: Gas,

    #[serde(default, with = "as_near")]
    pub deposit: NearToken,
}

impl Default for InitSection {
    fn default() -> Self {
        Self {
            spec: default_spec(),
            name: default_name(),
            symbol: default_symbol(),
            total_supply: default_total_supply(),
            cost_per_token: default_cost_per_token(),
            gas: Gas::default(),
            deposit: NearToken::ZERO,
        }
    }
}

impl InitSection {
    /// Build the `new` argument record for `owner_id`
    pub fn args_for(&self, owner_id: AccountId) -> InitArgs {
        InitArgs {
            owner_id,
            metadata: NftMetadata {
                spec: self.spec.clone(),
                name: self.name.clone(),
                symbol: self.symbol.clone(),
            },
            total_supply: self.total_supply.into(),
            cost_per_token: self.cost_per_token.into(),
        }
    }

    pub fn budget(&self) -> CallBudget {
        CallBudget {
            gas: self.gas,
            deposit: self.deposit,
        }
    }
}

fn default_spec() -> String {
    NftMetadata::default().spec
}

fn default_name() -> String {
    NftMetadata::default().name
}

fn default_symbol() -> String {
    NftMetadata::default().symbol
}

fn default_total_supply() -> u64 {
    100
}

fn default_cost_per_token() -> u64 {
    1
}

/// `[pipeline]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSection {
    #[serde(default)]
    pub sub_account_policy: SubAccountPolicy,

    #[serde(default = "default_contracts")]
    pub contracts: Vec<ContractStep>,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            sub_account_policy: SubAccountPolicy::default(),
            contracts: default_contracts(),
        }
    }
}

/// The storefront's three contracts, built into `out/`
fn default_contracts() -> Vec<ContractStep> {
    vec![
        ContractStep::new("out/tokenizedCard.wasm"),
        ContractStep::new("out/cardMarketplace.wasm")
            .with_sub_account("marketplace", NearToken::from_near(10)),
        ContractStep::new("out/fungibleToken.wasm")
            .with_sub_account("fungible", NearToken::from_near(10)),
    ]
}

/// `[server]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkSection,

    #[serde(default)]
    pub account: AccountSection,

    #[serde(default)]
    pub init: InitSection,

    #[serde(default)]
    pub pipeline: PipelineSection,

    #[serde(default)]
    pub server: ServerSection,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> StorefrontResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> StorefrontResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit file, project config, user config, or defaults
    pub fn load_or_default(
        explicit: Option<&Path>,
        project_root: Option<&Path>,
    ) -> StorefrontResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(explicit, project_root)
    }

    /// Apply environment variable overrides (STOREFRONT_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }

    /// Apply command-line flags, which win over everything else
    pub fn with_overrides(
        mut self,
        network: Option<String>,
        account: Option<String>,
        rpc_url: Option<String>,
    ) -> Self {
        if let Some(network) = network {
            self.network.id = network;
        }
        if let Some(account) = account {
            self.account.id = Some(account);
        }
        if let Some(rpc_url) = rpc_url {
            self.network.rpc_url = Some(rpc_url);
        }
        self
    }

    /// Resolve presets and validate into the immutable connection config
    pub fn network_config(&self) -> StorefrontResult<NetworkConfig> {
        let preset = NetworkPreset::for_network(&self.network.id);

        if self.network.timeout_secs == 0 {
            return Err(StorefrontError::Config(
                "[network] timeout_secs must be at least 1".to_string(),
            ));
        }

        let rpc_url = self
            .network
            .rpc_url
            .clone()
            .or_else(|| preset.map(|p| p.rpc_url.to_string()))
            .ok_or_else(|| {
                StorefrontError::Config(format!(
                    "no RPC endpoint known for network '{}'; set [network] rpc_url",
                    self.network.id
                ))
            })?;

        let account_id = self
            .account
            .id
            .as_deref()
            .map(AccountId::parse)
            .transpose()?;

        let credentials_path = match &self.account.credentials_path {
            Some(path) => path.clone(),
            None => loader::default_credentials_path().ok_or_else(|| {
                StorefrontError::Config(
                    "cannot locate home directory; set [account] credentials_path".to_string(),
                )
            })?,
        };

        Ok(NetworkConfig {
            network_id: self.network.id.clone(),
            rpc_url,
            explorer_url: self
                .network
                .explorer_url
                .clone()
                .or_else(|| preset.and_then(|p| p.explorer_url).map(str::to_string)),
            helper_url: self
                .network
                .helper_url
                .clone()
                .or_else(|| preset.and_then(|p| p.helper_url).map(str::to_string)),
            credentials_path,
            account_id,
            timeout: Duration::from_secs(self.network.timeout_secs),
        })
    }
}
