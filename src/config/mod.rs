//! Configuration module for storefront
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (STOREFRONT_*, plus NEAR_ENV / CONTRACT_NAME)
//! 3. Project config (./storefront.toml)
//! 4. User config (<config_dir>/storefront/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod network;
mod types;

pub use loader::{
    default_credentials_path, user_config_path, ConfigWarning, PROJECT_CONFIG_FILE, TEST_HOME_VAR,
};
pub use network::{NetworkConfig, NetworkPreset};
pub use types::{AccountSection, Config, InitSection, NetworkSection, PipelineSection, ServerSection};
