//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StorefrontError, StorefrontResult};

use super::types::Config;

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "storefront.toml";

/// Overrides the home directory for credential and user-config lookup.
///
/// `dirs::home_dir()` ignores `HOME` on Windows, so tests set this instead.
pub const TEST_HOME_VAR: &str = "STOREFRONT_TEST_HOME";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> StorefrontResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StorefrontError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from an explicit file, project config, user config, or defaults,
/// then apply environment overrides.
///
/// The first file found wins; files are not merged.
pub fn load_or_default(
    explicit: Option<&Path>,
    project_root: Option<&Path>,
) -> StorefrontResult<(Config, Vec<ConfigWarning>)> {
    let candidate = explicit
        .map(Path::to_path_buf)
        .or_else(|| {
            project_root
                .map(|root| root.join(PROJECT_CONFIG_FILE))
                .filter(|p| p.exists())
        })
        .or_else(|| user_config_path().filter(|p| p.exists()));

    let (config, warnings) = match candidate {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            load_with_warnings(&path)?
        }
        None => (Config::default(), Vec::new()),
    };

    Ok((config.with_env_overrides(), warnings))
}

/// Apply environment variable overrides.
///
/// `STOREFRONT_*` names win over the legacy `NEAR_ENV` / `CONTRACT_NAME`.
pub fn with_env_overrides<F>(mut config: Config, env: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let var = |primary: &str, fallback: Option<&str>| {
        env(primary)
            .or_else(|| fallback.and_then(|key| env(key)))
            .filter(|v| !v.trim().is_empty())
    };

    if let Some(network) = var("STOREFRONT_NETWORK", Some("NEAR_ENV")) {
        config.network.id = network;
    }

    if let Some(account) = var("STOREFRONT_ACCOUNT", Some("CONTRACT_NAME")) {
        config.account.id = Some(account);
    }

    if let Some(rpc_url) = var("STOREFRONT_RPC_URL", None) {
        config.network.rpc_url = Some(rpc_url);
    }

    if let Some(path) = var("STOREFRONT_CREDENTIALS", None) {
        config.account.credentials_path = Some(PathBuf::from(path));
    }

    config
}

fn home_dir() -> Option<PathBuf> {
    std::env::var(TEST_HOME_VAR)
        .ok()
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// `~/.near-credentials`, where `near login` stores keys
pub fn default_credentials_path() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".near-credentials"))
}

/// `<config_dir>/storefront/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    let config_dir = match std::env::var(TEST_HOME_VAR) {
        Ok(home) => Some(PathBuf::from(home).join(".config")),
        Err(_) => dirs::config_dir(),
    };
    config_dir.map(|dir| dir.join("storefront").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "network",
        "id",
        "rpc_url",
        "explorer_url",
        "helper_url",
        "timeout_secs",
        "account",
        "credentials_path",
        "sub_account_balance",
        "init",
        "spec",
        "name",
        "symbol",
        "total_supply",
        "cost_per_token",
        "gas",
        "deposit",
        "pipeline",
        "sub_account_policy",
        "contracts",
        "artifact",
        "sub_account",
        "initial_balance",
        "server",
        "bind",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
