//! File-backed credential store
//!
//! Same layout `near login` writes:
//! `<root>/<network_id>/<account_id>.json` holding
//! `{ "account_id", "public_key", "private_key" }`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::ports::CredentialStore;
use crate::domain::value_objects::{AccountId, KeyPair, PublicKey};
use crate::error::{StorefrontError, StorefrontResult};

#[derive(Debug, Serialize, Deserialize)]
struct CredentialFile {
    account_id: String,
    public_key: PublicKey,
    #[serde(alias = "secret_key")]
    private_key: String,
}

#[derive(Debug, Clone)]
pub struct FileKeyStore {
    root: PathBuf,
}

impl FileKeyStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, network_id: &str, account_id: &AccountId) -> PathBuf {
        self.root
            .join(network_id)
            .join(format!("{}.json", account_id.as_str()))
    }
}

impl CredentialStore for FileKeyStore {
    fn load(&self, network_id: &str, account_id: &AccountId) -> StorefrontResult<KeyPair> {
        let path = self.path_for(network_id, account_id);
        let unusable = |reason: String| StorefrontError::Credentials {
            account_id: account_id.to_string(),
            reason,
        };

        let content = fs::read_to_string(&path)
            .map_err(|e| unusable(format!("cannot read {}: {e}", path.display())))?;
        let file: CredentialFile = serde_json::from_str(&content)
            .map_err(|e| unusable(format!("malformed {}: {e}", path.display())))?;

        if file.account_id != account_id.as_str() {
            return Err(unusable(format!(
                "{} belongs to '{}'",
                path.display(),
                file.account_id
            )));
        }

        let key_pair = KeyPair::from_secret_str(&file.private_key)
            .map_err(|e| unusable(e.to_string()))?;
        if key_pair.public_key() != file.public_key {
            return Err(unusable(
                "public_key does not match private_key".to_string(),
            ));
        }
        Ok(key_pair)
    }

    fn store(
        &self,
        network_id: &str,
        account_id: &AccountId,
        key_pair: &KeyPair,
    ) -> StorefrontResult<()> {
        let path = self.path_for(network_id, account_id);
        if path.exists() {
            tracing::debug!(path = %path.display(), "credential file exists, leaving it");
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = CredentialFile {
            account_id: account_id.to_string(),
            public_key: key_pair.public_key(),
            private_key: key_pair.secret_key_string(),
        };
        let json = serde_json::to_string(&file)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut handle = options.open(&path)?;
        handle.write_all(json.as_bytes())?;
        Ok(())
    }
}
