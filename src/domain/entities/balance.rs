//! Account state as reported by the network, and the derived balance

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CryptoHash, NearToken};

/// `view_account` query result
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountView {
    pub amount: NearToken,
    pub locked: NearToken,
    pub code_hash: CryptoHash,
    pub storage_usage: u64,
}

impl AccountView {
    /// True when a contract is deployed on the account
    pub fn has_code(&self) -> bool {
        self.code_hash != CryptoHash::default()
    }
}

/// `view_access_key` query result, only the fields a signer needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AccessKeyView {
    pub nonce: u64,
    pub block_hash: CryptoHash,
}

/// Balance breakdown of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    pub total: NearToken,
    pub state_staked: NearToken,
    pub staked: NearToken,
    pub available: NearToken,
}

impl AccountBalance {
    /// Derive the breakdown from raw account state and the storage price
    pub fn from_view(view: &AccountView, storage_amount_per_byte: NearToken) -> Self {
        let total = view.amount.saturating_add(view.locked);
        let state_staked = NearToken::from_yocto(
            storage_amount_per_byte
                .as_yocto()
                .saturating_mul(u128::from(view.storage_usage)),
        );
        let staked = view.locked;
        let reserved = staked.max(state_staked);
        Self {
            total,
            state_staked,
            staked,
            available: total.saturating_sub(reserved),
        }
    }
}
