//! Credential Store Port
//!
//! Maps `(network, account)` to the key that signs for it.

use std::sync::Arc;

use crate::domain::value_objects::{AccountId, KeyPair};
use crate::error::StorefrontResult;

pub trait CredentialStore: Send + Sync {
    /// Load the signing key. Missing or malformed entries are `Credentials` errors.
    fn load(&self, network_id: &str, account_id: &AccountId) -> StorefrontResult<KeyPair>;

    /// Persist a key for an account; an existing entry is left untouched
    fn store(
        &self,
        network_id: &str,
        account_id: &AccountId,
        key_pair: &KeyPair,
    ) -> StorefrontResult<()>;
}

impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    fn load(&self, network_id: &str, account_id: &AccountId) -> StorefrontResult<KeyPair> {
        (**self).load(network_id, account_id)
    }

    fn store(
        &self,
        network_id: &str,
        account_id: &AccountId,
        key_pair: &KeyPair,
    ) -> StorefrontResult<()> {
        (**self).store(network_id, account_id, key_pair)
    }
}
