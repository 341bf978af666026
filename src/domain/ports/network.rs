//! Network Port
//!
//! The only way the application talks to the chain. Every method is one
//! request/response round trip.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{AccessKeyView, AccountView, SignedTransaction, TransactionResult};
use crate::domain::value_objects::{AccountId, NearToken, PublicKey};
use crate::error::StorefrontResult;

#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Raw account state. Unknown accounts are `Remote` errors.
    async fn view_account(&self, account_id: &AccountId) -> StorefrontResult<AccountView>;

    /// Nonce and a recent block hash for a signer's key
    async fn view_access_key(
        &self,
        account_id: &AccountId,
        public_key: &PublicKey,
    ) -> StorefrontResult<AccessKeyView>;

    /// Current storage price from the protocol config
    async fn storage_amount_per_byte(&self) -> StorefrontResult<NearToken>;

    /// Run a view method; returns the raw bytes it produced
    async fn call_function(
        &self,
        contract_id: &AccountId,
        method: &str,
        args: &[u8],
    ) -> StorefrontResult<Vec<u8>>;

    /// Submit and wait for the final outcome
    async fn broadcast_tx_commit(
        &self,
        transaction: &SignedTransaction,
    ) -> StorefrontResult<TransactionResult>;
}

#[async_trait]
impl<T: NetworkClient + ?Sized> NetworkClient for Arc<T> {
    async fn view_account(&self, account_id: &AccountId) -> StorefrontResult<AccountView> {
        (**self).view_account(account_id).await
    }

    async fn view_access_key(
        &self,
        account_id: &AccountId,
        public_key: &PublicKey,
    ) -> StorefrontResult<AccessKeyView> {
        (**self).view_access_key(account_id, public_key).await
    }

    async fn storage_amount_per_byte(&self) -> StorefrontResult<NearToken> {
        (**self).storage_amount_per_byte().await
    }

    async fn call_function(
        &self,
        contract_id: &AccountId,
        method: &str,
        args: &[u8],
    ) -> StorefrontResult<Vec<u8>> {
        (**self).call_function(contract_id, method, args).await
    }

    async fn broadcast_tx_commit(
        &self,
        transaction: &SignedTransaction,
    ) -> StorefrontResult<TransactionResult> {
        (**self).broadcast_tx_commit(transaction).await
    }
}
