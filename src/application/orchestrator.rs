//! Deployment Orchestrator
//!
//! Sequences the handful of network calls behind each storefront operation.
//! Holds no state beyond its collaborators: every operation is a fresh
//! round trip.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::NetworkConfig;
use crate::domain::entities::{
    AccessKey, Account, AccountBalance, Action, CallBudget, ContractInterface, InitArgs,
    TransactionResult,
};
use crate::domain::ports::{CredentialStore, NetworkClient};
use crate::domain::value_objects::{AccountId, CryptoHash, NearToken};
use crate::error::{StorefrontError, StorefrontResult};

use super::proxy::ContractProxy;
use super::signer::sign_and_send;

pub struct Orchestrator<N, C> {
    config: NetworkConfig,
    network: N,
    credentials: C,
}

impl<N, C> Orchestrator<N, C>
where
    N: NetworkClient,
    C: CredentialStore,
{
    pub fn new(config: NetworkConfig, network: N, credentials: C) -> Self {
        Self {
            config,
            network,
            credentials,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Load the account handle from the credential store
    pub fn account(&self, account_id: &AccountId) -> StorefrontResult<Account> {
        let key_pair = self.credentials.load(&self.config.network_id, account_id)?;
        Ok(Account::new(account_id.clone(), key_pair))
    }

    /// Whether `account_id` exists on chain and its key is stored locally
    pub async fn can_sign_as(&self, account_id: &AccountId) -> bool {
        self.account(account_id).is_ok() && self.network.view_account(account_id).await.is_ok()
    }

    /// Submit the artifact at `artifact` as `account_id`'s contract code.
    ///
    /// The file is read before anything is sent, so a missing artifact
    /// never reaches the network.
    pub async fn deploy(
        &self,
        artifact: &Path,
        account_id: &AccountId,
    ) -> StorefrontResult<TransactionResult> {
        let code = tokio::fs::read(artifact)
            .await
            .map_err(|source| StorefrontError::Artifact {
                path: artifact.to_path_buf(),
                source,
            })?;
        let account = self.account(account_id)?;

        info!(
            account_id = %account_id,
            artifact = %artifact.display(),
            bytes = code.len(),
            code_hash = %CryptoHash::of(&code),
            "deploying contract"
        );

        sign_and_send(
            &self.network,
            &account,
            account_id,
            vec![Action::DeployContract { code }],
        )
        .await
    }

    /// Call the token contract's `new` entry point on `account_id`
    pub async fn initialize(
        &self,
        account_id: &AccountId,
        args: &InitArgs,
        budget: CallBudget,
    ) -> StorefrontResult<TransactionResult> {
        let proxy = ContractProxy::new(
            &self.network,
            self.account(account_id)?,
            account_id.clone(),
            ContractInterface::tokenized_card(),
        );
        info!(account_id = %account_id, owner_id = %args.owner_id, "initializing contract");
        proxy.call("new", args, budget).await
    }

    /// Create `new_id.parent_id`, funded by and keyed like the parent.
    ///
    /// The child's credentials are written next to the parent's so the
    /// child can be loaded afterwards. The account exists once the
    /// transaction lands, so a failure to write them is only logged.
    pub async fn create_sub_account(
        &self,
        parent_id: &AccountId,
        new_id: &str,
        initial_balance: NearToken,
    ) -> StorefrontResult<AccountId> {
        let child_id = parent_id.sub_account(new_id)?;
        let parent = self.account(parent_id)?;

        info!(parent = %parent_id, account_id = %child_id, balance = %initial_balance, "creating sub-account");

        let actions = vec![
            Action::CreateAccount,
            Action::Transfer {
                deposit: initial_balance,
            },
            Action::AddKey {
                public_key: parent.public_key(),
                access_key: AccessKey::full_access(),
            },
        ];
        sign_and_send(&self.network, &parent, &child_id, actions).await?;

        if let Err(err) = self
            .credentials
            .store(&self.config.network_id, &child_id, parent.key_pair())
        {
            warn!(account_id = %child_id, error = %err, "sub-account created but credentials not saved");
        }
        Ok(child_id)
    }

    /// Balance breakdown of any account; no credentials needed
    pub async fn get_balance(&self, account_id: &AccountId) -> StorefrontResult<AccountBalance> {
        let view = self.network.view_account(account_id).await?;
        let price = self.network.storage_amount_per_byte().await?;
        Ok(AccountBalance::from_view(&view, price))
    }

    /// Read-only call on the token contract at `contract_id`, as `account_id`
    pub async fn view<A>(
        &self,
        account_id: &AccountId,
        contract_id: &AccountId,
        method: &str,
        args: &A,
    ) -> StorefrontResult<Value>
    where
        A: Serialize + ?Sized + Sync,
    {
        let proxy = ContractProxy::new(
            &self.network,
            self.account(account_id)?,
            contract_id.clone(),
            ContractInterface::tokenized_card(),
        );
        proxy.view(method, args).await
    }
}
