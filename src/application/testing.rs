//! In-memory doubles for the network and credential ports
//!
//! `MockNetwork` behaves like a tiny chain: it checks signatures and nonces,
//! applies a transaction's actions all-or-nothing, and reports failures with
//! the same error trees a real node produces.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::NetworkConfig;
use crate::domain::entities::{
    AccessKeyView, AccountView, Action, ExecutionStatus, SignedTransaction, TransactionResult,
};
use crate::domain::ports::{CredentialStore, NetworkClient};
use crate::domain::value_objects::{AccountId, CryptoHash, KeyPair, NearToken, PublicKey};
use crate::error::{StorefrontError, StorefrontResult};

/// Bytes every account occupies before any code is deployed
const BASE_STORAGE: u64 = 182;
const STORAGE_PRICE: u128 = 10_000_000_000_000_000_000;

#[derive(Debug, Clone, Default)]
struct MockAccount {
    amount: NearToken,
    code: Option<Vec<u8>>,
    keys: HashMap<PublicKey, u64>,
    initialized: bool,
}

impl MockAccount {
    fn storage_usage(&self) -> u64 {
        BASE_STORAGE + self.code.as_ref().map_or(0, |c| c.len() as u64)
    }
}

#[derive(Default)]
pub(crate) struct MockNetwork {
    accounts: Mutex<HashMap<String, MockAccount>>,
    calls: AtomicUsize,
    offline: AtomicBool,
}

impl MockNetwork {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_account(self, account_id: &str, balance: NearToken, key: &KeyPair) -> Self {
        let mut account = MockAccount {
            amount: balance,
            ..MockAccount::default()
        };
        account.keys.insert(key.public_key(), 0);
        self.accounts
            .lock()
            .unwrap()
            .insert(account_id.to_string(), account);
        self
    }

    /// Number of requests that reached the network
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub(crate) fn deploy_code(&self, account_id: &str, code: Vec<u8>) {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts.entry(account_id.to_string()).or_default();
        account.code = Some(code);
        account.initialized = false;
    }

    pub(crate) fn code_of(&self, account_id: &str) -> Option<Vec<u8>> {
        self.accounts
            .lock()
            .unwrap()
            .get(account_id)
            .and_then(|a| a.code.clone())
    }

    pub(crate) fn balance_of(&self, account_id: &str) -> Option<NearToken> {
        self.accounts.lock().unwrap().get(account_id).map(|a| a.amount)
    }

    pub(crate) fn exists(&self, account_id: &str) -> bool {
        self.accounts.lock().unwrap().contains_key(account_id)
    }

    pub(crate) fn is_initialized(&self, account_id: &str) -> bool {
        self.accounts
            .lock()
            .unwrap()
            .get(account_id)
            .is_some_and(|a| a.initialized)
    }

    fn request(&self) -> StorefrontResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorefrontError::Network(
                "error sending request: connection refused".to_string(),
            ));
        }
        Ok(())
    }

    fn unknown_account(account_id: &AccountId) -> StorefrontError {
        StorefrontError::remote(
            "UNKNOWN_ACCOUNT",
            format!("account {account_id} does not exist while viewing"),
            json!({ "requested_account_id": account_id }),
        )
    }

    /// Apply `actions` to a copy of the state; the copy is only kept when
    /// every action succeeds
    fn apply(
        accounts: &HashMap<String, MockAccount>,
        signer_id: &str,
        receiver_id: &str,
        actions: &[Action],
    ) -> Result<HashMap<String, MockAccount>, Value> {
        let mut next = accounts.clone();
        for (index, action) in actions.iter().enumerate() {
            let action_error = |kind: Value| json!({ "ActionError": { "index": index, "kind": kind } });
            match action {
                Action::CreateAccount => {
                    if next.contains_key(receiver_id) {
                        return Err(action_error(
                            json!({ "AccountAlreadyExists": { "account_id": receiver_id } }),
                        ));
                    }
                    next.insert(receiver_id.to_string(), MockAccount::default());
                }
                Action::DeployContract { code } => {
                    let Some(account) = next.get_mut(receiver_id) else {
                        return Err(action_error(
                            json!({ "AccountDoesNotExist": { "account_id": receiver_id } }),
                        ));
                    };
                    account.code = Some(code.clone());
                    account.initialized = false;
                }
                Action::FunctionCall(call) => {
                    debit(&mut next, signer_id, call.deposit)?;
                    let Some(account) = next.get_mut(receiver_id) else {
                        return Err(action_error(
                            json!({ "AccountDoesNotExist": { "account_id": receiver_id } }),
                        ));
                    };
                    if account.code.is_none() {
                        return Err(action_error(json!({ "FunctionCallError": {
                            "CompilationError": { "CodeDoesNotExist": { "account_id": receiver_id } }
                        } })));
                    }
                    if call.method_name == "new" {
                        if account.initialized {
                            return Err(action_error(json!({ "FunctionCallError": {
                                "ExecutionError": "Smart contract panicked: Already initialized"
                            } })));
                        }
                        account.initialized = true;
                    }
                    account.amount = account.amount.saturating_add(call.deposit);
                }
                Action::Transfer { deposit } => {
                    debit(&mut next, signer_id, *deposit)?;
                    let Some(account) = next.get_mut(receiver_id) else {
                        return Err(action_error(
                            json!({ "AccountDoesNotExist": { "account_id": receiver_id } }),
                        ));
                    };
                    account.amount = account.amount.saturating_add(*deposit);
                }
                Action::AddKey { public_key, access_key } => {
                    let Some(account) = next.get_mut(receiver_id) else {
                        return Err(action_error(
                            json!({ "AccountDoesNotExist": { "account_id": receiver_id } }),
                        ));
                    };
                    account.keys.insert(*public_key, access_key.nonce);
                }
            }
        }
        Ok(next)
    }
}

fn debit(
    accounts: &mut HashMap<String, MockAccount>,
    signer_id: &str,
    amount: NearToken,
) -> Result<(), Value> {
    let signer = accounts.get_mut(signer_id).ok_or_else(|| {
        json!({ "InvalidTxError": { "SignerDoesNotExist": { "signer_id": signer_id } } })
    })?;
    if signer.amount < amount {
        return Err(json!({ "InvalidTxError": { "NotEnoughBalance": {
            "signer_id": signer_id,
            "balance": signer.amount,
            "cost": amount,
        } } }));
    }
    signer.amount = signer.amount.saturating_sub(amount);
    Ok(())
}

#[async_trait]
impl NetworkClient for MockNetwork {
    async fn view_account(&self, account_id: &AccountId) -> StorefrontResult<AccountView> {
        self.request()?;
        let accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get(account_id.as_str())
            .ok_or_else(|| Self::unknown_account(account_id))?;
        Ok(AccountView {
            amount: account.amount,
            locked: NearToken::ZERO,
            code_hash: account
                .code
                .as_deref()
                .map(CryptoHash::of)
                .unwrap_or_default(),
            storage_usage: account.storage_usage(),
        })
    }

    async fn view_access_key(
        &self,
        account_id: &AccountId,
        public_key: &PublicKey,
    ) -> StorefrontResult<AccessKeyView> {
        self.request()?;
        let accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get(account_id.as_str())
            .ok_or_else(|| Self::unknown_account(account_id))?;
        let nonce = account.keys.get(public_key).ok_or_else(|| {
            StorefrontError::remote(
                "UNKNOWN_ACCESS_KEY",
                format!("access key {public_key} does not exist while viewing"),
                Value::Null,
            )
        })?;
        Ok(AccessKeyView {
            nonce: *nonce,
            block_hash: CryptoHash::of(b"block"),
        })
    }

    async fn storage_amount_per_byte(&self) -> StorefrontResult<NearToken> {
        self.request()?;
        Ok(NearToken::from_yocto(STORAGE_PRICE))
    }

    async fn call_function(
        &self,
        contract_id: &AccountId,
        method: &str,
        args: &[u8],
    ) -> StorefrontResult<Vec<u8>> {
        self.request()?;
        let accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get(contract_id.as_str())
            .ok_or_else(|| Self::unknown_account(contract_id))?;
        if account.code.is_none() {
            return Err(StorefrontError::remote(
                "NO_CONTRACT_CODE",
                format!("contract code for {contract_id} has not been deployed"),
                Value::Null,
            ));
        }
        let args: Value = serde_json::from_slice(args).unwrap_or(Value::Null);
        Ok(serde_json::to_vec(&json!({ "method": method, "args": args }))?)
    }

    async fn broadcast_tx_commit(
        &self,
        transaction: &SignedTransaction,
    ) -> StorefrontResult<TransactionResult> {
        self.request()?;
        let tx = transaction.transaction();
        if !tx
            .public_key
            .verify(transaction.hash().as_bytes(), transaction.signature())
        {
            return Err(StorefrontError::remote(
                "INVALID_TRANSACTION",
                "InvalidSignature",
                Value::Null,
            ));
        }

        let mut accounts = self.accounts.lock().unwrap();
        let signer = accounts
            .get_mut(tx.signer_id.as_str())
            .ok_or_else(|| Self::unknown_account(&tx.signer_id))?;
        let Some(nonce) = signer.keys.get_mut(&tx.public_key) else {
            return Err(StorefrontError::remote(
                "INVALID_TRANSACTION",
                "InvalidAccessKeyError",
                Value::Null,
            ));
        };
        if tx.nonce <= *nonce {
            return Err(StorefrontError::remote(
                "INVALID_TRANSACTION",
                format!("InvalidNonce: {} <= {}", tx.nonce, nonce),
                Value::Null,
            ));
        }
        *nonce = tx.nonce;

        let status = match Self::apply(
            &accounts,
            tx.signer_id.as_str(),
            tx.receiver_id.as_str(),
            &tx.actions,
        ) {
            Ok(next) => {
                *accounts = next;
                ExecutionStatus::SuccessValue(Vec::new())
            }
            Err(failure) => ExecutionStatus::Failure(failure),
        };

        Ok(TransactionResult {
            hash: transaction.hash(),
            signer_id: tx.signer_id.clone(),
            receiver_id: tx.receiver_id.clone(),
            status,
        })
    }
}

/// Keys held in memory, keyed by network and account
#[derive(Default)]
pub(crate) struct MemoryKeyStore {
    keys: Mutex<HashMap<(String, AccountId), KeyPair>>,
    read_only: AtomicBool,
}

impl MemoryKeyStore {
    pub(crate) fn insert(&self, network_id: &str, account_id: &AccountId, key_pair: KeyPair) {
        self.keys
            .lock()
            .unwrap()
            .insert((network_id.to_string(), account_id.clone()), key_pair);
    }

    /// Make every later `store` fail like an unwritable credentials dir
    pub(crate) fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    pub(crate) fn contains(&self, network_id: &str, account_id: &AccountId) -> bool {
        self.keys
            .lock()
            .unwrap()
            .contains_key(&(network_id.to_string(), account_id.clone()))
    }
}

impl CredentialStore for MemoryKeyStore {
    fn load(&self, network_id: &str, account_id: &AccountId) -> StorefrontResult<KeyPair> {
        self.keys
            .lock()
            .unwrap()
            .get(&(network_id.to_string(), account_id.clone()))
            .cloned()
            .ok_or_else(|| StorefrontError::Credentials {
                account_id: account_id.to_string(),
                reason: format!("no key stored for network '{network_id}'"),
            })
    }

    fn store(
        &self,
        network_id: &str,
        account_id: &AccountId,
        key_pair: &KeyPair,
    ) -> StorefrontResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StorefrontError::Credentials {
                account_id: account_id.to_string(),
                reason: "credential store is read-only".to_string(),
            });
        }
        self.keys
            .lock()
            .unwrap()
            .entry((network_id.to_string(), account_id.clone()))
            .or_insert_with(|| key_pair.clone());
        Ok(())
    }
}

/// Testnet config signing as `account`; the RPC url is never dialed
pub(crate) fn test_config(account: &str) -> NetworkConfig {
    NetworkConfig {
        network_id: "testnet".to_string(),
        rpc_url: "http://127.0.0.1:9".to_string(),
        explorer_url: Some("https://explorer.testnet.near.org".to_string()),
        helper_url: None,
        credentials_path: PathBuf::from("/nonexistent/.near-credentials"),
        account_id: Some(AccountId::parse(account).unwrap()),
        timeout: Duration::from_secs(5),
    }
}
