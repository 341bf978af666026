//! Transactions and actions
//!
//! Borsh layout matches the NEAR protocol: a transaction is signed by
//! signing the SHA-256 of its borsh encoding, and that digest is also the
//! transaction hash.

use std::io::Write;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use borsh::BorshSerialize;

use crate::domain::value_objects::{
    AccountId, CryptoHash, Gas, KeyPair, NearToken, PublicKey, Signature,
};
use crate::error::StorefrontResult;

/// Arguments of a function call action
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct FunctionCallAction {
    pub method_name: String,
    pub args: Vec<u8>,
    pub gas: Gas,
    pub deposit: NearToken,
}

/// Permission granted to an access key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessKeyPermission {
    FullAccess,
}

/// Access key attached by an `AddKey` action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessKey {
    pub nonce: u64,
    pub permission: AccessKeyPermission,
}

impl AccessKey {
    pub const fn full_access() -> Self {
        Self {
            nonce: 0,
            permission: AccessKeyPermission::FullAccess,
        }
    }
}

impl BorshSerialize for AccessKey {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.nonce.serialize(writer)?;
        match self.permission {
            // FunctionCall = 0 is not used here
            AccessKeyPermission::FullAccess => 1u8.serialize(writer),
        }
    }
}

/// A single action inside a transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateAccount,
    DeployContract { code: Vec<u8> },
    FunctionCall(Box<FunctionCallAction>),
    Transfer { deposit: NearToken },
    AddKey { public_key: PublicKey, access_key: AccessKey },
}

impl Action {
    const CREATE_ACCOUNT: u8 = 0;
    const DEPLOY_CONTRACT: u8 = 1;
    const FUNCTION_CALL: u8 = 2;
    const TRANSFER: u8 = 3;
    const ADD_KEY: u8 = 5;

    pub fn function_call(
        method_name: impl Into<String>,
        args: Vec<u8>,
        gas: Gas,
        deposit: NearToken,
    ) -> Self {
        Self::FunctionCall(Box::new(FunctionCallAction {
            method_name: method_name.into(),
            args,
            gas,
            deposit,
        }))
    }

    /// Short name used in logs and events
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateAccount => "create_account",
            Self::DeployContract { .. } => "deploy_contract",
            Self::FunctionCall(_) => "function_call",
            Self::Transfer { .. } => "transfer",
            Self::AddKey { .. } => "add_key",
        }
    }
}

impl BorshSerialize for Action {
    fn serialize<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        match self {
            Self::CreateAccount => Self::CREATE_ACCOUNT.serialize(writer),
            Self::DeployContract { code } => {
                Self::DEPLOY_CONTRACT.serialize(writer)?;
                code.serialize(writer)
            }
            Self::FunctionCall(call) => {
                Self::FUNCTION_CALL.serialize(writer)?;
                call.serialize(writer)
            }
            Self::Transfer { deposit } => {
                Self::TRANSFER.serialize(writer)?;
                deposit.serialize(writer)
            }
            Self::AddKey {
                public_key,
                access_key,
            } => {
                Self::ADD_KEY.serialize(writer)?;
                public_key.serialize(writer)?;
                access_key.serialize(writer)
            }
        }
    }
}

/// Unsigned transaction
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct Transaction {
    pub signer_id: AccountId,
    pub public_key: PublicKey,
    pub nonce: u64,
    pub receiver_id: AccountId,
    pub block_hash: CryptoHash,
    pub actions: Vec<Action>,
}

impl Transaction {
    /// Borsh-encode, hash and sign with `key`
    pub fn sign(self, key: &KeyPair) -> StorefrontResult<SignedTransaction> {
        let bytes = borsh::to_vec(&self)?;
        let hash = CryptoHash::of(&bytes);
        let signature = key.sign(hash.as_bytes());
        Ok(SignedTransaction {
            transaction: self,
            signature,
            hash,
        })
    }
}

/// Transaction plus signature, ready to broadcast
#[derive(Debug, Clone, BorshSerialize)]
pub struct SignedTransaction {
    transaction: Transaction,
    signature: Signature,
    #[borsh(skip)]
    hash: CryptoHash,
}

impl SignedTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Transaction hash, as reported by explorers
    pub fn hash(&self) -> CryptoHash {
        self.hash
    }

    /// Base64 of the borsh encoding, the form `broadcast_tx_commit` takes
    pub fn to_base64(&self) -> StorefrontResult<String> {
        Ok(STANDARD.encode(borsh::to_vec(self)?))
    }
}
