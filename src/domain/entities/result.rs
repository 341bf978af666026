//! Outcome of a committed transaction

use serde_json::Value;

use crate::domain::value_objects::{AccountId, CryptoHash};
use crate::error::{StorefrontError, StorefrontResult};

/// Final status of a transaction
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionStatus {
    /// Decoded return value of the last receipt
    SuccessValue(Vec<u8>),
    SuccessReceiptId(String),
    /// Error tree exactly as the node reported it
    Failure(Value),
}

/// Result of `broadcast_tx_commit`
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionResult {
    pub hash: CryptoHash,
    pub signer_id: AccountId,
    pub receiver_id: AccountId,
    pub status: ExecutionStatus,
}

impl TransactionResult {
    pub fn is_success(&self) -> bool {
        !matches!(self.status, ExecutionStatus::Failure(_))
    }

    /// Return value, when the transaction produced one
    pub fn success_value(&self) -> Option<&[u8]> {
        match &self.status {
            ExecutionStatus::SuccessValue(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Turn a `Failure` status into [`StorefrontError::Remote`]
    pub fn into_success(self) -> StorefrontResult<Self> {
        match &self.status {
            ExecutionStatus::Failure(payload) => {
                let (name, message) = describe_failure(payload);
                Err(StorefrontError::remote(name, message, payload.clone()))
            }
            _ => Ok(self),
        }
    }

    /// Link to the transaction on a block explorer
    pub fn explorer_url(&self, explorer_base: &str) -> String {
        format!(
            "{}/transactions/{}",
            explorer_base.trim_end_matches('/'),
            self.hash
        )
    }
}

/// Walk a runtime error tree down to its innermost named error.
///
/// `{"ActionError":{"index":0,"kind":{"FunctionCallError":{"ExecutionError":"..."}}}}`
/// yields `("ExecutionError", "...")`.
fn describe_failure(failure: &Value) -> (String, String) {
    let mut name = "TransactionFailure".to_string();
    let mut current = failure;
    loop {
        match current {
            Value::Object(map) if map.len() == 1 => {
                let Some((key, inner)) = map.iter().next() else {
                    break;
                };
                if !key.starts_with(|c: char| c.is_ascii_uppercase()) {
                    break;
                }
                name = key.clone();
                current = inner;
            }
            Value::Object(map) if map.contains_key("kind") => current = &map["kind"],
            Value::String(message) => return (name, message.clone()),
            _ => break,
        }
    }
    (name, current.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(status: ExecutionStatus) -> TransactionResult {
        TransactionResult {
            hash: CryptoHash::of(b"tx"),
            signer_id: AccountId::parse("store.testnet").unwrap(),
            receiver_id: AccountId::parse("store.testnet").unwrap(),
            status,
        }
    }

    #[test]
    fn panic_maps_to_execution_error() {
        let payload = json!({
            "ActionError": {
                "index": 0,
                "kind": { "FunctionCallError": {
                    "ExecutionError": "Smart contract panicked: Already initialized"
                } }
            }
        });
        let err = result(ExecutionStatus::Failure(payload))
            .into_success()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ExecutionError: Smart contract panicked: Already initialized"
        );
    }

    #[test]
    fn structured_leaf_keeps_its_fields() {
        let payload = json!({
            "ActionError": {
                "index": 0,
                "kind": { "AccountAlreadyExists": { "account_id": "marketplace.store.testnet" } }
            }
        });
        let (name, message) = describe_failure(&payload);
        assert_eq!(name, "AccountAlreadyExists");
        assert!(message.contains("marketplace.store.testnet"));
    }

    #[test]
    fn success_passes_through() {
        let ok = result(ExecutionStatus::SuccessValue(b"\"\"".to_vec()));
        assert!(ok.is_success());
        assert_eq!(ok.clone().into_success().unwrap(), ok);
    }

    #[test]
    fn explorer_link_uses_hash() {
        let tx = result(ExecutionStatus::SuccessReceiptId("r".into()));
        let url = tx.explorer_url("https://explorer.testnet.near.org/");
        assert_eq!(
            url,
            format!("https://explorer.testnet.near.org/transactions/{}", tx.hash)
        );
    }
}
