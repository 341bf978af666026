//! JSON-RPC wire types and their mapping onto domain results

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::{ExecutionStatus, TransactionResult};
use crate::domain::value_objects::{AccountId, CryptoHash, NearToken};
use crate::error::{StorefrontError, StorefrontResult};

#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: &'static str,
    method: &'a str,
    params: Value,
}

impl<'a> RpcRequest<'a> {
    pub(crate) fn new(method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: "storefront",
            method,
            params,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RpcErrorCause {
    pub name: String,
    #[serde(default)]
    pub info: Value,
}

/// Error object of a JSON-RPC response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RpcErrorBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cause: Option<RpcErrorCause>,
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl RpcErrorBody {
    /// Timeouts and node-internal failures are transport problems; the rest
    /// are the node rejecting the request.
    pub(crate) fn into_error(self, raw: Value) -> StorefrontError {
        let cause = self.cause.as_ref().map(|c| c.name.as_str());
        let detail = match &self.data {
            Value::String(s) => s.clone(),
            Value::Null => self.message.clone(),
            other => other.to_string(),
        };

        if cause == Some("TIMEOUT_ERROR") || self.name.as_deref() == Some("INTERNAL_ERROR") {
            let label = cause.or(self.name.as_deref()).unwrap_or("RPC_ERROR");
            return StorefrontError::Network(format!("{label}: {detail}"));
        }

        let name = cause
            .map(str::to_string)
            .or(self.name)
            .unwrap_or_else(|| format!("RPC_ERROR_{}", self.code));
        StorefrontError::remote(name, detail, raw)
    }
}

/// Split a JSON-RPC envelope into its result or a mapped error
pub(crate) fn into_result(body: Value) -> StorefrontResult<Value> {
    if let Some(error) = body.get("error") {
        let parsed: RpcErrorBody = serde_json::from_value(error.clone())?;
        return Err(parsed.into_error(error.clone()));
    }
    match body.get("result") {
        Some(result) => Ok(result.clone()),
        None => Err(StorefrontError::Network(format!(
            "malformed JSON-RPC response: {body}"
        ))),
    }
}

/// Older nodes report query failures inside a successful result
pub(crate) fn check_query_result(result: Value) -> StorefrontResult<Value> {
    if let Some(message) = result.get("error").and_then(Value::as_str) {
        return Err(StorefrontError::remote(
            "QUERY_ERROR",
            message.to_string(),
            result.clone(),
        ));
    }
    Ok(result)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CallResult {
    pub result: Vec<u8>,
}

#[derive(Debug, Deserialize)]
struct RuntimeConfig {
    storage_amount_per_byte: NearToken,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProtocolConfig {
    runtime_config: RuntimeConfig,
}

impl ProtocolConfig {
    pub(crate) fn storage_amount_per_byte(&self) -> NearToken {
        self.runtime_config.storage_amount_per_byte
    }
}

#[derive(Debug, Deserialize)]
struct TransactionView {
    hash: CryptoHash,
    signer_id: AccountId,
    receiver_id: AccountId,
}

/// `FinalExecutionOutcomeView`, only the parts we report
#[derive(Debug, Deserialize)]
pub(crate) struct FinalOutcome {
    status: Value,
    transaction: TransactionView,
}

impl FinalOutcome {
    pub(crate) fn into_result(self) -> StorefrontResult<TransactionResult> {
        let status = match &self.status {
            Value::Object(map) if map.contains_key("SuccessValue") => {
                let encoded = map["SuccessValue"].as_str().unwrap_or_default();
                let bytes = STANDARD.decode(encoded).map_err(|e| {
                    StorefrontError::remote(
                        "MALFORMED_OUTCOME",
                        format!("SuccessValue is not base64: {e}"),
                        self.status.clone(),
                    )
                })?;
                ExecutionStatus::SuccessValue(bytes)
            }
            Value::Object(map) if map.contains_key("SuccessReceiptId") => {
                let id = map["SuccessReceiptId"].as_str().unwrap_or_default();
                ExecutionStatus::SuccessReceiptId(id.to_string())
            }
            Value::Object(map) if map.contains_key("Failure") => {
                ExecutionStatus::Failure(map["Failure"].clone())
            }
            other => {
                return Err(StorefrontError::remote(
                    "UNEXPECTED_STATUS",
                    format!("transaction did not finish: {other}"),
                    other.clone(),
                ))
            }
        };

        Ok(TransactionResult {
            hash: self.transaction.hash,
            signer_id: self.transaction.signer_id,
            receiver_id: self.transaction.receiver_id,
            status,
        })
    }
}
