//! NEAR JSON-RPC client over HTTP

mod types;

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tracing::debug;

use crate::config::NetworkConfig;
use crate::domain::entities::{AccessKeyView, AccountView, SignedTransaction, TransactionResult};
use crate::domain::ports::NetworkClient;
use crate::domain::value_objects::{AccountId, NearToken, PublicKey};
use crate::error::{StorefrontError, StorefrontResult};

use types::{check_query_result, CallResult, FinalOutcome, ProtocolConfig, RpcRequest};

/// [`NetworkClient`] backed by a NEAR RPC node.
///
/// Reads use `finality: final`. There is no retry; a timeout surfaces as a
/// `Network` error.
#[derive(Debug, Clone)]
pub struct JsonRpcClient {
    http: reqwest::Client,
    url: String,
}

impl JsonRpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> StorefrontResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn from_config(config: &NetworkConfig) -> StorefrontResult<Self> {
        Self::new(config.rpc_url.clone(), config.timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(&self, method: &str, params: Value) -> StorefrontResult<Value> {
        debug!(method, url = %self.url, "rpc request");

        let response = self
            .http
            .post(&self.url)
            .json(&RpcRequest::new(method, params))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text).map_err(|_| {
            StorefrontError::Network(format!(
                "HTTP {status} from {}: {}",
                self.url,
                text.chars().take(200).collect::<String>()
            ))
        })?;

        types::into_result(body)
    }

    async fn query(&self, params: Value) -> StorefrontResult<Value> {
        check_query_result(self.call("query", params).await?)
    }
}

#[async_trait]
impl NetworkClient for JsonRpcClient {
    async fn view_account(&self, account_id: &AccountId) -> StorefrontResult<AccountView> {
        let result = self
            .query(json!({
                "request_type": "view_account",
                "finality": "final",
                "account_id": account_id,
            }))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn view_access_key(
        &self,
        account_id: &AccountId,
        public_key: &PublicKey,
    ) -> StorefrontResult<AccessKeyView> {
        let result = self
            .query(json!({
                "request_type": "view_access_key",
                "finality": "final",
                "account_id": account_id,
                "public_key": public_key,
            }))
            .await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn storage_amount_per_byte(&self) -> StorefrontResult<NearToken> {
        let result = self
            .call("EXPERIMENTAL_protocol_config", json!({ "finality": "final" }))
            .await?;
        let config: ProtocolConfig = serde_json::from_value(result)?;
        Ok(config.storage_amount_per_byte())
    }

    async fn call_function(
        &self,
        contract_id: &AccountId,
        method: &str,
        args: &[u8],
    ) -> StorefrontResult<Vec<u8>> {
        let result = self
            .query(json!({
                "request_type": "call_function",
                "finality": "final",
                "account_id": contract_id,
                "method_name": method,
                "args_base64": STANDARD.encode(args),
            }))
            .await?;
        let call: CallResult = serde_json::from_value(result)?;
        Ok(call.result)
    }

    async fn broadcast_tx_commit(
        &self,
        transaction: &SignedTransaction,
    ) -> StorefrontResult<TransactionResult> {
        let encoded = transaction.to_base64()?;
        let result = self.call("broadcast_tx_commit", json!([encoded])).await?;
        let outcome: FinalOutcome = serde_json::from_value(result)?;
        outcome.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use axum::{routing::post, Json, Router};

    async fn serve(reply: Value) -> String {
        let app = Router::new().route(
            "/",
            post(move |Json(request): Json<Value>| {
                let reply = reply.clone();
                async move {
                    assert_eq!(request["jsonrpc"], "2.0");
                    Json(reply)
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn view_account_decodes_result() {
        let url = serve(json!({
            "jsonrpc": "2.0",
            "id": "storefront",
            "result": {
                "amount": "5000000000000000000000000",
                "locked": "0",
                "code_hash": "11111111111111111111111111111111",
                "storage_usage": 100,
                "block_height": 10,
                "block_hash": "11111111111111111111111111111111"
            }
        }))
        .await;

        let client = JsonRpcClient::new(url, Duration::from_secs(5)).unwrap();
        let view = client
            .view_account(&"store.testnet".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(view.amount, NearToken::from_near(5));
        assert_eq!(view.storage_usage, 100);
    }

    #[tokio::test]
    async fn unknown_account_maps_to_remote() {
        let url = serve(json!({
            "jsonrpc": "2.0",
            "id": "storefront",
            "error": {
                "name": "HANDLER_ERROR",
                "cause": { "name": "UNKNOWN_ACCOUNT", "info": {} },
                "code": -32000,
                "message": "Server error",
                "data": "account nobody.testnet does not exist while viewing"
            }
        }))
        .await;

        let client = JsonRpcClient::new(url, Duration::from_secs(5)).unwrap();
        let err = client
            .view_account(&"nobody.testnet".parse().unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Remote);
    }

    #[tokio::test]
    async fn refused_connection_is_network() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = JsonRpcClient::new(format!("http://{addr}/"), Duration::from_secs(2)).unwrap();
        let err = client.storage_amount_per_byte().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
