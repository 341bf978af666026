//! Arguments of the token contract's `new` entry point

use serde::Serialize;

use crate::domain::value_objects::{AccountId, Gas, NearToken};

/// NEP-171 contract metadata passed to `new`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NftMetadata {
    pub spec: String,
    pub name: String,
    pub symbol: String,
}

impl Default for NftMetadata {
    fn default() -> Self {
        Self {
            spec: "nft-1.0.0".to_string(),
            name: "tokenized".to_string(),
            symbol: "TK".to_string(),
        }
    }
}

/// Parameter record for `new`.
///
/// Amounts are serialized as JSON numbers, which is what the contract's
/// `u128` arguments deserialize from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitArgs {
    pub owner_id: AccountId,
    pub metadata: NftMetadata,
    pub total_supply: u128,
    pub cost_per_token: u128,
}

impl InitArgs {
    pub fn new(owner_id: AccountId) -> Self {
        Self {
            owner_id,
            metadata: NftMetadata::default(),
            total_supply: 100,
            cost_per_token: 1,
        }
    }
}

/// Gas and attached deposit for a change call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallBudget {
    pub gas: Gas,
    pub deposit: NearToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_contract_shape() {
        let owner = AccountId::parse("store.testnet").unwrap();
        let value = serde_json::to_value(InitArgs::new(owner)).unwrap();
        assert_eq!(
            value,
            json!({
                "owner_id": "store.testnet",
                "metadata": { "spec": "nft-1.0.0", "name": "tokenized", "symbol": "TK" },
                "total_supply": 100,
                "cost_per_token": 1
            })
        );
    }

    #[test]
    fn default_budget_is_30_tgas_no_deposit() {
        let budget = CallBudget::default();
        assert_eq!(budget.gas, Gas::DEFAULT_CALL);
        assert_eq!(budget.deposit, NearToken::ZERO);
    }
}
