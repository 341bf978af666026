//! Contract Proxy
//!
//! Binds a loaded account to a contract and its interface. Every call is
//! checked against the interface before anything is sent.

use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::{
    Account, Action, CallBudget, ContractInterface, MethodKind, TransactionResult,
};
use crate::domain::ports::NetworkClient;
use crate::domain::value_objects::AccountId;
use crate::error::{StorefrontError, StorefrontResult};

use super::signer::sign_and_send;

pub struct ContractProxy<'a, N: ?Sized> {
    network: &'a N,
    account: Account,
    contract_id: AccountId,
    interface: ContractInterface,
}

impl<'a, N> ContractProxy<'a, N>
where
    N: NetworkClient + ?Sized,
{
    pub fn new(
        network: &'a N,
        account: Account,
        contract_id: AccountId,
        interface: ContractInterface,
    ) -> Self {
        Self {
            network,
            account,
            contract_id,
            interface,
        }
    }

    pub fn contract_id(&self) -> &AccountId {
        &self.contract_id
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    fn ensure(&self, method: &str, expected: MethodKind) -> StorefrontResult<()> {
        match self.interface.kind_of(method) {
            None => Err(StorefrontError::UnknownMethod {
                contract: self.contract_id.to_string(),
                method: method.to_string(),
            }),
            Some(actual) if actual != expected => Err(StorefrontError::WrongMethodKind {
                method: method.to_string(),
                actual: actual.as_str(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Run a read-only method and decode its JSON return value
    pub async fn view<A>(&self, method: &str, args: &A) -> StorefrontResult<Value>
    where
        A: Serialize + ?Sized + Sync,
    {
        self.ensure(method, MethodKind::View)?;
        let args = serde_json::to_vec(args)?;
        let raw = self
            .network
            .call_function(&self.contract_id, method, &args)
            .await?;
        if raw.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Sign and send a state-changing method call
    pub async fn call<A>(
        &self,
        method: &str,
        args: &A,
        budget: CallBudget,
    ) -> StorefrontResult<TransactionResult>
    where
        A: Serialize + ?Sized + Sync,
    {
        self.ensure(method, MethodKind::Change)?;
        let args = serde_json::to_vec(args)?;
        let action = Action::function_call(method, args, budget.gas, budget.deposit);
        sign_and_send(self.network, &self.account, &self.contract_id, vec![action]).await
    }
}
