//! Domain Entities
//!
//! - `Account` - An account id bound to its signing key
//! - `ContractInterface` - Whitelist of a contract's entry points
//! - `Transaction` - Actions signed and sent to the network
//! - `TransactionResult` / `AccountBalance` - What comes back

mod account;
mod balance;
mod contract;
mod init_args;
mod result;
mod transaction;

pub use account::Account;
pub use balance::{AccessKeyView, AccountBalance, AccountView};
pub use contract::{ContractInterface, MethodKind};
pub use init_args::{CallBudget, InitArgs, NftMetadata};
pub use result::{ExecutionStatus, TransactionResult};
pub use transaction::{
    AccessKey, AccessKeyPermission, Action, FunctionCallAction, SignedTransaction, Transaction,
};
