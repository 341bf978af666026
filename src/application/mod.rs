//! Application Layer
//!
//! Use cases that sequence calls to the network.
//! This layer:
//! - Depends on the Domain layer (entities, ports)
//! - Does NOT know about HTTP, files or the terminal
//!
//! ## Use Cases
//!
//! - `Orchestrator` - deploy, initialize, create sub-accounts, read balances
//! - `DeployPipeline` - The full storefront rollout across sub-accounts
//! - `ContractProxy` - Interface-checked view and change calls

pub mod orchestrator;
pub mod pipeline;
pub mod proxy;
mod signer;

#[cfg(test)]
pub(crate) mod testing;

pub use orchestrator::Orchestrator;
pub use pipeline::{
    ContractStep, DeployPipeline, PipelineReport, StepReport, SubAccountOutcome, SubAccountPolicy,
};
pub use proxy::ContractProxy;
