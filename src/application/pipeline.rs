//! Deploy Pipeline
//!
//! The storefront's full rollout: check the balance, then for each contract
//! optionally create its sub-account and deploy the artifact to it.
//!
//! Sub-account creation may fail without stopping the run. Whether it is
//! allowed to is the [`SubAccountPolicy`]. A step whose account is unusable
//! after such a failure is skipped; deploy failures always stop the run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::entities::{AccountBalance, TransactionResult};
use crate::domain::ports::{CredentialStore, DeployEvent, DeployEventSink, NetworkClient};
use crate::domain::value_objects::{as_near, AccountId, NearToken};
use crate::error::{StorefrontError, StorefrontResult};

use super::orchestrator::Orchestrator;

/// What to do when a step's sub-account cannot be created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubAccountPolicy {
    /// Report the failure and deploy anyway (the account may already exist)
    #[default]
    Tolerate,
    /// Abort the pipeline
    Require,
}

/// One contract to roll out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractStep {
    pub artifact: PathBuf,

    /// Prefix of the sub-account to create and deploy to; the main account
    /// is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_account: Option<String>,

    #[serde(default = "default_initial_balance", with = "as_near")]
    pub initial_balance: NearToken,
}

fn default_initial_balance() -> NearToken {
    NearToken::from_near(10)
}

impl ContractStep {
    pub fn new(artifact: impl Into<PathBuf>) -> Self {
        Self {
            artifact: artifact.into(),
            sub_account: None,
            initial_balance: default_initial_balance(),
        }
    }

    pub fn with_sub_account(mut self, prefix: impl Into<String>, initial_balance: NearToken) -> Self {
        self.sub_account = Some(prefix.into());
        self.initial_balance = initial_balance;
        self
    }
}

/// Result of a step's sub-account creation
#[derive(Debug)]
pub enum SubAccountOutcome {
    Created,
    /// Creation failed and the policy let the step continue
    Tolerated(StorefrontError),
}

#[derive(Debug)]
pub struct StepReport {
    pub artifact: PathBuf,
    pub target: AccountId,
    pub sub_account: Option<SubAccountOutcome>,
    /// `None` when the target could not be used after a tolerated failure
    pub deployment: Option<TransactionResult>,
}

#[derive(Debug)]
pub struct PipelineReport {
    pub account_id: AccountId,
    pub balance: AccountBalance,
    pub steps: Vec<StepReport>,
}

impl PipelineReport {
    pub fn deployed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.deployment.is_some()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.sub_account, Some(SubAccountOutcome::Tolerated(_))))
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct DeployPipeline {
    steps: Vec<ContractStep>,
    policy: SubAccountPolicy,
}

impl DeployPipeline {
    pub fn new(steps: Vec<ContractStep>, policy: SubAccountPolicy) -> Self {
        Self { steps, policy }
    }

    pub fn steps(&self) -> &[ContractStep] {
        &self.steps
    }

    /// Run every step in order.
    ///
    /// A failing step ends the run. When earlier steps already deployed, the
    /// error is [`StorefrontError::PipelineAborted`] listing their accounts.
    pub async fn run<N, C>(
        &self,
        orchestrator: &Orchestrator<N, C>,
        account_id: &AccountId,
        events: &dyn DeployEventSink,
    ) -> StorefrontResult<PipelineReport>
    where
        N: NetworkClient,
        C: CredentialStore,
    {
        let balance = orchestrator.get_balance(account_id).await?;
        info!(account_id = %account_id, available = %balance.available, total = %balance.total, "balance");
        events.on_event(DeployEvent::Started {
            account_id: account_id.clone(),
            step_count: self.steps.len(),
            available: balance.available,
        });

        let mut reports: Vec<StepReport> = Vec::with_capacity(self.steps.len());
        for (index, step) in self.steps.iter().enumerate() {
            match self.run_step(orchestrator, account_id, index, step, events).await {
                Ok(report) => reports.push(report),
                Err(err) => {
                    let deployed: Vec<AccountId> = reports
                        .iter()
                        .filter(|r| r.deployment.is_some())
                        .map(|r| r.target.clone())
                        .collect();
                    warn!(step = index, error = %err, deployed = deployed.len(), "pipeline stopped");
                    events.on_event(DeployEvent::Aborted {
                        index,
                        deployed: deployed.clone(),
                        reason: err.to_string(),
                    });
                    if deployed.is_empty() {
                        return Err(err);
                    }
                    return Err(StorefrontError::PipelineAborted {
                        index,
                        deployed: deployed.iter().map(ToString::to_string).collect(),
                        error: Box::new(err),
                    });
                }
            }
        }

        let report = PipelineReport {
            account_id: account_id.clone(),
            balance,
            steps: reports,
        };
        events.on_event(DeployEvent::Completed {
            deployed_count: report.deployed_count(),
            skipped_count: report.skipped_count(),
        });
        Ok(report)
    }

    async fn run_step<N, C>(
        &self,
        orchestrator: &Orchestrator<N, C>,
        account_id: &AccountId,
        index: usize,
        step: &ContractStep,
        events: &dyn DeployEventSink,
    ) -> StorefrontResult<StepReport>
    where
        N: NetworkClient,
        C: CredentialStore,
    {
        let detailed = events.wants_detailed_events();
        let (target, sub_account) = match &step.sub_account {
            None => (account_id.clone(), None),
            Some(prefix) => {
                let child = account_id.sub_account(prefix)?;
                let outcome = match orchestrator
                    .create_sub_account(account_id, prefix, step.initial_balance)
                    .await
                {
                    Ok(_) => {
                        if detailed {
                            events.on_event(DeployEvent::SubAccountCreated {
                                index,
                                account_id: child.clone(),
                            });
                        }
                        SubAccountOutcome::Created
                    }
                    Err(err) if self.policy == SubAccountPolicy::Tolerate => {
                        warn!(account_id = %child, error = %err, "sub-account not created, continuing");
                        if detailed {
                            events.on_event(DeployEvent::SubAccountSkipped {
                                index,
                                account_id: child.clone(),
                                reason: err.to_string(),
                            });
                        }
                        SubAccountOutcome::Tolerated(err)
                    }
                    Err(err) => return Err(err),
                };
                (child, Some(outcome))
            }
        };

        // A tolerated failure leaves the child usable only if it already existed
        if matches!(sub_account, Some(SubAccountOutcome::Tolerated(_)))
            && !orchestrator.can_sign_as(&target).await
        {
            warn!(account_id = %target, artifact = %step.artifact.display(), "target unusable, artifact not deployed");
            if detailed {
                events.on_event(DeployEvent::ContractSkipped {
                    index,
                    account_id: target.clone(),
                    artifact: step.artifact.clone(),
                });
            }
            return Ok(StepReport {
                artifact: step.artifact.clone(),
                target,
                sub_account,
                deployment: None,
            });
        }

        let deployment = orchestrator.deploy(&step.artifact, &target).await?;
        if detailed {
            events.on_event(DeployEvent::ContractDeployed {
                index,
                account_id: target.clone(),
                artifact: step.artifact.clone(),
                tx_hash: deployment.hash,
            });
        }

        Ok(StepReport {
            artifact: step.artifact.clone(),
            target,
            sub_account,
            deployment: Some(deployment),
        })
    }
}
