//! `deploy`, `initialize` and `deploy-all`

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use storefront::presentation::output::{render_pipeline, render_transaction};
use storefront::presentation::{
    create_event_sink, create_orchestrator, create_pipeline, OutputFormat, PipelineSummary,
    TransactionSummary,
};
use storefront::{Config, DeployPipeline, SubAccountPolicy};

use super::{confirm_mainnet, resolve_account};

pub async fn cmd_deploy(
    config: &Config,
    artifact: &Path,
    target: Option<&str>,
    yes: bool,
    format: OutputFormat,
) -> Result<()> {
    let network = config.network_config()?;
    let account_id = resolve_account(&network, target)?;
    confirm_mainnet(&network, &format!("deploy {}", artifact.display()), yes)?;

    let orchestrator = create_orchestrator(&network)?;
    let result = orchestrator
        .deploy(artifact, &account_id)
        .await
        .with_context(|| format!("deploy to {account_id} failed"))?;

    let summary = TransactionSummary::new(&result, network.explorer_url.as_deref());
    print!("{}", render_transaction("deploy", &summary, format));
    Ok(())
}

pub async fn cmd_initialize(
    config: &Config,
    contract: Option<&str>,
    yes: bool,
    format: OutputFormat,
) -> Result<()> {
    let network = config.network_config()?;
    let contract_id = resolve_account(&network, contract)?;
    confirm_mainnet(&network, &format!("initialize {contract_id}"), yes)?;

    let args = config.init.args_for(contract_id.clone());
    let orchestrator = create_orchestrator(&network)?;
    let result = orchestrator
        .initialize(&contract_id, &args, config.init.budget())
        .await
        .with_context(|| format!("initialize {contract_id} failed"))?;

    let summary = TransactionSummary::new(&result, network.explorer_url.as_deref());
    print!("{}", render_transaction("initialize", &summary, format));
    Ok(())
}

pub async fn cmd_deploy_all(
    config: &Config,
    require_sub_accounts: bool,
    yes: bool,
    json: bool,
) -> Result<()> {
    let network = config.network_config()?;
    let account_id = network.account_id()?.clone();
    confirm_mainnet(&network, "run the deploy pipeline", yes)?;

    let pipeline = if require_sub_accounts {
        DeployPipeline::new(
            config.pipeline.contracts.clone(),
            SubAccountPolicy::Require,
        )
    } else {
        create_pipeline(config)
    };

    let orchestrator = create_orchestrator(&network)?;
    let events = create_event_sink(json, network.explorer_url.clone());
    let report = pipeline
        .run(&orchestrator, &account_id, events.as_ref())
        .await
        .context("deploy pipeline stopped")?;
    info!(
        deployed = report.deployed_count(),
        skipped = report.skipped_count(),
        "pipeline finished"
    );

    let summary = PipelineSummary::new(&report, network.explorer_url.as_deref());
    print!(
        "{}",
        render_pipeline(&summary, OutputFormat::from_json_flag(json))
    );
    Ok(())
}
