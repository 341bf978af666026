//! `new-account`, `balance` and `view`

use anyhow::{Context, Result};

use storefront::presentation::create_orchestrator;
use storefront::presentation::output::{render_account_created, render_balance, render_value};
use storefront::presentation::OutputFormat;
use storefront::{Config, NearToken};

use super::{confirm_mainnet, resolve_account};

pub async fn cmd_new_account(
    config: &Config,
    id: &str,
    balance: Option<NearToken>,
    yes: bool,
    format: OutputFormat,
) -> Result<()> {
    let network = config.network_config()?;
    let parent = network.account_id()?.clone();
    let balance = balance.unwrap_or(config.account.sub_account_balance);
    confirm_mainnet(&network, &format!("create {id}.{parent} with {balance}"), yes)?;

    let orchestrator = create_orchestrator(&network)?;
    let account_id = orchestrator
        .create_sub_account(&parent, id, balance)
        .await
        .with_context(|| format!("cannot create sub-account '{id}' of {parent}"))?;

    print!("{}", render_account_created(&account_id, format));
    Ok(())
}

pub async fn cmd_balance(config: &Config, account: Option<&str>, format: OutputFormat) -> Result<()> {
    let network = config.network_config()?;
    let account_id = resolve_account(&network, account)?;

    let orchestrator = create_orchestrator(&network)?;
    let balance = orchestrator
        .get_balance(&account_id)
        .await
        .with_context(|| format!("balance query for {account_id} failed"))?;

    print!("{}", render_balance(&account_id, &balance, format));
    Ok(())
}

pub async fn cmd_view(
    config: &Config,
    method: &str,
    args: &str,
    contract: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let network = config.network_config()?;
    let account_id = network.account_id()?.clone();
    let contract_id = resolve_account(&network, contract)?;
    let args: serde_json::Value =
        serde_json::from_str(args).context("--args must be a JSON value")?;

    let orchestrator = create_orchestrator(&network)?;
    let value = orchestrator
        .view(&account_id, &contract_id, method, &args)
        .await
        .with_context(|| format!("{contract_id}.{method} failed"))?;

    print!("{}", render_value(&value, format));
    Ok(())
}
