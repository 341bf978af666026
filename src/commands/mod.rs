//! Command handlers
//!
//! Each handler resolves the config, builds what it needs through the
//! presentation factory and prints through `presentation::output`.

mod account;
mod config;
mod deploy;
mod serve;

use is_terminal::IsTerminal;

use anyhow::{bail, Result};
use dialoguer::Confirm;

use storefront::config::ConfigWarning;
use storefront::presentation::OutputFormat;
use storefront::{AccountId, Config, NetworkConfig};

use crate::cli::{Cli, Commands};

pub async fn run(cli: Cli) -> Result<()> {
    let format = OutputFormat::from_json_flag(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Deploy {
            artifact,
            target,
            yes,
        } => deploy::cmd_deploy(&config, &artifact, target.as_deref(), yes, format).await,
        Commands::Initialize { contract, yes } => {
            deploy::cmd_initialize(&config, contract.as_deref(), yes, format).await
        }
        Commands::NewAccount { id, balance, yes } => {
            account::cmd_new_account(&config, &id, balance, yes, format).await
        }
        Commands::Balance { account } => {
            account::cmd_balance(&config, account.as_deref(), format).await
        }
        Commands::View {
            method,
            args,
            contract,
        } => account::cmd_view(&config, &method, &args, contract.as_deref(), format).await,
        Commands::DeployAll {
            require_sub_accounts,
            yes,
        } => deploy::cmd_deploy_all(&config, require_sub_accounts, yes, cli.json).await,
        Commands::Serve { bind } => serve::cmd_serve(config, bind).await,
        Commands::Config => config::cmd_config(&config, format),
    }
}

/// File (explicit, project, user) < environment < flags
fn load_config(cli: &Cli) -> Result<Config> {
    let project_root = std::env::current_dir().ok();
    let (config, warnings) =
        Config::load_or_default(cli.config.as_deref(), project_root.as_deref())?;
    if !cli.json {
        print_config_warnings(&warnings);
    }
    Ok(config.with_overrides(
        cli.network.clone(),
        cli.account.clone(),
        cli.rpc_url.clone(),
    ))
}

fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w.line {
            Some(line) => eprintln!(
                "⚠ Unknown config key '{}' in {}:{}",
                w.key,
                w.file.display(),
                line
            ),
            None => eprintln!("⚠ Unknown config key '{}' in {}", w.key, w.file.display()),
        }
        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{suggestion}'?\n");
        }
    }
}

/// `explicit` when given, else the configured signing account
fn resolve_account(network: &NetworkConfig, explicit: Option<&str>) -> Result<AccountId> {
    match explicit {
        Some(id) => Ok(AccountId::parse(id)?),
        None => Ok(network.account_id()?.clone()),
    }
}

/// Ask before sending transactions to mainnet.
///
/// Other networks, and `--yes`, pass straight through. Without a terminal
/// there is nobody to ask, so mainnet needs `--yes`.
fn confirm_mainnet(network: &NetworkConfig, action: &str, yes: bool) -> Result<()> {
    if !network.is_mainnet() || yes {
        return Ok(());
    }
    if !std::io::stdin().is_terminal() {
        bail!("refusing to {action} on mainnet without --yes");
    }
    let confirmed = Confirm::new()
        .with_prompt(format!("{action} on mainnet?"))
        .default(false)
        .interact()?;
    if !confirmed {
        bail!("aborted");
    }
    Ok(())
}
