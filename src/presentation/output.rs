//! Output Rendering
//!
//! Turns operation results into text or JSON for stdout. The HTTP surface
//! serves the same summary types as JSON bodies.

use serde::Serialize;
use serde_json::Value;

use crate::application::{PipelineReport, SubAccountOutcome, SubAccountPolicy};
use crate::config::{Config, NetworkConfig};
use crate::domain::entities::{AccountBalance, TransactionResult};
use crate::domain::value_objects::AccountId;
use crate::error::{ErrorKind, StorefrontError};

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// One JSON object per line, for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Serializable view of a committed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionSummary {
    pub hash: String,
    pub signer_id: AccountId,
    pub receiver_id: AccountId,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
}

impl TransactionSummary {
    pub fn new(result: &TransactionResult, explorer_base: Option<&str>) -> Self {
        Self {
            hash: result.hash.to_string(),
            signer_id: result.signer_id.clone(),
            receiver_id: result.receiver_id.clone(),
            success: result.is_success(),
            explorer_url: explorer_base.map(|base| result.explorer_url(base)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubAccountSummary {
    Created,
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSummary {
    pub artifact: String,
    pub target: AccountId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_account: Option<SubAccountSummary>,
    /// Absent when the step was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<TransactionSummary>,
}

/// Serializable view of a [`PipelineReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub account_id: AccountId,
    pub balance: AccountBalance,
    pub deployed_count: usize,
    pub skipped_count: usize,
    pub steps: Vec<StepSummary>,
}

impl PipelineSummary {
    pub fn new(report: &PipelineReport, explorer_base: Option<&str>) -> Self {
        let steps = report
            .steps
            .iter()
            .map(|step| StepSummary {
                artifact: step.artifact.display().to_string(),
                target: step.target.clone(),
                sub_account: step.sub_account.as_ref().map(|outcome| match outcome {
                    SubAccountOutcome::Created => SubAccountSummary::Created,
                    SubAccountOutcome::Tolerated(err) => SubAccountSummary::Skipped {
                        reason: err.to_string(),
                    },
                }),
                transaction: step
                    .deployment
                    .as_ref()
                    .map(|tx| TransactionSummary::new(tx, explorer_base)),
            })
            .collect();

        Self {
            account_id: report.account_id.clone(),
            balance: report.balance,
            deployed_count: report.deployed_count(),
            skipped_count: report.skipped_count(),
            steps,
        }
    }
}

/// Render a single transaction, e.g. `deploy` or `initialize`
pub fn render_transaction(kind: &str, summary: &TransactionSummary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json_line(kind, summary),
        OutputFormat::Text => {
            let mut out = format!(
                "✓ {kind} {} -> {}\n  tx: {}\n",
                summary.signer_id, summary.receiver_id, summary.hash
            );
            if let Some(url) = &summary.explorer_url {
                out.push_str(&format!("  {url}\n"));
            }
            out
        }
    }
}

pub fn render_balance(account_id: &AccountId, balance: &AccountBalance, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json_line(
            "balance",
            &serde_json::json!({ "account_id": account_id, "balance": balance }),
        ),
        OutputFormat::Text => format!(
            "Balance of {account_id}\n  total:        {}\n  state staked: {}\n  staked:       {}\n  available:    {}\n",
            balance.total, balance.state_staked, balance.staked, balance.available
        ),
    }
}

pub fn render_account_created(account_id: &AccountId, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json_line(
            "account_created",
            &serde_json::json!({ "account_id": account_id }),
        ),
        OutputFormat::Text => format!("✓ created {account_id}\n"),
    }
}

/// Final summary of `deploy-all`; per-step lines come from the event sink
pub fn render_pipeline(summary: &PipelineSummary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json_line("pipeline_report", summary),
        OutputFormat::Text => {
            let mut out = String::from("Contracts:\n");
            for step in &summary.steps {
                let skipped = if step.transaction.is_none() {
                    " (not deployed)"
                } else {
                    ""
                };
                out.push_str(&format!("  {} -> {}{skipped}\n", step.artifact, step.target));
            }
            out
        }
    }
}

/// Resolved settings, as `storefront config` prints them
pub fn render_config(config: &Config, network: &NetworkConfig, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return json_line(
            "config",
            &serde_json::json!({ "config": config, "network": network }),
        );
    }

    let none = || "(none)".to_string();
    let row = |key: &str, value: String| format!("{key:<13}{value}\n");
    let account = network.account_id.as_ref();

    let mut out = String::new();
    out.push_str(&row("network", network.network_id.clone()));
    out.push_str(&row("rpc_url", network.rpc_url.clone()));
    out.push_str(&row(
        "explorer_url",
        network.explorer_url.clone().unwrap_or_else(none),
    ));
    out.push_str(&row(
        "helper_url",
        network.helper_url.clone().unwrap_or_else(none),
    ));
    out.push_str(&row(
        "credentials",
        network.credentials_path.display().to_string(),
    ));
    out.push_str(&row(
        "account",
        account.map(ToString::to_string).unwrap_or_else(none),
    ));
    out.push_str(&row("timeout", format!("{}s", network.timeout.as_secs())));

    let init = &config.init;
    out.push_str(&format!(
        "\n[init]\nnew(spec={}, name={}, symbol={}, total_supply={}, cost_per_token={})\ngas {}, deposit {}\n",
        init.spec, init.name, init.symbol, init.total_supply, init.cost_per_token, init.gas, init.deposit
    ));

    let policy = match config.pipeline.sub_account_policy {
        SubAccountPolicy::Tolerate => "tolerate",
        SubAccountPolicy::Require => "require",
    };
    out.push_str(&format!("\n[pipeline] sub_account_policy = {policy}\n"));
    let main = account.map_or_else(|| "<account>".to_string(), ToString::to_string);
    for step in &config.pipeline.contracts {
        let line = match &step.sub_account {
            Some(prefix) => format!(
                "  {} -> {prefix}.{main} ({})\n",
                step.artifact.display(),
                step.initial_balance
            ),
            None => format!("  {} -> {main}\n", step.artifact.display()),
        };
        out.push_str(&line);
    }

    out.push_str(&format!(
        "\n[server] bind = {}\nnew accounts get {}\n",
        config.server.bind, config.account.sub_account_balance
    ));
    out
}

pub fn render_value(value: &Value, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => format!("{value}\n"),
        OutputFormat::Text => match serde_json::to_string_pretty(value) {
            Ok(pretty) => format!("{pretty}\n"),
            Err(_) => format!("{value}\n"),
        },
    }
}

fn json_line<T: Serialize + ?Sized>(kind: &str, body: &T) -> String {
    let mut value = serde_json::to_value(body).unwrap_or(Value::Null);
    match value.as_object_mut() {
        Some(map) => {
            map.insert("type".to_string(), Value::String(kind.to_string()));
        }
        None => value = serde_json::json!({ "type": kind, "value": value }),
    }
    format!("{value}\n")
}

/// `Error: ...` plus a hint for the errors a user can fix locally
pub fn format_error(err: &anyhow::Error) -> String {
    let mut out = format!("Error: {err:#}\n");
    if let Some(storefront) = err.downcast_ref::<StorefrontError>() {
        if let Some(hint) = hint_for(storefront) {
            out.push_str(&format!("  hint: {hint}\n"));
        }
    }
    out
}

fn hint_for(err: &StorefrontError) -> Option<&'static str> {
    match err.root() {
        StorefrontError::Credentials { .. } => {
            Some("run `near login` or point [account] credentials_path at your keys")
        }
        StorefrontError::Config(_) => Some("see `storefront config` for the resolved settings"),
        _ if err.kind() == ErrorKind::Network => {
            Some("check your connection or [network] rpc_url")
        }
        _ => None,
    }
}
