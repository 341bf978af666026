//! Console Event Sink
//!
//! One human-readable line per pipeline event.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{DeployEvent, DeployEventSink};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    explorer_url: Option<String>,
}

impl ConsoleEventSink {
    pub fn stdout(explorer_url: Option<String>) -> Self {
        Self::with_writer(io::stdout(), explorer_url)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, explorer_url: Option<String>) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            explorer_url,
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{text}");
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let text = match event {
            DeployEvent::Started {
                account_id,
                step_count,
                available,
            } => format!("Deploying {step_count} contract(s) from {account_id} (available: {available})"),
            DeployEvent::SubAccountCreated { account_id, .. } => {
                format!("  + created sub-account {account_id}")
            }
            DeployEvent::SubAccountSkipped {
                account_id, reason, ..
            } => format!("  ! sub-account {account_id} not created: {reason}"),
            DeployEvent::ContractDeployed {
                account_id,
                artifact,
                tx_hash,
                ..
            } => match &self.explorer_url {
                Some(base) => format!(
                    "  ✓ {} -> {account_id} ({}/transactions/{tx_hash})",
                    artifact.display(),
                    base.trim_end_matches('/')
                ),
                None => format!("  ✓ {} -> {account_id} ({tx_hash})", artifact.display()),
            },
            DeployEvent::ContractSkipped {
                account_id,
                artifact,
                ..
            } => format!(
                "  - {} not deployed: {account_id} is not usable",
                artifact.display()
            ),
            DeployEvent::Aborted {
                index,
                deployed,
                reason,
            } => {
                let deployed: Vec<String> = deployed.iter().map(ToString::to_string).collect();
                if deployed.is_empty() {
                    format!("Stopped at step {index}: {reason}")
                } else {
                    format!(
                        "Stopped at step {index}: {reason} (already deployed: {})",
                        deployed.join(", ")
                    )
                }
            }
            DeployEvent::Completed {
                deployed_count,
                skipped_count,
            } => format!("Done: {deployed_count} deployed, {skipped_count} sub-account(s) skipped"),
        };
        self.line(text);
    }
}
