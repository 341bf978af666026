//! Orchestrator Factory
//!
//! Wires the orchestrator to its infrastructure. This is the dependency
//! injection point for the CLI and the HTTP surface.

use crate::application::{DeployPipeline, Orchestrator};
use crate::config::{Config, NetworkConfig};
use crate::domain::ports::DeployEventSink;
use crate::error::StorefrontResult;
use crate::infrastructure::{ConsoleEventSink, FileKeyStore, JsonEventSink, JsonRpcClient};

/// Orchestrator talking to a real RPC node with keys from disk
pub type LiveOrchestrator = Orchestrator<JsonRpcClient, FileKeyStore>;

/// Build an orchestrator for `config`.
///
/// Nothing is dialed here; the first operation makes the first request.
pub fn create_orchestrator(config: &NetworkConfig) -> StorefrontResult<LiveOrchestrator> {
    let network = JsonRpcClient::from_config(config)?;
    let credentials = FileKeyStore::new(config.credentials_path.clone());
    Ok(Orchestrator::new(config.clone(), network, credentials))
}

/// Pipeline from the `[pipeline]` section
pub fn create_pipeline(config: &Config) -> DeployPipeline {
    DeployPipeline::new(
        config.pipeline.contracts.clone(),
        config.pipeline.sub_account_policy,
    )
}

/// Event sink for `deploy-all`: NDJSON with `--json`, progress lines otherwise
pub fn create_event_sink(json: bool, explorer_url: Option<String>) -> Box<dyn DeployEventSink> {
    if json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(ConsoleEventSink::stdout(explorer_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::test_config;
    use crate::application::SubAccountPolicy;

    #[test]
    fn orchestrator_keeps_config() {
        let config = test_config("store.testnet");
        let orchestrator = create_orchestrator(&config).unwrap();
        assert_eq!(orchestrator.config(), &config);
    }

    #[test]
    fn pipeline_follows_config() {
        let mut config = Config::default();
        config.pipeline.sub_account_policy = SubAccountPolicy::Require;
        let pipeline = create_pipeline(&config);
        assert_eq!(pipeline.steps().len(), 3);
        assert_eq!(
            pipeline.steps()[1].sub_account.as_deref(),
            Some("marketplace")
        );
    }
}
