//! Deploy Event Port
//!
//! Observable progress of the deploy pipeline.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

use crate::domain::value_objects::{AccountId, CryptoHash, NearToken};

/// Event emitted while the deploy pipeline runs
#[derive(Debug, Clone, PartialEq)]
pub enum DeployEvent {
    /// Pipeline started; balance of the deploying account
    Started {
        account_id: AccountId,
        step_count: usize,
        available: NearToken,
    },

    /// Sub-account created for a step
    SubAccountCreated { index: usize, account_id: AccountId },

    /// Sub-account creation failed and the policy tolerated it
    SubAccountSkipped {
        index: usize,
        account_id: AccountId,
        reason: String,
    },

    /// Artifact deployed to its target account
    ContractDeployed {
        index: usize,
        account_id: AccountId,
        artifact: PathBuf,
        tx_hash: CryptoHash,
    },

    /// Target account unusable after a tolerated sub-account failure; the
    /// artifact was not deployed
    ContractSkipped {
        index: usize,
        account_id: AccountId,
        artifact: PathBuf,
    },

    /// A step failed; `deployed` lists the accounts already carrying code
    Aborted {
        index: usize,
        deployed: Vec<AccountId>,
        reason: String,
    },

    /// Pipeline finished
    Completed {
        deployed_count: usize,
        skipped_count: usize,
    },
}

/// Trait for receiving deploy events
///
/// Implementations:
/// - ConsoleEventSink: human-readable lines on stdout
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation (HTTP handlers)
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Whether per-step events are wanted; summary events are always sent
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingEventSink {
        events: Arc<Mutex<Vec<DeployEvent>>>,
    }

    impl DeployEventSink for RecordingEventSink {
        fn on_event(&self, event: DeployEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn recording_sink_captures_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingEventSink {
            events: events.clone(),
        };

        sink.on_event(DeployEvent::Started {
            account_id: AccountId::parse("store.testnet").unwrap(),
            step_count: 2,
            available: NearToken::from_near(5),
        });
        sink.on_event(DeployEvent::Completed {
            deployed_count: 2,
            skipped_count: 0,
        });

        assert_eq!(events.lock().unwrap().len(), 2);
    }

    #[test]
    fn noop_sink_wants_no_details() {
        assert!(!NoopEventSink.wants_detailed_events());
    }
}
