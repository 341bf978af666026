//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339();
        let json = match event {
            DeployEvent::Started {
                account_id,
                step_count,
                available,
            } => serde_json::json!({
                "event": "start",
                "command": "deploy-all",
                "timestamp": timestamp,
                "account_id": account_id,
                "steps": step_count,
                "available": available,
            }),

            DeployEvent::SubAccountCreated { index, account_id } => serde_json::json!({
                "event": "sub_account_created",
                "command": "deploy-all",
                "timestamp": timestamp,
                "index": index,
                "account_id": account_id,
            }),

            DeployEvent::SubAccountSkipped {
                index,
                account_id,
                reason,
            } => serde_json::json!({
                "event": "sub_account_skipped",
                "command": "deploy-all",
                "timestamp": timestamp,
                "index": index,
                "account_id": account_id,
                "reason": reason,
            }),

            DeployEvent::ContractDeployed {
                index,
                account_id,
                artifact,
                tx_hash,
            } => serde_json::json!({
                "event": "contract_deployed",
                "command": "deploy-all",
                "timestamp": timestamp,
                "index": index,
                "account_id": account_id,
                "artifact": artifact.display().to_string(),
                "tx_hash": tx_hash,
            }),

            DeployEvent::ContractSkipped {
                index,
                account_id,
                artifact,
            } => serde_json::json!({
                "event": "contract_skipped",
                "command": "deploy-all",
                "timestamp": timestamp,
                "index": index,
                "account_id": account_id,
                "artifact": artifact.display().to_string(),
            }),

            DeployEvent::Aborted {
                index,
                deployed,
                reason,
            } => serde_json::json!({
                "event": "aborted",
                "command": "deploy-all",
                "timestamp": timestamp,
                "status": "failed",
                "index": index,
                "deployed": deployed,
                "reason": reason,
            }),

            DeployEvent::Completed {
                deployed_count,
                skipped_count,
            } => {
                let status = if skipped_count == 0 {
                    "success"
                } else {
                    "partial"
                };
                serde_json::json!({
                    "event": "complete",
                    "command": "deploy-all",
                    "timestamp": timestamp,
                    "status": status,
                    "deployed": deployed_count,
                    "skipped": skipped_count,
                })
            }
        };

        self.write_event(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{AccountId, CryptoHash, NearToken};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(buffer: &Arc<Mutex<Vec<u8>>>) -> Vec<serde_json::Value> {
        String::from_utf8(buffer.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn json_sink_outputs_start_event() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(DeployEvent::Started {
            account_id: AccountId::parse("store.testnet").unwrap(),
            step_count: 3,
            available: NearToken::from_yocto(42),
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "start");
        assert_eq!(events[0]["steps"], 3);
        assert_eq!(events[0]["available"], "42");
        assert!(events[0]["timestamp"].is_string());
    }

    #[test]
    fn json_sink_outputs_deployed_event_with_hash() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);
        let hash = CryptoHash::of(b"tx");

        sink.on_event(DeployEvent::ContractDeployed {
            index: 1,
            account_id: AccountId::parse("marketplace.store.testnet").unwrap(),
            artifact: PathBuf::from("out/cardMarketplace.wasm"),
            tx_hash: hash,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "contract_deployed");
        assert_eq!(events[0]["tx_hash"], hash.to_string());
        assert_eq!(events[0]["artifact"], "out/cardMarketplace.wasm");
    }

    #[test]
    fn json_sink_outputs_partial_on_skips() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(DeployEvent::Completed {
            deployed_count: 3,
            skipped_count: 1,
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "complete");
        assert_eq!(events[0]["status"], "partial");
        assert_eq!(events[0]["deployed"], 3);
    }

    #[test]
    fn json_sink_outputs_aborted_with_deployed_accounts() {
        let (writer, buffer) = TestWriter::new();
        let sink = JsonEventSink::with_writer(writer);

        sink.on_event(DeployEvent::Aborted {
            index: 1,
            deployed: vec![AccountId::parse("store.testnet").unwrap()],
            reason: "cannot read artifact".to_string(),
        });

        let events = lines(&buffer);
        assert_eq!(events[0]["event"], "aborted");
        assert_eq!(events[0]["status"], "failed");
        assert_eq!(events[0]["deployed"][0], "store.testnet");
    }
}
