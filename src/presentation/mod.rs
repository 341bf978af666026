//! Presentation Layer
//!
//! This layer handles:
//! - Creating orchestrators with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `factory` - Wires `JsonRpcClient` and `FileKeyStore` into an `Orchestrator`
//! - `output` - Output rendering shared by the CLI and the HTTP surface
//!
//! ## Usage
//!
//! ```ignore
//! use storefront::presentation::factory;
//!
//! let orchestrator = factory::create_orchestrator(&network_config)?;
//! let balance = orchestrator.get_balance(&account_id).await?;
//! ```

pub mod factory;
pub mod output;

pub use factory::{create_event_sink, create_orchestrator, create_pipeline, LiveOrchestrator};
pub use output::{format_error, OutputFormat, PipelineSummary, TransactionSummary};
