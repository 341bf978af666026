//! HTTP Surface
//!
//! `storefront serve` exposes the orchestrator over plain GET routes:
//!
//! - `GET /` - greeting
//! - `GET /deploy` - run the deploy pipeline
//! - `GET /initialize` - call `new` on the main account's contract
//! - `GET /new-wallet/{id}` - create `id.<account>`
//! - `GET /balance` - balance of the main account, or `?account=`
//!
//! Each request builds its own orchestrator from the shared, immutable
//! config through a [`Connector`].

mod error;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::signal;
use tracing::{error, info};

use crate::application::Orchestrator;
use crate::config::{Config, NetworkConfig};
use crate::domain::ports::{CredentialStore, NetworkClient, NoopEventSink};
use crate::domain::value_objects::AccountId;
use crate::error::StorefrontResult;
use crate::infrastructure::{FileKeyStore, JsonRpcClient};
use crate::presentation::{create_orchestrator, create_pipeline, PipelineSummary, TransactionSummary};

pub use error::ApiError;

/// Builds a fresh orchestrator for each request
pub trait Connector: Send + Sync + 'static {
    type Network: NetworkClient + 'static;
    type Credentials: CredentialStore + 'static;

    fn connect(
        &self,
        config: &NetworkConfig,
    ) -> StorefrontResult<Orchestrator<Self::Network, Self::Credentials>>;
}

/// Connects to the configured RPC node with keys from the credential store
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveConnector;

impl Connector for LiveConnector {
    type Network = JsonRpcClient;
    type Credentials = FileKeyStore;

    fn connect(&self, config: &NetworkConfig) -> StorefrontResult<Orchestrator<JsonRpcClient, FileKeyStore>> {
        create_orchestrator(config)
    }
}

/// Shared application state
pub struct AppState<K> {
    pub config: Config,
    pub network: NetworkConfig,
    pub connector: K,
}

impl<K: Connector> AppState<K> {
    /// Resolve the network config up front; the server refuses to start
    /// without a signing account
    pub fn new(config: Config, connector: K) -> StorefrontResult<Self> {
        let network = config.network_config()?;
        network.account_id()?;
        Ok(Self {
            config,
            network,
            connector,
        })
    }

    fn account_id(&self) -> StorefrontResult<&AccountId> {
        self.network.account_id()
    }

    fn explorer_url(&self) -> Option<&str> {
        self.network.explorer_url.as_deref()
    }
}

/// Creates the router
pub fn router<K: Connector>(state: Arc<AppState<K>>) -> Router {
    Router::new()
        .route("/", get(greeting))
        .route("/deploy", get(deploy::<K>))
        .route("/initialize", get(initialize::<K>))
        .route("/new-wallet/{id}", get(new_wallet::<K>))
        .route("/balance", get(balance::<K>))
        .with_state(state)
}

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn serve<K: Connector>(state: AppState<K>, bind: &str) -> StorefrontResult<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(
        addr = %listener.local_addr()?,
        network = %state.network.network_id,
        "storefront listening"
    );
    axum::serve(listener, router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn greeting() -> &'static str {
    "Card storefront deployment service\n"
}

async fn deploy<K: Connector>(
    State(state): State<Arc<AppState<K>>>,
) -> Result<Json<PipelineSummary>, ApiError> {
    let orchestrator = state.connector.connect(&state.network)?;
    let account_id = state.account_id()?;
    let report = create_pipeline(&state.config)
        .run(&orchestrator, account_id, &NoopEventSink)
        .await?;
    info!(
        account_id = %account_id,
        deployed = report.deployed_count(),
        skipped = report.skipped_count(),
        "pipeline finished via API"
    );
    Ok(Json(PipelineSummary::new(&report, state.explorer_url())))
}

async fn initialize<K: Connector>(
    State(state): State<Arc<AppState<K>>>,
) -> Result<Json<TransactionSummary>, ApiError> {
    let orchestrator = state.connector.connect(&state.network)?;
    let account_id = state.account_id()?;
    let args = state.config.init.args_for(account_id.clone());
    let result = orchestrator
        .initialize(account_id, &args, state.config.init.budget())
        .await?;
    Ok(Json(TransactionSummary::new(&result, state.explorer_url())))
}

async fn new_wallet<K: Connector>(
    State(state): State<Arc<AppState<K>>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let orchestrator = state.connector.connect(&state.network)?;
    let parent = state.account_id()?;
    let account_id = orchestrator
        .create_sub_account(parent, &id, state.config.account.sub_account_balance)
        .await?;
    Ok(Json(json!({ "account_id": account_id })))
}

#[derive(Debug, Deserialize)]
struct BalanceQuery {
    account: Option<String>,
}

async fn balance<K: Connector>(
    State(state): State<Arc<AppState<K>>>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<Value>, ApiError> {
    let orchestrator = state.connector.connect(&state.network)?;
    let account_id = match query.account.as_deref() {
        Some(account) => AccountId::parse(account)?,
        None => state.account_id()?.clone(),
    };
    let balance = orchestrator.get_balance(&account_id).await?;
    Ok(Json(json!({ "account_id": account_id, "balance": balance })))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C"),
        () = terminate => info!("received SIGTERM"),
    }
}
