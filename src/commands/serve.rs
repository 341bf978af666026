//! `serve`

use anyhow::{Context, Result};

use storefront::server::{serve, AppState, LiveConnector};
use storefront::Config;

pub async fn cmd_serve(config: Config, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let state = AppState::new(config, LiveConnector)?;
    serve(state, &bind)
        .await
        .with_context(|| format!("server on {bind} failed"))
}
