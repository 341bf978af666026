//! Storefront CLI
//!
//! Usage: storefront <COMMAND>
//!
//! Commands:
//!   deploy       Deploy a compiled contract to an account
//!   initialize   Call the token contract's `new`
//!   new-account  Create a funded sub-account
//!   balance      Show an account's balance
//!   view         Call a view method
//!   deploy-all   Run the full deploy pipeline
//!   serve        Serve the HTTP surface
//!   config       Show the resolved configuration

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use storefront::presentation::format_error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = commands::run(cli).await {
        eprint!("{}", format_error(&err));
        std::process::exit(1);
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
/// `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},hyper=warn,reqwest=warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
