//! CLI Argument Parsing
//!
//! Global flags (--json, --verbose, --config, --network, --account,
//! --rpc-url) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storefront::NearToken;

/// Storefront - deploy and manage the tokenized card storefront on NEAR
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (one JSON object per line)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./storefront.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Network id: testnet, mainnet, localnet or a custom id with --rpc-url
    #[arg(long, global = true)]
    pub network: Option<String>,

    /// Account that signs transactions
    #[arg(long, global = true)]
    pub account: Option<String>,

    /// RPC endpoint, overriding the network preset
    #[arg(long, global = true, value_name = "URL")]
    pub rpc_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy a compiled contract to an account
    Deploy {
        /// Path to the .wasm artifact
        artifact: PathBuf,

        /// Account to deploy to (default: the signing account)
        #[arg(long, value_name = "ACCOUNT")]
        target: Option<String>,

        /// Skip the mainnet confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Call the token contract's `new` with the [init] arguments
    Initialize {
        /// Contract account (default: the signing account)
        #[arg(long, value_name = "ACCOUNT")]
        contract: Option<String>,

        /// Skip the mainnet confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Create `<ID>.<account>` funded by the signing account
    NewAccount {
        /// Sub-account prefix
        id: String,

        /// Initial balance, e.g. "10" or "0.5 NEAR" (default: [account] sub_account_balance)
        #[arg(long)]
        balance: Option<NearToken>,

        /// Skip the mainnet confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the balance breakdown of an account
    Balance {
        /// Account to query (default: the signing account)
        account: Option<String>,
    },

    /// Call a view method on the token contract
    View {
        /// Method name, e.g. nft_metadata
        method: String,

        /// JSON arguments
        #[arg(long, default_value = "{}")]
        args: String,

        /// Contract account (default: the signing account)
        #[arg(long, value_name = "ACCOUNT")]
        contract: Option<String>,
    },

    /// Run the full deploy pipeline from [pipeline]
    DeployAll {
        /// Abort when a sub-account cannot be created
        #[arg(long)]
        require_sub_accounts: bool,

        /// Skip the mainnet confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Serve the HTTP surface
    Serve {
        /// Address to bind (default: [server] bind)
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Show the resolved configuration
    Config,
}
