//! CLI command modules
//!
//! Each subcommand has its own module with argument definitions and handlers.

pub mod config;
pub mod decode;
pub mod pool;
pub mod recipients;
pub mod review;

use crate::config::{parse_address_str, ConfigFile, NetworkConfig};
use crate::error::{ConfigError, Result};
use alloy::primitives::{Address, B256, U256};
use clap::{Args, Parser, Subcommand};
use std::str::FromStr;

/// Printed when the operator declines the confirmation prompt
pub const DECLINED: &str = "Exiting script. No further action taken.";

#[derive(Parser)]
#[command(name = "allo")]
#[command(
    version,
    about = "Operator scripts for Allo v2: create pools, register and review recipients"
)]
#[command(after_help = r#"EXAMPLES:
    # Create a DonationVoting pool funded with 0.01 ETH
    allo create-pool --profile-id 0x52f5...e3c0 \
                     --strategy 0xD13ec67938B5E9Cb05A05D8e160daF02Ed5ea9C9 \
                     --amount 10000000000000000 --metadata bafkreih...

    # Create profiles and register them in pool 42
    allo create-recipients --pool-id 42 --profiles profiles.toml

    # Accept one recipient and reject another
    allo review-recipients --strategy 0x... --accept 0x... --reject 0x...

    # Decode an event from a saved receipt
    allo decode --contract registry --event ProfileCreated --receipt receipt.json

ENVIRONMENT VARIABLES:
    RPC_URL                 JSON-RPC endpoint
    CHAIN_ID                Expected chain id
    SIGNER_PRIVATE_KEY      Key used to sign transactions
    ALLO_ADDRESS            Allo core contract override
    ALLO_REGISTRY_ADDRESS   Registry contract override

CONFIG FILE:
    Default: ~/.config/allo-scripts/config.toml
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub network: NetworkArgs,

    /// Skip the confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a funded pool for an existing profile
    CreatePool(Box<pool::PoolArgs>),

    /// Create profiles and register them as recipients of a pool
    CreateRecipients(recipients::RecipientsArgs),

    /// Accept or reject pool recipients
    ReviewRecipients(review::ReviewArgs),

    /// Decode an event from a transaction receipt
    Decode(decode::DecodeArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: config::ConfigCommands,
    },
}

/// Network flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct NetworkArgs {
    /// JSON-RPC endpoint
    #[arg(long, env = "RPC_URL", global = true)]
    pub rpc_url: Option<String>,

    /// Chain id the endpoint must report
    #[arg(long, env = "CHAIN_ID", global = true)]
    pub chain_id: Option<u64>,

    /// Private key used to sign transactions
    #[arg(long, env = "SIGNER_PRIVATE_KEY", hide_env_values = true, global = true)]
    pub private_key: Option<String>,

    /// Allo core contract address
    #[arg(long, env = "ALLO_ADDRESS", global = true)]
    pub allo_address: Option<String>,

    /// Registry contract address
    #[arg(long, env = "ALLO_REGISTRY_ADDRESS", global = true)]
    pub registry_address: Option<String>,
}

impl NetworkArgs {
    /// Resolve flags and environment, falling back to the config file
    pub fn resolve(&self) -> Result<NetworkConfig> {
        let mut builder = NetworkConfig::builder();

        if let Some(url) = &self.rpc_url {
            builder = builder.rpc_url(url);
        }
        if let Some(chain_id) = self.chain_id {
            builder = builder.chain_id(chain_id);
        }
        if let Some(key) = &self.private_key {
            builder = builder.private_key(key);
        }
        if let Some(address) = &self.allo_address {
            builder = builder.allo_address(address);
        }
        if let Some(address) = &self.registry_address {
            builder = builder.registry_address(address);
        }
        if let Some(file) = ConfigFile::load_default()? {
            builder = builder.file_defaults(&file);
        }

        builder.build()
    }

    /// RPC endpoint for read-only commands, which need no signer
    pub fn read_rpc_url(&self) -> Result<String> {
        if let Some(url) = self.rpc_url.as_ref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.clone());
        }

        ConfigFile::load_default()?
            .and_then(|file| file.network.rpc_url)
            .ok_or_else(|| ConfigError::MissingField("rpc_url (--rpc-url or RPC_URL)".to_string()).into())
    }
}

/// Parse a decimal or `0x`-prefixed integer
pub(crate) fn parse_u256(what: &str, s: &str) -> Result<U256> {
    U256::from_str(s.trim())
        .map_err(|e| ConfigError::InvalidValue(format!("{} {:?}: {}", what, s, e)).into())
}

/// Parse a 32-byte hex id
pub(crate) fn parse_b256(what: &str, s: &str) -> Result<B256> {
    B256::from_str(s.trim())
        .map_err(|e| ConfigError::InvalidValue(format!("{} {:?}: {}", what, s, e)).into())
}

/// Parse a list of hex addresses
pub(crate) fn parse_addresses(values: &[String]) -> Result<Vec<Address>> {
    values
        .iter()
        .map(|s| parse_address_str(s).map_err(Into::into))
        .collect()
}

/// Current unix time in seconds
pub(crate) fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
