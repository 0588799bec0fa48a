//! Configuration management commands

use crate::config::ConfigFile;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show config file path
    Path,

    /// Set the default RPC URL
    SetRpcUrl {
        /// JSON-RPC endpoint
        url: String,
    },

    /// Set the expected chain id
    SetChainId {
        /// Chain id
        chain_id: u64,
    },

    /// Show current config
    Show,
}

pub async fn handle(action: &ConfigCommands) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Path => {
            println!("{}", ConfigFile::default_path().display());
        }

        ConfigCommands::SetRpcUrl { url } => {
            let mut config = ConfigFile::load_default()?.unwrap_or_default();
            config.set_rpc_url(url.clone())?;
            println!("RPC URL saved to config file.");
        }

        ConfigCommands::SetChainId { chain_id } => {
            let mut config = ConfigFile::load_default()?.unwrap_or_default();
            config.set_chain_id(*chain_id)?;
            println!("Chain id saved to config file.");
        }

        ConfigCommands::Show => {
            let path = ConfigFile::default_path();
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                println!("# {}\n", path.display());
                println!("{}", content);
            } else {
                println!("No config file found at: {}", path.display());
                println!("\nCreate one with:");
                println!("  allo config set-rpc-url https://...");
                println!("  allo config set-chain-id 11155420");
            }
        }
    }

    Ok(())
}
