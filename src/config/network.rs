//! Resolved network settings, built once at startup and passed to every
//! workflow

use super::ConfigFile;
use crate::allo::{ALLO_ADDRESS, REGISTRY_ADDRESS};
use crate::error::{ConfigError, Result};
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use std::str::FromStr;

/// Everything a signing workflow needs to reach the chain
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Chain id the endpoint is expected to report
    pub chain_id: u64,
    /// JSON-RPC endpoint
    pub rpc_url: String,
    /// Local private-key signer
    pub signer: PrivateKeySigner,
    /// Allo core contract
    pub allo: Address,
    /// Profile registry contract
    pub registry: Address,
}

impl NetworkConfig {
    pub fn builder() -> NetworkConfigBuilder {
        NetworkConfigBuilder::default()
    }

    /// Address transactions are sent from
    pub fn sender(&self) -> Address {
        self.signer.address()
    }

    /// Display name of the configured chain
    pub fn chain_name(&self) -> String {
        chain_name(self.chain_id)
    }
}

/// Human-readable chain name, falling back to the numeric id
pub fn chain_name(chain_id: u64) -> String {
    match alloy_chains::Chain::from_id(chain_id).named() {
        Some(named) => format!("{} ({})", named, chain_id),
        None => format!("chain {}", chain_id),
    }
}

/// Builder for [`NetworkConfig`]
#[derive(Debug, Default, Clone)]
pub struct NetworkConfigBuilder {
    chain_id: Option<u64>,
    rpc_url: Option<String>,
    private_key: Option<String>,
    allo: Option<String>,
    registry: Option<String>,
}

impl NetworkConfigBuilder {
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    pub fn private_key(mut self, key: impl Into<String>) -> Self {
        self.private_key = Some(key.into());
        self
    }

    pub fn allo_address(mut self, address: impl Into<String>) -> Self {
        self.allo = Some(address.into());
        self
    }

    pub fn registry_address(mut self, address: impl Into<String>) -> Self {
        self.registry = Some(address.into());
        self
    }

    /// Fill fields that are still unset from the config file
    pub fn file_defaults(mut self, file: &ConfigFile) -> Self {
        let network = &file.network;
        if self.rpc_url.is_none() {
            self.rpc_url = network.rpc_url.clone();
        }
        if self.chain_id.is_none() {
            self.chain_id = network.chain_id;
        }
        if self.allo.is_none() {
            self.allo = network.allo_address.clone();
        }
        if self.registry.is_none() {
            self.registry = network.registry_address.clone();
        }
        self
    }

    pub fn build(self) -> Result<NetworkConfig> {
        let rpc_url = self
            .rpc_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField("rpc_url (--rpc-url or RPC_URL)".to_string()))?;

        let chain_id = self
            .chain_id
            .ok_or_else(|| ConfigError::MissingField("chain_id (--chain-id or CHAIN_ID)".to_string()))?;

        let key = self.private_key.ok_or_else(|| {
            ConfigError::MissingField("private key (--private-key or SIGNER_PRIVATE_KEY)".to_string())
        })?;
        let signer = PrivateKeySigner::from_str(key.trim())
            .map_err(|e| ConfigError::InvalidPrivateKey(e.to_string()))?;

        let allo = parse_address(self.allo.as_deref(), ALLO_ADDRESS)?;
        let registry = parse_address(self.registry.as_deref(), REGISTRY_ADDRESS)?;

        Ok(NetworkConfig {
            chain_id,
            rpc_url,
            signer,
            allo,
            registry,
        })
    }
}

fn parse_address(value: Option<&str>, default: Address) -> Result<Address> {
    match value {
        Some(s) => Ok(parse_address_str(s)?),
        None => Ok(default),
    }
}

/// Parse a hex address, mapping failures to [`ConfigError::InvalidAddress`]
pub fn parse_address_str(s: &str) -> std::result::Result<Address, ConfigError> {
    Address::from_str(s.trim()).map_err(|e| ConfigError::InvalidAddress(format!("{}: {}", s, e)))
}
