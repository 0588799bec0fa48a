//! `~/.config/allo-scripts/config.toml`

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk defaults for the network flags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Network defaults used when flags and environment are silent
    #[serde(default)]
    pub network: NetworkSection,
}

/// `[network]` table. Never holds the signer key; that comes from the
/// command line or the environment only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkSection {
    /// JSON-RPC endpoint
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Expected chain id
    #[serde(default)]
    pub chain_id: Option<u64>,

    /// Allo core contract override
    #[serde(default)]
    pub allo_address: Option<String>,

    /// Registry contract override
    #[serde(default)]
    pub registry_address: Option<String>,
}

impl ConfigFile {
    /// `<config dir>/allo-scripts/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("allo-scripts")
            .join("config.toml")
    }

    /// Load the default file, `None` when it does not exist yet
    pub fn load_default() -> Result<Option<Self>> {
        let path = Self::default_path();
        if path.exists() {
            Ok(Some(Self::load(&path)?))
        } else {
            Ok(None)
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidFile(format!("{}: {}", path.display(), e)))?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Write the file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::InvalidFile(format!("Failed to create directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidFile(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::InvalidFile(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn save_default(&self) -> Result<()> {
        self.save(&Self::default_path())
    }

    /// Set the RPC URL and save
    pub fn set_rpc_url(&mut self, url: String) -> Result<()> {
        self.network.rpc_url = Some(url);
        self.save_default()
    }

    /// Set the chain id and save
    pub fn set_chain_id(&mut self, chain_id: u64) -> Result<()> {
        self.network.chain_id = Some(chain_id);
        self.save_default()
    }
}
