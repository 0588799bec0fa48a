//! Configuration: config file and the resolved network settings

mod file;
mod network;

pub use file::{ConfigFile, NetworkSection};
pub use network::{chain_name, parse_address_str, NetworkConfig, NetworkConfigBuilder};
