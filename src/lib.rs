//! allo-scripts - Operator scripts for the Allo v2 protocol
//!
//! A Rust library and CLI that creates pools, creates profiles and registers
//! them as pool recipients, reviews recipients, and decodes the events those
//! transactions emit from their receipts.
//!
//! # Example
//!
//! ```rust,no_run
//! use allo_scripts::{decode_event, decode_typed, Contract, IRegistry};
//! use alloy::rpc::types::Log;
//!
//! fn show(logs: Vec<Log>) -> allo_scripts::Result<()> {
//!     // Runtime ABI: parameters by name
//!     let abi = Contract::Registry.abi()?;
//!     let event = decode_event(&abi, &logs, "ProfileCreated")?;
//!     println!("anchor = {:?}", event.get("anchor"));
//!
//!     // Typed binding: the event struct itself
//!     let created: IRegistry::ProfileCreated = decode_typed(&logs)?;
//!     println!("profile = {}", created.profileId);
//!     Ok(())
//! }
//! ```

pub mod abi;
pub mod allo;
pub mod cli;
pub mod config;
pub mod error;
pub mod prompt;
pub mod rpc;

// Re-exports for convenience
pub use abi::{
    decode_all_typed, decode_event, decode_typed, load_from_file, Contract, DecodedEvent, IAllo,
    IRegistry, IStrategy, LogSource, Metadata,
};
pub use allo::{Allo, PoolSchedule, Registry, StrategyKind, TxData};
pub use config::{ConfigFile, NetworkConfig};
pub use error::{AbiError, ConfigError, Error, Result, TxError};
pub use prompt::{confirm, Confirmation};
pub use rpc::{fetch_receipt, Submitter, SubmittedTx, WalletClient};
