//! Error types for allo-scripts

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// ABI and event decoding errors
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Transaction submission errors
    #[error("Transaction error: {0}")]
    Tx(#[from] TxError),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// ABI-related errors
#[derive(Error, Debug)]
pub enum AbiError {
    /// The interface description has no event with this name
    #[error("Event not found in ABI: {0}")]
    UnknownEvent(String),

    /// No log in the receipt carries the event's identifying topic
    #[error("Event not found in receipt: {0}")]
    EventNotInReceipt(String),

    /// The matched log does not fit the declared parameter types
    #[error("Failed to decode log: {0}")]
    DecodeError(String),

    #[error("Failed to parse ABI: {0}")]
    ParseError(String),

    #[error("ABI file not found: {0}")]
    FileNotFound(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config file: {0}")]
    InvalidFile(String),

    #[error("Invalid address format: {0}")]
    InvalidAddress(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid strategy kind: {0}")]
    InvalidStrategy(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid profiles file: {0}")]
    InvalidProfiles(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Config file parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Transaction submission errors
#[derive(Error, Debug)]
pub enum TxError {
    #[error("Failed to send transaction: {0}")]
    Send(String),

    #[error("Failed to fetch receipt for {hash}: {reason}")]
    Receipt { hash: String, reason: String },

    #[error("Transaction {0} reverted")]
    Reverted(String),

    #[error("Chain id mismatch: configured {configured}, endpoint reports {actual}")]
    ChainIdMismatch { configured: u64, actual: u64 },

    #[error("Provider error: {0}")]
    Provider(String),
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err: Error = AbiError::EventNotInReceipt("Registered".to_string()).into();
        assert_eq!(
            err.to_string(),
            "ABI error: Event not found in receipt: Registered"
        );

        let err: Error = TxError::ChainIdMismatch {
            configured: 10,
            actual: 1,
        }
        .into();
        assert!(err.to_string().contains("configured 10"));
    }
}
