//! Load interface descriptions from disk

use crate::error::{AbiError, Result};
use alloy::json_abi::JsonAbi;
use std::path::Path;

/// Load an ABI from a local file.
///
/// Accepts a plain ABI array or a compiler artifact (Hardhat / Foundry)
/// carrying the ABI under an `abi` key.
pub fn load_from_file(path: &Path) -> Result<JsonAbi> {
    if !path.exists() {
        return Err(AbiError::FileNotFound(path.display().to_string()).into());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| AbiError::FileNotFound(format!("{}: {}", path.display(), e)))?;

    parse_abi(&content)
}

fn parse_abi(content: &str) -> Result<JsonAbi> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| AbiError::ParseError(format!("Invalid ABI JSON: {}", e)))?;

    let abi_value = match value {
        serde_json::Value::Object(mut artifact) => artifact
            .remove("abi")
            .ok_or_else(|| AbiError::ParseError("artifact has no \"abi\" field".to_string()))?,
        other => other,
    };

    let abi: JsonAbi = serde_json::from_value(abi_value)
        .map_err(|e| AbiError::ParseError(format!("Invalid ABI JSON: {}", e)))?;

    Ok(abi)
}
