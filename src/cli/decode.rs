//! Event decoding command
//!
//! Decodes a named event from a mined receipt, either fetched by hash or
//! read from a saved JSON receipt.

use super::NetworkArgs;
use crate::abi::{decode_event, format_value, load_from_file, Contract, DecodedEvent};
use crate::error::{AbiError, Result};
use crate::rpc::fetch_receipt;
use alloy::json_abi::JsonAbi;
use alloy::primitives::{Log as PrimitiveLog, TxHash};
use alloy::rpc::types::Log;
use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Event name (e.g. ProfileCreated)
    #[arg(short, long)]
    pub event: String,

    /// Built-in interface: allo, registry or strategy
    #[arg(short, long, conflicts_with = "abi", required_unless_present = "abi")]
    pub contract: Option<String>,

    /// Path to ABI JSON file or compiler artifact
    #[arg(long)]
    pub abi: Option<PathBuf>,

    /// Saved receipt JSON: an object with a "logs" array, or the array
    /// itself. Each log needs "address", "topics" and "data".
    #[arg(short, long, conflicts_with = "tx", required_unless_present = "tx")]
    pub receipt: Option<PathBuf>,

    /// Transaction hash to fetch the receipt for
    #[arg(long)]
    pub tx: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Only `address`, `topics` and `data` are read from each log; block and
/// transaction fields may be present, null or absent.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReceiptFile {
    Receipt { logs: Vec<PrimitiveLog> },
    Logs(Vec<PrimitiveLog>),
}

impl ReceiptFile {
    fn into_logs(self) -> Vec<Log> {
        let logs = match self {
            ReceiptFile::Receipt { logs } | ReceiptFile::Logs(logs) => logs,
        };
        logs.into_iter()
            .map(|inner| Log {
                inner,
                ..Default::default()
            })
            .collect()
    }
}

/// Read the logs of a saved receipt
pub fn load_receipt_logs(path: &Path) -> Result<Vec<Log>> {
    let content = std::fs::read_to_string(path)?;
    let file: ReceiptFile = serde_json::from_str(&content)?;
    Ok(file.into_logs())
}

impl DecodeArgs {
    fn interface(&self) -> Result<JsonAbi> {
        match (&self.abi, &self.contract) {
            (Some(path), _) => load_from_file(path),
            (None, Some(name)) => Contract::from_str(name)?.abi(),
            (None, None) => Err(AbiError::ParseError(
                "either --contract or --abi is required".to_string(),
            )
            .into()),
        }
    }
}

/// Render a decoded event as aligned `name: value` lines
pub fn render_text(decoded: &DecodedEvent) -> String {
    let width = decoded.names().map(str::len).max().unwrap_or(0);

    let mut out = format!("{}\n", decoded.name);
    for (name, value) in &decoded.fields {
        out.push_str(&format!(
            "  {:<width$}  {}\n",
            name,
            format_value(value),
            width = width
        ));
    }
    out
}

pub async fn handle(args: &DecodeArgs, network: &NetworkArgs, quiet: bool) -> anyhow::Result<()> {
    let abi = args.interface()?;

    let logs = match (&args.receipt, &args.tx) {
        (Some(path), _) => load_receipt_logs(path)?,
        (None, Some(hash)) => {
            let hash = TxHash::from_str(hash.trim())
                .map_err(|e| anyhow::anyhow!("Invalid transaction hash {:?}: {}", hash, e))?;
            let rpc_url = network.read_rpc_url()?;
            if !quiet {
                eprintln!("Fetching receipt {:#x}...", hash);
            }
            fetch_receipt(&rpc_url, hash).await?.logs
        }
        (None, None) => anyhow::bail!("either --receipt or --tx is required"),
    };

    tracing::debug!("Decoding {} from {} logs", args.event, logs.len());

    let decoded = decode_event(&abi, &logs, &args.event)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&decoded.to_json())?);
    } else {
        print!("{}", render_text(&decoded));
    }

    Ok(())
}
