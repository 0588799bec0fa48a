//! Wallet client: sign, submit, and wait for receipts

use crate::abi::LogSource;
use crate::allo::TxData;
use crate::config::NetworkConfig;
use crate::error::{Result, TxError};
use alloy::network::{EthereumWallet, ReceiptResponse};
use alloy::primitives::{Address, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{Log, TransactionReceipt};
use async_trait::async_trait;

/// The part of a mined receipt the workflows consume
#[derive(Debug, Clone, Default)]
pub struct SubmittedTx {
    pub hash: TxHash,
    pub block_number: Option<u64>,
    /// `true` when execution succeeded
    pub status: bool,
    pub logs: Vec<Log>,
}

impl From<TransactionReceipt> for SubmittedTx {
    fn from(receipt: TransactionReceipt) -> Self {
        Self {
            hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            status: receipt.status(),
            logs: receipt.inner.logs().to_vec(),
        }
    }
}

impl LogSource for SubmittedTx {
    fn logs(&self) -> &[Log] {
        &self.logs
    }
}

/// Submits transactions one at a time and waits for each receipt
#[async_trait]
pub trait Submitter: Send + Sync {
    /// Address transactions are sent from
    fn sender(&self) -> Address;

    /// Sign and send `tx`, then wait until it is mined. Reverted
    /// transactions are errors.
    async fn submit(&self, tx: TxData) -> Result<SubmittedTx>;
}

/// Submitter backed by an alloy provider with a local private-key wallet
pub struct WalletClient {
    provider: DynProvider,
    sender: Address,
}

impl WalletClient {
    /// Connect to the configured endpoint and check it serves the expected chain
    pub async fn connect(config: &NetworkConfig) -> Result<Self> {
        let wallet = EthereumWallet::from(config.signer.clone());

        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect(&config.rpc_url)
            .await
            .map_err(|e| TxError::Provider(format!("{}: {}", config.rpc_url, e)))?;

        let actual = provider
            .get_chain_id()
            .await
            .map_err(|e| TxError::Provider(format!("Failed to get chain id: {}", e)))?;

        if actual != config.chain_id {
            return Err(TxError::ChainIdMismatch {
                configured: config.chain_id,
                actual,
            }
            .into());
        }

        tracing::debug!("Connected to {} as {}", config.rpc_url, config.sender());

        Ok(Self {
            provider: provider.erased(),
            sender: config.sender(),
        })
    }
}

#[async_trait]
impl Submitter for WalletClient {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn submit(&self, tx: TxData) -> Result<SubmittedTx> {
        let to = tx.to;
        let request = tx.into_request(self.sender);

        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|e| TxError::Send(e.to_string()))?;

        let hash = *pending.tx_hash();
        tracing::info!("Sent transaction {:#x} to {}", hash, to);

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| TxError::Receipt {
                hash: format!("{:#x}", hash),
                reason: e.to_string(),
            })?;

        let submitted = SubmittedTx::from(receipt);
        tracing::info!(
            "Transaction {:#x} mined in block {:?} with {} logs",
            hash,
            submitted.block_number,
            submitted.logs.len()
        );

        if !submitted.status {
            return Err(TxError::Reverted(format!("{:#x}", hash)).into());
        }

        Ok(submitted)
    }
}

/// Fetch the receipt of an already-mined transaction
pub async fn fetch_receipt(rpc_url: &str, hash: TxHash) -> Result<SubmittedTx> {
    let provider = ProviderBuilder::new()
        .connect(rpc_url)
        .await
        .map_err(|e| TxError::Provider(format!("{}: {}", rpc_url, e)))?;

    tracing::debug!("Fetching receipt {:#x} from {}", hash, rpc_url);

    let receipt = provider
        .get_transaction_receipt(hash)
        .await
        .map_err(|e| TxError::Receipt {
            hash: format!("{:#x}", hash),
            reason: e.to_string(),
        })?
        .ok_or_else(|| TxError::Receipt {
            hash: format!("{:#x}", hash),
            reason: "not found (pending or unknown)".to_string(),
        })?;

    Ok(receipt.into())
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory submitter for workflow tests

    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned receipts in order and records every submission
    pub struct MockSubmitter {
        sender: Address,
        receipts: Mutex<VecDeque<SubmittedTx>>,
        sent: Mutex<Vec<TxData>>,
    }

    impl MockSubmitter {
        pub fn new(sender: Address, receipts: Vec<SubmittedTx>) -> Self {
            Self {
                sender,
                receipts: Mutex::new(receipts.into()),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub fn sent(&self) -> Vec<TxData> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Submitter for MockSubmitter {
        fn sender(&self) -> Address {
            self.sender
        }

        async fn submit(&self, tx: TxData) -> Result<SubmittedTx> {
            self.sent.lock().unwrap().push(tx);
            self.receipts
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| TxError::Send("no receipt queued".to_string()).into())
        }
    }

    /// A successful receipt carrying `logs`
    pub fn receipt(logs: Vec<Log>) -> SubmittedTx {
        SubmittedTx {
            hash: TxHash::repeat_byte(0xab),
            block_number: Some(1),
            status: true,
            logs,
        }
    }

    /// Wrap encoded event data in an RPC log
    pub fn event_log(data: alloy::primitives::LogData) -> Log {
        Log {
            inner: alloy::primitives::Log {
                address: Address::ZERO,
                data,
            },
            ..Default::default()
        }
    }
}
