//! Allo v2 transaction builders
//!
//! Turn operator input into ready-to-sign [`TxData`] for the Allo core
//! contract, the profile Registry and pool strategies.

mod pool;
mod registry;
mod strategy;

pub use pool::{Allo, CreatePoolArgs, PoolSchedule};
pub use registry::{CreateProfileArgs, Registry};
pub use strategy::{
    review_recipients, RecipientReview, RecipientStatus, RegisterRecipientArgs, StrategyKind,
};

use crate::abi::Metadata;
use alloy::primitives::{address, Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;

/// Canonical Allo proxy, identical on every supported chain
pub const ALLO_ADDRESS: Address = address!("1133eA7Af70876e64665ecD07C0A0476d09465a1");

/// Canonical Registry, identical on every supported chain
pub const REGISTRY_ADDRESS: Address = address!("4AAcca72145e1dF2aeC137E1f3C5E3D75DB8b5f3");

/// Marker address Allo uses for the chain's native token
pub const NATIVE: Address = address!("EeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Metadata protocol id for IPFS pointers
pub const PROTOCOL_IPFS: u64 = 1;

/// An unsigned transaction: target, calldata and attached value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxData {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

impl TxData {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            data: data.into(),
            value: U256::ZERO,
        }
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// 4-byte function selector of the calldata
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.data.get(..4).and_then(|s| s.try_into().ok())
    }

    /// Convert into an RPC transaction request for `from`
    pub fn into_request(self, from: Address) -> TransactionRequest {
        TransactionRequest::default()
            .from(from)
            .to(self.to)
            .input(self.data.into())
            .value(self.value)
    }
}

impl Metadata {
    /// Metadata stored on IPFS under `cid`
    pub fn ipfs(cid: impl Into<String>) -> Self {
        Self {
            protocol: U256::from(PROTOCOL_IPFS),
            pointer: cid.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_data_selector() {
        let tx = TxData::new(ALLO_ADDRESS, vec![0xa9, 0x05, 0x9c, 0xbb, 0x00]);
        assert_eq!(tx.selector(), Some([0xa9, 0x05, 0x9c, 0xbb]));
        assert_eq!(tx.value, U256::ZERO);

        let empty = TxData::new(ALLO_ADDRESS, Vec::new());
        assert_eq!(empty.selector(), None);
    }

    #[test]
    fn test_into_request() {
        let from = address!("8C180840fcBb90CE8464B4eCd12ab0f840c6647C");
        let tx = TxData::new(REGISTRY_ADDRESS, vec![1, 2, 3]).with_value(U256::from(5u64));
        let req = tx.into_request(from);

        assert_eq!(req.from, Some(from));
        assert_eq!(req.value, Some(U256::from(5u64)));
    }

    #[test]
    fn test_metadata_ipfs() {
        let m = Metadata::ipfs("QmTMmP2sUFjVAcgE4J8bc5NYygSgdqhvsDupivnSregCkT");
        assert_eq!(m.protocol, U256::from(1u64));
        assert_eq!(m.pointer, "QmTMmP2sUFjVAcgE4J8bc5NYygSgdqhvsDupivnSregCkT");
    }
}
