//! Registry contract: profile creation

use super::TxData;
use crate::abi::{IRegistry, Metadata};
use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;

/// Arguments for `Registry.createProfile`
#[derive(Debug, Clone)]
pub struct CreateProfileArgs {
    /// Caller-chosen nonce; together with the owner it determines the profile id
    pub nonce: U256,
    pub name: String,
    pub metadata: Metadata,
    pub owner: Address,
    pub members: Vec<Address>,
}

/// Builder for Registry transactions
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    address: Address,
}

impl Registry {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn create_profile(&self, args: &CreateProfileArgs) -> TxData {
        let call = IRegistry::createProfileCall {
            nonce: args.nonce,
            name: args.name.clone(),
            metadata: args.metadata.clone(),
            owner: args.owner,
            members: args.members.clone(),
        };
        TxData::new(self.address, call.abi_encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allo::REGISTRY_ADDRESS;
    use alloy::primitives::address;

    #[test]
    fn test_create_profile_calldata() {
        let registry = Registry::new(REGISTRY_ADDRESS);
        let owner = address!("8C180840fcBb90CE8464B4eCd12ab0f840c6647C");
        let args = CreateProfileArgs {
            nonce: U256::from(10_000_000_021u64),
            name: "Test Profile 1".to_string(),
            metadata: Metadata::ipfs("bafkreif3wuuv4wqp4i5tfwlrnyogtujmhnn6jmoihr5yekaydhsaw2x6oy"),
            owner,
            members: vec![],
        };

        let tx = registry.create_profile(&args);
        assert_eq!(tx.to, REGISTRY_ADDRESS);
        assert_eq!(tx.value, U256::ZERO);
        assert_eq!(tx.selector(), Some(IRegistry::createProfileCall::SELECTOR));

        let decoded = IRegistry::createProfileCall::abi_decode(&tx.data).unwrap();
        assert_eq!(decoded.nonce, args.nonce);
        assert_eq!(decoded.name, "Test Profile 1");
        assert_eq!(decoded.owner, owner);
        assert!(decoded.members.is_empty());
    }
}
