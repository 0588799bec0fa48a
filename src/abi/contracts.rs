//! Solidity bindings for the Allo v2 contracts
//!
//! Only the calls and events the workflows touch are declared. Parameter
//! names drop the leading underscores used on-chain; names do not affect
//! selectors or topics.

use crate::error::{AbiError, Result};
use alloy::json_abi::JsonAbi;
use alloy::sol;
use std::fmt;
use std::str::FromStr;

sol! {
    /// Off-chain metadata pointer (protocol 1 = IPFS)
    #[derive(Debug, PartialEq, Eq)]
    struct Metadata {
        uint256 protocol;
        string pointer;
    }

    /// Init data for DonationVotingMerkleDistribution strategies
    #[derive(Debug, PartialEq, Eq)]
    struct DonationVotingInitializeData {
        bool useRegistryAnchor;
        bool metadataRequired;
        uint64 registrationStartTime;
        uint64 registrationEndTime;
        uint64 allocationStartTime;
        uint64 allocationEndTime;
        address[] allowedTokens;
    }

    /// Init params for DirectGrantsSimple strategies
    #[derive(Debug, PartialEq, Eq)]
    struct DirectGrantsInitializeParams {
        bool registryGating;
        bool metadataRequired;
        bool grantAmountRequired;
    }

    #[derive(Debug, PartialEq, Eq)]
    interface IAllo {
        event PoolCreated(
            uint256 indexed poolId,
            bytes32 indexed profileId,
            address strategy,
            address token,
            uint256 amount,
            Metadata metadata
        );

        function createPool(
            bytes32 profileId,
            address strategy,
            bytes initStrategyData,
            address token,
            uint256 amount,
            Metadata metadata,
            address[] managers
        ) external payable returns (uint256 poolId);

        function registerRecipient(uint256 poolId, bytes data)
            external payable returns (address recipientId);
    }

    #[derive(Debug, PartialEq, Eq)]
    interface IRegistry {
        event ProfileCreated(
            bytes32 indexed profileId,
            uint256 nonce,
            string name,
            Metadata metadata,
            address owner,
            address anchor
        );

        function createProfile(
            uint256 nonce,
            string name,
            Metadata metadata,
            address owner,
            address[] members
        ) external returns (bytes32 profileId);
    }

    /// Events shared by every BaseStrategy, plus the SQF Superfluid review call.
    /// `Status` is a Solidity enum and travels as uint8.
    #[derive(Debug, PartialEq, Eq)]
    interface IStrategy {
        event Registered(address indexed recipientId, bytes data, address sender);

        event Reviewed(address indexed recipientId, uint8 status, address sender);

        function reviewRecipients(address[] recipientIds, uint8[] recipientStatuses) external;
    }
}

/// Contracts with a built-in interface description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contract {
    Allo,
    Registry,
    Strategy,
}

impl Contract {
    /// Human-readable event signatures for this contract
    fn event_signatures(&self) -> &'static [&'static str] {
        match self {
            Contract::Allo => &[
                "event PoolCreated(uint256 indexed poolId, bytes32 indexed profileId, address strategy, address token, uint256 amount, (uint256,string) metadata)",
                "event PoolFunded(uint256 indexed poolId, uint256 amount, uint256 fee)",
                "event PoolMetadataUpdated(uint256 indexed poolId, (uint256,string) metadata)",
                "event RoleGranted(bytes32 indexed role, address indexed account, address indexed sender)",
            ],
            Contract::Registry => &[
                "event ProfileCreated(bytes32 indexed profileId, uint256 nonce, string name, (uint256,string) metadata, address owner, address anchor)",
                "event ProfileNameUpdated(bytes32 indexed profileId, string name, address anchor)",
                "event ProfileMetadataUpdated(bytes32 indexed profileId, (uint256,string) metadata)",
                "event ProfileOwnerUpdated(bytes32 indexed profileId, address owner)",
            ],
            Contract::Strategy => &[
                "event Initialized(uint256 poolId, bytes data)",
                "event Registered(address indexed recipientId, bytes data, address sender)",
                "event Reviewed(address indexed recipientId, uint8 status, address sender)",
                "event Allocated(address indexed recipientId, uint256 amount, address token, address sender)",
                "event Distributed(address indexed recipientId, address recipientAddress, uint256 amount, address sender)",
            ],
        }
    }

    /// Interface description used by the runtime decoder
    pub fn abi(&self) -> Result<JsonAbi> {
        JsonAbi::parse(self.event_signatures().iter().copied())
            .map_err(|e| AbiError::ParseError(format!("{} ABI: {}", self, e)).into())
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Contract::Allo => write!(f, "allo"),
            Contract::Registry => write!(f, "registry"),
            Contract::Strategy => write!(f, "strategy"),
        }
    }
}

impl FromStr for Contract {
    type Err = AbiError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "allo" => Ok(Contract::Allo),
            "registry" => Ok(Contract::Registry),
            "strategy" => Ok(Contract::Strategy),
            _ => Err(AbiError::ParseError(format!(
                "Unknown contract '{}'. Use allo, registry or strategy",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolEvent;

    #[test]
    fn test_builtin_abis_match_bindings() {
        let allo = Contract::Allo.abi().unwrap();
        let pool_created = &allo.event("PoolCreated").unwrap()[0];
        assert_eq!(pool_created.selector(), IAllo::PoolCreated::SIGNATURE_HASH);

        let registry = Contract::Registry.abi().unwrap();
        let profile_created = &registry.event("ProfileCreated").unwrap()[0];
        assert_eq!(
            profile_created.selector(),
            IRegistry::ProfileCreated::SIGNATURE_HASH
        );

        let strategy = Contract::Strategy.abi().unwrap();
        let registered = &strategy.event("Registered").unwrap()[0];
        assert_eq!(registered.selector(), IStrategy::Registered::SIGNATURE_HASH);
        let reviewed = &strategy.event("Reviewed").unwrap()[0];
        assert_eq!(reviewed.selector(), IStrategy::Reviewed::SIGNATURE_HASH);
    }

    #[test]
    fn test_registry_abi_has_no_registered_event() {
        let registry = Contract::Registry.abi().unwrap();
        assert!(registry.event("Registered").is_none());
    }

    #[test]
    fn test_event_signatures() {
        assert_eq!(
            IRegistry::ProfileCreated::SIGNATURE,
            "ProfileCreated(bytes32,uint256,string,(uint256,string),address,address)"
        );
        assert_eq!(
            IAllo::PoolCreated::SIGNATURE,
            "PoolCreated(uint256,bytes32,address,address,uint256,(uint256,string))"
        );
    }

    #[test]
    fn test_contract_from_str() {
        assert_eq!("Allo".parse::<Contract>().unwrap(), Contract::Allo);
        assert_eq!("registry".parse::<Contract>().unwrap(), Contract::Registry);
        assert!("vault".parse::<Contract>().is_err());
    }
}
