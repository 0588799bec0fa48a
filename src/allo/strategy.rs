//! Strategy-specific payloads: initialize data, recipient registration data
//! and recipient reviews

use super::{PoolSchedule, TxData};
use crate::abi::{DirectGrantsInitializeParams, DonationVotingInitializeData, IStrategy, Metadata};
use crate::error::ConfigError;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::{SolCall, SolValue};
use std::fmt;
use std::str::FromStr;

/// Allocation strategies the workflows know how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// DonationVotingMerkleDistribution (timed registration and allocation)
    #[default]
    DonationVoting,
    /// DirectGrantsSimple (registry gating, optional grant amounts)
    DirectGrants,
}

impl StrategyKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            StrategyKind::DonationVoting => "DonationVotingMerkleDistribution",
            StrategyKind::DirectGrants => "DirectGrantsSimple",
        }
    }

    /// Encode the registration payload passed to `Allo.registerRecipient`
    pub fn register_recipient_data(&self, args: &RegisterRecipientArgs) -> Bytes {
        match self {
            StrategyKind::DonationVoting => (
                args.registry_anchor,
                args.recipient_address,
                args.metadata.clone(),
            )
                .abi_encode_params()
                .into(),
            StrategyKind::DirectGrants => (
                args.registry_anchor,
                args.recipient_address,
                args.grant_amount,
                args.metadata.clone(),
            )
                .abi_encode_params()
                .into(),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::DonationVoting => write!(f, "donation-voting"),
            StrategyKind::DirectGrants => write!(f, "direct-grants"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "donation-voting" | "dv" | "dvm" => Ok(StrategyKind::DonationVoting),
            "direct-grants" | "dg" => Ok(StrategyKind::DirectGrants),
            _ => Err(ConfigError::InvalidStrategy(format!(
                "'{}' (use donation-voting or direct-grants)",
                s
            ))),
        }
    }
}

impl DonationVotingInitializeData {
    /// Initialize data for a schedule; an empty `allowed_tokens` list is
    /// replaced by the zero address, which allows every token
    pub fn new(
        use_registry_anchor: bool,
        metadata_required: bool,
        schedule: &PoolSchedule,
        allowed_tokens: Vec<Address>,
    ) -> Self {
        let allowed_tokens = if allowed_tokens.is_empty() {
            vec![Address::ZERO]
        } else {
            allowed_tokens
        };

        Self {
            useRegistryAnchor: use_registry_anchor,
            metadataRequired: metadata_required,
            registrationStartTime: schedule.registration_start,
            registrationEndTime: schedule.registration_end,
            allocationStartTime: schedule.allocation_start,
            allocationEndTime: schedule.allocation_end,
            allowedTokens: allowed_tokens,
        }
    }

    /// `abi.encode(data)` as the strategy's `initialize` expects it
    pub fn encode(&self) -> Bytes {
        self.abi_encode().into()
    }
}

impl DirectGrantsInitializeParams {
    pub fn encode(&self) -> Bytes {
        self.abi_encode().into()
    }
}

/// Arguments for registering a profile's anchor as a pool recipient
#[derive(Debug, Clone)]
pub struct RegisterRecipientArgs {
    /// Profile anchor, used as the recipient id
    pub registry_anchor: Address,
    /// Address that receives payouts
    pub recipient_address: Address,
    /// Requested grant (DirectGrants only)
    pub grant_amount: U256,
    pub metadata: Metadata,
}

/// Recipient status values understood by the strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RecipientStatus {
    None = 0,
    Pending = 1,
    Accepted = 2,
    Rejected = 3,
    Appealed = 4,
    InReview = 5,
    Canceled = 6,
}

impl RecipientStatus {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Pending),
            2 => Some(Self::Accepted),
            3 => Some(Self::Rejected),
            4 => Some(Self::Appealed),
            5 => Some(Self::InReview),
            6 => Some(Self::Canceled),
            _ => None,
        }
    }
}

impl fmt::Display for RecipientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
            Self::Appealed => "Appealed",
            Self::InReview => "InReview",
            Self::Canceled => "Canceled",
        };
        write!(f, "{}", name)
    }
}

/// A review decision for one recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipientReview {
    pub recipient_id: Address,
    pub status: RecipientStatus,
}

impl RecipientReview {
    pub fn new(recipient_id: Address, accepted: bool) -> Self {
        Self {
            recipient_id,
            status: if accepted {
                RecipientStatus::Accepted
            } else {
                RecipientStatus::Rejected
            },
        }
    }
}

/// Build a `reviewRecipients` transaction sent directly to `strategy`
pub fn review_recipients(strategy: Address, reviews: &[RecipientReview]) -> TxData {
    let call = IStrategy::reviewRecipientsCall {
        recipientIds: reviews.iter().map(|r| r.recipient_id).collect(),
        recipientStatuses: reviews.iter().map(|r| r.status as u8).collect(),
    };
    TxData::new(strategy, call.abi_encode())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const ANCHOR: Address = address!("Ecaa82aa6E2E3d41fECF6eA6D8eEec654e4F0527");
    const RECIPIENT: Address = address!("8C180840fcBb90CE8464B4eCd12ab0f840c6647C");

    fn register_args() -> RegisterRecipientArgs {
        RegisterRecipientArgs {
            registry_anchor: ANCHOR,
            recipient_address: RECIPIENT,
            grant_amount: U256::from(1_000_000_000_000_000_000u64),
            metadata: Metadata::ipfs("bafkreiakgpfq3psade5hmcnk3nrls7eame5yma4n6yfh6d3bvqwqke4rry"),
        }
    }

    #[test]
    fn test_donation_voting_register_data() {
        let data = StrategyKind::DonationVoting.register_recipient_data(&register_args());
        let (anchor, recipient, metadata) =
            <(Address, Address, Metadata)>::abi_decode_params(&data).unwrap();
        assert_eq!(anchor, ANCHOR);
        assert_eq!(recipient, RECIPIENT);
        assert_eq!(metadata.protocol, U256::from(1u64));
    }

    #[test]
    fn test_direct_grants_register_data() {
        let data = StrategyKind::DirectGrants.register_recipient_data(&register_args());
        let (anchor, recipient, amount, metadata) =
            <(Address, Address, U256, Metadata)>::abi_decode_params(&data).unwrap();
        assert_eq!(anchor, ANCHOR);
        assert_eq!(recipient, RECIPIENT);
        assert_eq!(amount, U256::from(1_000_000_000_000_000_000u64));
        assert_eq!(
            metadata.pointer,
            "bafkreiakgpfq3psade5hmcnk3nrls7eame5yma4n6yfh6d3bvqwqke4rry"
        );
    }

    #[test]
    fn test_donation_voting_init_data() {
        let schedule = PoolSchedule::from_offsets(1_000, 30, 60, 90, 120).unwrap();
        let init = DonationVotingInitializeData::new(true, true, &schedule, vec![]);
        assert_eq!(init.allowedTokens, vec![Address::ZERO]);

        let encoded = init.encode();
        let decoded = DonationVotingInitializeData::abi_decode(&encoded).unwrap();
        assert_eq!(decoded, init);
        assert_eq!(decoded.registrationStartTime, 2_800);
    }

    #[test]
    fn test_direct_grants_init_params() {
        let params = DirectGrantsInitializeParams {
            registryGating: true,
            metadataRequired: true,
            grantAmountRequired: true,
        };
        // Static tuple: three words, no offset
        assert_eq!(params.encode().len(), 96);
    }

    #[test]
    fn test_review_recipients() {
        let strategy = address!("D13ec67938B5E9Cb05A05D8e160daF02Ed5ea9C9");
        let other = address!("2e6ED3429e6eeD7544F740ab6152DD77E832fc9b");
        let reviews = vec![
            RecipientReview::new(ANCHOR, true),
            RecipientReview::new(other, false),
        ];

        let tx = review_recipients(strategy, &reviews);
        assert_eq!(tx.to, strategy);

        let decoded = <IStrategy::reviewRecipientsCall as SolCall>::abi_decode(&tx.data).unwrap();
        assert_eq!(decoded.recipientIds, vec![ANCHOR, other]);
        assert_eq!(decoded.recipientStatuses, vec![2u8, 3u8]);
    }

    #[test]
    fn test_strategy_kind_parse() {
        assert_eq!(
            "donation-voting".parse::<StrategyKind>().unwrap(),
            StrategyKind::DonationVoting
        );
        assert_eq!("dg".parse::<StrategyKind>().unwrap(), StrategyKind::DirectGrants);
        assert_eq!(
            "Direct_Grants".parse::<StrategyKind>().unwrap(),
            StrategyKind::DirectGrants
        );
        assert!("quadratic".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_status_round_trip() {
        for value in 0u8..=6 {
            let status = RecipientStatus::from_u8(value).unwrap();
            assert_eq!(status as u8, value);
        }
        assert!(RecipientStatus::from_u8(7).is_none());
    }
}
