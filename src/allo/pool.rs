//! Allo core contract: pool creation and recipient registration

use super::TxData;
use crate::abi::{IAllo, Metadata};
use crate::error::{ConfigError, Result};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::sol_types::SolCall;

/// Arguments for `Allo.createPool`
#[derive(Debug, Clone)]
pub struct CreatePoolArgs {
    /// Registry profile that will own the pool
    pub profile_id: B256,
    /// Strategy implementation to clone
    pub strategy: Address,
    /// Strategy-specific initialize data
    pub init_strategy_data: Bytes,
    /// Pool token (`NATIVE` for ether)
    pub token: Address,
    /// Initial funding amount
    pub amount: U256,
    pub metadata: Metadata,
    pub managers: Vec<Address>,
}

/// Builder for Allo core transactions
#[derive(Debug, Clone, Copy)]
pub struct Allo {
    address: Address,
}

impl Allo {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    /// Build a `createPool` transaction. Native-token pools attach `amount`
    /// as value.
    pub fn create_pool(&self, args: &CreatePoolArgs) -> TxData {
        let call = IAllo::createPoolCall {
            profileId: args.profile_id,
            strategy: args.strategy,
            initStrategyData: args.init_strategy_data.clone(),
            token: args.token,
            amount: args.amount,
            metadata: args.metadata.clone(),
            managers: args.managers.clone(),
        };

        let value = if args.token == super::NATIVE {
            args.amount
        } else {
            U256::ZERO
        };

        TxData::new(self.address, call.abi_encode()).with_value(value)
    }

    /// Build a `registerRecipient` transaction for `pool_id`
    pub fn register_recipient(&self, pool_id: U256, data: Bytes) -> TxData {
        let call = IAllo::registerRecipientCall {
            poolId: pool_id,
            data,
        };
        TxData::new(self.address, call.abi_encode())
    }
}

/// Registration and allocation windows of a pool, in unix seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSchedule {
    pub registration_start: u64,
    pub registration_end: u64,
    pub allocation_start: u64,
    pub allocation_end: u64,
}

impl PoolSchedule {
    /// Build a schedule from minute offsets relative to `now`. Offsets that
    /// overflow a unix timestamp are rejected.
    pub fn from_offsets(
        now: u64,
        registration_start_in: u64,
        registration_end_in: u64,
        allocation_start_in: u64,
        allocation_end_in: u64,
    ) -> Result<Self> {
        let minutes = |n: u64| {
            n.checked_mul(60)
                .and_then(|secs| now.checked_add(secs))
                .ok_or_else(|| invalid(&format!("offset of {} minutes is out of range", n)))
        };
        Ok(Self {
            registration_start: minutes(registration_start_in)?,
            registration_end: minutes(registration_end_in)?,
            allocation_start: minutes(allocation_start_in)?,
            allocation_end: minutes(allocation_end_in)?,
        })
    }

    /// Check the windows against the strategy's constraints
    pub fn validate(&self, now: u64) -> Result<()> {
        if self.registration_start <= now {
            return Err(invalid("registration start must be in the future"));
        }
        if self.registration_end <= self.registration_start {
            return Err(invalid("registration end must be after registration start"));
        }
        if self.allocation_start <= self.registration_start {
            return Err(invalid(
                "allocation start must be after registration start",
            ));
        }
        if self.allocation_end <= self.allocation_start {
            return Err(invalid("allocation end must be after allocation start"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> crate::Error {
    ConfigError::InvalidSchedule(reason.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allo::{ALLO_ADDRESS, NATIVE};
    use alloy::primitives::address;

    fn pool_args(token: Address) -> CreatePoolArgs {
        CreatePoolArgs {
            profile_id: B256::repeat_byte(0x61),
            strategy: address!("D13ec67938B5E9Cb05A05D8e160daF02Ed5ea9C9"),
            init_strategy_data: Bytes::from(vec![1, 2, 3]),
            token,
            amount: U256::from(1000u64),
            metadata: Metadata::ipfs("QmTMmP2sUFjVAcgE4J8bc5NYygSgdqhvsDupivnSregCkT"),
            managers: vec![address!("8C180840fcBb90CE8464B4eCd12ab0f840c6647C")],
        }
    }

    #[test]
    fn test_create_pool_calldata() {
        let allo = Allo::new(ALLO_ADDRESS);
        let args = pool_args(NATIVE);
        let tx = allo.create_pool(&args);

        assert_eq!(tx.to, ALLO_ADDRESS);
        assert_eq!(tx.selector(), Some(IAllo::createPoolCall::SELECTOR));
        assert_eq!(tx.value, U256::from(1000u64));

        let decoded = IAllo::createPoolCall::abi_decode(&tx.data).unwrap();
        assert_eq!(decoded.profileId, args.profile_id);
        assert_eq!(decoded.strategy, args.strategy);
        assert_eq!(decoded.initStrategyData, args.init_strategy_data);
        assert_eq!(decoded.metadata, args.metadata);
        assert_eq!(decoded.managers, args.managers);
    }

    #[test]
    fn test_erc20_pool_has_no_value() {
        let allo = Allo::new(ALLO_ADDRESS);
        let usdc = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
        let tx = allo.create_pool(&pool_args(usdc));
        assert_eq!(tx.value, U256::ZERO);
    }

    #[test]
    fn test_register_recipient_calldata() {
        let allo = Allo::new(ALLO_ADDRESS);
        let tx = allo.register_recipient(U256::from(7u64), Bytes::from(vec![0xaa, 0xbb]));

        let decoded = IAllo::registerRecipientCall::abi_decode(&tx.data).unwrap();
        assert_eq!(decoded.poolId, U256::from(7u64));
        assert_eq!(decoded.data, Bytes::from(vec![0xaa, 0xbb]));
    }

    #[test]
    fn test_schedule_from_offsets() {
        let schedule = PoolSchedule::from_offsets(1_000, 30, 60, 90, 120).unwrap();
        assert_eq!(schedule.registration_start, 1_000 + 1_800);
        assert_eq!(schedule.registration_end, 1_000 + 3_600);
        assert_eq!(schedule.allocation_start, 1_000 + 5_400);
        assert_eq!(schedule.allocation_end, 1_000 + 7_200);
        assert!(schedule.validate(1_000).is_ok());
    }

    #[test]
    fn test_schedule_validation() {
        let now = 1_000;
        assert!(PoolSchedule::from_offsets(now, 0, 60, 90, 120)
            .unwrap()
            .validate(now)
            .is_err());
        assert!(PoolSchedule::from_offsets(now, 30, 30, 90, 120)
            .unwrap()
            .validate(now)
            .is_err());
        assert!(PoolSchedule::from_offsets(now, 30, 60, 30, 120)
            .unwrap()
            .validate(now)
            .is_err());

        let err = PoolSchedule::from_offsets(now, 30, 60, 90, 90)
            .unwrap()
            .validate(now)
            .unwrap_err();
        assert!(err.to_string().contains("allocation end"));
    }

    #[test]
    fn test_schedule_offset_overflow() {
        let err = PoolSchedule::from_offsets(1_700_000_000, u64::MAX / 30, 60, 90, 120)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid schedule"));

        let err = PoolSchedule::from_offsets(u64::MAX - 10, 30, 60, 90, 120).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
