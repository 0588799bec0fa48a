//! Pool creation command

use super::{parse_addresses, parse_b256, parse_u256, unix_now, NetworkArgs, DECLINED};
use crate::abi::{decode_typed, DirectGrantsInitializeParams, DonationVotingInitializeData, IAllo, Metadata};
use crate::allo::{Allo, CreatePoolArgs, PoolSchedule, StrategyKind, NATIVE};
use crate::config::{parse_address_str, NetworkConfig};
use crate::error::Result;
use crate::prompt::Confirmation;
use crate::rpc::{Submitter, WalletClient};
use alloy::primitives::Address;
use clap::{ArgAction, Args};
use std::io;

#[derive(Args, Debug)]
pub struct PoolArgs {
    /// Strategy kind: donation-voting or direct-grants
    #[arg(long, default_value = "donation-voting")]
    pub kind: String,

    /// Registry profile id that owns the pool
    #[arg(long)]
    pub profile_id: String,

    /// Strategy implementation address
    #[arg(long)]
    pub strategy: String,

    /// Funding amount in the token's smallest unit
    #[arg(long, default_value = "0")]
    pub amount: String,

    /// Pool token (native token if omitted)
    #[arg(long)]
    pub token: Option<String>,

    /// IPFS pointer of the pool metadata
    #[arg(long)]
    pub metadata: String,

    /// Pool manager (can be repeated)
    #[arg(long = "manager", action = ArgAction::Append)]
    pub managers: Vec<String>,

    /// Registration opens in N minutes
    #[arg(long, default_value = "30")]
    pub registration_start_in: u64,

    /// Registration closes in N minutes
    #[arg(long, default_value = "60")]
    pub registration_end_in: u64,

    /// Allocation opens in N minutes
    #[arg(long, default_value = "90")]
    pub allocation_start_in: u64,

    /// Allocation closes in N minutes
    #[arg(long, default_value = "120")]
    pub allocation_end_in: u64,

    /// Require recipients to register with a profile anchor (donation-voting)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub use_registry_anchor: bool,

    /// Require registration metadata
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub metadata_required: bool,

    /// Token accepted for allocations (donation-voting, can be repeated;
    /// all tokens if omitted)
    #[arg(long = "allowed-token", action = ArgAction::Append)]
    pub allowed_tokens: Vec<String>,

    /// Only profile members may register (direct-grants)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub registry_gating: bool,

    /// Recipients must request a grant amount (direct-grants)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub grant_amount_required: bool,
}

/// Validated pool parameters, ready to submit
#[derive(Debug, Clone)]
pub struct PoolPlan {
    pub kind: StrategyKind,
    /// Set for strategies with time windows
    pub schedule: Option<PoolSchedule>,
    pub args: CreatePoolArgs,
}

impl PoolArgs {
    /// Parse and validate the flags against `now`
    pub fn plan(&self, now: u64) -> Result<PoolPlan> {
        let kind: StrategyKind = self.kind.parse()?;

        let (schedule, init_strategy_data) = match kind {
            StrategyKind::DonationVoting => {
                let schedule = PoolSchedule::from_offsets(
                    now,
                    self.registration_start_in,
                    self.registration_end_in,
                    self.allocation_start_in,
                    self.allocation_end_in,
                )?;
                schedule.validate(now)?;

                let init = DonationVotingInitializeData::new(
                    self.use_registry_anchor,
                    self.metadata_required,
                    &schedule,
                    parse_addresses(&self.allowed_tokens)?,
                );
                (Some(schedule), init.encode())
            }
            StrategyKind::DirectGrants => {
                let init = DirectGrantsInitializeParams {
                    registryGating: self.registry_gating,
                    metadataRequired: self.metadata_required,
                    grantAmountRequired: self.grant_amount_required,
                };
                (None, init.encode())
            }
        };

        let token = match &self.token {
            Some(token) => parse_address_str(token)?,
            None => NATIVE,
        };

        let args = CreatePoolArgs {
            profile_id: parse_b256("profile id", &self.profile_id)?,
            strategy: parse_address_str(&self.strategy)?,
            init_strategy_data,
            token,
            amount: parse_u256("amount", &self.amount)?,
            metadata: Metadata::ipfs(self.metadata.trim()),
            managers: parse_addresses(&self.managers)?,
        };

        Ok(PoolPlan {
            kind,
            schedule,
            args,
        })
    }
}

/// Confirm, submit `createPool`, and decode the `PoolCreated` event.
/// Returns `None` when the operator declines.
pub async fn create_pool<S, F>(
    submitter: &S,
    allo: Allo,
    plan: &PoolPlan,
    confirm: F,
) -> Result<Option<IAllo::PoolCreated>>
where
    S: Submitter + ?Sized,
    F: FnOnce(Address) -> io::Result<bool>,
{
    if !confirm(submitter.sender())? {
        return Ok(None);
    }

    let receipt = submitter.submit(allo.create_pool(&plan.args)).await?;
    let created: IAllo::PoolCreated = decode_typed(&receipt)?;

    tracing::info!(
        "Pool {} created with strategy {}",
        created.poolId,
        created.strategy
    );

    Ok(Some(created))
}

fn print_plan(plan: &PoolPlan, config: &NetworkConfig) {
    let args = &plan.args;

    println!("Creating {} pool on {}", plan.kind.display_name(), config.chain_name());
    println!("{}", "─".repeat(60));
    println!("Allo:        {}", config.allo);
    println!("Profile ID:  {}", args.profile_id);
    println!("Strategy:    {}", args.strategy);
    if args.token == NATIVE {
        println!("Token:       native");
    } else {
        println!("Token:       {}", args.token);
    }
    println!("Amount:      {}", args.amount);
    println!("Metadata:    {}", args.metadata.pointer);
    for manager in &args.managers {
        println!("Manager:     {}", manager);
    }
    if let Some(schedule) = &plan.schedule {
        println!("Registration: {} - {}", schedule.registration_start, schedule.registration_end);
        println!("Allocation:   {} - {}", schedule.allocation_start, schedule.allocation_end);
    }
}

pub async fn handle(
    args: &PoolArgs,
    network: &NetworkArgs,
    confirmation: Confirmation,
    quiet: bool,
) -> anyhow::Result<()> {
    let plan = args.plan(unix_now())?;
    let config = network.resolve()?;

    print_plan(&plan, &config);

    if !quiet {
        eprintln!("Connecting to {}...", config.rpc_url);
    }
    let client = WalletClient::connect(&config).await?;

    let created = create_pool(&client, Allo::new(config.allo), &plan, |sender| {
        confirmation.proceed_with(&sender.to_string())
    })
    .await?;

    match created {
        Some(created) => {
            println!("Pool ID: {}", created.poolId);
            println!("Strategy: {}", created.strategy);
        }
        None => println!("{}", DECLINED),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allo::ALLO_ADDRESS;
    use crate::rpc::mock::{event_log, receipt, MockSubmitter};
    use alloy::primitives::{address, U256};
    use alloy::sol_types::{SolCall, SolEvent, SolValue};
    use clap::Parser;

    const PROFILE_ID: &str = "0x52f5f6a2ce1a6dd9de9e0a1e3c1d1c03f5a8bd4ba4f1d2c3e5c8b9c1ad0ee3c0";
    const STRATEGY: &str = "0xD13ec67938B5E9Cb05A05D8e160daF02Ed5ea9C9";
    const SENDER: Address = address!("8C180840fcBb90CE8464B4eCd12ab0f840c6647C");

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: PoolArgs,
    }

    fn parse(extra: &[&str]) -> PoolArgs {
        let mut argv = vec![
            "create-pool",
            "--profile-id",
            PROFILE_ID,
            "--strategy",
            STRATEGY,
            "--amount",
            "10000000000000000",
            "--metadata",
            "bafkreihrjyu5tney6wia2hmkertc74nzfpsgxw2epvnxm72bxj6ifnd4ku",
        ];
        argv.extend_from_slice(extra);
        Harness::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_donation_voting_plan() {
        let now = 1_700_000_000;
        let plan = parse(&[]).plan(now).unwrap();

        assert_eq!(plan.kind, StrategyKind::DonationVoting);
        assert_eq!(plan.args.token, NATIVE);
        assert_eq!(plan.args.amount, U256::from(10_000_000_000_000_000u64));

        let schedule = plan.schedule.unwrap();
        assert_eq!(schedule.registration_start, now + 30 * 60);
        assert_eq!(schedule.allocation_end, now + 120 * 60);

        let init = DonationVotingInitializeData::abi_decode(&plan.args.init_strategy_data).unwrap();
        assert!(init.useRegistryAnchor);
        assert_eq!(init.allowedTokens, vec![Address::ZERO]);
        assert_eq!(init.allocationStartTime, now + 90 * 60);
    }

    #[test]
    fn test_direct_grants_plan() {
        let plan = parse(&["--kind", "direct-grants", "--grant-amount-required", "false"])
            .plan(1_700_000_000)
            .unwrap();

        assert!(plan.schedule.is_none());
        let (gating, metadata, grant) =
            <(bool, bool, bool)>::abi_decode_params(&plan.args.init_strategy_data).unwrap();
        assert!(gating);
        assert!(metadata);
        assert!(!grant);
    }

    #[test]
    fn test_plan_rejects_bad_schedule() {
        let err = parse(&["--registration-end-in", "10"])
            .plan(1_700_000_000)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid schedule"));

        let huge = (u64::MAX / 30).to_string();
        let err = parse(&["--registration-start-in", &huge])
            .plan(1_700_000_000)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_plan_rejects_bad_inputs() {
        let err = parse(&["--kind", "quadratic"]).plan(0).unwrap_err();
        assert!(err.to_string().contains("strategy kind"));

        let err = parse(&["--manager", "0x1234"]).plan(0).unwrap_err();
        assert!(err.to_string().contains("Invalid address"));
    }

    fn pool_created() -> IAllo::PoolCreated {
        IAllo::PoolCreated {
            poolId: U256::from(42u64),
            profileId: parse_b256("profile id", PROFILE_ID).unwrap(),
            strategy: address!("2e6ED3429e6eeD7544F740ab6152DD77E832fc9b"),
            token: NATIVE,
            amount: U256::from(10_000_000_000_000_000u64),
            metadata: Metadata::ipfs("bafkreihrjyu5tney6wia2hmkertc74nzfpsgxw2epvnxm72bxj6ifnd4ku"),
        }
    }

    #[tokio::test]
    async fn test_create_pool_submits_and_decodes() {
        let plan = parse(&[]).plan(unix_now()).unwrap();
        let mock = MockSubmitter::new(
            SENDER,
            vec![receipt(vec![event_log(pool_created().encode_log_data())])],
        );

        let created = create_pool(&mock, Allo::new(ALLO_ADDRESS), &plan, |sender| {
            assert_eq!(sender, SENDER);
            Ok(true)
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(created.poolId, U256::from(42u64));
        assert_eq!(created.strategy, pool_created().strategy);

        let sent = mock.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, ALLO_ADDRESS);
        assert_eq!(sent[0].value, plan.args.amount);
        let call = <IAllo::createPoolCall as SolCall>::abi_decode(&sent[0].data).unwrap();
        assert_eq!(call.profileId, plan.args.profile_id);
    }

    #[tokio::test]
    async fn test_declined_prompt_submits_nothing() {
        let plan = parse(&[]).plan(unix_now()).unwrap();
        let mock = MockSubmitter::new(SENDER, vec![]);

        let created = create_pool(&mock, Allo::new(ALLO_ADDRESS), &plan, |_| Ok(false))
            .await
            .unwrap();

        assert!(created.is_none());
        assert!(mock.sent().is_empty());
    }

    #[tokio::test]
    async fn test_missing_pool_created_event() {
        let plan = parse(&[]).plan(unix_now()).unwrap();
        let mock = MockSubmitter::new(SENDER, vec![receipt(vec![])]);

        let err = create_pool(&mock, Allo::new(ALLO_ADDRESS), &plan, |_| Ok(true))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Event not found in receipt"));
    }
}
