//! Profile creation and recipient registration command

use super::{parse_addresses, parse_u256, NetworkArgs, DECLINED};
use crate::abi::{decode_typed, IRegistry, IStrategy, Metadata};
use crate::allo::{Allo, CreateProfileArgs, RegisterRecipientArgs, Registry, StrategyKind};
use crate::error::{ConfigError, Result};
use crate::prompt::Confirmation;
use crate::rpc::{Submitter, WalletClient};
use alloy::primitives::{Address, B256, U256};
use clap::Args;
use rand::Rng;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct RecipientsArgs {
    /// Pool to register recipients in
    #[arg(long)]
    pub pool_id: String,

    /// TOML file listing the profiles to create
    #[arg(long)]
    pub profiles: PathBuf,

    /// Strategy kind of the pool: donation-voting or direct-grants
    #[arg(long, default_value = "donation-voting")]
    pub kind: String,
}

/// Profiles file layout:
///
/// ```toml
/// [[profiles]]
/// name = "Open Source Tooling"
/// metadata = "bafkreiakgpfq3psade5hmcnk3nrls7eame5yma4n6yfh6d3bvqwqke4rry"
/// members = ["0x8C180840fcBb90CE8464B4eCd12ab0f840c6647C"]
/// grant_amount = "1000000000000000000"
/// ```
#[derive(Debug, Deserialize)]
struct ProfilesFile {
    #[serde(default)]
    profiles: Vec<ProfileEntry>,
}

#[derive(Debug, Deserialize)]
struct ProfileEntry {
    name: String,
    /// IPFS pointer of the profile metadata
    metadata: String,
    /// Random when omitted
    nonce: Option<u64>,
    #[serde(default)]
    members: Vec<String>,
    /// IPFS pointer sent with the registration; the profile pointer if omitted
    recipient_metadata: Option<String>,
    /// Requested grant (direct-grants)
    grant_amount: Option<String>,
}

/// One profile to create and register
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub nonce: U256,
    pub name: String,
    pub metadata: Metadata,
    pub members: Vec<Address>,
    pub recipient_metadata: Metadata,
    pub grant_amount: U256,
}

/// Read and validate a profiles file
pub fn load_profiles(path: &Path) -> Result<Vec<NewProfile>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::InvalidProfiles(format!("{}: {}", path.display(), e)))?;
    parse_profiles(&content)
}

fn parse_profiles(content: &str) -> Result<Vec<NewProfile>> {
    let file: ProfilesFile = toml::from_str(content)
        .map_err(|e| ConfigError::InvalidProfiles(e.to_string()))?;

    if file.profiles.is_empty() {
        return Err(ConfigError::InvalidProfiles("no [[profiles]] entries".to_string()).into());
    }

    let mut rng = rand::thread_rng();

    file.profiles
        .into_iter()
        .map(|entry| -> Result<NewProfile> {
            let grant_amount = match &entry.grant_amount {
                Some(amount) => parse_u256("grant amount", amount)?,
                None => U256::ZERO,
            };
            let recipient_metadata = entry
                .recipient_metadata
                .as_deref()
                .unwrap_or(&entry.metadata);

            Ok(NewProfile {
                nonce: U256::from(entry.nonce.unwrap_or_else(|| rng.gen())),
                metadata: Metadata::ipfs(entry.metadata.trim()),
                recipient_metadata: Metadata::ipfs(recipient_metadata.trim()),
                members: parse_addresses(&entry.members)?,
                grant_amount,
                name: entry.name,
            })
        })
        .collect()
}

/// Identifiers of a registered recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredRecipient {
    pub name: String,
    pub profile_id: B256,
    pub anchor: Address,
    pub recipient_id: Address,
}

/// Contracts and pool the recipients are registered against
#[derive(Debug, Clone, Copy)]
pub struct RegistrationTarget {
    pub registry: Registry,
    pub allo: Allo,
    pub pool_id: U256,
    pub kind: StrategyKind,
}

/// Create the profile, then register its anchor in the pool.
/// `on_profile` sees the new profile before registration is attempted.
pub async fn create_recipient<S, P>(
    submitter: &S,
    target: &RegistrationTarget,
    profile: &NewProfile,
    on_profile: &mut P,
) -> Result<RegisteredRecipient>
where
    S: Submitter + ?Sized,
    P: FnMut(&IRegistry::ProfileCreated),
{
    let owner = submitter.sender();

    let create = target.registry.create_profile(&CreateProfileArgs {
        nonce: profile.nonce,
        name: profile.name.clone(),
        metadata: profile.metadata.clone(),
        owner,
        members: profile.members.clone(),
    });
    let receipt = submitter.submit(create).await?;
    let created: IRegistry::ProfileCreated = decode_typed(&receipt)?;

    tracing::info!(
        "Profile {} created with anchor {}",
        created.profileId,
        created.anchor
    );
    on_profile(&created);

    let data = target.kind.register_recipient_data(&RegisterRecipientArgs {
        registry_anchor: created.anchor,
        recipient_address: owner,
        grant_amount: profile.grant_amount,
        metadata: profile.recipient_metadata.clone(),
    });
    let receipt = submitter
        .submit(target.allo.register_recipient(target.pool_id, data))
        .await?;
    let registered: IStrategy::Registered = decode_typed(&receipt)?;

    tracing::info!(
        "Recipient {} registered in pool {}",
        registered.recipientId,
        target.pool_id
    );

    Ok(RegisteredRecipient {
        name: profile.name.clone(),
        profile_id: created.profileId,
        anchor: created.anchor,
        recipient_id: registered.recipientId,
    })
}

/// Confirm once, then create and register every profile in order.
/// Returns `None` when the operator declines.
pub async fn create_recipients<S, F, P>(
    submitter: &S,
    target: &RegistrationTarget,
    profiles: &[NewProfile],
    confirm: F,
    mut on_profile: P,
) -> Result<Option<Vec<RegisteredRecipient>>>
where
    S: Submitter + ?Sized,
    F: FnOnce(Address) -> io::Result<bool>,
    P: FnMut(&IRegistry::ProfileCreated),
{
    if !confirm(submitter.sender())? {
        return Ok(None);
    }

    let mut registered = Vec::with_capacity(profiles.len());
    for profile in profiles {
        registered.push(create_recipient(submitter, target, profile, &mut on_profile).await?);
    }

    Ok(Some(registered))
}

/// Lines printed as soon as a profile exists on chain
fn profile_report(created: &IRegistry::ProfileCreated) -> String {
    format!(
        "Profile ID: {}\nAnchor: {}\n",
        created.profileId, created.anchor
    )
}

pub async fn handle(
    args: &RecipientsArgs,
    network: &NetworkArgs,
    confirmation: Confirmation,
    quiet: bool,
) -> anyhow::Result<()> {
    let kind: StrategyKind = args.kind.parse()?;
    let pool_id = parse_u256("pool id", &args.pool_id)?;
    let profiles = load_profiles(&args.profiles)?;
    let config = network.resolve()?;

    println!(
        "Registering {} recipients in {} pool {} on {}",
        profiles.len(),
        kind.display_name(),
        pool_id,
        config.chain_name()
    );
    println!("{}", "─".repeat(60));
    for profile in &profiles {
        println!("{} (nonce {})", profile.name, profile.nonce);
    }

    if !quiet {
        eprintln!("Connecting to {}...", config.rpc_url);
    }
    let client = WalletClient::connect(&config).await?;

    let target = RegistrationTarget {
        registry: Registry::new(config.registry),
        allo: Allo::new(config.allo),
        pool_id,
        kind,
    };

    let registered = create_recipients(
        &client,
        &target,
        &profiles,
        |sender| confirmation.proceed_with(&sender.to_string()),
        |created| print!("{}", profile_report(created)),
    )
    .await?;

    match registered {
        Some(registered) => {
            println!("Recipients:");
            for recipient in &registered {
                println!(
                    "  {} ({}) profile {} anchor {}",
                    recipient.recipient_id, recipient.name, recipient.profile_id, recipient.anchor
                );
            }
        }
        None => println!("{}", DECLINED),
    }

    Ok(())
}
