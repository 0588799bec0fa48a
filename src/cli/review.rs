//! Recipient review command

use super::{NetworkArgs, DECLINED};
use crate::abi::{decode_all_typed, IStrategy};
use crate::allo::{review_recipients, RecipientReview, RecipientStatus};
use crate::config::parse_address_str;
use crate::error::{AbiError, ConfigError, Result};
use crate::prompt::Confirmation;
use crate::rpc::{Submitter, WalletClient};
use alloy::primitives::Address;
use alloy::sol_types::SolEvent;
use clap::{ArgAction, Args};
use std::io;

#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Strategy contract of the pool
    #[arg(long)]
    pub strategy: String,

    /// Recipient to accept (can be repeated)
    #[arg(long = "accept", action = ArgAction::Append)]
    pub accept: Vec<String>,

    /// Recipient to reject (can be repeated)
    #[arg(long = "reject", action = ArgAction::Append)]
    pub reject: Vec<String>,
}

impl ReviewArgs {
    /// Accepted recipients first, then rejected ones, each in flag order
    pub fn reviews(&self) -> Result<Vec<RecipientReview>> {
        if self.accept.is_empty() && self.reject.is_empty() {
            return Err(ConfigError::MissingField(
                "at least one --accept or --reject recipient".to_string(),
            )
            .into());
        }

        let accepted = self.accept.iter().map(|s| (s, true));
        let rejected = self.reject.iter().map(|s| (s, false));

        accepted
            .chain(rejected)
            .map(|(s, accept)| -> Result<RecipientReview> {
                Ok(RecipientReview::new(parse_address_str(s)?, accept))
            })
            .collect()
    }
}

/// A decoded `Reviewed` event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub recipient_id: Address,
    pub status: Option<RecipientStatus>,
    pub sender: Address,
}

impl From<IStrategy::Reviewed> for ReviewOutcome {
    fn from(event: IStrategy::Reviewed) -> Self {
        Self {
            recipient_id: event.recipientId,
            status: RecipientStatus::from_u8(event.status),
            sender: event.sender,
        }
    }
}

/// Confirm, submit `reviewRecipients`, and decode every `Reviewed` event.
/// Returns `None` when the operator declines.
pub async fn review<S, F>(
    submitter: &S,
    strategy: Address,
    reviews: &[RecipientReview],
    confirm: F,
) -> Result<Option<Vec<ReviewOutcome>>>
where
    S: Submitter + ?Sized,
    F: FnOnce(Address) -> io::Result<bool>,
{
    if !confirm(submitter.sender())? {
        return Ok(None);
    }

    let receipt = submitter.submit(review_recipients(strategy, reviews)).await?;
    let events: Vec<IStrategy::Reviewed> = decode_all_typed(&receipt)?;

    if events.is_empty() {
        return Err(AbiError::EventNotInReceipt(IStrategy::Reviewed::SIGNATURE.to_string()).into());
    }
    if events.len() != reviews.len() {
        tracing::warn!(
            "Submitted {} reviews but the receipt holds {} Reviewed events",
            reviews.len(),
            events.len()
        );
    }

    Ok(Some(events.into_iter().map(ReviewOutcome::from).collect()))
}

pub async fn handle(
    args: &ReviewArgs,
    network: &NetworkArgs,
    confirmation: Confirmation,
    quiet: bool,
) -> anyhow::Result<()> {
    let strategy = parse_address_str(&args.strategy)?;
    let reviews = args.reviews()?;
    let config = network.resolve()?;

    println!("Reviewing recipients of strategy {} on {}", strategy, config.chain_name());
    println!("{}", "─".repeat(60));
    for r in &reviews {
        println!("{}  {}", r.recipient_id, r.status);
    }

    if !quiet {
        eprintln!("Connecting to {}...", config.rpc_url);
    }
    let client = WalletClient::connect(&config).await?;

    let outcomes = review(&client, strategy, &reviews, |sender| {
        confirmation.proceed_with(&sender.to_string())
    })
    .await?;

    match outcomes {
        Some(outcomes) => {
            println!("Reviewed:");
            for outcome in &outcomes {
                match outcome.status {
                    Some(status) => println!("  {}  {}", outcome.recipient_id, status),
                    None => println!("  {}  unknown status", outcome.recipient_id),
                }
            }
        }
        None => println!("{}", DECLINED),
    }

    Ok(())
}
