//! Chain access: transaction submission and receipt retrieval

mod wallet;

pub use wallet::{fetch_receipt, Submitter, SubmittedTx, WalletClient};

#[cfg(test)]
pub(crate) use wallet::mock;
