#![no_std]

mod candidates;
mod errors;
mod events;
mod executor;
mod registry;
mod transfers;
mod types;
mod wallet;

pub use errors::WalletError;
pub use types::{Asset, TransferRequest};
pub use wallet::{ThresholdWallet, ThresholdWalletClient};
