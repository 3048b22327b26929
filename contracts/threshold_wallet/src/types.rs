use soroban_sdk::{contracttype, Address};

// Ledger lifetimes, roughly one day / thirty days at five-second ledgers.
pub const INSTANCE_BUMP_THRESHOLD: u32 = 17_280;
pub const INSTANCE_EXTEND_TO: u32 = 518_400;
pub const RECORD_BUMP_THRESHOLD: u32 = 17_280;
pub const RECORD_EXTEND_TO: u32 = 518_400;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    NativeToken,
    Threshold,
    OwnerCount,
    OwnerList,
    Owner(Address),
    AddCandidate(Address),
    RemoveCandidate(Address),
    TransferCount,
    Transfer(u64),
    TransferConfirmers(u64),
}

/// What a transfer request moves out of the wallet.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Asset {
    /// The wallet's native balance, held in the native token contract
    /// configured at initialization.
    Native,
    /// A fungible-token collaborator contract.
    Token(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferRequest {
    pub id: u64,
    pub proposer: Address,
    pub destination: Address,
    pub amount: i128,
    pub asset: Asset,
    pub executed: bool,
    pub confirmations: u32,
    pub created_at: u64,
}
