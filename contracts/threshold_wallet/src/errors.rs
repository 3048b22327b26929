use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum WalletError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidConfiguration = 3,
    Unauthorized = 4,
    AlreadyOwner = 5,
    NotOwner = 6,
    DuplicateNomination = 7,
    InsufficientOwners = 8,
    InsufficientBalance = 9,
    NotFound = 10,
    AlreadyExecuted = 11,
    DuplicateConfirmation = 12,
    InvalidAmount = 13,
}
