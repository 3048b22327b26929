use soroban_sdk::{contract, contractimpl, log, Address, Env, Vec};

use crate::candidates::{CandidateLedger, Nomination};
use crate::errors::WalletError;
use crate::executor::Executor;
use crate::registry::OwnerRegistry;
use crate::transfers::TransferLedger;
use crate::types::{Asset, DataKey, TransferRequest, INSTANCE_BUMP_THRESHOLD, INSTANCE_EXTEND_TO};

#[contract]
pub struct ThresholdWallet;

#[contractimpl]
impl ThresholdWallet {
    /// Sets up the owner set, the confirmation threshold and the token
    /// contract that holds the wallet's native balance.
    ///
    /// # Errors
    /// * `AlreadyInitialized` - if called twice
    /// * `InvalidConfiguration` - if `threshold` is 0, exceeds the number of
    ///   owners, or `owners` repeats an address
    pub fn initialize(
        env: Env,
        owners: Vec<Address>,
        threshold: u32,
        native_token: Address,
    ) -> Result<(), WalletError> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(WalletError::AlreadyInitialized);
        }

        OwnerRegistry::initialize(&env, &owners, threshold)?;
        env.storage().instance().set(&DataKey::NativeToken, &native_token);
        env.storage().instance().set(&DataKey::Initialized, &true);
        Self::bump(&env);

        log!(&env, "wallet initialized", owners.len(), threshold);
        Ok(())
    }

    /// Nominates `candidate` for admission. The nomination that brings the
    /// candidate's count to the threshold admits it in the same call.
    ///
    /// # Errors
    /// * `Unauthorized` - if `nominator` is not an owner
    /// * `AlreadyOwner` - if `candidate` already is one
    /// * `DuplicateNomination` - if `nominator` already backs this candidate
    pub fn nominate_add(
        env: Env,
        nominator: Address,
        candidate: Address,
    ) -> Result<(), WalletError> {
        Self::require_initialized(&env)?;
        nominator.require_auth();
        Self::bump(&env);

        CandidateLedger::nominate_add(&env, &nominator, &candidate)
    }

    /// Nominates owner `candidate` for removal.
    ///
    /// # Errors
    /// * `Unauthorized` - if `nominator` is not an owner
    /// * `NotOwner` - if `candidate` is not an owner
    /// * `InsufficientOwners` - if removing `candidate` would leave fewer
    ///   owners than the threshold
    /// * `DuplicateNomination` - if `nominator` already backs this removal
    pub fn nominate_remove(
        env: Env,
        nominator: Address,
        candidate: Address,
    ) -> Result<(), WalletError> {
        Self::require_initialized(&env)?;
        nominator.require_auth();
        Self::bump(&env);

        CandidateLedger::nominate_remove(&env, &nominator, &candidate)
    }

    /// Opens a transfer request, counting the proposer as its first
    /// confirmation, and returns its id.
    ///
    /// # Errors
    /// * `Unauthorized` - if `proposer` is not an owner
    /// * `InvalidAmount` - if `amount` is negative
    /// * `InsufficientBalance` - if the wallet holds less than `amount` of `asset`
    pub fn propose_transfer(
        env: Env,
        proposer: Address,
        destination: Address,
        amount: i128,
        asset: Asset,
    ) -> Result<u64, WalletError> {
        Self::require_initialized(&env)?;
        proposer.require_auth();
        Self::bump(&env);

        TransferLedger::propose(&env, &proposer, &destination, amount, asset)
    }

    /// Adds `confirmer`'s confirmation to request `id`, executing it when
    /// the threshold is reached.
    ///
    /// # Errors
    /// * `Unauthorized` - if `confirmer` is not an owner
    /// * `NotFound` - if no request `id` exists
    /// * `AlreadyExecuted` - if the request already executed
    /// * `DuplicateConfirmation` - if `confirmer` already confirmed it
    /// * `InsufficientBalance` - if this confirmation executes the request
    ///   and the wallet can no longer cover it
    pub fn confirm_transfer(env: Env, confirmer: Address, id: u64) -> Result<(), WalletError> {
        Self::require_initialized(&env)?;
        confirmer.require_auth();
        Self::bump(&env);

        TransferLedger::confirm(&env, &confirmer, id)
    }

    /// Deposits native value from anyone.
    pub fn receive(env: Env, from: Address, amount: i128) -> Result<(), WalletError> {
        Self::require_initialized(&env)?;
        from.require_auth();
        if amount < 0 {
            return Err(WalletError::InvalidAmount);
        }
        Self::bump(&env);

        Executor::deposit(&env, &from, amount)
    }

    pub fn is_owner(env: Env, identity: Address) -> Result<bool, WalletError> {
        Self::require_initialized(&env)?;
        Ok(OwnerRegistry::is_owner(&env, &identity))
    }

    pub fn owner_count(env: Env) -> Result<u32, WalletError> {
        OwnerRegistry::owner_count(&env)
    }

    pub fn threshold(env: Env) -> Result<u32, WalletError> {
        OwnerRegistry::threshold(&env)
    }

    pub fn owners(env: Env) -> Result<Vec<Address>, WalletError> {
        Self::require_initialized(&env)?;
        Ok(OwnerRegistry::owners(&env))
    }

    pub fn add_candidate_count(env: Env, candidate: Address) -> Result<u32, WalletError> {
        Self::require_initialized(&env)?;
        Ok(CandidateLedger::count(&env, Nomination::Add, &candidate))
    }

    pub fn remove_candidate_count(env: Env, candidate: Address) -> Result<u32, WalletError> {
        Self::require_initialized(&env)?;
        Ok(CandidateLedger::count(&env, Nomination::Remove, &candidate))
    }

    pub fn add_candidate_nominators(
        env: Env,
        candidate: Address,
    ) -> Result<Vec<Address>, WalletError> {
        Self::require_initialized(&env)?;
        Ok(CandidateLedger::nominator_list(&env, Nomination::Add, &candidate))
    }

    pub fn remove_candidate_nominators(
        env: Env,
        candidate: Address,
    ) -> Result<Vec<Address>, WalletError> {
        Self::require_initialized(&env)?;
        Ok(CandidateLedger::nominator_list(&env, Nomination::Remove, &candidate))
    }

    pub fn get_transfer(env: Env, id: u64) -> Result<TransferRequest, WalletError> {
        Self::require_initialized(&env)?;
        TransferLedger::get(&env, id)
    }

    pub fn transfer_confirmers(env: Env, id: u64) -> Result<Vec<Address>, WalletError> {
        Self::require_initialized(&env)?;
        TransferLedger::confirmer_list(&env, id)
    }

    pub fn has_confirmed(env: Env, id: u64, owner: Address) -> Result<bool, WalletError> {
        Self::require_initialized(&env)?;
        Ok(TransferLedger::has_confirmed(&env, id, &owner))
    }

    pub fn transfer_count(env: Env) -> Result<u64, WalletError> {
        Self::require_initialized(&env)?;
        Ok(TransferLedger::count(&env))
    }

    /// The wallet's holdings of `asset`.
    pub fn balance(env: Env, asset: Asset) -> Result<i128, WalletError> {
        Self::require_initialized(&env)?;
        Executor::balance(&env, &asset)
    }

    pub fn native_token(env: Env) -> Result<Address, WalletError> {
        Executor::token_address(&env, &Asset::Native)
    }

    fn require_initialized(env: &Env) -> Result<(), WalletError> {
        if !env.storage().instance().has(&DataKey::Initialized) {
            return Err(WalletError::NotInitialized);
        }
        Ok(())
    }

    fn bump(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_BUMP_THRESHOLD, INSTANCE_EXTEND_TO);
    }
}
