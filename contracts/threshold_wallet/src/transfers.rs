use soroban_sdk::{Address, Env, Map, Vec};

use crate::errors::WalletError;
use crate::events;
use crate::executor::Executor;
use crate::registry::OwnerRegistry;
use crate::types::{Asset, DataKey, TransferRequest, RECORD_BUMP_THRESHOLD, RECORD_EXTEND_TO};

/// Sequentially numbered transfer requests and their confirmer sets.
pub struct TransferLedger;

impl TransferLedger {
    /// Opens a request with the proposer as its first confirmer and returns
    /// its id. With a threshold of one the request executes in this call,
    /// after the `created` event.
    pub fn propose(
        env: &Env,
        proposer: &Address,
        destination: &Address,
        amount: i128,
        asset: Asset,
    ) -> Result<u64, WalletError> {
        OwnerRegistry::require_owner(env, proposer)?;
        if amount < 0 {
            return Err(WalletError::InvalidAmount);
        }
        if Executor::balance(env, &asset)? < amount {
            return Err(WalletError::InsufficientBalance);
        }

        let id = Self::count(env) + 1;
        env.storage().instance().set(&DataKey::TransferCount, &id);

        let now = env.ledger().timestamp();
        let mut request = TransferRequest {
            id,
            proposer: proposer.clone(),
            destination: destination.clone(),
            amount,
            asset,
            executed: false,
            confirmations: 1,
            created_at: now,
        };

        let mut confirmers: Map<Address, u64> = Map::new(env);
        confirmers.set(proposer.clone(), now);

        Self::save(env, &request);
        Self::save_confirmers(env, id, &confirmers);
        events::publish_created(env, proposer, id);

        if Executor::threshold_reached(env, request.confirmations)? {
            Self::execute(env, &mut request, proposer)?;
        }
        Ok(id)
    }

    pub fn confirm(env: &Env, confirmer: &Address, id: u64) -> Result<(), WalletError> {
        OwnerRegistry::require_owner(env, confirmer)?;
        let mut request = Self::get(env, id)?;
        if request.executed {
            return Err(WalletError::AlreadyExecuted);
        }

        let mut confirmers = Self::confirmers(env, id);
        if confirmers.contains_key(confirmer.clone()) {
            return Err(WalletError::DuplicateConfirmation);
        }
        confirmers.set(confirmer.clone(), env.ledger().timestamp());
        request.confirmations += 1;

        Self::save(env, &request);
        Self::save_confirmers(env, id, &confirmers);
        events::publish_confirmed(env, confirmer, id);

        if Executor::threshold_reached(env, request.confirmations)? {
            Self::execute(env, &mut request, confirmer)?;
        }
        Ok(())
    }

    pub fn get(env: &Env, id: u64) -> Result<TransferRequest, WalletError> {
        env.storage()
            .persistent()
            .get(&DataKey::Transfer(id))
            .ok_or(WalletError::NotFound)
    }

    pub fn confirmers(env: &Env, id: u64) -> Map<Address, u64> {
        env.storage()
            .persistent()
            .get(&DataKey::TransferConfirmers(id))
            .unwrap_or(Map::new(env))
    }

    pub fn confirmer_list(env: &Env, id: u64) -> Result<Vec<Address>, WalletError> {
        Self::get(env, id)?;
        Ok(Self::confirmers(env, id).keys())
    }

    pub fn has_confirmed(env: &Env, id: u64, owner: &Address) -> bool {
        Self::confirmers(env, id).contains_key(owner.clone())
    }

    /// Id of the most recent request, 0 before the first one.
    pub fn count(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::TransferCount)
            .unwrap_or(0u64)
    }

    // Terminal: the flag is stored before the asset moves.
    fn execute(
        env: &Env,
        request: &mut TransferRequest,
        trigger: &Address,
    ) -> Result<(), WalletError> {
        request.executed = true;
        Self::save(env, request);
        Executor::transfer(env, request, trigger)
    }

    fn save(env: &Env, request: &TransferRequest) {
        let key = DataKey::Transfer(request.id);
        env.storage().persistent().set(&key, request);
        env.storage()
            .persistent()
            .extend_ttl(&key, RECORD_BUMP_THRESHOLD, RECORD_EXTEND_TO);
    }

    fn save_confirmers(env: &Env, id: u64, confirmers: &Map<Address, u64>) {
        let key = DataKey::TransferConfirmers(id);
        env.storage().persistent().set(&key, confirmers);
        env.storage()
            .persistent()
            .extend_ttl(&key, RECORD_BUMP_THRESHOLD, RECORD_EXTEND_TO);
    }
}
