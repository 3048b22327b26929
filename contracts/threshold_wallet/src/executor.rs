use soroban_sdk::{log, token, Address, Env};

use crate::errors::WalletError;
use crate::events;
use crate::registry::OwnerRegistry;
use crate::types::{Asset, DataKey, TransferRequest};

/// Applies an action once its confirmations reach the threshold. Nothing
/// else changes the owner set after initialization or moves wallet assets.
pub struct Executor;

impl Executor {
    pub fn threshold_reached(env: &Env, confirmations: u32) -> Result<bool, WalletError> {
        Ok(confirmations >= OwnerRegistry::threshold(env)?)
    }

    pub fn admit(env: &Env, candidate: &Address) -> Result<(), WalletError> {
        let count = OwnerRegistry::admit(env, candidate)?;
        events::publish_admitted(env, candidate);
        log!(env, "owner admitted", candidate.clone(), count);
        Ok(())
    }

    pub fn evict(env: &Env, candidate: &Address) -> Result<(), WalletError> {
        let count = OwnerRegistry::evict(env, candidate)?;
        events::publish_removed(env, candidate);
        log!(env, "owner evicted", candidate.clone(), count);
        Ok(())
    }

    /// Token contract that backs `asset`.
    pub fn token_address(env: &Env, asset: &Asset) -> Result<Address, WalletError> {
        match asset {
            Asset::Native => env
                .storage()
                .instance()
                .get(&DataKey::NativeToken)
                .ok_or(WalletError::NotInitialized),
            Asset::Token(address) => Ok(address.clone()),
        }
    }

    pub fn balance(env: &Env, asset: &Asset) -> Result<i128, WalletError> {
        let token = Self::token_address(env, asset)?;
        Ok(token::Client::new(env, &token).balance(&env.current_contract_address()))
    }

    /// Pulls `amount` of native value from `from` into the wallet.
    pub fn deposit(env: &Env, from: &Address, amount: i128) -> Result<(), WalletError> {
        let token = Self::token_address(env, &Asset::Native)?;
        token::Client::new(env, &token).transfer(from, &env.current_contract_address(), &amount);
        events::publish_received(env, from, amount);
        Ok(())
    }

    /// Moves the requested amount from the wallet to the destination.
    ///
    /// The request must already be persisted as executed. A shortfall fails
    /// the whole invocation, so the host discards the confirmation that led
    /// here together with the executed flag.
    pub fn transfer(
        env: &Env,
        request: &TransferRequest,
        trigger: &Address,
    ) -> Result<(), WalletError> {
        let token = Self::token_address(env, &request.asset)?;
        let client = token::Client::new(env, &token);
        let wallet = env.current_contract_address();

        if client.balance(&wallet) < request.amount {
            return Err(WalletError::InsufficientBalance);
        }
        client.transfer(&wallet, &request.destination, &request.amount);

        events::publish_executed(env, trigger, request.id);
        log!(env, "transfer executed", request.id, request.amount);
        Ok(())
    }
}
