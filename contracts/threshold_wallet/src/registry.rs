use soroban_sdk::{Address, Env, Map, Vec};

use crate::errors::WalletError;
use crate::types::DataKey;

/// Owner set, owner count and confirmation threshold.
///
/// Everything lives in instance storage: the set is small and is read on
/// every entry point.
pub struct OwnerRegistry;

impl OwnerRegistry {
    /// Writes the initial owner set. Rejects an empty or duplicated set and
    /// any threshold outside `1..=owners.len()`.
    pub fn initialize(
        env: &Env,
        owners: &Vec<Address>,
        threshold: u32,
    ) -> Result<(), WalletError> {
        if threshold < 1 || threshold > owners.len() {
            return Err(WalletError::InvalidConfiguration);
        }

        let mut seen: Map<Address, bool> = Map::new(env);
        for owner in owners.iter() {
            if seen.contains_key(owner.clone()) {
                return Err(WalletError::InvalidConfiguration);
            }
            seen.set(owner, true);
        }

        let storage = env.storage().instance();
        for owner in owners.iter() {
            storage.set(&DataKey::Owner(owner), &true);
        }
        storage.set(&DataKey::OwnerList, owners);
        storage.set(&DataKey::OwnerCount, &owners.len());
        storage.set(&DataKey::Threshold, &threshold);
        Ok(())
    }

    pub fn is_owner(env: &Env, identity: &Address) -> bool {
        env.storage()
            .instance()
            .has(&DataKey::Owner(identity.clone()))
    }

    pub fn require_owner(env: &Env, identity: &Address) -> Result<(), WalletError> {
        if !Self::is_owner(env, identity) {
            return Err(WalletError::Unauthorized);
        }
        Ok(())
    }

    pub fn threshold(env: &Env) -> Result<u32, WalletError> {
        env.storage()
            .instance()
            .get(&DataKey::Threshold)
            .ok_or(WalletError::NotInitialized)
    }

    pub fn owner_count(env: &Env) -> Result<u32, WalletError> {
        env.storage()
            .instance()
            .get(&DataKey::OwnerCount)
            .ok_or(WalletError::NotInitialized)
    }

    pub fn owners(env: &Env) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&DataKey::OwnerList)
            .unwrap_or(Vec::new(env))
    }

    /// Adds `identity` to the set and returns the new owner count. The caller
    /// has already checked that `identity` is not an owner.
    pub fn admit(env: &Env, identity: &Address) -> Result<u32, WalletError> {
        let count = Self::owner_count(env)? + 1;
        let mut owners = Self::owners(env);
        owners.push_back(identity.clone());

        let storage = env.storage().instance();
        storage.set(&DataKey::Owner(identity.clone()), &true);
        storage.set(&DataKey::OwnerList, &owners);
        storage.set(&DataKey::OwnerCount, &count);
        Ok(count)
    }

    /// Removes `identity` from the set and returns the new owner count. The
    /// caller has already checked that the remaining owners still meet the
    /// threshold.
    pub fn evict(env: &Env, identity: &Address) -> Result<u32, WalletError> {
        let count = Self::owner_count(env)?;
        if count <= Self::threshold(env)? {
            return Err(WalletError::InsufficientOwners);
        }

        let mut owners = Self::owners(env);
        if let Some(index) = owners.iter().position(|owner| owner == *identity) {
            owners.remove(index as u32);
        }

        let storage = env.storage().instance();
        storage.remove(&DataKey::Owner(identity.clone()));
        storage.set(&DataKey::OwnerList, &owners);
        storage.set(&DataKey::OwnerCount, &(count - 1));
        Ok(count - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ThresholdWallet;
    use soroban_sdk::{testutils::Address as _, vec};

    #[test]
    fn rejects_duplicate_owners() {
        let env = Env::default();
        let contract_id = env.register(ThresholdWallet, ());
        let a = Address::generate(&env);
        let b = Address::generate(&env);

        let result = env.as_contract(&contract_id, || {
            OwnerRegistry::initialize(&env, &vec![&env, a.clone(), b.clone(), a.clone()], 2)
        });
        assert_eq!(result, Err(WalletError::InvalidConfiguration));
    }

    #[test]
    fn admit_and_evict_keep_list_and_count_in_step() {
        let env = Env::default();
        let contract_id = env.register(ThresholdWallet, ());
        let a = Address::generate(&env);
        let b = Address::generate(&env);
        let c = Address::generate(&env);

        env.as_contract(&contract_id, || {
            OwnerRegistry::initialize(&env, &vec![&env, a.clone(), b.clone()], 1).unwrap();

            assert_eq!(OwnerRegistry::admit(&env, &c), Ok(3));
            assert!(OwnerRegistry::is_owner(&env, &c));
            assert_eq!(OwnerRegistry::owners(&env), vec![&env, a.clone(), b.clone(), c.clone()]);

            assert_eq!(OwnerRegistry::evict(&env, &b), Ok(2));
            assert!(!OwnerRegistry::is_owner(&env, &b));
            assert_eq!(OwnerRegistry::owners(&env), vec![&env, a.clone(), c.clone()]);
            assert_eq!(OwnerRegistry::require_owner(&env, &b), Err(WalletError::Unauthorized));
        });
    }

    #[test]
    fn evict_refuses_to_break_threshold() {
        let env = Env::default();
        let contract_id = env.register(ThresholdWallet, ());
        let a = Address::generate(&env);
        let b = Address::generate(&env);

        env.as_contract(&contract_id, || {
            OwnerRegistry::initialize(&env, &vec![&env, a.clone(), b.clone()], 2).unwrap();
            assert_eq!(OwnerRegistry::evict(&env, &a), Err(WalletError::InsufficientOwners));
            assert_eq!(OwnerRegistry::owner_count(&env), Ok(2));
        });
    }
}
