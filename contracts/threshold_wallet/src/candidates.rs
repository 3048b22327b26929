use soroban_sdk::{Address, Env, Map, Vec};

use crate::errors::WalletError;
use crate::events;
use crate::executor::Executor;
use crate::registry::OwnerRegistry;
use crate::types::{DataKey, RECORD_BUMP_THRESHOLD, RECORD_EXTEND_TO};

/// Which sub-ledger a nomination belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Nomination {
    Add,
    Remove,
}

impl Nomination {
    fn key(self, candidate: &Address) -> DataKey {
        match self {
            Nomination::Add => DataKey::AddCandidate(candidate.clone()),
            Nomination::Remove => DataKey::RemoveCandidate(candidate.clone()),
        }
    }
}

/// Open add/remove nominations, one record per candidate.
///
/// A record maps each nominating owner to the ledger timestamp of their
/// nomination. It exists only while the nomination is open: the call that
/// brings it to the threshold deletes it before the owner set changes.
pub struct CandidateLedger;

impl CandidateLedger {
    pub fn nominate_add(
        env: &Env,
        nominator: &Address,
        candidate: &Address,
    ) -> Result<(), WalletError> {
        OwnerRegistry::require_owner(env, nominator)?;
        if OwnerRegistry::is_owner(env, candidate) {
            return Err(WalletError::AlreadyOwner);
        }

        let count = Self::record(env, Nomination::Add, candidate, nominator)?;
        events::publish_nominated_add(env, nominator, candidate);

        if Executor::threshold_reached(env, count)? {
            Self::clear(env, Nomination::Add, candidate);
            Executor::admit(env, candidate)?;
        }
        Ok(())
    }

    pub fn nominate_remove(
        env: &Env,
        nominator: &Address,
        candidate: &Address,
    ) -> Result<(), WalletError> {
        OwnerRegistry::require_owner(env, nominator)?;
        if !OwnerRegistry::is_owner(env, candidate) {
            return Err(WalletError::NotOwner);
        }
        // Checked on every nomination, not only the one that would execute.
        if OwnerRegistry::owner_count(env)? - 1 < OwnerRegistry::threshold(env)? {
            return Err(WalletError::InsufficientOwners);
        }

        let count = Self::record(env, Nomination::Remove, candidate, nominator)?;
        events::publish_nominated_remove(env, nominator, candidate);

        if Executor::threshold_reached(env, count)? {
            Self::clear(env, Nomination::Remove, candidate);
            Executor::evict(env, candidate)?;
        }
        Ok(())
    }

    pub fn nominators(env: &Env, kind: Nomination, candidate: &Address) -> Map<Address, u64> {
        env.storage()
            .persistent()
            .get(&kind.key(candidate))
            .unwrap_or(Map::new(env))
    }

    /// Number of distinct owners behind the open nomination, 0 if none is open.
    pub fn count(env: &Env, kind: Nomination, candidate: &Address) -> u32 {
        Self::nominators(env, kind, candidate).len()
    }

    pub fn nominator_list(env: &Env, kind: Nomination, candidate: &Address) -> Vec<Address> {
        Self::nominators(env, kind, candidate).keys()
    }

    fn record(
        env: &Env,
        kind: Nomination,
        candidate: &Address,
        nominator: &Address,
    ) -> Result<u32, WalletError> {
        let mut nominators = Self::nominators(env, kind, candidate);
        if nominators.contains_key(nominator.clone()) {
            return Err(WalletError::DuplicateNomination);
        }
        nominators.set(nominator.clone(), env.ledger().timestamp());

        let key = kind.key(candidate);
        env.storage().persistent().set(&key, &nominators);
        env.storage()
            .persistent()
            .extend_ttl(&key, RECORD_BUMP_THRESHOLD, RECORD_EXTEND_TO);
        Ok(nominators.len())
    }

    fn clear(env: &Env, kind: Nomination, candidate: &Address) {
        env.storage().persistent().remove(&kind.key(candidate));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ThresholdWallet;
    use soroban_sdk::{testutils::Address as _, vec};

    #[test]
    fn add_and_remove_records_are_independent() {
        let env = Env::default();
        let contract_id = env.register(ThresholdWallet, ());
        let a = Address::generate(&env);
        let b = Address::generate(&env);
        let c = Address::generate(&env);
        let outsider = Address::generate(&env);

        env.as_contract(&contract_id, || {
            let owners = vec![&env, a.clone(), b.clone(), c.clone()];
            OwnerRegistry::initialize(&env, &owners, 2).unwrap();

            CandidateLedger::nominate_add(&env, &a, &outsider).unwrap();
            CandidateLedger::nominate_remove(&env, &a, &c).unwrap();

            assert_eq!(CandidateLedger::count(&env, Nomination::Add, &outsider), 1);
            assert_eq!(CandidateLedger::count(&env, Nomination::Remove, &outsider), 0);
            assert_eq!(CandidateLedger::count(&env, Nomination::Remove, &c), 1);
            assert_eq!(CandidateLedger::count(&env, Nomination::Add, &c), 0);
            assert_eq!(
                CandidateLedger::nominator_list(&env, Nomination::Add, &outsider),
                vec![&env, a.clone()]
            );
        });
    }

    #[test]
    fn repeat_nomination_leaves_record_unchanged() {
        let env = Env::default();
        let contract_id = env.register(ThresholdWallet, ());
        let a = Address::generate(&env);
        let b = Address::generate(&env);
        let outsider = Address::generate(&env);

        env.as_contract(&contract_id, || {
            OwnerRegistry::initialize(&env, &vec![&env, a.clone(), b.clone()], 2).unwrap();

            CandidateLedger::nominate_add(&env, &a, &outsider).unwrap();
            assert_eq!(
                CandidateLedger::nominate_add(&env, &a, &outsider),
                Err(WalletError::DuplicateNomination)
            );
            assert_eq!(CandidateLedger::count(&env, Nomination::Add, &outsider), 1);
        });
    }
}
