#![allow(deprecated)]

use soroban_sdk::{symbol_short, Address, Env};

// Every observable state transition publishes exactly one event.

pub fn publish_nominated_add(env: &Env, nominator: &Address, candidate: &Address) {
    env.events().publish(
        (symbol_short!("nominated"), symbol_short!("add")),
        (nominator.clone(), candidate.clone()),
    );
}

pub fn publish_nominated_remove(env: &Env, nominator: &Address, candidate: &Address) {
    env.events().publish(
        (symbol_short!("nominated"), symbol_short!("remove")),
        (nominator.clone(), candidate.clone()),
    );
}

pub fn publish_admitted(env: &Env, candidate: &Address) {
    env.events().publish((symbol_short!("admitted"),), candidate.clone());
}

pub fn publish_removed(env: &Env, candidate: &Address) {
    env.events().publish((symbol_short!("removed"),), candidate.clone());
}

pub fn publish_created(env: &Env, proposer: &Address, id: u64) {
    env.events().publish((symbol_short!("created"), proposer.clone()), id);
}

pub fn publish_confirmed(env: &Env, confirmer: &Address, id: u64) {
    env.events().publish((symbol_short!("confirmed"), confirmer.clone()), id);
}

/// `trigger` is the owner whose confirmation crossed the threshold.
pub fn publish_executed(env: &Env, trigger: &Address, id: u64) {
    env.events().publish((symbol_short!("executed"), trigger.clone()), id);
}

pub fn publish_received(env: &Env, from: &Address, amount: i128) {
    env.events().publish((symbol_short!("received"), from.clone()), amount);
}
