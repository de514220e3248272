#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env, Symbol};

use crate::roles::Role;

pub fn publish_initialized(env: &Env, min_delay: u64) {
    env.events().publish((symbol_short!("INIT"),), min_delay);
}

pub fn publish_role_granted(env: &Env, role: &Role, account: &Address) {
    env.events().publish(
        (symbol_short!("ROLE_GRT"), role.clone()),
        account.clone(),
    );
}

pub fn publish_role_revoked(env: &Env, role: &Role, account: &Address) {
    env.events().publish(
        (symbol_short!("ROLE_REV"), role.clone()),
        account.clone(),
    );
}

pub fn publish_scheduled(
    env: &Env,
    id: &BytesN<32>,
    target: &Address,
    function: &Symbol,
    predecessor: &BytesN<32>,
    ready_at: u64,
) {
    env.events().publish(
        (symbol_short!("OP_SCHED"), id.clone()),
        (
            target.clone(),
            function.clone(),
            predecessor.clone(),
            ready_at,
        ),
    );
}

pub fn publish_executed(env: &Env, id: &BytesN<32>, target: &Address, function: &Symbol) {
    env.events().publish(
        (symbol_short!("OP_EXEC"), id.clone()),
        (target.clone(), function.clone()),
    );
}

pub fn publish_cancelled(env: &Env, id: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("OP_CANC"), id.clone()), ());
}

pub fn publish_instant(env: &Env, action: Symbol, caller: &Address, target: &Address) {
    env.events().publish(
        (symbol_short!("INSTANT"), action),
        (caller.clone(), target.clone()),
    );
}
