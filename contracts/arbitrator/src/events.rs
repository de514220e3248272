#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env, Symbol};

pub fn publish_initialized(env: &Env, owner: &Address, registry: &Address) {
    env.events()
        .publish((symbol_short!("INIT"),), (owner.clone(), registry.clone()));
}

/// A resolution call passed on to the registry.
pub fn publish_forwarded(env: &Env, action: Symbol, vault_id: u64, claim_id: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("ARB"), action, vault_id), claim_id.clone());
}

pub fn publish_owner_transferred(env: &Env, previous: &Address, new_owner: &Address) {
    env.events().publish(
        (symbol_short!("OWNER"),),
        (previous.clone(), new_owner.clone()),
    );
}
