#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_initialized(env: &Env, registry: &Address, beneficiary: &Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        (registry.clone(), beneficiary.clone()),
    );
}

pub fn publish_forwarded(env: &Env, token: &Address, beneficiary: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FEE_FWD"), token.clone()),
        (beneficiary.clone(), amount),
    );
}
