#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Vec};

pub fn publish_initialized(env: &Env, owner: &Address, registry: &Address, reward_token: &Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        (owner.clone(), registry.clone(), reward_token.clone()),
    );
}

pub fn publish_alloc_point_set(env: &Env, vault_id: u64, alloc_point: u64, total: u64) {
    env.events()
        .publish((symbol_short!("ALLOC"), vault_id), (alloc_point, total));
}

pub fn publish_balance_committed(
    env: &Env,
    vault_id: u64,
    staker: &Address,
    shares_change: i128,
    is_deposit: bool,
) {
    env.events().publish(
        (symbol_short!("COMMIT"), vault_id, staker.clone()),
        (shares_change, is_deposit),
    );
}

pub fn publish_reward_claimed(env: &Env, vault_id: u64, staker: &Address, amount: i128) {
    env.events()
        .publish((symbol_short!("RWD_CLM"), vault_id, staker.clone()), amount);
}

pub fn publish_schedule_set(env: &Env, reward_per_block: &Vec<i128>) {
    env.events()
        .publish((symbol_short!("SCHED"),), reward_per_block.clone());
}

pub fn publish_owner_transferred(env: &Env, previous: &Address, new_owner: &Address) {
    env.events().publish(
        (symbol_short!("OWNER"),),
        (previous.clone(), new_owner.clone()),
    );
}
