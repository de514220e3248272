//! Role membership for the timelock.
//!
//! Membership is a keyed flag per `(role, account)` for O(1) checks, with a
//! member list per role kept alongside for enumeration.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::events;

const ROLE: Symbol = symbol_short!("ROLE");
const MEMBERS: Symbol = symbol_short!("MEMBERS");

const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    /// Schedules and cancels delayed operations.
    Proposer,
    /// Executes delayed operations once ready.
    Executor,
    /// Calls the instant administrative passthroughs.
    Manager,
}

pub fn has_role(env: &Env, role: &Role, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&(ROLE, role.clone(), account.clone()))
        .unwrap_or(false)
}

pub fn members(env: &Env, role: &Role) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&(MEMBERS, role.clone()))
        .unwrap_or(Vec::new(env))
}

fn store_members(env: &Env, role: &Role, list: &Vec<Address>) {
    let key = (MEMBERS, role.clone());
    env.storage().persistent().set(&key, list);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Returns `false` when `account` already held the role.
pub fn grant(env: &Env, role: &Role, account: &Address) -> bool {
    if has_role(env, role, account) {
        return false;
    }
    let key = (ROLE, role.clone(), account.clone());
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let mut list = members(env, role);
    list.push_back(account.clone());
    store_members(env, role, &list);

    events::publish_role_granted(env, role, account);
    true
}

/// Returns `false` when `account` did not hold the role.
pub fn revoke(env: &Env, role: &Role, account: &Address) -> bool {
    if !has_role(env, role, account) {
        return false;
    }
    env.storage()
        .persistent()
        .remove(&(ROLE, role.clone(), account.clone()));

    let mut list = members(env, role);
    if let Some(index) = list.first_index_of(account) {
        list.remove(index);
    }
    store_members(env, role, &list);

    events::publish_role_revoked(env, role, account);
    true
}
