#![allow(deprecated)] // events().publish migration tracked separately

//! Structured event publishing for the vaults registry.

use common::Claim;
use soroban_sdk::{symbol_short, Address, BytesN, Env, String};

use crate::payout::ClaimPayout;
use crate::vesting::TokenLock;

pub fn publish_initialized(env: &Env, owner: &Address, reward_token: &Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        (owner.clone(), reward_token.clone()),
    );
}

pub fn publish_vault_created(env: &Env, vault_id: u64, asset: &Address, owner: &Address) {
    env.events().publish(
        (symbol_short!("VLT_NEW"), vault_id),
        (asset.clone(), owner.clone()),
    );
}

pub fn publish_visibility_set(env: &Env, vault_id: u64, visible: bool) {
    env.events()
        .publish((symbol_short!("VLT_VIS"), vault_id), visible);
}

pub fn publish_registry_param(env: &Env, name: &str, value: u64) {
    env.events().publish(
        (symbol_short!("REG_PARAM"), String::from_str(env, name)),
        value,
    );
}

pub fn publish_address_set(env: &Env, name: &str, value: &Address) {
    env.events().publish(
        (symbol_short!("REG_ADDR"), String::from_str(env, name)),
        value.clone(),
    );
}

pub fn publish_vault_param(env: &Env, vault_id: u64, name: &str, value: u64) {
    env.events().publish(
        (symbol_short!("VLT_PARAM"), vault_id, String::from_str(env, name)),
        value,
    );
}

pub fn publish_vault_address(env: &Env, vault_id: u64, name: &str, value: &Address) {
    env.events().publish(
        (symbol_short!("VLT_ADDR"), vault_id, String::from_str(env, name)),
        value.clone(),
    );
}

pub fn publish_description_set(env: &Env, vault_id: u64, description_hash: &String) {
    env.events()
        .publish((symbol_short!("DESC_SET"), vault_id), description_hash.clone());
}

pub fn publish_committee_checked_in(env: &Env, vault_id: u64, committee: &Address) {
    env.events()
        .publish((symbol_short!("CHK_IN"), vault_id), committee.clone());
}

pub fn publish_deposit(env: &Env, vault_id: u64, staker: &Address, amount: i128, shares: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), vault_id, staker.clone()),
        (amount, shares),
    );
}

pub fn publish_withdraw(env: &Env, vault_id: u64, staker: &Address, amount: i128, shares: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), vault_id, staker.clone()),
        (amount, shares),
    );
}

pub fn publish_claim_submitted(env: &Env, claim: &Claim) {
    env.events().publish(
        (symbol_short!("CLM_SUB"), claim.vault_id),
        (
            claim.id.clone(),
            claim.committee.clone(),
            claim.beneficiary.clone(),
            claim.bounty_percentage,
            claim.description_hash.clone(),
        ),
    );
}

pub fn publish_claim_challenged(env: &Env, vault_id: u64, claim_id: &BytesN<32>, by: &Address) {
    env.events().publish(
        (symbol_short!("CLM_CHAL"), vault_id),
        (claim_id.clone(), by.clone()),
    );
}

pub fn publish_claim_approved(
    env: &Env,
    vault_id: u64,
    claim_id: &BytesN<32>,
    bounty_percentage: u32,
    payout: &ClaimPayout,
) {
    env.events().publish(
        (symbol_short!("CLM_APPR"), vault_id),
        (claim_id.clone(), bounty_percentage, payout.clone()),
    );
}

pub fn publish_claim_dismissed(env: &Env, vault_id: u64, claim_id: &BytesN<32>) {
    env.events()
        .publish((symbol_short!("CLM_DISM"), vault_id), claim_id.clone());
}

pub fn publish_lock_created(env: &Env, lock: &TokenLock) {
    env.events().publish(
        (symbol_short!("LOCK_NEW"), lock.id),
        (lock.beneficiary.clone(), lock.token.clone(), lock.amount),
    );
}

pub fn publish_lock_released(env: &Env, lock_id: u64, beneficiary: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("LOCK_REL"), lock_id),
        (beneficiary.clone(), amount),
    );
}

pub fn publish_swap_and_send(
    env: &Env,
    token: &Address,
    beneficiary: &Address,
    token_lock: Option<u64>,
    amount_sent: i128,
) {
    env.events().publish(
        (symbol_short!("SWAP_SND"), token.clone()),
        (beneficiary.clone(), token_lock, amount_sent),
    );
}
