//! Typed clients for cross-contract calls.
//!
//! Each contract consumes the others only through these interfaces, so no
//! contract crate links another contract's exported symbols. Return types are
//! the success values; a rejected call aborts the calling invocation.

use soroban_sdk::{Address, Bytes, BytesN, Env, String, Vec};

use crate::types::{ClaimState, HatBountySplit, SentReward};

#[soroban_sdk::contractclient(name = "VaultsRegistryClient")]
pub trait VaultsRegistryInterface {
    fn get_claim_state(env: Env, vault_id: u64) -> ClaimState;
    fn get_reward_token(env: Env) -> Address;
    fn get_governance_hat_reward(env: Env, token: Address) -> i128;

    fn challenge_claim(env: Env, caller: Address, vault_id: u64, claim_id: BytesN<32>);
    fn approve_claim(
        env: Env,
        caller: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
        bounty_percentage: Option<u32>,
    );
    fn dismiss_claim(env: Env, caller: Address, vault_id: u64, claim_id: BytesN<32>);

    fn set_vault_visibility(env: Env, caller: Address, vault_id: u64, visible: bool);
    fn set_vault_description(env: Env, caller: Address, vault_id: u64, description_hash: String);
    fn set_committee(env: Env, caller: Address, vault_id: u64, committee: Address);
    fn set_deposit_pause(env: Env, caller: Address, vault_id: u64, paused: bool);
    fn set_emergency_paused(env: Env, caller: Address, paused: bool);
    fn set_hat_bounty_split(
        env: Env,
        caller: Address,
        vault_id: u64,
        split: Option<HatBountySplit>,
    );
    fn add_reward_controller(env: Env, caller: Address, vault_id: u64, controller: Address);
    fn swap_and_send(
        env: Env,
        caller: Address,
        token: Address,
        beneficiaries: Vec<Address>,
        min_out: i128,
        router: Address,
        payload: Bytes,
    ) -> Vec<SentReward>;
}

#[soroban_sdk::contractclient(name = "RewardControllerClient")]
pub trait RewardControllerInterface {
    fn commit_user_balance(
        env: Env,
        caller: Address,
        vault_id: u64,
        staker: Address,
        shares_change: i128,
        is_deposit: bool,
    );
    fn set_alloc_point(env: Env, caller: Address, vault_id: u64, alloc_point: u64);
}

#[soroban_sdk::contractclient(name = "ArbitratorClient")]
pub trait ArbitratorInterface {
    fn challenge_claim(env: Env, caller: Address, vault_id: u64, claim_id: BytesN<32>);
    fn approve_claim(
        env: Env,
        caller: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
        bounty_percentage: Option<u32>,
    );
    fn dismiss_claim(env: Env, caller: Address, vault_id: u64, claim_id: BytesN<32>);
}

#[soroban_sdk::contractclient(name = "TimelockClient")]
pub trait TimelockInterface {
    fn swap_and_send(
        env: Env,
        caller: Address,
        registry: Address,
        token: Address,
        beneficiaries: Vec<Address>,
        min_out: i128,
        router: Address,
        payload: Bytes,
    ) -> Vec<SentReward>;
}

/// External swap venue. The caller transfers `amount_in` of `token_in` to the
/// router before calling; the router pays at least `min_amount_out` of
/// `token_out` to `recipient` and returns the amount paid.
#[soroban_sdk::contractclient(name = "SwapRouterClient")]
pub trait SwapRouterInterface {
    fn exact_input(
        env: Env,
        recipient: Address,
        token_in: Address,
        token_out: Address,
        amount_in: i128,
        min_amount_out: i128,
        payload: Bytes,
    ) -> i128;
}
