//! HAT reward pools and their conversion into the reward token.

use common::{interfaces::SwapRouterClient, mul_div, SentReward};
use soroban_sdk::{symbol_short, token, Address, Bytes, Env, Symbol, Vec};

use crate::vault::{TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::vesting::{self, VestingTerms};
use crate::{events, RegistryError};

const GOVERNANCE_POOL: Symbol = symbol_short!("GOV_HAT");
const HACKER_POOL: Symbol = symbol_short!("HKR_HAT");

pub fn governance_pool(env: &Env, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(GOVERNANCE_POOL, token.clone()))
        .unwrap_or(0)
}

pub fn hacker_pool(env: &Env, token: &Address, beneficiary: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(HACKER_POOL, token.clone(), beneficiary.clone()))
        .unwrap_or(0)
}

fn set_governance_pool(env: &Env, token: &Address, amount: i128) {
    let key = (GOVERNANCE_POOL, token.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn set_hacker_pool(env: &Env, token: &Address, beneficiary: &Address, amount: i128) {
    let key = (HACKER_POOL, token.clone(), beneficiary.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Adds the HAT cuts of an approved claim to the pools of `token`.
pub fn credit(
    env: &Env,
    token: &Address,
    beneficiary: &Address,
    governance: i128,
    hacker_vested: i128,
) -> Result<(), RegistryError> {
    if governance > 0 {
        let total = governance_pool(env, token)
            .checked_add(governance)
            .ok_or(RegistryError::MathOverflow)?;
        set_governance_pool(env, token, total);
    }
    if hacker_vested > 0 {
        let total = hacker_pool(env, token, beneficiary)
            .checked_add(hacker_vested)
            .ok_or(RegistryError::MathOverflow)?;
        set_hacker_pool(env, token, beneficiary, total);
    }
    Ok(())
}

/// Parameters of one swap-and-send run that come from registry state.
pub struct SwapContext {
    pub reward_token: Address,
    pub fee_receiver: Address,
    pub hat_vesting: VestingTerms,
}

/// Drains the governance pool and the listed hackers' pools of `token`,
/// converts the sum into the reward token through `router`, vests each
/// hacker's pro-rata share and sends the rest to the fee receiver.
///
/// Pools are zeroed before the router is called. The router must consume
/// exactly the amount handed to it and return at least `min_out`.
pub fn swap_and_send(
    env: &Env,
    ctx: &SwapContext,
    token: &Address,
    beneficiaries: &Vec<Address>,
    min_out: i128,
    router: &Address,
    payload: &Bytes,
) -> Result<Vec<SentReward>, RegistryError> {
    let this = env.current_contract_address();

    let governance_amount = governance_pool(env, token);
    let mut total = governance_amount;
    let mut hacker_amounts: Vec<i128> = Vec::new(env);
    for beneficiary in beneficiaries.iter() {
        let amount = hacker_pool(env, token, &beneficiary);
        if amount > 0 {
            set_hacker_pool(env, token, &beneficiary, 0);
        }
        hacker_amounts.push_back(amount);
        total = total
            .checked_add(amount)
            .ok_or(RegistryError::MathOverflow)?;
    }
    if total == 0 {
        return Err(RegistryError::AmountToSwapIsZero);
    }
    if governance_amount > 0 {
        set_governance_pool(env, token, 0);
    }

    let reward_client = token::Client::new(env, &ctx.reward_token);
    let received = if *token == ctx.reward_token {
        total
    } else {
        let token_client = token::Client::new(env, token);
        let token_before = token_client.balance(&this);
        let reward_before = reward_client.balance(&this);

        token_client.transfer(&this, router, &total);
        SwapRouterClient::new(env, router).exact_input(
            &this,
            token,
            &ctx.reward_token,
            &total,
            &min_out,
            payload,
        );

        if token_client.balance(&this) != token_before - total {
            return Err(RegistryError::WrongAmountSwapped);
        }
        let received = reward_client.balance(&this) - reward_before;
        if received < min_out {
            return Err(RegistryError::AmountSwappedLessThanMinimum);
        }
        received
    };

    let mut sent = Vec::new(env);
    let mut distributed: i128 = 0;
    for (i, beneficiary) in beneficiaries.iter().enumerate() {
        let share = hacker_amounts.get(i as u32).unwrap_or(0);
        let amount = mul_div(received, share, total).ok_or(RegistryError::MathOverflow)?;
        let token_lock = if amount > 0 {
            Some(vesting::create_lock(
                env,
                &ctx.reward_token,
                &beneficiary,
                amount,
                &ctx.hat_vesting,
            ))
        } else {
            None
        };
        distributed += amount;
        events::publish_swap_and_send(env, token, &beneficiary, token_lock, amount);
        sent.push_back(SentReward {
            beneficiary,
            token_lock,
            amount_sent: amount,
        });
    }

    let governance_share = received - distributed;
    if governance_share > 0 {
        reward_client.transfer(&this, &ctx.fee_receiver, &governance_share);
    }
    events::publish_swap_and_send(env, token, &ctx.fee_receiver, None, governance_share);
    sent.push_back(SentReward {
        beneficiary: ctx.fee_receiver.clone(),
        token_lock: None,
        amount_sent: governance_share,
    });

    Ok(sent)
}
