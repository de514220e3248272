#![no_std]

//! # Automated Fee Forwarder
//!
//! Keeper entry point that sweeps the registry's governance HAT pools. It
//! must hold the timelock's Proposer role and be the registry's fee
//! receiver: each sweep swaps a pool into the reward token through the
//! timelock, and the governance proceeds that land here are passed on to
//! the configured beneficiary.
//!
//! Only the keeper may sweep, and every priced swap carries the keeper's
//! minimum output.

mod events;

use common::interfaces::{TimelockClient, VaultsRegistryClient};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Bytes, Env, Symbol, Vec,
};

const TIMELOCK: Symbol = symbol_short!("TIMELOCK");
const REGISTRY: Symbol = symbol_short!("REGISTRY");
const ROUTER: Symbol = symbol_short!("ROUTER");
const BENEFICIARY: Symbol = symbol_short!("BENEF");
const KEEPER: Symbol = symbol_short!("KEEPER");
const INITIALIZED: Symbol = symbol_short!("INIT");

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ForwarderError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    MinimumOutRequired = 30,
    MathOverflow = 70,
}

/// One pool to sweep.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSwap {
    pub token: Address,
    /// Least reward token the router must return. Ignored for pools
    /// already held in the reward token.
    pub min_out: i128,
    pub payload: Bytes,
}

#[contract]
pub struct AutomatedFeeForwarderContract;

#[contractimpl]
impl AutomatedFeeForwarderContract {
    pub fn initialize(
        env: Env,
        timelock: Address,
        registry: Address,
        router: Address,
        beneficiary: Address,
        keeper: Address,
    ) -> Result<(), ForwarderError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ForwarderError::AlreadyInitialized);
        }
        env.storage().instance().set(&TIMELOCK, &timelock);
        env.storage().instance().set(&REGISTRY, &registry);
        env.storage().instance().set(&ROUTER, &router);
        env.storage().instance().set(&BENEFICIARY, &beneficiary);
        env.storage().instance().set(&KEEPER, &keeper);
        env.storage().instance().set(&INITIALIZED, &true);
        events::publish_initialized(&env, &registry, &beneficiary);
        Ok(())
    }

    /// Swap the governance pool of every listed token and forward the
    /// proceeds. Pools that are empty are skipped. Returns the total amount
    /// of reward token sent to the beneficiary.
    pub fn forward_fees(
        env: Env,
        keeper: Address,
        swaps: Vec<FeeSwap>,
    ) -> Result<i128, ForwarderError> {
        if keeper != Self::address(&env, &KEEPER)? {
            return Err(ForwarderError::Unauthorized);
        }
        keeper.require_auth();

        let timelock = Self::address(&env, &TIMELOCK)?;
        let registry = Self::address(&env, &REGISTRY)?;
        let router = Self::address(&env, &ROUTER)?;
        let beneficiary = Self::address(&env, &BENEFICIARY)?;

        let registry_client = VaultsRegistryClient::new(&env, &registry);
        let reward_token = registry_client.get_reward_token();
        let reward = token::Client::new(&env, &reward_token);
        let timelock_client = TimelockClient::new(&env, &timelock);
        let this = env.current_contract_address();

        let mut total: i128 = 0;
        for swap in swaps.iter() {
            if registry_client.get_governance_hat_reward(&swap.token) == 0 {
                continue;
            }
            if swap.min_out <= 0 && swap.token != reward_token {
                return Err(ForwarderError::MinimumOutRequired);
            }
            let before = reward.balance(&this);
            timelock_client.swap_and_send(
                &this,
                &registry,
                &swap.token,
                &Vec::new(&env),
                &swap.min_out,
                &router,
                &swap.payload,
            );
            let received = reward.balance(&this) - before;
            if received > 0 {
                reward.transfer(&this, &beneficiary, &received);
                total = total
                    .checked_add(received)
                    .ok_or(ForwarderError::MathOverflow)?;
            }
            events::publish_forwarded(&env, &swap.token, &beneficiary, received);
        }
        Ok(total)
    }

    pub fn get_beneficiary(env: Env) -> Result<Address, ForwarderError> {
        Self::address(&env, &BENEFICIARY)
    }

    pub fn get_keeper(env: Env) -> Result<Address, ForwarderError> {
        Self::address(&env, &KEEPER)
    }

    fn address(env: &Env, key: &Symbol) -> Result<Address, ForwarderError> {
        env.storage()
            .instance()
            .get(key)
            .ok_or(ForwarderError::NotInitialized)
    }
}
