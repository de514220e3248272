#![no_std]

//! # Arbitrator
//!
//! Resolves challenged claims on behalf of its owner (normally the
//! timelock). Every resolution is forwarded to the vaults registry, which
//! only accepts them from this contract once a claim is challenged.

mod events;

use common::{interfaces::VaultsRegistryClient, ClaimState};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, BytesN, Env, Symbol};

const OWNER: Symbol = symbol_short!("OWNER");
const REGISTRY: Symbol = symbol_short!("REGISTRY");
const INITIALIZED: Symbol = symbol_short!("INIT");

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ArbitratorError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    NoActiveClaim = 21,
    ClaimIdMismatch = 22,
    OnlyCallableIfChallenged = 45,
}

#[contract]
pub struct ArbitratorContract;

#[contractimpl]
impl ArbitratorContract {
    pub fn initialize(env: Env, owner: Address, registry: Address) -> Result<(), ArbitratorError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ArbitratorError::AlreadyInitialized);
        }
        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&REGISTRY, &registry);
        env.storage().instance().set(&INITIALIZED, &true);
        events::publish_initialized(&env, &owner, &registry);
        Ok(())
    }

    /// Escalate a submitted claim. The registry enforces the deadline.
    pub fn challenge_claim(
        env: Env,
        caller: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
    ) -> Result<(), ArbitratorError> {
        let registry = Self::require_owner(&env, &caller)?;
        VaultsRegistryClient::new(&env, &registry).challenge_claim(
            &env.current_contract_address(),
            &vault_id,
            &claim_id,
        );
        events::publish_forwarded(&env, symbol_short!("CHALLENGE"), vault_id, &claim_id);
        Ok(())
    }

    /// Approve a challenged claim, optionally at a different percentage.
    pub fn approve_claim(
        env: Env,
        caller: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
        bounty_percentage: Option<u32>,
    ) -> Result<(), ArbitratorError> {
        let registry = Self::require_owner(&env, &caller)?;
        Self::require_challenged(&env, &registry, vault_id, &claim_id)?;
        VaultsRegistryClient::new(&env, &registry).approve_claim(
            &env.current_contract_address(),
            &vault_id,
            &claim_id,
            &bounty_percentage,
        );
        events::publish_forwarded(&env, symbol_short!("APPROVE"), vault_id, &claim_id);
        Ok(())
    }

    pub fn dismiss_claim(
        env: Env,
        caller: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
    ) -> Result<(), ArbitratorError> {
        let registry = Self::require_owner(&env, &caller)?;
        Self::require_challenged(&env, &registry, vault_id, &claim_id)?;
        VaultsRegistryClient::new(&env, &registry).dismiss_claim(
            &env.current_contract_address(),
            &vault_id,
            &claim_id,
        );
        events::publish_forwarded(&env, symbol_short!("DISMISS"), vault_id, &claim_id);
        Ok(())
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ArbitratorError> {
        Self::require_owner(&env, &caller)?;
        env.storage().instance().set(&OWNER, &new_owner);
        events::publish_owner_transferred(&env, &caller, &new_owner);
        Ok(())
    }

    pub fn get_owner(env: Env) -> Result<Address, ArbitratorError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(ArbitratorError::NotInitialized)
    }

    pub fn get_registry(env: Env) -> Result<Address, ArbitratorError> {
        env.storage()
            .instance()
            .get(&REGISTRY)
            .ok_or(ArbitratorError::NotInitialized)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Returns the registry address.
    fn require_owner(env: &Env, caller: &Address) -> Result<Address, ArbitratorError> {
        let owner = Self::get_owner(env.clone())?;
        if *caller != owner {
            return Err(ArbitratorError::Unauthorized);
        }
        caller.require_auth();
        Self::get_registry(env.clone())
    }

    fn require_challenged(
        env: &Env,
        registry: &Address,
        vault_id: u64,
        claim_id: &BytesN<32>,
    ) -> Result<(), ArbitratorError> {
        match VaultsRegistryClient::new(env, registry).get_claim_state(&vault_id) {
            ClaimState::Open => Err(ArbitratorError::NoActiveClaim),
            ClaimState::Submitted(_) => Err(ArbitratorError::OnlyCallableIfChallenged),
            ClaimState::Challenged(claim) if claim.id != *claim_id => {
                Err(ArbitratorError::ClaimIdMismatch)
            }
            ClaimState::Challenged(_) => Ok(()),
        }
    }
}
