//! Token locks holding vested payouts until they unlock period by period.

use soroban_sdk::{contracttype, symbol_short, token, Address, Env, Symbol};

use crate::events;
use crate::vault::{TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::RegistryError;

const LOCK: Symbol = symbol_short!("LOCK");
const LOCK_CTR: Symbol = symbol_short!("LOCK_CTR");

/// Longest vesting a vault or the registry may configure (120 days).
pub const MAX_VESTING_DURATION: u64 = 120 * 24 * 60 * 60;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingTerms {
    pub duration: u64,
    pub periods: u32,
}

impl VestingTerms {
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.periods == 0
            || self.duration < self.periods as u64
            || self.duration > MAX_VESTING_DURATION
        {
            return Err(RegistryError::InvalidVestingConfig);
        }
        Ok(())
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenLock {
    pub id: u64,
    pub token: Address,
    pub beneficiary: Address,
    pub amount: i128,
    pub released: i128,
    pub start: u64,
    pub duration: u64,
    pub periods: u32,
}

impl TokenLock {
    /// Amount unlocked at `now`; grows in `periods` equal steps.
    pub fn vested_amount(&self, now: u64) -> i128 {
        if now <= self.start {
            return 0;
        }
        let elapsed = now - self.start;
        if elapsed >= self.duration {
            return self.amount;
        }
        let period_length = self.duration / self.periods as u64;
        let elapsed_periods = (elapsed / period_length) as i128;
        common::mul_div(self.amount, elapsed_periods, self.periods as i128).unwrap_or(0)
    }
}

pub fn load(env: &Env, lock_id: u64) -> Result<TokenLock, RegistryError> {
    env.storage()
        .persistent()
        .get(&(LOCK, lock_id))
        .ok_or(RegistryError::LockNotFound)
}

fn store(env: &Env, lock: &TokenLock) {
    let key = (LOCK, lock.id);
    env.storage().persistent().set(&key, lock);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Locks `amount` of `token`, already held by the registry, for
/// `beneficiary` starting now.
pub fn create_lock(
    env: &Env,
    token: &Address,
    beneficiary: &Address,
    amount: i128,
    terms: &VestingTerms,
) -> u64 {
    let id: u64 = env
        .storage()
        .instance()
        .get(&LOCK_CTR)
        .unwrap_or(0u64)
        .saturating_add(1);
    env.storage().instance().set(&LOCK_CTR, &id);

    let lock = TokenLock {
        id,
        token: token.clone(),
        beneficiary: beneficiary.clone(),
        amount,
        released: 0,
        start: env.ledger().timestamp(),
        duration: terms.duration,
        periods: terms.periods,
    };
    store(env, &lock);
    events::publish_lock_created(env, &lock);
    id
}

/// Pays out whatever has unlocked since the last release.
pub fn release(env: &Env, beneficiary: &Address, lock_id: u64) -> Result<i128, RegistryError> {
    let mut lock = load(env, lock_id)?;
    if *beneficiary != lock.beneficiary {
        return Err(RegistryError::Unauthorized);
    }

    let releasable = lock.vested_amount(env.ledger().timestamp()) - lock.released;
    if releasable <= 0 {
        return Ok(0);
    }
    lock.released += releasable;
    store(env, &lock);

    token::Client::new(env, &lock.token).transfer(
        &env.current_contract_address(),
        beneficiary,
        &releasable,
    );
    events::publish_lock_released(env, lock_id, beneficiary, releasable);
    Ok(releasable)
}
