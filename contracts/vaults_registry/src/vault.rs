//! Vault records, configuration checks and share accounting.

use common::{mul_div, BountySplit, HatBountySplit, HUNDRED_PERCENT};
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

use crate::vesting::VestingTerms;
use crate::RegistryError;

const VAULT: Symbol = symbol_short!("VAULT");
const VAULT_CTR: Symbol = symbol_short!("VLT_CTR");
const VISIBLE: Symbol = symbol_short!("VISIBLE");
const SHARES: Symbol = symbol_short!("SHARES");

pub(crate) const TTL_THRESHOLD: u32 = 1_036_800;
pub(crate) const TTL_EXTEND_TO: u32 = 2_073_600;

/// Arguments of `create_vault`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub asset: Address,
    pub owner: Address,
    pub committee: Address,
    pub name: String,
    pub symbol: String,
    pub reward_controllers: Vec<Address>,
    pub max_bounty: u32,
    pub bounty_split: BountySplit,
    pub description_hash: String,
    pub vesting_duration: u64,
    pub vesting_periods: u32,
    /// Initial deposit-pause flag.
    pub is_paused: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vault {
    pub id: u64,
    pub asset: Address,
    pub owner: Address,
    pub committee: Address,
    pub committee_checked_in: bool,
    pub name: String,
    pub symbol: String,
    pub reward_controllers: Vec<Address>,
    pub max_bounty: u32,
    pub bounty_split: BountySplit,
    /// Overrides the registry default when set.
    pub hat_bounty_split: Option<HatBountySplit>,
    pub description_hash: String,
    pub vesting_duration: u64,
    pub vesting_periods: u32,
    pub deposit_paused: bool,
    pub total_shares: i128,
    pub total_assets: i128,
    pub claim_nonce: u64,
}

impl Vault {
    pub fn from_config(id: u64, config: VaultConfig) -> Self {
        Vault {
            id,
            asset: config.asset,
            owner: config.owner,
            committee: config.committee,
            committee_checked_in: false,
            name: config.name,
            symbol: config.symbol,
            reward_controllers: config.reward_controllers,
            max_bounty: config.max_bounty,
            bounty_split: config.bounty_split,
            hat_bounty_split: None,
            description_hash: config.description_hash,
            vesting_duration: config.vesting_duration,
            vesting_periods: config.vesting_periods,
            deposit_paused: config.is_paused,
            total_shares: 0,
            total_assets: 0,
            claim_nonce: 0,
        }
    }

    pub fn vesting_terms(&self) -> VestingTerms {
        VestingTerms {
            duration: self.vesting_duration,
            periods: self.vesting_periods,
        }
    }

    /// Shares minted for a deposit of `amount`.
    ///
    /// A full payout leaves shares outstanding with no assets behind them.
    /// The next deposit is then priced against a single virtual asset unit,
    /// so the drained shares end up owning less than one unit of it.
    pub fn shares_for_deposit(&self, amount: i128) -> Result<i128, RegistryError> {
        if self.total_shares == 0 {
            return Ok(amount);
        }
        if self.total_assets == 0 {
            return self
                .total_shares
                .checked_add(1)
                .and_then(|base| amount.checked_mul(base))
                .ok_or(RegistryError::MathOverflow);
        }
        mul_div(amount, self.total_shares, self.total_assets).ok_or(RegistryError::MathOverflow)
    }

    /// Assets paid out for redeeming `shares`.
    pub fn assets_for_shares(&self, shares: i128) -> Result<i128, RegistryError> {
        if self.total_shares == 0 {
            return Ok(0);
        }
        mul_div(shares, self.total_assets, self.total_shares).ok_or(RegistryError::MathOverflow)
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

pub fn validate_bounty(max_bounty: u32, split: &BountySplit) -> Result<(), RegistryError> {
    if max_bounty > HUNDRED_PERCENT {
        return Err(RegistryError::MaxBountyTooHigh);
    }
    if !split.is_valid() {
        return Err(RegistryError::InvalidBountySplit);
    }
    Ok(())
}

pub fn validate_config(config: &VaultConfig) -> Result<(), RegistryError> {
    validate_bounty(config.max_bounty, &config.bounty_split)?;
    VestingTerms {
        duration: config.vesting_duration,
        periods: config.vesting_periods,
    }
    .validate()?;

    let controllers = &config.reward_controllers;
    for (i, controller) in controllers.iter().enumerate() {
        if controllers.first_index_of(&controller) != Some(i as u32) {
            return Err(RegistryError::DuplicateRewardController);
        }
    }
    Ok(())
}

// ── Storage ──────────────────────────────────────────────────────────────────

pub fn next_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .instance()
        .get(&VAULT_CTR)
        .unwrap_or(0u64)
        .saturating_add(1);
    env.storage().instance().set(&VAULT_CTR, &id);
    id
}

pub fn count(env: &Env) -> u64 {
    env.storage().instance().get(&VAULT_CTR).unwrap_or(0)
}

pub fn load(env: &Env, vault_id: u64) -> Result<Vault, RegistryError> {
    let key = (VAULT, vault_id);
    let vault: Vault = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(RegistryError::VaultNotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(vault)
}

pub fn store(env: &Env, vault: &Vault) {
    let key = (VAULT, vault.id);
    env.storage().persistent().set(&key, vault);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn is_visible(env: &Env, vault_id: u64) -> bool {
    env.storage()
        .persistent()
        .get(&(VISIBLE, vault_id))
        .unwrap_or(false)
}

pub fn set_visible(env: &Env, vault_id: u64, visible: bool) {
    let key = (VISIBLE, vault_id);
    env.storage().persistent().set(&key, &visible);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn shares_of(env: &Env, vault_id: u64, staker: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(SHARES, vault_id, staker.clone()))
        .unwrap_or(0)
}

pub fn set_shares(env: &Env, vault_id: u64, staker: &Address, shares: i128) {
    let key = (SHARES, vault_id, staker.clone());
    if shares == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, &shares);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
