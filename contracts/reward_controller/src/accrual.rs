//! Per-vault reward accumulators and the global allocation log.

use common::{mul_div, REWARD_PRECISION};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::epochs::{reward_for_blocks_range, EpochSchedule};
use crate::RewardError;

const VAULT_INFO: Symbol = symbol_short!("VLT_INFO");
const VAULT_SHARES: Symbol = symbol_short!("VLT_SHR");
const STAKER: Symbol = symbol_short!("STAKER");
const GLOBAL_UPDATE: Symbol = symbol_short!("GLB_UPD");
const GLOBAL_COUNT: Symbol = symbol_short!("GLB_CNT");

const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultRewardInfo {
    /// Accumulated reward per share, scaled by `REWARD_PRECISION`.
    pub reward_per_share: i128,
    /// Index of the global update in force at `last_reward_block`.
    pub last_process_update: u32,
    pub last_reward_block: u64,
    pub alloc_point: u64,
}

/// Total allocation in force from `block` until the next entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlobalAllocUpdate {
    pub block: u64,
    pub total_alloc_point: u64,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakerReward {
    pub shares: i128,
    pub reward_debt: i128,
    /// Settled on balance changes, paid on the next claim.
    pub unclaimed: i128,
}

// ── Storage ──────────────────────────────────────────────────────────────────

pub fn load_vault(env: &Env, vault_id: u64) -> Option<VaultRewardInfo> {
    env.storage().persistent().get(&(VAULT_INFO, vault_id))
}

pub fn store_vault(env: &Env, vault_id: u64, info: &VaultRewardInfo) {
    let key = (VAULT_INFO, vault_id);
    env.storage().persistent().set(&key, info);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn vault_total_shares(env: &Env, vault_id: u64) -> i128 {
    env.storage()
        .persistent()
        .get(&(VAULT_SHARES, vault_id))
        .unwrap_or(0)
}

pub fn set_vault_total_shares(env: &Env, vault_id: u64, total: i128) {
    let key = (VAULT_SHARES, vault_id);
    env.storage().persistent().set(&key, &total);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn load_staker(env: &Env, vault_id: u64, staker: &Address) -> StakerReward {
    env.storage()
        .persistent()
        .get(&(STAKER, vault_id, staker.clone()))
        .unwrap_or_default()
}

pub fn store_staker(env: &Env, vault_id: u64, staker: &Address, record: &StakerReward) {
    let key = (STAKER, vault_id, staker.clone());
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn global_update_count(env: &Env) -> u32 {
    env.storage().instance().get(&GLOBAL_COUNT).unwrap_or(0)
}

pub fn load_global_update(env: &Env, index: u32) -> Option<GlobalAllocUpdate> {
    env.storage().persistent().get(&(GLOBAL_UPDATE, index))
}

fn store_global_update(env: &Env, index: u32, update: &GlobalAllocUpdate) {
    let key = (GLOBAL_UPDATE, index);
    env.storage().persistent().set(&key, update);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Current total allocation, i.e. the latest log entry.
pub fn total_alloc_point(env: &Env) -> u64 {
    let count = global_update_count(env);
    if count == 0 {
        return 0;
    }
    load_global_update(env, count - 1)
        .map(|u| u.total_alloc_point)
        .unwrap_or(0)
}

/// Records a new total allocation at `block` and returns its log index.
///
/// Several changes inside one block collapse into a single entry, so the log
/// stays strictly increasing in block height.
pub fn record_total_alloc_point(env: &Env, block: u64, total_alloc_point: u64) -> u32 {
    let count = global_update_count(env);
    let update = GlobalAllocUpdate {
        block,
        total_alloc_point,
    };

    if count > 0 {
        if let Some(last) = load_global_update(env, count - 1) {
            if last.block == block {
                store_global_update(env, count - 1, &update);
                return count - 1;
            }
        }
    }

    store_global_update(env, count, &update);
    env.storage().instance().set(&GLOBAL_COUNT, &(count + 1));
    count
}

// ── Accrual ──────────────────────────────────────────────────────────────────

/// Returns `info` advanced to `current_block` without persisting it.
///
/// Walks the global log from the vault's last processed entry so every block
/// range is priced with the total allocation that was in force. With no
/// shares outstanding the accumulator is left untouched but the vault still
/// moves forward, so that stretch of emission is forfeited.
pub fn accrue(
    env: &Env,
    schedule: &EpochSchedule,
    info: &VaultRewardInfo,
    total_shares: i128,
    current_block: u64,
) -> Result<VaultRewardInfo, RewardError> {
    let mut next_info = info.clone();
    if current_block <= info.last_reward_block {
        return Ok(next_info);
    }

    let count = global_update_count(env);
    let mut index = info.last_process_update;
    let mut in_force = match load_global_update(env, index) {
        Some(update) => update,
        None => {
            next_info.last_reward_block = current_block;
            return Ok(next_info);
        }
    };

    let mut from = info.last_reward_block;
    let mut reward: i128 = 0;
    loop {
        let next = if index + 1 < count {
            load_global_update(env, index + 1)
        } else {
            None
        };
        let segment_end = match &next {
            Some(update) if update.block < current_block => update.block,
            _ => current_block,
        };

        if segment_end > from {
            let segment = reward_for_blocks_range(
                schedule,
                from,
                segment_end,
                info.alloc_point,
                in_force.total_alloc_point,
            )
            .ok_or(RewardError::MathOverflow)?;
            reward = reward
                .checked_add(segment)
                .ok_or(RewardError::MathOverflow)?;
            from = segment_end;
        }

        match next {
            Some(update) if update.block <= current_block => {
                index += 1;
                in_force = update;
            }
            _ => break,
        }
    }

    if total_shares > 0 && reward > 0 {
        let delta =
            mul_div(reward, REWARD_PRECISION, total_shares).ok_or(RewardError::MathOverflow)?;
        next_info.reward_per_share = next_info
            .reward_per_share
            .checked_add(delta)
            .ok_or(RewardError::MathOverflow)?;
    }
    next_info.last_reward_block = current_block;
    next_info.last_process_update = index;
    Ok(next_info)
}

/// Reward accrued by `shares` at `reward_per_share`, before debt.
pub fn accumulated(shares: i128, reward_per_share: i128) -> Result<i128, RewardError> {
    mul_div(shares, reward_per_share, REWARD_PRECISION).ok_or(RewardError::MathOverflow)
}

/// Everything `record` could claim at `reward_per_share`.
pub fn pending(record: &StakerReward, reward_per_share: i128) -> Result<i128, RewardError> {
    accumulated(record.shares, reward_per_share)?
        .checked_sub(record.reward_debt)
        .and_then(|p| p.checked_add(record.unclaimed))
        .ok_or(RewardError::MathOverflow)
}
