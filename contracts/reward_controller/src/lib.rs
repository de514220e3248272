#![no_std]

//! # Reward Controller
//!
//! Emits the reward token to vault stakers on a block-based epoch schedule.
//!
//! - Each vault receives `alloc_point / total_alloc_point` of the emission.
//!   Every change of the total is appended to a global log so past block
//!   ranges are always priced with the allocation in force at the time.
//! - Stakers earn in proportion to their vault shares through a
//!   reward-per-share accumulator and a per-staker reward debt.
//! - The registry commits every share change here *before* it applies it,
//!   so no staker earns on shares it did not hold.
//!
//! The controller keeps its own mirror of committed share balances and never
//! calls back into the registry.

pub mod accrual;
pub mod epochs;
pub mod events;

use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol, Vec};

use accrual::{GlobalAllocUpdate, StakerReward, VaultRewardInfo};
use epochs::EpochSchedule;

// ── Storage key constants ─────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const INITIALIZED: Symbol = symbol_short!("INIT");
const REGISTRY: Symbol = symbol_short!("REGISTRY");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const SCHEDULE: Symbol = symbol_short!("SCHEDULE");

// ── Error codes ───────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RewardError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    OnlyRegistry = 11,
    InvalidSchedule = 30,
    InvalidAmount = 31,
    ScheduleAlreadyStarted = 40,
    MathOverflow = 70,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardControllerContract;

#[contractimpl]
impl RewardControllerContract {
    /// Bootstrap the controller.
    ///
    /// * `registry`: the only address allowed to commit share changes.
    /// * `reward_token`: paid out from this contract's own balance, which
    ///   the token admin funds.
    /// * `epoch_reward_per_block`: one rate per epoch of `epoch_length`
    ///   blocks starting at `start_block`.
    pub fn initialize(
        env: Env,
        owner: Address,
        registry: Address,
        reward_token: Address,
        start_block: u64,
        epoch_length: u64,
        epoch_reward_per_block: Vec<i128>,
    ) -> Result<(), RewardError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(RewardError::AlreadyInitialized);
        }
        let schedule = EpochSchedule {
            start_block,
            epoch_length,
            reward_per_block: epoch_reward_per_block,
        };
        if !schedule.is_valid() {
            return Err(RewardError::InvalidSchedule);
        }

        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&REGISTRY, &registry);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&SCHEDULE, &schedule);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, &owner, &registry, &reward_token);
        Ok(())
    }

    // ── Administration ────────────────────────────────────────────────────────

    /// Set a vault's share of emission.
    ///
    /// The vault is settled at the old weight first. The first call for a
    /// vault starts its accrual at `max(current block, start_block)`.
    pub fn set_alloc_point(
        env: Env,
        caller: Address,
        vault_id: u64,
        alloc_point: u64,
    ) -> Result<(), RewardError> {
        Self::require_owner(&env, &caller)?;
        caller.require_auth();

        let schedule = Self::schedule(&env)?;
        let current = Self::current_block(&env);

        let mut info = match accrual::load_vault(&env, vault_id) {
            Some(info) => {
                let total_shares = accrual::vault_total_shares(&env, vault_id);
                accrual::accrue(&env, &schedule, &info, total_shares, current)?
            }
            None => VaultRewardInfo {
                reward_per_share: 0,
                last_process_update: 0,
                last_reward_block: current.max(schedule.start_block),
                alloc_point: 0,
            },
        };

        let total = accrual::total_alloc_point(&env)
            .checked_sub(info.alloc_point)
            .and_then(|t| t.checked_add(alloc_point))
            .ok_or(RewardError::MathOverflow)?;
        let index = accrual::record_total_alloc_point(&env, current, total);

        info.alloc_point = alloc_point;
        info.last_process_update = index;
        accrual::store_vault(&env, vault_id, &info);

        events::publish_alloc_point_set(&env, vault_id, alloc_point, total);
        Ok(())
    }

    /// Replace the per-epoch rates. Only possible before emission starts.
    pub fn set_epoch_reward_per_block(
        env: Env,
        caller: Address,
        epoch_reward_per_block: Vec<i128>,
    ) -> Result<(), RewardError> {
        Self::require_owner(&env, &caller)?;
        caller.require_auth();

        let mut schedule = Self::schedule(&env)?;
        if Self::current_block(&env) >= schedule.start_block {
            return Err(RewardError::ScheduleAlreadyStarted);
        }
        schedule.reward_per_block = epoch_reward_per_block;
        if !schedule.is_valid() {
            return Err(RewardError::InvalidSchedule);
        }
        env.storage().instance().set(&SCHEDULE, &schedule);

        events::publish_schedule_set(&env, &schedule.reward_per_block);
        Ok(())
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), RewardError> {
        Self::require_owner(&env, &caller)?;
        caller.require_auth();

        env.storage().instance().set(&OWNER, &new_owner);
        events::publish_owner_transferred(&env, &caller, &new_owner);
        Ok(())
    }

    // ── Accrual ───────────────────────────────────────────────────────────────

    /// Bring a vault's accumulator up to the current block. A vault without
    /// an allocation is left alone.
    pub fn update_vault(env: Env, vault_id: u64) -> Result<(), RewardError> {
        Self::require_initialized(&env)?;
        Self::settle_vault(&env, vault_id)?;
        Ok(())
    }

    /// Settle `staker` and apply a share change, as reported by the
    /// registry right before it mints or burns vault shares.
    pub fn commit_user_balance(
        env: Env,
        caller: Address,
        vault_id: u64,
        staker: Address,
        shares_change: i128,
        is_deposit: bool,
    ) -> Result<(), RewardError> {
        let registry = Self::registry(&env)?;
        if caller != registry {
            return Err(RewardError::OnlyRegistry);
        }
        caller.require_auth();
        if shares_change < 0 {
            return Err(RewardError::InvalidAmount);
        }

        let reward_per_share = Self::settle_vault(&env, vault_id)?;

        let mut record = accrual::load_staker(&env, vault_id, &staker);
        record.unclaimed = accrual::pending(&record, reward_per_share)?;

        let total = accrual::vault_total_shares(&env, vault_id);
        let (shares, total) = if is_deposit {
            (
                record.shares.checked_add(shares_change),
                total.checked_add(shares_change),
            )
        } else {
            // Shares minted before this controller was attached were never
            // mirrored; only the mirrored part is burned.
            let burned = shares_change.min(record.shares);
            (
                record.shares.checked_sub(burned),
                total.checked_sub(burned),
            )
        };
        record.shares = shares.ok_or(RewardError::MathOverflow)?;
        record.reward_debt = accrual::accumulated(record.shares, reward_per_share)?;

        accrual::store_staker(&env, vault_id, &staker, &record);
        accrual::set_vault_total_shares(&env, vault_id, total.ok_or(RewardError::MathOverflow)?);

        events::publish_balance_committed(&env, vault_id, &staker, shares_change, is_deposit);
        Ok(())
    }

    /// Pay `staker` everything accrued in `vault_id`. Returns the amount
    /// paid; nothing pending is not an error.
    pub fn claim_reward(env: Env, vault_id: u64, staker: Address) -> Result<i128, RewardError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let reward_per_share = Self::settle_vault(&env, vault_id)?;
        let mut record = accrual::load_staker(&env, vault_id, &staker);
        let amount = accrual::pending(&record, reward_per_share)?;
        if amount <= 0 {
            return Ok(0);
        }

        record.reward_debt = accrual::accumulated(record.shares, reward_per_share)?;
        record.unclaimed = 0;
        accrual::store_staker(&env, vault_id, &staker, &record);

        let reward_token: Address = env
            .storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(RewardError::NotInitialized)?;
        token::Client::new(&env, &reward_token).transfer(
            &env.current_contract_address(),
            &staker,
            &amount,
        );

        events::publish_reward_claimed(&env, vault_id, &staker, amount);
        Ok(amount)
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    /// Reward owed to a vault with `alloc_point` out of `total_alloc_point`
    /// over blocks `[from, to)`.
    pub fn get_reward_for_blocks_range(
        env: Env,
        from: u64,
        to: u64,
        alloc_point: u64,
        total_alloc_point: u64,
    ) -> Result<i128, RewardError> {
        let schedule = Self::schedule(&env)?;
        epochs::reward_for_blocks_range(&schedule, from, to, alloc_point, total_alloc_point)
            .ok_or(RewardError::MathOverflow)
    }

    /// What `claim_reward` would pay right now.
    pub fn get_pending_reward(
        env: Env,
        vault_id: u64,
        staker: Address,
    ) -> Result<i128, RewardError> {
        let schedule = Self::schedule(&env)?;
        let reward_per_share = match accrual::load_vault(&env, vault_id) {
            Some(info) => {
                let total_shares = accrual::vault_total_shares(&env, vault_id);
                accrual::accrue(
                    &env,
                    &schedule,
                    &info,
                    total_shares,
                    Self::current_block(&env),
                )?
                .reward_per_share
            }
            None => 0,
        };
        let record = accrual::load_staker(&env, vault_id, &staker);
        accrual::pending(&record, reward_per_share)
    }

    pub fn get_vault_info(env: Env, vault_id: u64) -> Option<VaultRewardInfo> {
        accrual::load_vault(&env, vault_id)
    }

    pub fn get_staker_reward(env: Env, vault_id: u64, staker: Address) -> StakerReward {
        accrual::load_staker(&env, vault_id, &staker)
    }

    pub fn get_total_shares(env: Env, vault_id: u64) -> i128 {
        accrual::vault_total_shares(&env, vault_id)
    }

    pub fn get_total_alloc_point(env: Env) -> u64 {
        accrual::total_alloc_point(&env)
    }

    pub fn get_global_update_count(env: Env) -> u32 {
        accrual::global_update_count(&env)
    }

    pub fn get_global_update(env: Env, index: u32) -> Option<GlobalAllocUpdate> {
        accrual::load_global_update(&env, index)
    }

    pub fn get_schedule(env: Env) -> Result<EpochSchedule, RewardError> {
        Self::schedule(&env)
    }

    pub fn get_owner(env: Env) -> Result<Address, RewardError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(RewardError::NotInitialized)
    }

    pub fn get_registry(env: Env) -> Result<Address, RewardError> {
        Self::registry(&env)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), RewardError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(RewardError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), RewardError> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(RewardError::NotInitialized)?;
        if *caller != owner {
            return Err(RewardError::Unauthorized);
        }
        Ok(())
    }

    fn registry(env: &Env) -> Result<Address, RewardError> {
        env.storage()
            .instance()
            .get(&REGISTRY)
            .ok_or(RewardError::NotInitialized)
    }

    fn schedule(env: &Env) -> Result<EpochSchedule, RewardError> {
        env.storage()
            .instance()
            .get(&SCHEDULE)
            .ok_or(RewardError::NotInitialized)
    }

    fn current_block(env: &Env) -> u64 {
        env.ledger().sequence() as u64
    }

    /// Accrue and persist; returns the vault's reward per share (zero for a
    /// vault that has never been allocated).
    fn settle_vault(env: &Env, vault_id: u64) -> Result<i128, RewardError> {
        let info = match accrual::load_vault(env, vault_id) {
            Some(info) => info,
            None => return Ok(0),
        };
        let schedule = Self::schedule(env)?;
        let total_shares = accrual::vault_total_shares(env, vault_id);
        let updated = accrual::accrue(
            env,
            &schedule,
            &info,
            total_shares,
            Self::current_block(env),
        )?;
        if updated != info {
            accrual::store_vault(env, vault_id, &updated);
        }
        Ok(updated.reward_per_share)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
