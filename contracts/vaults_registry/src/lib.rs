#![no_std]

//! # Vaults Registry
//!
//! Custody and incident-response engine for bug-bounty vaults.
//!
//! - **Vaults**: one per bounty program, created here and identified by a
//!   sequential id. Stakers deposit the vault asset for shares; all custody
//!   sits with this contract.
//! - **Claims**: a checked-in committee submits a claim during the recurring
//!   safety period. The vault owner approves or dismisses it, unless the
//!   arbitrator (or registry owner) challenged it first, in which case only
//!   the arbitrator resolves it.
//! - **Payouts**: approved bounties leave the vault's assets and are split
//!   between the beneficiary (immediate and vested), the committee and the
//!   HAT reward pools.
//! - **Swaps**: the registry owner converts HAT pools into the reward token
//!   and vests or forwards the proceeds.
//!
//! Every share change is committed to the vault's reward controllers before
//! it is applied, and token transfers always come last.

pub mod claim;
pub mod events;
pub mod payout;
pub mod safety;
pub mod swap;
pub mod vault;
pub mod vesting;

use common::{
    interfaces::RewardControllerClient, pausable, Claim, ClaimState, HatBountySplit, SentReward,
};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Bytes, BytesN, Env,
    String, Symbol, Vec,
};

use claim::ClaimOutcome;
use safety::SafetyConfig;
use swap::SwapContext;
use vault::{Vault, VaultConfig};
use vesting::{TokenLock, VestingTerms};

// ── Storage key constants ─────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const ARBITRATOR: Symbol = symbol_short!("ARBITER");
const FEE_RECEIVER: Symbol = symbol_short!("FEE_RCV");
const SAFETY: Symbol = symbol_short!("SAFETY");
const CHALLENGE_PERIOD: Symbol = symbol_short!("CHAL_PER");
const HAT_SPLIT: Symbol = symbol_short!("HAT_SPLT");
const HAT_VESTING: Symbol = symbol_short!("HAT_VEST");

/// Default claim cycle: 12 hours, of which the last hour is the safety period.
pub const DEFAULT_CYCLE_LENGTH: u64 = 43_200;
pub const DEFAULT_SAFETY_PERIOD: u64 = 3_600;
/// Default challenge period (3 days).
pub const DEFAULT_CHALLENGE_PERIOD: u64 = 259_200;
/// Default vesting for swapped hacker rewards (30 days, daily steps).
pub const DEFAULT_HAT_VESTING_DURATION: u64 = 2_592_000;
pub const DEFAULT_HAT_VESTING_PERIODS: u32 = 30;

// ── Error codes ───────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RegistryError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    // ── Authorisation ────────────────────────────────────────
    Unauthorized = 10,
    OnlyCommittee = 11,
    OnlyArbitratorOrRegistryOwner = 12,
    // ── Not found ────────────────────────────────────────────
    VaultNotFound = 20,
    NoActiveClaim = 21,
    ClaimIdMismatch = 22,
    LockNotFound = 23,
    // ── Invariants ───────────────────────────────────────────
    InvalidBountySplit = 30,
    MaxBountyTooHigh = 31,
    BountyPercentageTooHigh = 32,
    InvalidHatBountySplit = 33,
    InvalidVestingConfig = 34,
    InvalidAmount = 35,
    InvalidSafetyConfig = 36,
    InvalidChallengePeriod = 37,
    DuplicateRewardController = 38,
    InsufficientShares = 39,
    // ── State ────────────────────────────────────────────────
    SystemInEmergencyPause = 40,
    DepositsPaused = 41,
    CommitteeNotCheckedIn = 42,
    CommitteeAlreadyCheckedIn = 43,
    ActiveClaimExists = 44,
    OnlyCallableIfChallenged = 45,
    ClaimAlreadyChallenged = 46,
    BountyOverrideNotAllowed = 47,
    AmountToSwapIsZero = 50,
    WrongAmountSwapped = 51,
    AmountSwappedLessThanMinimum = 52,
    // ── Time windows ─────────────────────────────────────────
    NotInSafetyPeriod = 60,
    InSafetyPeriod = 61,
    ChallengePeriodEnded = 62,
    MathOverflow = 70,
}

// ── Public configuration types ────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistryConfig {
    pub owner: Address,
    pub reward_token: Address,
    pub arbitrator: Address,
    pub default_hat_bounty_split: HatBountySplit,
    pub hat_vesting: VestingTerms,
    pub safety: SafetyConfig,
    pub default_challenge_period: u64,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct VaultsRegistryContract;

#[contractimpl]
impl VaultsRegistryContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Bootstrap the registry. The owner doubles as the initial fee
    /// receiver.
    pub fn initialize(env: Env, config: RegistryConfig) -> Result<(), RegistryError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(RegistryError::AlreadyInitialized);
        }
        if !config.default_hat_bounty_split.is_valid() {
            return Err(RegistryError::InvalidHatBountySplit);
        }
        config.hat_vesting.validate()?;
        if !config.safety.is_valid() {
            return Err(RegistryError::InvalidSafetyConfig);
        }
        if config.default_challenge_period == 0 {
            return Err(RegistryError::InvalidChallengePeriod);
        }

        env.storage().instance().set(&OWNER, &config.owner);
        env.storage().instance().set(&REWARD_TOKEN, &config.reward_token);
        env.storage().instance().set(&ARBITRATOR, &config.arbitrator);
        env.storage().instance().set(&FEE_RECEIVER, &config.owner);
        env.storage().instance().set(&HAT_SPLIT, &config.default_hat_bounty_split);
        env.storage().instance().set(&HAT_VESTING, &config.hat_vesting);
        env.storage().instance().set(&SAFETY, &config.safety);
        env.storage().instance().set(&CHALLENGE_PERIOD, &config.default_challenge_period);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, &config.owner, &config.reward_token);
        Ok(())
    }

    // ── Registry administration ───────────────────────────────────────────────

    /// Register a new vault. Anyone may create one; it starts hidden until
    /// the registry owner lists it.
    pub fn create_vault(env: Env, config: VaultConfig) -> Result<u64, RegistryError> {
        Self::require_initialized(&env)?;
        vault::validate_config(&config)?;

        let id = vault::next_id(&env);
        let record = Vault::from_config(id, config);
        vault::store(&env, &record);
        vault::set_visible(&env, id, false);

        events::publish_vault_created(&env, id, &record.asset, &record.owner);
        Ok(id)
    }

    pub fn set_vault_visibility(
        env: Env,
        caller: Address,
        vault_id: u64,
        visible: bool,
    ) -> Result<(), RegistryError> {
        Self::require_owner(&env, &caller)?;
        vault::load(&env, vault_id)?;
        vault::set_visible(&env, vault_id, visible);
        events::publish_visibility_set(&env, vault_id, visible);
        Ok(())
    }

    pub fn set_default_challenge_period(
        env: Env,
        caller: Address,
        period: u64,
    ) -> Result<(), RegistryError> {
        Self::require_owner(&env, &caller)?;
        if period == 0 {
            return Err(RegistryError::InvalidChallengePeriod);
        }
        env.storage().instance().set(&CHALLENGE_PERIOD, &period);
        events::publish_registry_param(&env, "challenge_period", period);
        Ok(())
    }

    /// While paused, deposits, withdrawals and claim submissions reject in
    /// every vault.
    pub fn set_emergency_paused(
        env: Env,
        caller: Address,
        paused: bool,
    ) -> Result<(), RegistryError> {
        Self::require_owner(&env, &caller)?;
        pausable::set_paused_by(&env, &caller, paused);
        Ok(())
    }

    pub fn set_safety_period(
        env: Env,
        caller: Address,
        cycle_length: u64,
        safety_period: u64,
    ) -> Result<(), RegistryError> {
        Self::require_owner(&env, &caller)?;
        let config = SafetyConfig {
            cycle_length,
            safety_period,
        };
        if !config.is_valid() {
            return Err(RegistryError::InvalidSafetyConfig);
        }
        env.storage().instance().set(&SAFETY, &config);
        events::publish_registry_param(&env, "cycle_length", cycle_length);
        events::publish_registry_param(&env, "safety_period", safety_period);
        Ok(())
    }

    pub fn set_default_hat_bounty_split(
        env: Env,
        caller: Address,
        split: HatBountySplit,
    ) -> Result<(), RegistryError> {
        Self::require_owner(&env, &caller)?;
        if !split.is_valid() {
            return Err(RegistryError::InvalidHatBountySplit);
        }
        env.storage().instance().set(&HAT_SPLIT, &split);
        events::publish_registry_param(&env, "hat_governance", split.governance as u64);
        events::publish_registry_param(&env, "hat_hacker_vested", split.hacker_vested as u64);
        Ok(())
    }

    pub fn set_hat_vesting(
        env: Env,
        caller: Address,
        duration: u64,
        periods: u32,
    ) -> Result<(), RegistryError> {
        Self::require_owner(&env, &caller)?;
        let terms = VestingTerms { duration, periods };
        terms.validate()?;
        env.storage().instance().set(&HAT_VESTING, &terms);
        events::publish_registry_param(&env, "hat_vesting_duration", duration);
        Ok(())
    }

    pub fn set_arbitrator(
        env: Env,
        caller: Address,
        arbitrator: Address,
    ) -> Result<(), RegistryError> {
        Self::require_owner(&env, &caller)?;
        env.storage().instance().set(&ARBITRATOR, &arbitrator);
        events::publish_address_set(&env, "arbitrator", &arbitrator);
        Ok(())
    }

    /// Recipient of the governance share of `swap_and_send`.
    pub fn set_fee_receiver(
        env: Env,
        caller: Address,
        receiver: Address,
    ) -> Result<(), RegistryError> {
        Self::require_owner(&env, &caller)?;
        env.storage().instance().set(&FEE_RECEIVER, &receiver);
        events::publish_address_set(&env, "fee_receiver", &receiver);
        Ok(())
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), RegistryError> {
        Self::require_owner(&env, &caller)?;
        env.storage().instance().set(&OWNER, &new_owner);
        events::publish_address_set(&env, "owner", &new_owner);
        Ok(())
    }

    /// Convert the HAT pools of `token` into the reward token.
    ///
    /// Each listed beneficiary's pool is vested to them pro rata to the swap
    /// proceeds; the governance pool's share goes to the fee receiver. The
    /// returned records (one per beneficiary, then governance) add up to the
    /// router output.
    pub fn swap_and_send(
        env: Env,
        caller: Address,
        token: Address,
        beneficiaries: Vec<Address>,
        min_out: i128,
        router: Address,
        payload: Bytes,
    ) -> Result<Vec<SentReward>, RegistryError> {
        Self::require_owner(&env, &caller)?;
        let ctx = SwapContext {
            reward_token: Self::reward_token(&env)?,
            fee_receiver: Self::instance_address(&env, &FEE_RECEIVER)?,
            hat_vesting: env
                .storage()
                .instance()
                .get(&HAT_VESTING)
                .ok_or(RegistryError::NotInitialized)?,
        };
        swap::swap_and_send(
            &env,
            &ctx,
            &token,
            &beneficiaries,
            min_out,
            &router,
            &payload,
        )
    }

    /// Release whatever has vested in a token lock.
    pub fn release_token_lock(
        env: Env,
        beneficiary: Address,
        lock_id: u64,
    ) -> Result<i128, RegistryError> {
        beneficiary.require_auth();
        vesting::release(&env, &beneficiary, lock_id)
    }

    // ── Committee ─────────────────────────────────────────────────────────────

    pub fn committee_check_in(
        env: Env,
        caller: Address,
        vault_id: u64,
    ) -> Result<(), RegistryError> {
        let mut record = vault::load(&env, vault_id)?;
        if caller != record.committee {
            return Err(RegistryError::OnlyCommittee);
        }
        caller.require_auth();
        if record.committee_checked_in {
            return Err(RegistryError::CommitteeAlreadyCheckedIn);
        }

        record.committee_checked_in = true;
        vault::store(&env, &record);
        events::publish_committee_checked_in(&env, vault_id, &caller);
        Ok(())
    }

    /// Before check-in the vault owner appoints the committee; afterwards
    /// only the sitting committee can hand over.
    pub fn set_committee(
        env: Env,
        caller: Address,
        vault_id: u64,
        committee: Address,
    ) -> Result<(), RegistryError> {
        let mut record = vault::load(&env, vault_id)?;
        if record.committee_checked_in {
            if caller != record.committee {
                if caller == record.owner {
                    return Err(RegistryError::CommitteeAlreadyCheckedIn);
                }
                return Err(RegistryError::OnlyCommittee);
            }
        } else if caller != record.owner {
            return Err(RegistryError::Unauthorized);
        }
        caller.require_auth();

        record.committee = committee.clone();
        vault::store(&env, &record);
        events::publish_vault_address(&env, vault_id, "committee", &committee);
        Ok(())
    }

    // ── Vault administration ──────────────────────────────────────────────────

    /// Per-vault HAT split; `None` falls back to the registry default.
    pub fn set_hat_bounty_split(
        env: Env,
        caller: Address,
        vault_id: u64,
        split: Option<HatBountySplit>,
    ) -> Result<(), RegistryError> {
        let mut record = Self::vault_for_owner(&env, &caller, vault_id)?;
        Self::require_no_active_claim(&env, vault_id)?;
        if let Some(split) = &split {
            if !split.is_valid() {
                return Err(RegistryError::InvalidHatBountySplit);
            }
        }
        record.hat_bounty_split = split;
        vault::store(&env, &record);
        events::publish_vault_param(&env, vault_id, "hat_split", 0);
        Ok(())
    }

    pub fn set_vault_description(
        env: Env,
        caller: Address,
        vault_id: u64,
        description_hash: String,
    ) -> Result<(), RegistryError> {
        let mut record = Self::vault_for_owner(&env, &caller, vault_id)?;
        record.description_hash = description_hash.clone();
        vault::store(&env, &record);
        events::publish_description_set(&env, vault_id, &description_hash);
        Ok(())
    }

    /// Adding a controller does not backfill balances: it only counts shares
    /// minted after it was attached.
    pub fn add_reward_controller(
        env: Env,
        caller: Address,
        vault_id: u64,
        controller: Address,
    ) -> Result<(), RegistryError> {
        let mut record = Self::vault_for_owner(&env, &caller, vault_id)?;
        if record.reward_controllers.contains(&controller) {
            return Err(RegistryError::DuplicateRewardController);
        }
        record.reward_controllers.push_back(controller.clone());
        vault::store(&env, &record);
        events::publish_vault_address(&env, vault_id, "reward_controller", &controller);
        Ok(())
    }

    pub fn set_deposit_pause(
        env: Env,
        caller: Address,
        vault_id: u64,
        paused: bool,
    ) -> Result<(), RegistryError> {
        let mut record = Self::vault_for_owner(&env, &caller, vault_id)?;
        record.deposit_paused = paused;
        vault::store(&env, &record);
        events::publish_vault_param(&env, vault_id, "deposit_paused", paused as u64);
        Ok(())
    }

    pub fn set_max_bounty(
        env: Env,
        caller: Address,
        vault_id: u64,
        max_bounty: u32,
    ) -> Result<(), RegistryError> {
        let mut record = Self::vault_for_owner(&env, &caller, vault_id)?;
        Self::require_no_active_claim(&env, vault_id)?;
        vault::validate_bounty(max_bounty, &record.bounty_split)?;
        record.max_bounty = max_bounty;
        vault::store(&env, &record);
        events::publish_vault_param(&env, vault_id, "max_bounty", max_bounty as u64);
        Ok(())
    }

    pub fn set_bounty_split(
        env: Env,
        caller: Address,
        vault_id: u64,
        split: common::BountySplit,
    ) -> Result<(), RegistryError> {
        let mut record = Self::vault_for_owner(&env, &caller, vault_id)?;
        Self::require_no_active_claim(&env, vault_id)?;
        vault::validate_bounty(record.max_bounty, &split)?;
        record.bounty_split = split;
        vault::store(&env, &record);
        events::publish_vault_param(&env, vault_id, "bounty_split", 0);
        Ok(())
    }

    pub fn set_vesting_params(
        env: Env,
        caller: Address,
        vault_id: u64,
        duration: u64,
        periods: u32,
    ) -> Result<(), RegistryError> {
        let mut record = Self::vault_for_owner(&env, &caller, vault_id)?;
        VestingTerms { duration, periods }.validate()?;
        record.vesting_duration = duration;
        record.vesting_periods = periods;
        vault::store(&env, &record);
        events::publish_vault_param(&env, vault_id, "vesting_duration", duration);
        Ok(())
    }

    pub fn transfer_vault_ownership(
        env: Env,
        caller: Address,
        vault_id: u64,
        new_owner: Address,
    ) -> Result<(), RegistryError> {
        let mut record = Self::vault_for_owner(&env, &caller, vault_id)?;
        record.owner = new_owner.clone();
        vault::store(&env, &record);
        events::publish_vault_address(&env, vault_id, "owner", &new_owner);
        Ok(())
    }

    // ── Deposits ──────────────────────────────────────────────────────────────

    /// Deposit `amount` of the vault asset; returns the shares minted.
    pub fn deposit(
        env: Env,
        staker: Address,
        vault_id: u64,
        amount: i128,
    ) -> Result<i128, RegistryError> {
        staker.require_auth();
        if amount <= 0 {
            return Err(RegistryError::InvalidAmount);
        }
        let mut record = vault::load(&env, vault_id)?;
        Self::require_transfers_enabled(&env, &record)?;

        let shares = record.shares_for_deposit(amount)?;
        if shares <= 0 {
            return Err(RegistryError::InvalidAmount);
        }
        Self::commit_to_controllers(&env, &record, &staker, shares, true);

        let balance = vault::shares_of(&env, vault_id, &staker);
        vault::set_shares(&env, vault_id, &staker, balance + shares);
        record.total_shares = record
            .total_shares
            .checked_add(shares)
            .ok_or(RegistryError::MathOverflow)?;
        record.total_assets = record
            .total_assets
            .checked_add(amount)
            .ok_or(RegistryError::MathOverflow)?;
        vault::store(&env, &record);

        token::Client::new(&env, &record.asset).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );
        events::publish_deposit(&env, vault_id, &staker, amount, shares);
        Ok(shares)
    }

    /// Redeem `shares` for their part of the vault's assets. Not possible
    /// during the safety period, when a claim may be about to land.
    pub fn withdraw(
        env: Env,
        staker: Address,
        vault_id: u64,
        shares: i128,
    ) -> Result<i128, RegistryError> {
        staker.require_auth();
        if shares <= 0 {
            return Err(RegistryError::InvalidAmount);
        }
        let mut record = vault::load(&env, vault_id)?;
        Self::require_transfers_enabled(&env, &record)?;
        if Self::safety_config(&env)?.is_in_safety_period(env.ledger().timestamp()) {
            return Err(RegistryError::InSafetyPeriod);
        }
        let balance = vault::shares_of(&env, vault_id, &staker);
        if shares > balance {
            return Err(RegistryError::InsufficientShares);
        }

        let amount = record.assets_for_shares(shares)?;
        Self::commit_to_controllers(&env, &record, &staker, shares, false);

        vault::set_shares(&env, vault_id, &staker, balance - shares);
        record.total_shares -= shares;
        record.total_assets -= amount;
        vault::store(&env, &record);

        if amount > 0 {
            token::Client::new(&env, &record.asset).transfer(
                &env.current_contract_address(),
                &staker,
                &amount,
            );
        }
        events::publish_withdraw(&env, vault_id, &staker, amount, shares);
        Ok(amount)
    }

    // ── Claims ────────────────────────────────────────────────────────────────

    /// Open a claim against the vault. Returns the claim id.
    pub fn submit_claim(
        env: Env,
        committee: Address,
        vault_id: u64,
        beneficiary: Address,
        bounty_percentage: u32,
        description_hash: String,
    ) -> Result<BytesN<32>, RegistryError> {
        let mut record = vault::load(&env, vault_id)?;
        if committee != record.committee {
            return Err(RegistryError::OnlyCommittee);
        }
        committee.require_auth();
        if !record.committee_checked_in {
            return Err(RegistryError::CommitteeNotCheckedIn);
        }
        pausable::require_not_paused(&env, RegistryError::SystemInEmergencyPause)?;
        Self::require_no_active_claim(&env, vault_id)?;

        let now = env.ledger().timestamp();
        if !Self::safety_config(&env)?.is_in_safety_period(now) {
            return Err(RegistryError::NotInSafetyPeriod);
        }
        if bounty_percentage > record.max_bounty {
            return Err(RegistryError::BountyPercentageTooHigh);
        }

        let challenge_period: u64 = env
            .storage()
            .instance()
            .get(&CHALLENGE_PERIOD)
            .ok_or(RegistryError::NotInitialized)?;
        let id = claim::claim_id(&env, vault_id, &committee, record.claim_nonce);
        record.claim_nonce += 1;
        vault::store(&env, &record);

        let new_claim = Claim {
            id: id.clone(),
            vault_id,
            committee,
            beneficiary,
            bounty_percentage,
            description_hash,
            created_at: now,
            challenge_deadline: now.saturating_add(challenge_period),
        };
        claim::store_state(&env, vault_id, &ClaimState::Submitted(new_claim.clone()));
        events::publish_claim_submitted(&env, &new_claim);
        Ok(id)
    }

    /// Escalate a submitted claim to the arbitrator before its deadline.
    pub fn challenge_claim(
        env: Env,
        caller: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
    ) -> Result<(), RegistryError> {
        Self::require_initialized(&env)?;
        let arbitrator = Self::instance_address(&env, &ARBITRATOR)?;
        let owner = Self::instance_address(&env, &OWNER)?;
        if caller != arbitrator && caller != owner {
            return Err(RegistryError::OnlyArbitratorOrRegistryOwner);
        }
        caller.require_auth();

        let (active, challenged) = claim::active(&claim::load_state(&env, vault_id), &claim_id)?;
        if challenged {
            return Err(RegistryError::ClaimAlreadyChallenged);
        }
        if env.ledger().timestamp() >= active.challenge_deadline {
            return Err(RegistryError::ChallengePeriodEnded);
        }

        claim::store_state(&env, vault_id, &ClaimState::Challenged(active));
        events::publish_claim_challenged(&env, vault_id, &claim_id, &caller);
        Ok(())
    }

    /// Pay out the live claim.
    ///
    /// The vault owner approves unchallenged claims at their submitted
    /// percentage; once challenged, only the arbitrator approves and may
    /// set a different percentage within `max_bounty`.
    pub fn approve_claim(
        env: Env,
        caller: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
        bounty_percentage: Option<u32>,
    ) -> Result<(), RegistryError> {
        let mut record = vault::load(&env, vault_id)?;
        let (active, challenged) = claim::active(&claim::load_state(&env, vault_id), &claim_id)?;
        Self::require_resolver(&env, &caller, &record, challenged)?;
        if !challenged && bounty_percentage.is_some() {
            return Err(RegistryError::BountyOverrideNotAllowed);
        }
        let percentage = bounty_percentage.unwrap_or(active.bounty_percentage);
        if percentage > record.max_bounty {
            return Err(RegistryError::BountyPercentageTooHigh);
        }

        let hat_split = match &record.hat_bounty_split {
            Some(split) => split.clone(),
            None => env
                .storage()
                .instance()
                .get(&HAT_SPLIT)
                .ok_or(RegistryError::NotInitialized)?,
        };
        let mut payout = payout::compute(
            record.total_assets,
            percentage,
            &record.bounty_split,
            &hat_split,
        )
        .ok_or(RegistryError::MathOverflow)?;

        record.total_assets -= payout.total;
        vault::store(&env, &record);
        claim::store_state(&env, vault_id, &ClaimState::Open);
        swap::credit(
            &env,
            &record.asset,
            &active.beneficiary,
            payout.governance_hat,
            payout.hacker_hat_vested,
        )?;
        if payout.hacker_vested > 0 {
            payout.hacker_lock = Some(vesting::create_lock(
                &env,
                &record.asset,
                &active.beneficiary,
                payout.hacker_vested,
                &record.vesting_terms(),
            ));
        }
        claim::store_outcome(&env, &claim_id, &ClaimOutcome::Approved(payout.clone()));

        let asset = token::Client::new(&env, &record.asset);
        let this = env.current_contract_address();
        if payout.hacker > 0 {
            asset.transfer(&this, &active.beneficiary, &payout.hacker);
        }
        if payout.committee > 0 {
            asset.transfer(&this, &active.committee, &payout.committee);
        }

        events::publish_claim_approved(&env, vault_id, &claim_id, percentage, &payout);
        Ok(())
    }

    /// Close the live claim without payout. Same authority rules as
    /// `approve_claim`.
    pub fn dismiss_claim(
        env: Env,
        caller: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
    ) -> Result<(), RegistryError> {
        let record = vault::load(&env, vault_id)?;
        let (_, challenged) = claim::active(&claim::load_state(&env, vault_id), &claim_id)?;
        Self::require_resolver(&env, &caller, &record, challenged)?;

        claim::store_state(&env, vault_id, &ClaimState::Open);
        claim::store_outcome(&env, &claim_id, &ClaimOutcome::Dismissed);
        events::publish_claim_dismissed(&env, vault_id, &claim_id);
        Ok(())
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    pub fn get_vault(env: Env, vault_id: u64) -> Result<Vault, RegistryError> {
        vault::load(&env, vault_id)
    }

    pub fn get_vault_count(env: Env) -> u64 {
        vault::count(&env)
    }

    pub fn is_vault_visible(env: Env, vault_id: u64) -> bool {
        vault::is_visible(&env, vault_id)
    }

    pub fn get_claim_state(env: Env, vault_id: u64) -> ClaimState {
        claim::load_state(&env, vault_id)
    }

    pub fn get_claim_outcome(env: Env, claim_id: BytesN<32>) -> Option<ClaimOutcome> {
        claim::load_outcome(&env, &claim_id)
    }

    pub fn get_shares(env: Env, vault_id: u64, staker: Address) -> i128 {
        vault::shares_of(&env, vault_id, &staker)
    }

    pub fn get_total_shares(env: Env, vault_id: u64) -> Result<i128, RegistryError> {
        Ok(vault::load(&env, vault_id)?.total_shares)
    }

    pub fn get_total_assets(env: Env, vault_id: u64) -> Result<i128, RegistryError> {
        Ok(vault::load(&env, vault_id)?.total_assets)
    }

    /// HAT split applied to this vault's next payout.
    pub fn get_hat_bounty_split(env: Env, vault_id: u64) -> Result<HatBountySplit, RegistryError> {
        match vault::load(&env, vault_id)?.hat_bounty_split {
            Some(split) => Ok(split),
            None => env
                .storage()
                .instance()
                .get(&HAT_SPLIT)
                .ok_or(RegistryError::NotInitialized),
        }
    }

    pub fn is_in_safety_period(env: Env) -> Result<bool, RegistryError> {
        Ok(Self::safety_config(&env)?.is_in_safety_period(env.ledger().timestamp()))
    }

    pub fn get_safety_config(env: Env) -> Result<SafetyConfig, RegistryError> {
        Self::safety_config(&env)
    }

    pub fn get_default_challenge_period(env: Env) -> Result<u64, RegistryError> {
        env.storage()
            .instance()
            .get(&CHALLENGE_PERIOD)
            .ok_or(RegistryError::NotInitialized)
    }

    pub fn is_emergency_paused(env: Env) -> bool {
        pausable::is_paused(&env)
    }

    pub fn get_governance_hat_reward(env: Env, token: Address) -> i128 {
        swap::governance_pool(&env, &token)
    }

    pub fn get_hacker_hat_reward(env: Env, token: Address, beneficiary: Address) -> i128 {
        swap::hacker_pool(&env, &token, &beneficiary)
    }

    pub fn get_token_lock(env: Env, lock_id: u64) -> Result<TokenLock, RegistryError> {
        vesting::load(&env, lock_id)
    }

    pub fn get_owner(env: Env) -> Result<Address, RegistryError> {
        Self::instance_address(&env, &OWNER)
    }

    pub fn get_arbitrator(env: Env) -> Result<Address, RegistryError> {
        Self::instance_address(&env, &ARBITRATOR)
    }

    pub fn get_fee_receiver(env: Env) -> Result<Address, RegistryError> {
        Self::instance_address(&env, &FEE_RECEIVER)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, RegistryError> {
        Self::reward_token(&env)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), RegistryError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(RegistryError::NotInitialized);
        }
        Ok(())
    }

    fn instance_address(env: &Env, key: &Symbol) -> Result<Address, RegistryError> {
        env.storage()
            .instance()
            .get(key)
            .ok_or(RegistryError::NotInitialized)
    }

    fn reward_token(env: &Env) -> Result<Address, RegistryError> {
        Self::instance_address(env, &REWARD_TOKEN)
    }

    fn safety_config(env: &Env) -> Result<SafetyConfig, RegistryError> {
        env.storage()
            .instance()
            .get(&SAFETY)
            .ok_or(RegistryError::NotInitialized)
    }

    /// Guard: `caller` is the registry owner and authorised the call.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), RegistryError> {
        let owner = Self::instance_address(env, &OWNER)?;
        if *caller != owner {
            return Err(RegistryError::Unauthorized);
        }
        caller.require_auth();
        Ok(())
    }

    /// Guard: `caller` owns the vault. Returns the vault record.
    fn vault_for_owner(env: &Env, caller: &Address, vault_id: u64) -> Result<Vault, RegistryError> {
        let record = vault::load(env, vault_id)?;
        if *caller != record.owner {
            return Err(RegistryError::Unauthorized);
        }
        caller.require_auth();
        Ok(record)
    }

    fn require_no_active_claim(env: &Env, vault_id: u64) -> Result<(), RegistryError> {
        if !claim::load_state(env, vault_id).is_open() {
            return Err(RegistryError::ActiveClaimExists);
        }
        Ok(())
    }

    /// Deposits and withdrawals need an idle, unpaused vault with a
    /// checked-in committee.
    fn require_transfers_enabled(env: &Env, record: &Vault) -> Result<(), RegistryError> {
        pausable::require_not_paused(env, RegistryError::SystemInEmergencyPause)?;
        if record.deposit_paused {
            return Err(RegistryError::DepositsPaused);
        }
        if !record.committee_checked_in {
            return Err(RegistryError::CommitteeNotCheckedIn);
        }
        Self::require_no_active_claim(env, record.id)
    }

    /// Who may resolve the live claim: the vault owner while unchallenged,
    /// the arbitrator once challenged.
    fn require_resolver(
        env: &Env,
        caller: &Address,
        record: &Vault,
        challenged: bool,
    ) -> Result<(), RegistryError> {
        let arbitrator = Self::instance_address(env, &ARBITRATOR)?;
        if challenged {
            if *caller != arbitrator {
                if *caller == record.owner {
                    return Err(RegistryError::ClaimAlreadyChallenged);
                }
                return Err(RegistryError::Unauthorized);
            }
        } else if *caller != record.owner {
            if *caller == arbitrator {
                return Err(RegistryError::OnlyCallableIfChallenged);
            }
            return Err(RegistryError::Unauthorized);
        }
        caller.require_auth();
        Ok(())
    }

    /// Settle the staker in every reward controller before shares change.
    fn commit_to_controllers(
        env: &Env,
        record: &Vault,
        staker: &Address,
        shares_change: i128,
        is_deposit: bool,
    ) {
        let this = env.current_contract_address();
        for controller in record.reward_controllers.iter() {
            RewardControllerClient::new(env, &controller).commit_user_balance(
                &this,
                &record.id,
                staker,
                &shares_change,
                &is_deposit,
            );
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
