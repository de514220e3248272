#![no_std]

//! # Timelock Controller
//!
//! Governance front door for the bounty vaults system.
//!
//! - **Scheduled path**: proposers schedule arbitrary contract calls that
//!   executors may run once `min_delay` (or a longer requested delay) has
//!   passed. Operations can be chained through a predecessor id and
//!   cancelled while pending. Role changes on the timelock itself are only
//!   possible this way.
//! - **Instant path**: managers forward a fixed allow-list of administrative
//!   calls to the registry, the arbitrator and reward controllers without
//!   waiting. The list is closed; see [`instant::InstantAction`].

pub mod events;
pub mod instant;
pub mod operation;
pub mod roles;

use common::{HatBountySplit, SentReward};
use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, Bytes, BytesN, Env, IntoVal, String, Symbol,
    TryFromVal, Val, Vec,
};

use instant::InstantAction;
use operation::OperationState;
use roles::Role;

// ── Storage key constants ─────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const MIN_DELAY: Symbol = symbol_short!("MIN_DELAY");

// ── Error codes ───────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TimelockError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 10,
    InvalidDelay = 30,
    InvalidSelfCall = 31,
    SelfTargetNotAllowed = 32,
    OperationAlreadyScheduled = 40,
    OperationNotPending = 41,
    PredecessorNotDone = 42,
    OperationNotReady = 60,
    MathOverflow = 70,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct TimelockControllerContract;

#[contractimpl]
impl TimelockControllerContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Bootstrap the timelock. `min_delay` cannot be changed afterwards.
    pub fn initialize(
        env: Env,
        min_delay: u64,
        proposers: Vec<Address>,
        executors: Vec<Address>,
        managers: Vec<Address>,
    ) -> Result<(), TimelockError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(TimelockError::AlreadyInitialized);
        }
        env.storage().instance().set(&MIN_DELAY, &min_delay);
        env.storage().instance().set(&INITIALIZED, &true);

        for account in proposers.iter() {
            roles::grant(&env, &Role::Proposer, &account);
        }
        for account in executors.iter() {
            roles::grant(&env, &Role::Executor, &account);
        }
        for account in managers.iter() {
            roles::grant(&env, &Role::Manager, &account);
        }

        events::publish_initialized(&env, min_delay);
        Ok(())
    }

    // ── Scheduled operations ──────────────────────────────────────────────────

    pub fn hash_operation(
        env: Env,
        target: Address,
        function: Symbol,
        args: Vec<Val>,
        predecessor: BytesN<32>,
        salt: BytesN<32>,
    ) -> BytesN<32> {
        operation::hash(&env, &target, &function, &args, &predecessor, &salt)
    }

    /// Schedule a call of `function(args)` on `target`, executable after
    /// `delay` seconds. Pass an all-zero `predecessor` for none.
    pub fn schedule(
        env: Env,
        proposer: Address,
        target: Address,
        function: Symbol,
        args: Vec<Val>,
        predecessor: BytesN<32>,
        salt: BytesN<32>,
        delay: u64,
    ) -> Result<BytesN<32>, TimelockError> {
        Self::require_role(&env, &Role::Proposer, &proposer)?;
        if delay < Self::min_delay(&env)? {
            return Err(TimelockError::InvalidDelay);
        }

        let id = operation::hash(&env, &target, &function, &args, &predecessor, &salt);
        if operation::load(&env, &id) != OperationState::Unset {
            return Err(TimelockError::OperationAlreadyScheduled);
        }
        let ready_at = env
            .ledger()
            .timestamp()
            .checked_add(delay)
            .ok_or(TimelockError::MathOverflow)?;
        operation::store(&env, &id, &OperationState::Pending(ready_at));

        events::publish_scheduled(&env, &id, &target, &function, &predecessor, ready_at);
        Ok(id)
    }

    /// Run a ready operation. It is marked done before the call is made.
    pub fn execute(
        env: Env,
        executor: Address,
        target: Address,
        function: Symbol,
        args: Vec<Val>,
        predecessor: BytesN<32>,
        salt: BytesN<32>,
    ) -> Result<Val, TimelockError> {
        Self::require_role(&env, &Role::Executor, &executor)?;

        let id = operation::hash(&env, &target, &function, &args, &predecessor, &salt);
        let state = operation::load(&env, &id);
        if !matches!(state, OperationState::Pending(_)) {
            return Err(TimelockError::OperationNotPending);
        }
        if !operation::is_ready(&state, env.ledger().timestamp()) {
            return Err(TimelockError::OperationNotReady);
        }
        if !operation::is_none(&predecessor)
            && operation::load(&env, &predecessor) != OperationState::Done
        {
            return Err(TimelockError::PredecessorNotDone);
        }

        operation::store(&env, &id, &OperationState::Done);
        events::publish_executed(&env, &id, &target, &function);

        if target == env.current_contract_address() {
            return Self::execute_self(&env, &function, &args);
        }
        Ok(env.invoke_contract::<Val>(&target, &function, args))
    }

    /// Cancel a pending operation. The id can never be scheduled again.
    pub fn cancel(env: Env, proposer: Address, id: BytesN<32>) -> Result<(), TimelockError> {
        Self::require_role(&env, &Role::Proposer, &proposer)?;
        if !matches!(operation::load(&env, &id), OperationState::Pending(_)) {
            return Err(TimelockError::OperationNotPending);
        }
        operation::store(&env, &id, &OperationState::Cancelled);
        events::publish_cancelled(&env, &id);
        Ok(())
    }

    /// Drop one of the caller's own roles.
    pub fn renounce_role(env: Env, account: Address, role: Role) -> Result<(), TimelockError> {
        account.require_auth();
        if !roles::revoke(&env, &role, &account) {
            return Err(TimelockError::Unauthorized);
        }
        Ok(())
    }

    // ── Instant passthroughs ──────────────────────────────────────────────────

    pub fn set_vault_visibility(
        env: Env,
        caller: Address,
        registry: Address,
        vault_id: u64,
        visible: bool,
    ) -> Result<(), TimelockError> {
        instant::run(
            &env,
            &caller,
            InstantAction::SetVaultVisibility {
                registry,
                vault_id,
                visible,
            },
        )?;
        Ok(())
    }

    pub fn set_vault_description(
        env: Env,
        caller: Address,
        registry: Address,
        vault_id: u64,
        description_hash: String,
    ) -> Result<(), TimelockError> {
        instant::run(
            &env,
            &caller,
            InstantAction::SetVaultDescription {
                registry,
                vault_id,
                description_hash,
            },
        )?;
        Ok(())
    }

    pub fn set_committee(
        env: Env,
        caller: Address,
        registry: Address,
        vault_id: u64,
        committee: Address,
    ) -> Result<(), TimelockError> {
        instant::run(
            &env,
            &caller,
            InstantAction::SetCommittee {
                registry,
                vault_id,
                committee,
            },
        )?;
        Ok(())
    }

    pub fn set_deposit_pause(
        env: Env,
        caller: Address,
        registry: Address,
        vault_id: u64,
        paused: bool,
    ) -> Result<(), TimelockError> {
        instant::run(
            &env,
            &caller,
            InstantAction::SetDepositPause {
                registry,
                vault_id,
                paused,
            },
        )?;
        Ok(())
    }

    pub fn set_emergency_paused(
        env: Env,
        caller: Address,
        registry: Address,
        paused: bool,
    ) -> Result<(), TimelockError> {
        instant::run(
            &env,
            &caller,
            InstantAction::SetEmergencyPaused { registry, paused },
        )?;
        Ok(())
    }

    pub fn set_hat_bounty_split(
        env: Env,
        caller: Address,
        registry: Address,
        vault_id: u64,
        split: Option<HatBountySplit>,
    ) -> Result<(), TimelockError> {
        instant::run(
            &env,
            &caller,
            InstantAction::SetHatBountySplit {
                registry,
                vault_id,
                split,
            },
        )?;
        Ok(())
    }

    pub fn add_reward_controller(
        env: Env,
        caller: Address,
        registry: Address,
        vault_id: u64,
        controller: Address,
    ) -> Result<(), TimelockError> {
        instant::run(
            &env,
            &caller,
            InstantAction::AddRewardController {
                registry,
                vault_id,
                controller,
            },
        )?;
        Ok(())
    }

    pub fn set_alloc_point(
        env: Env,
        caller: Address,
        controller: Address,
        vault_id: u64,
        alloc_point: u64,
    ) -> Result<(), TimelockError> {
        instant::run(
            &env,
            &caller,
            InstantAction::SetAllocPoint {
                controller,
                vault_id,
                alloc_point,
            },
        )?;
        Ok(())
    }

    pub fn challenge_claim(
        env: Env,
        caller: Address,
        resolver: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
    ) -> Result<(), TimelockError> {
        instant::run(
            &env,
            &caller,
            InstantAction::ChallengeClaim {
                resolver,
                vault_id,
                claim_id,
            },
        )?;
        Ok(())
    }

    /// Approve through the registry (unchallenged claims of vaults this
    /// timelock owns) or through the arbitrator (challenged claims).
    pub fn approve_claim(
        env: Env,
        caller: Address,
        resolver: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
        bounty_percentage: Option<u32>,
    ) -> Result<(), TimelockError> {
        instant::run(
            &env,
            &caller,
            InstantAction::ApproveClaim {
                resolver,
                vault_id,
                claim_id,
                bounty_percentage,
            },
        )?;
        Ok(())
    }

    pub fn dismiss_claim(
        env: Env,
        caller: Address,
        resolver: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
    ) -> Result<(), TimelockError> {
        instant::run(
            &env,
            &caller,
            InstantAction::DismissClaim {
                resolver,
                vault_id,
                claim_id,
            },
        )?;
        Ok(())
    }

    pub fn swap_and_send(
        env: Env,
        caller: Address,
        registry: Address,
        token: Address,
        beneficiaries: Vec<Address>,
        min_out: i128,
        router: Address,
        payload: Bytes,
    ) -> Result<Vec<SentReward>, TimelockError> {
        instant::run(
            &env,
            &caller,
            InstantAction::SwapAndSend {
                registry,
                token,
                beneficiaries,
                min_out,
                router,
                payload,
            },
        )
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        roles::has_role(&env, &role, &account)
    }

    pub fn get_role_members(env: Env, role: Role) -> Vec<Address> {
        roles::members(&env, &role)
    }

    pub fn get_min_delay(env: Env) -> Result<u64, TimelockError> {
        Self::min_delay(&env)
    }

    /// Ready timestamp of a pending operation, `0` otherwise.
    pub fn get_timestamp(env: Env, id: BytesN<32>) -> u64 {
        match operation::load(&env, &id) {
            OperationState::Pending(ready_at) => ready_at,
            _ => 0,
        }
    }

    pub fn get_operation_state(env: Env, id: BytesN<32>) -> OperationState {
        operation::load(&env, &id)
    }

    /// Scheduled at some point and not cancelled.
    pub fn is_operation(env: Env, id: BytesN<32>) -> bool {
        matches!(
            operation::load(&env, &id),
            OperationState::Pending(_) | OperationState::Done
        )
    }

    pub fn is_operation_pending(env: Env, id: BytesN<32>) -> bool {
        matches!(operation::load(&env, &id), OperationState::Pending(_))
    }

    pub fn is_operation_ready(env: Env, id: BytesN<32>) -> bool {
        operation::is_ready(&operation::load(&env, &id), env.ledger().timestamp())
    }

    pub fn is_operation_done(env: Env, id: BytesN<32>) -> bool {
        operation::load(&env, &id) == OperationState::Done
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn min_delay(env: &Env) -> Result<u64, TimelockError> {
        env.storage()
            .instance()
            .get(&MIN_DELAY)
            .ok_or(TimelockError::NotInitialized)
    }

    fn require_role(env: &Env, role: &Role, caller: &Address) -> Result<(), TimelockError> {
        if !roles::has_role(env, role, caller) {
            return Err(TimelockError::Unauthorized);
        }
        caller.require_auth();
        Ok(())
    }

    /// Calls on the timelock itself cannot re-enter it, so the supported
    /// ones (`grant_role`, `revoke_role`) are applied directly.
    fn execute_self(env: &Env, function: &Symbol, args: &Vec<Val>) -> Result<Val, TimelockError> {
        let grant = *function == Symbol::new(env, "grant_role");
        let revoke = *function == Symbol::new(env, "revoke_role");
        if !(grant || revoke) || args.len() != 2 {
            return Err(TimelockError::InvalidSelfCall);
        }
        let role = args
            .get(0)
            .and_then(|v| Role::try_from_val(env, &v).ok())
            .ok_or(TimelockError::InvalidSelfCall)?;
        let account = args
            .get(1)
            .and_then(|v| Address::try_from_val(env, &v).ok())
            .ok_or(TimelockError::InvalidSelfCall)?;

        if grant {
            roles::grant(env, &role, &account);
        } else {
            roles::revoke(env, &role, &account);
        }
        Ok(().into_val(env))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
