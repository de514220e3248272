//! # Bounty Vaults Testing Framework
//!
//! A reusable harness that deploys the whole bounty vaults system into one
//! Soroban test `Env`, plus property-based generators, invariant checking and
//! a state explorer driven by random vault actions.
//!
//! ## Architecture
//!
//! ```text
//! test/framework/
//! ├── mod.rs             # TestEnv, ProtocolHarness, snapshots
//! ├── mocks.rs           # Mock swap router
//! ├── generators.rs      # Property-based test value generators
//! ├── invariants.rs      # Vault invariant definitions & verification
//! └── state_explorer.rs  # Action-sequence exploration
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use test_framework::{ProtocolHarness, TestEnv};
//!
//! let env = TestEnv::new();
//! let h = ProtocolHarness::new(&env);
//! let vault_id = h.create_vault(8_000);
//! let staker = h.create_staker(UNIT);
//! h.deposit(&staker, vault_id, UNIT);
//! ```

extern crate std;

pub mod generators;
pub mod mocks;

use arbitrator::{ArbitratorContract, ArbitratorContractClient};
use common::{BountySplit, ClaimState, HatBountySplit};
use fee_forwarder::{AutomatedFeeForwarderContract, AutomatedFeeForwarderContractClient};
use mocks::{MockSwapRouter, MockSwapRouterClient};
use reward_controller::{RewardControllerContract, RewardControllerContractClient};
use soroban_sdk::{
    testutils::{Address as _, Events as _, Ledger as _},
    token::{StellarAssetClient, TokenClient},
    vec,
    xdr::ContractEventBody,
    Address, BytesN, Env, IntoVal, String, Symbol, TryFromVal, Val, Vec,
};
use timelock::{roles::Role, TimelockControllerContract, TimelockControllerContractClient};
use vaults_registry::{
    safety::SafetyConfig, vault::VaultConfig, vesting::VestingTerms, RegistryConfig,
    VaultsRegistryContract, VaultsRegistryContractClient, DEFAULT_CHALLENGE_PERIOD,
    DEFAULT_CYCLE_LENGTH, DEFAULT_HAT_VESTING_DURATION, DEFAULT_HAT_VESTING_PERIODS,
    DEFAULT_SAFETY_PERIOD,
};

/// One whole token at 7 decimals.
pub const UNIT: i128 = 10_000_000;
/// Timelock delay used by the harness (2 days).
pub const MIN_DELAY: u64 = 172_800;
/// Block the reward schedule starts at.
pub const REWARD_START_BLOCK: u64 = 10;
pub const REWARD_PER_BLOCK: i128 = 1_000;

// ── Core Test Environment ────────────────────────────────────────────────────

/// A high-level test environment that wraps the Soroban `Env` and provides
/// time control, block control and address management.
pub struct TestEnv {
    pub env: Env,
    generated_addresses: std::vec::Vec<Address>,
}

impl TestEnv {
    /// Create a new test environment with all auth mocked.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        // Reward accrual runs over many ledgers; keep instances and balances live.
        env.ledger().with_mut(|l| {
            l.min_persistent_entry_ttl = 500_000;
            l.max_entry_ttl = 6_312_000;
        });
        Self {
            env,
            generated_addresses: std::vec::Vec::new(),
        }
    }

    /// Generate a fresh Soroban address (cached for re-use).
    pub fn generate_address(&mut self) -> Address {
        let addr = Address::generate(&self.env);
        self.generated_addresses.push(addr.clone());
        addr
    }

    /// Generate `n` distinct addresses.
    pub fn generate_addresses(&mut self, n: usize) -> std::vec::Vec<Address> {
        (0..n).map(|_| self.generate_address()).collect()
    }

    /// Set the ledger timestamp.
    pub fn set_timestamp(&self, ts: u64) {
        self.env.ledger().set_timestamp(ts);
    }

    /// Advance the ledger timestamp by `delta` seconds.
    pub fn advance_time(&self, delta: u64) {
        let current = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(current.saturating_add(delta));
    }

    /// Current ledger timestamp.
    pub fn timestamp(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    /// Set the ledger sequence (block height).
    pub fn set_block(&self, block: u32) {
        self.env.ledger().with_mut(|l| l.sequence_number = block);
    }

    /// Advance the block height. Keep steps small: entries whose TTL lapses
    /// become archived in the test host.
    pub fn advance_blocks(&self, blocks: u32) {
        self.env
            .ledger()
            .with_mut(|l| l.sequence_number = l.sequence_number.saturating_add(blocks));
    }

    pub fn block(&self) -> u64 {
        self.env.ledger().sequence() as u64
    }

    /// Deploy a SAC token contract and return its address.
    pub fn deploy_token(&self) -> Address {
        self.env
            .register_stellar_asset_contract_v2(Address::generate(&self.env))
            .address()
    }

    /// Mint tokens from a SAC token to a recipient.
    pub fn mint_tokens(&self, token: &Address, recipient: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, token).mint(recipient, &amount);
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ── Protocol Harness ─────────────────────────────────────────────────────────

/// The complete system wired the way it is deployed: the timelock owns the
/// registry, the arbitrator and the reward controller; `governance` holds
/// every timelock role.
pub struct ProtocolHarness {
    pub env: Env,
    pub governance: Address,
    pub committee: Address,
    pub asset: Address,
    pub reward_token: Address,
    pub registry: VaultsRegistryContractClient<'static>,
    pub timelock: TimelockControllerContractClient<'static>,
    pub arbitrator: ArbitratorContractClient<'static>,
    pub rewards: RewardControllerContractClient<'static>,
    pub router: MockSwapRouterClient<'static>,
}

impl ProtocolHarness {
    /// Deploy and initialise every contract. The reward controller and the
    /// router are pre-funded with reward tokens.
    pub fn new(test_env: &TestEnv) -> Self {
        let env = test_env.env.clone();
        test_env.set_block(REWARD_START_BLOCK as u32);

        let governance = Address::generate(&env);
        let committee = Address::generate(&env);
        let asset = test_env.deploy_token();
        let reward_token = test_env.deploy_token();

        let timelock_id = env.register(TimelockControllerContract, ());
        let timelock = TimelockControllerContractClient::new(&env, &timelock_id);
        timelock.initialize(
            &MIN_DELAY,
            &vec![&env, governance.clone()],
            &vec![&env, governance.clone()],
            &vec![&env, governance.clone()],
        );

        let registry_id = env.register(VaultsRegistryContract, ());
        let registry = VaultsRegistryContractClient::new(&env, &registry_id);
        let arbitrator_id = env.register(ArbitratorContract, ());
        let arbitrator = ArbitratorContractClient::new(&env, &arbitrator_id);

        registry.initialize(&RegistryConfig {
            owner: timelock_id.clone(),
            reward_token: reward_token.clone(),
            arbitrator: arbitrator_id.clone(),
            default_hat_bounty_split: HatBountySplit {
                governance: 0,
                hacker_vested: 0,
            },
            hat_vesting: VestingTerms {
                duration: DEFAULT_HAT_VESTING_DURATION,
                periods: DEFAULT_HAT_VESTING_PERIODS,
            },
            safety: SafetyConfig {
                cycle_length: DEFAULT_CYCLE_LENGTH,
                safety_period: DEFAULT_SAFETY_PERIOD,
            },
            default_challenge_period: DEFAULT_CHALLENGE_PERIOD,
        });
        arbitrator.initialize(&timelock_id, &registry_id);

        let rewards_id = env.register(RewardControllerContract, ());
        let rewards = RewardControllerContractClient::new(&env, &rewards_id);
        rewards.initialize(
            &timelock_id,
            &registry_id,
            &reward_token,
            &REWARD_START_BLOCK,
            &1_000_000,
            &vec![&env, REWARD_PER_BLOCK],
        );
        test_env.mint_tokens(&reward_token, &rewards_id, 1_000_000_000_000);

        let router_id = env.register(MockSwapRouter, ());
        let router = MockSwapRouterClient::new(&env, &router_id);
        test_env.mint_tokens(&reward_token, &router_id, 1_000_000_000_000);

        Self {
            env,
            governance,
            committee,
            asset,
            reward_token,
            registry,
            timelock,
            arbitrator,
            rewards,
            router,
        }
    }

    pub fn default_split() -> BountySplit {
        BountySplit {
            hacker: 7_000,
            hacker_vested: 2_500,
            committee: 500,
        }
    }

    pub fn vault_config(&self, max_bounty: u32, split: BountySplit) -> VaultConfig {
        VaultConfig {
            asset: self.asset.clone(),
            owner: self.timelock.address.clone(),
            committee: self.committee.clone(),
            name: String::from_str(&self.env, "Bounty Vault"),
            symbol: String::from_str(&self.env, "BVLT"),
            reward_controllers: Vec::new(&self.env),
            max_bounty,
            bounty_split: split,
            description_hash: String::from_str(&self.env, "QmVault"),
            vesting_duration: 2_592_000,
            vesting_periods: 30,
            is_paused: false,
        }
    }

    /// Create a governance-owned vault, list it and check the committee in.
    pub fn create_vault(&self, max_bounty: u32) -> u64 {
        let vault_id = self
            .registry
            .create_vault(&self.vault_config(max_bounty, Self::default_split()));
        self.timelock.set_vault_visibility(
            &self.governance,
            &self.registry.address,
            &vault_id,
            &true,
        );
        self.registry.committee_check_in(&self.committee, &vault_id);
        vault_id
    }

    /// Attach the reward controller to a vault with `alloc_point`.
    pub fn enable_rewards(&self, vault_id: u64, alloc_point: u64) {
        self.timelock.add_reward_controller(
            &self.governance,
            &self.registry.address,
            &vault_id,
            &self.rewards.address,
        );
        self.timelock.set_alloc_point(
            &self.governance,
            &self.rewards.address,
            &vault_id,
            &alloc_point,
        );
    }

    /// A fresh address holding `amount` of the vault asset.
    pub fn create_staker(&self, amount: i128) -> Address {
        let staker = Address::generate(&self.env);
        StellarAssetClient::new(&self.env, &self.asset).mint(&staker, &amount);
        staker
    }

    pub fn deposit(&self, staker: &Address, vault_id: u64, amount: i128) -> i128 {
        self.registry.deposit(staker, &vault_id, &amount)
    }

    pub fn withdraw(&self, staker: &Address, vault_id: u64, shares: i128) -> i128 {
        self.registry.withdraw(staker, &vault_id, &shares)
    }

    /// Move the clock to the next instant inside the safety period.
    pub fn enter_safety_period(&self) {
        let config = self.registry.get_safety_config();
        let start = config.next_window_start(self.env.ledger().timestamp());
        self.env.ledger().set_timestamp(start);
    }

    /// Move the clock to the start of the next cycle, outside the window.
    pub fn leave_safety_period(&self) {
        let config = self.registry.get_safety_config();
        let now = self.env.ledger().timestamp();
        if config.is_in_safety_period(now) {
            let next_cycle = now - now % config.cycle_length + config.cycle_length;
            self.env.ledger().set_timestamp(next_cycle);
        }
    }

    /// Enter the safety period and submit a claim from the committee.
    pub fn submit_claim(&self, vault_id: u64, beneficiary: &Address, percentage: u32) -> BytesN<32> {
        self.enter_safety_period();
        self.registry.submit_claim(
            &self.committee,
            &vault_id,
            beneficiary,
            &percentage,
            &String::from_str(&self.env, "QmClaim"),
        )
    }

    pub fn balance(&self, token: &Address, who: &Address) -> i128 {
        TokenClient::new(&self.env, token).balance(who)
    }

    /// Snapshot of everything the invariants look at for one vault.
    pub fn snapshot(&self, vault_id: u64, stakers: &[Address]) -> VaultSnapshot {
        let vault = self.registry.get_vault(&vault_id);
        let reward_per_share = self
            .rewards
            .get_vault_info(&vault_id)
            .map(|info| info.reward_per_share)
            .unwrap_or(0);

        VaultSnapshot {
            timestamp: self.env.ledger().timestamp(),
            block: self.env.ledger().sequence() as u64,
            total_shares: vault.total_shares,
            total_assets: vault.total_assets,
            asset_held: self.balance(&self.asset, &self.registry.address),
            claim_open: self.registry.get_claim_state(&vault_id) == ClaimState::Open,
            reward_per_share,
            user_shares: stakers
                .iter()
                .map(|s| (s.clone(), self.registry.get_shares(&vault_id, s)))
                .collect(),
            mirrored_shares: stakers
                .iter()
                .map(|s| (s.clone(), self.rewards.get_staker_reward(&vault_id, s).shares))
                .collect(),
            pending_rewards: stakers
                .iter()
                .map(|s| (s.clone(), self.rewards.get_pending_reward(&vault_id, s)))
                .collect(),
        }
    }

    /// Deploy a fee forwarder paying `beneficiary` and kept by governance,
    /// make it the registry's fee receiver and grant it the Proposer role
    /// through a delayed operation.
    pub fn deploy_fee_forwarder(
        &self,
        beneficiary: &Address,
    ) -> AutomatedFeeForwarderContractClient<'static> {
        let forwarder_id = self.env.register(AutomatedFeeForwarderContract, ());
        let forwarder = AutomatedFeeForwarderContractClient::new(&self.env, &forwarder_id);
        forwarder.initialize(
            &self.timelock.address,
            &self.registry.address,
            &self.router.address,
            beneficiary,
            &self.governance,
        );

        self.execute_delayed(
            &self.registry.address,
            "set_fee_receiver",
            vec![
                &self.env,
                self.timelock.address.into_val(&self.env),
                forwarder_id.into_val(&self.env),
            ],
        );
        self.execute_delayed(
            &self.timelock.address,
            "grant_role",
            vec![
                &self.env,
                Role::Proposer.into_val(&self.env),
                forwarder_id.into_val(&self.env),
            ],
        );
        forwarder
    }

    /// Schedule a call through the timelock, wait out the delay and execute.
    pub fn execute_delayed(
        &self,
        target: &Address,
        function: &str,
        args: Vec<Val>,
    ) -> Val {
        let function = Symbol::new(&self.env, function);
        let predecessor = BytesN::from_array(&self.env, &[0u8; 32]);
        let salt = BytesN::from_array(&self.env, &[0u8; 32]);
        self.timelock.schedule(
            &self.governance,
            target,
            &function,
            &args,
            &predecessor,
            &salt,
            &MIN_DELAY,
        );
        let ready_at = self.env.ledger().timestamp() + MIN_DELAY;
        self.env.ledger().set_timestamp(ready_at);
        self.timelock
            .execute(&self.governance, target, &function, &args, &predecessor, &salt)
    }

    /// Topics and data of the events whose first topic is `name`, as
    /// published during the last top-level invocation.
    pub fn events_named(&self, name: Symbol) -> std::vec::Vec<(Vec<Val>, Val)> {
        let mut found = std::vec::Vec::new();
        for event in self.env.events().all().events() {
            #[allow(unreachable_patterns)]
            let body = match &event.body {
                ContractEventBody::V0(body) => body,
                _ => continue,
            };
            let mut topics = Vec::new(&self.env);
            for raw in body.topics.iter() {
                topics.push_back(Val::try_from_val(&self.env, raw).unwrap());
            }
            let first = topics
                .get(0)
                .and_then(|topic| Symbol::try_from_val(&self.env, &topic).ok());
            if first == Some(name.clone()) {
                let data = Val::try_from_val(&self.env, &body.data).unwrap();
                found.push((topics, data));
            }
        }
        found
    }
}

/// Immutable snapshot of one vault's observable state.
#[derive(Debug, Clone)]
pub struct VaultSnapshot {
    pub timestamp: u64,
    pub block: u64,
    pub total_shares: i128,
    pub total_assets: i128,
    /// Registry balance of the vault asset (stake plus locked payouts and
    /// pending HAT pools).
    pub asset_held: i128,
    pub claim_open: bool,
    pub reward_per_share: i128,
    pub user_shares: std::vec::Vec<(Address, i128)>,
    /// Shares as mirrored by the reward controller.
    pub mirrored_shares: std::vec::Vec<(Address, i128)>,
    pub pending_rewards: std::vec::Vec<(Address, i128)>,
}

impl VaultSnapshot {
    /// Sum of all individual user shares.
    pub fn sum_user_shares(&self) -> i128 {
        self.user_shares.iter().map(|(_, s)| s).sum()
    }
}

// ── Test Outcome Tracking ────────────────────────────────────────────────────

/// Result of a single test action, used by the state explorer.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// The action succeeded.
    Ok,
    /// The contract rejected the action with this error code.
    Rejected(u32),
    /// The action failed without a contract error code.
    UnexpectedError(std::string::String),
}

/// Summary of a test run with coverage metrics.
#[derive(Debug, Clone)]
pub struct TestRunSummary {
    pub actions_executed: usize,
    pub actions_rejected: usize,
    pub invariant_checks: usize,
    pub invariant_violations: std::vec::Vec<std::string::String>,
    pub entry_points_hit: std::collections::HashSet<std::string::String>,
}

impl TestRunSummary {
    pub fn new() -> Self {
        Self {
            actions_executed: 0,
            actions_rejected: 0,
            invariant_checks: 0,
            invariant_violations: std::vec::Vec::new(),
            entry_points_hit: std::collections::HashSet::new(),
        }
    }

    /// True when no invariant violations were detected.
    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty()
    }
}

impl Default for TestRunSummary {
    fn default() -> Self {
        Self::new()
    }
}
