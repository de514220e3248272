#![no_main]

use arbitrary::Arbitrary;
use common::{BountySplit, HatBountySplit};
use libfuzzer_sys::fuzz_target;
use reward_controller::{RewardControllerContract, RewardControllerContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{StellarAssetClient, TokenClient},
    vec, Address, Env, String,
};
use vaults_registry::{
    safety::SafetyConfig, vault::VaultConfig, vesting::VestingTerms, RegistryConfig,
    VaultsRegistryContract, VaultsRegistryContractClient,
};

/// Actions covering staking, claims and rewards on a single vault. Values
/// are bounded so most inputs reach contract logic.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { amount: u32 },
    Withdraw { shares: u32 },
    ClaimReward,
    SubmitClaim { percentage: u16 },
    ApproveClaim,
    ChallengeClaim,
    DismissClaim,
    AdvanceTime { delta: u16 },
    AdvanceBlocks { blocks: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|l| l.min_persistent_entry_ttl = 500_000);

    let owner = Address::generate(&env);
    let arbitrator = Address::generate(&env);
    let committee = Address::generate(&env);
    let asset = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let registry_id = env.register(VaultsRegistryContract, ());
    let registry = VaultsRegistryContractClient::new(&env, &registry_id);
    registry.initialize(&RegistryConfig {
        owner: owner.clone(),
        reward_token: reward_token.clone(),
        arbitrator: arbitrator.clone(),
        default_hat_bounty_split: HatBountySplit {
            governance: 500,
            hacker_vested: 500,
        },
        hat_vesting: VestingTerms {
            duration: 86_400,
            periods: 10,
        },
        safety: SafetyConfig {
            cycle_length: 7_200,
            safety_period: 1_800,
        },
        default_challenge_period: 3_600,
    });

    let rewards_id = env.register(RewardControllerContract, ());
    let rewards = RewardControllerContractClient::new(&env, &rewards_id);
    rewards.initialize(
        &owner,
        &registry_id,
        &reward_token,
        &0,
        &1_000,
        &vec![&env, 1_000i128, 500i128],
    );
    StellarAssetClient::new(&env, &reward_token).mint(&rewards_id, &1_000_000_000_000i128);

    let vault_id = registry.create_vault(&VaultConfig {
        asset: asset.clone(),
        owner: owner.clone(),
        committee: committee.clone(),
        name: String::from_str(&env, "Fuzz Vault"),
        symbol: String::from_str(&env, "FZV"),
        reward_controllers: vec![&env, rewards_id.clone()],
        max_bounty: 9_000,
        bounty_split: BountySplit {
            hacker: 6_000,
            hacker_vested: 3_000,
            committee: 1_000,
        },
        description_hash: String::from_str(&env, "QmFuzz"),
        vesting_duration: 86_400,
        vesting_periods: 10,
        is_paused: false,
    });
    registry.committee_check_in(&committee, &vault_id);
    rewards.set_alloc_point(&owner, &vault_id, &100);

    let mut users = std::vec::Vec::new();
    for _ in 0..4 {
        let u = Address::generate(&env);
        StellarAssetClient::new(&env, &asset).mint(&u, &1_000_000_000_000i128);
        users.push(u);
    }
    let mut claim = None;

    for (i, action) in actions.into_iter().enumerate() {
        let user = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { amount } => {
                let _ = registry.try_deposit(user, &vault_id, &(amount as i128));
            }
            FuzzAction::Withdraw { shares } => {
                let _ = registry.try_withdraw(user, &vault_id, &(shares as i128));
            }
            FuzzAction::ClaimReward => {
                let _ = rewards.try_claim_reward(&vault_id, user);
            }
            FuzzAction::SubmitClaim { percentage } => {
                if let Ok(Ok(id)) = registry.try_submit_claim(
                    &committee,
                    &vault_id,
                    user,
                    &(percentage as u32),
                    &String::from_str(&env, "QmClaim"),
                ) {
                    claim = Some(id);
                }
            }
            FuzzAction::ApproveClaim => {
                if let Some(id) = &claim {
                    let _ = registry.try_approve_claim(&owner, &vault_id, id, &None);
                    let _ = registry.try_approve_claim(&arbitrator, &vault_id, id, &None);
                }
            }
            FuzzAction::ChallengeClaim => {
                if let Some(id) = &claim {
                    let _ = registry.try_challenge_claim(&arbitrator, &vault_id, id);
                }
            }
            FuzzAction::DismissClaim => {
                if let Some(id) = &claim {
                    let _ = registry.try_dismiss_claim(&arbitrator, &vault_id, id);
                }
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64);
                env.ledger().set_timestamp(ts);
            }
            FuzzAction::AdvanceBlocks { blocks } => {
                env.ledger()
                    .with_mut(|l| l.sequence_number = l.sequence_number.saturating_add(blocks as u32));
            }
        }

        // ── Post-action invariant checks ──
        let vault = registry.get_vault(&vault_id);
        assert!(vault.total_shares >= 0, "INVARIANT VIOLATION: negative total shares");
        assert!(vault.total_assets >= 0, "INVARIANT VIOLATION: negative total assets");
        if vault.total_shares == 0 {
            assert_eq!(vault.total_assets, 0, "INVARIANT VIOLATION: assets without shares");
        }

        let held = TokenClient::new(&env, &asset).balance(&registry_id);
        assert!(held >= vault.total_assets, "INVARIANT VIOLATION: vault assets unbacked");

        let mut sum = 0i128;
        for u in &users {
            let shares = registry.get_shares(&vault_id, u);
            assert_eq!(
                shares,
                rewards.get_staker_reward(&vault_id, u).shares,
                "INVARIANT VIOLATION: controller mirror out of sync"
            );
            sum += shares;
        }
        assert_eq!(sum, vault.total_shares, "INVARIANT VIOLATION: share sum mismatch");
        assert_eq!(rewards.get_total_shares(&vault_id), sum);
    }
});
