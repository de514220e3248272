//! The closed set of administrative calls the timelock forwards without
//! delay. Nothing outside this enum can be invoked instantly.

use common::{
    interfaces::{ArbitratorClient, RewardControllerClient, VaultsRegistryClient},
    HatBountySplit, SentReward,
};
use soroban_sdk::{symbol_short, Address, Bytes, BytesN, Env, String, Symbol, Vec};

use crate::roles::{self, Role};
use crate::{events, TimelockError};

pub enum InstantAction {
    SetVaultVisibility {
        registry: Address,
        vault_id: u64,
        visible: bool,
    },
    SetVaultDescription {
        registry: Address,
        vault_id: u64,
        description_hash: String,
    },
    SetCommittee {
        registry: Address,
        vault_id: u64,
        committee: Address,
    },
    SetDepositPause {
        registry: Address,
        vault_id: u64,
        paused: bool,
    },
    SetEmergencyPaused {
        registry: Address,
        paused: bool,
    },
    SetHatBountySplit {
        registry: Address,
        vault_id: u64,
        split: Option<HatBountySplit>,
    },
    AddRewardController {
        registry: Address,
        vault_id: u64,
        controller: Address,
    },
    SetAllocPoint {
        controller: Address,
        vault_id: u64,
        alloc_point: u64,
    },
    /// `resolver` is the registry or the arbitrator; both expose the same
    /// claim-resolution entry points.
    ChallengeClaim {
        resolver: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
    },
    ApproveClaim {
        resolver: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
        bounty_percentage: Option<u32>,
    },
    DismissClaim {
        resolver: Address,
        vault_id: u64,
        claim_id: BytesN<32>,
    },
    SwapAndSend {
        registry: Address,
        token: Address,
        beneficiaries: Vec<Address>,
        min_out: i128,
        router: Address,
        payload: Bytes,
    },
}

impl InstantAction {
    fn target(&self) -> &Address {
        match self {
            InstantAction::SetVaultVisibility { registry, .. }
            | InstantAction::SetVaultDescription { registry, .. }
            | InstantAction::SetCommittee { registry, .. }
            | InstantAction::SetDepositPause { registry, .. }
            | InstantAction::SetEmergencyPaused { registry, .. }
            | InstantAction::SetHatBountySplit { registry, .. }
            | InstantAction::AddRewardController { registry, .. }
            | InstantAction::SwapAndSend { registry, .. } => registry,
            InstantAction::SetAllocPoint { controller, .. } => controller,
            InstantAction::ChallengeClaim { resolver, .. }
            | InstantAction::ApproveClaim { resolver, .. }
            | InstantAction::DismissClaim { resolver, .. } => resolver,
        }
    }

    fn tag(&self) -> Symbol {
        match self {
            InstantAction::SetVaultVisibility { .. } => symbol_short!("VISIBLE"),
            InstantAction::SetVaultDescription { .. } => symbol_short!("DESC"),
            InstantAction::SetCommittee { .. } => symbol_short!("COMMITTEE"),
            InstantAction::SetDepositPause { .. } => symbol_short!("DEP_PAUSE"),
            InstantAction::SetEmergencyPaused { .. } => symbol_short!("EMERGENCY"),
            InstantAction::SetHatBountySplit { .. } => symbol_short!("HAT_SPLIT"),
            InstantAction::AddRewardController { .. } => symbol_short!("ADD_RC"),
            InstantAction::SetAllocPoint { .. } => symbol_short!("ALLOC"),
            InstantAction::ChallengeClaim { .. } => symbol_short!("CHALLENGE"),
            InstantAction::ApproveClaim { .. } => symbol_short!("APPROVE"),
            InstantAction::DismissClaim { .. } => symbol_short!("DISMISS"),
            InstantAction::SwapAndSend { .. } => symbol_short!("SWAP"),
        }
    }

    /// Swaps may also be triggered by proposers, which is how the fee
    /// forwarder sweeps the governance pool.
    fn permits(&self, env: &Env, caller: &Address) -> bool {
        if roles::has_role(env, &Role::Manager, caller) {
            return true;
        }
        matches!(self, InstantAction::SwapAndSend { .. })
            && roles::has_role(env, &Role::Proposer, caller)
    }
}

/// Checks the caller's role and forwards `action` as the timelock.
/// Only `SwapAndSend` produces records; every other action returns an
/// empty list.
pub fn run(
    env: &Env,
    caller: &Address,
    action: InstantAction,
) -> Result<Vec<SentReward>, TimelockError> {
    if !action.permits(env, caller) {
        return Err(TimelockError::Unauthorized);
    }
    caller.require_auth();

    let this = env.current_contract_address();
    if *action.target() == this {
        return Err(TimelockError::SelfTargetNotAllowed);
    }
    events::publish_instant(env, action.tag(), caller, action.target());

    match action {
        InstantAction::SetVaultVisibility {
            registry,
            vault_id,
            visible,
        } => VaultsRegistryClient::new(env, &registry).set_vault_visibility(
            &this, &vault_id, &visible,
        ),
        InstantAction::SetVaultDescription {
            registry,
            vault_id,
            description_hash,
        } => VaultsRegistryClient::new(env, &registry).set_vault_description(
            &this,
            &vault_id,
            &description_hash,
        ),
        InstantAction::SetCommittee {
            registry,
            vault_id,
            committee,
        } => VaultsRegistryClient::new(env, &registry).set_committee(&this, &vault_id, &committee),
        InstantAction::SetDepositPause {
            registry,
            vault_id,
            paused,
        } => VaultsRegistryClient::new(env, &registry).set_deposit_pause(&this, &vault_id, &paused),
        InstantAction::SetEmergencyPaused { registry, paused } => {
            VaultsRegistryClient::new(env, &registry).set_emergency_paused(&this, &paused)
        }
        InstantAction::SetHatBountySplit {
            registry,
            vault_id,
            split,
        } => VaultsRegistryClient::new(env, &registry).set_hat_bounty_split(&this, &vault_id, &split),
        InstantAction::AddRewardController {
            registry,
            vault_id,
            controller,
        } => VaultsRegistryClient::new(env, &registry).add_reward_controller(
            &this,
            &vault_id,
            &controller,
        ),
        InstantAction::SetAllocPoint {
            controller,
            vault_id,
            alloc_point,
        } => RewardControllerClient::new(env, &controller).set_alloc_point(
            &this,
            &vault_id,
            &alloc_point,
        ),
        InstantAction::ChallengeClaim {
            resolver,
            vault_id,
            claim_id,
        } => ArbitratorClient::new(env, &resolver).challenge_claim(&this, &vault_id, &claim_id),
        InstantAction::ApproveClaim {
            resolver,
            vault_id,
            claim_id,
            bounty_percentage,
        } => ArbitratorClient::new(env, &resolver).approve_claim(
            &this,
            &vault_id,
            &claim_id,
            &bounty_percentage,
        ),
        InstantAction::DismissClaim {
            resolver,
            vault_id,
            claim_id,
        } => ArbitratorClient::new(env, &resolver).dismiss_claim(&this, &vault_id, &claim_id),
        InstantAction::SwapAndSend {
            registry,
            token,
            beneficiaries,
            min_out,
            router,
            payload,
        } => {
            return Ok(VaultsRegistryClient::new(env, &registry).swap_and_send(
                &this,
                &token,
                &beneficiaries,
                &min_out,
                &router,
                &payload,
            ));
        }
    }
    Ok(Vec::new(env))
}
