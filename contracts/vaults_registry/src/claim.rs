use common::{Claim, ClaimState};
use soroban_sdk::{contracttype, symbol_short, xdr::ToXdr, Address, Bytes, BytesN, Env, Symbol};

use crate::payout::ClaimPayout;
use crate::vault::{TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::RegistryError;

const CLAIM: Symbol = symbol_short!("CLAIM");
const OUTCOME: Symbol = symbol_short!("OUTCOME");

/// How a claim left the vault's claim slot.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClaimOutcome {
    Approved(ClaimPayout),
    Dismissed,
}

/// `sha256(vault_id || xdr(committee) || nonce)`
pub fn claim_id(env: &Env, vault_id: u64, committee: &Address, nonce: u64) -> BytesN<32> {
    let mut data = Bytes::new(env);
    data.extend_from_array(&vault_id.to_be_bytes());
    data.append(&committee.clone().to_xdr(env));
    data.extend_from_array(&nonce.to_be_bytes());
    env.crypto().sha256(&data).into()
}

pub fn load_state(env: &Env, vault_id: u64) -> ClaimState {
    env.storage()
        .persistent()
        .get(&(CLAIM, vault_id))
        .unwrap_or(ClaimState::Open)
}

pub fn store_state(env: &Env, vault_id: u64, state: &ClaimState) {
    let key = (CLAIM, vault_id);
    if state.is_open() {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, state);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn load_outcome(env: &Env, claim_id: &BytesN<32>) -> Option<ClaimOutcome> {
    env.storage()
        .persistent()
        .get(&(OUTCOME, claim_id.clone()))
}

pub fn store_outcome(env: &Env, claim_id: &BytesN<32>, outcome: &ClaimOutcome) {
    let key = (OUTCOME, claim_id.clone());
    env.storage().persistent().set(&key, outcome);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// The live claim with `claim_id` and whether it has been challenged.
pub fn active(state: &ClaimState, claim_id: &BytesN<32>) -> Result<(Claim, bool), RegistryError> {
    let (claim, challenged) = match state {
        ClaimState::Open => return Err(RegistryError::NoActiveClaim),
        ClaimState::Submitted(claim) => (claim, false),
        ClaimState::Challenged(claim) => (claim, true),
    };
    if claim.id != *claim_id {
        return Err(RegistryError::ClaimIdMismatch);
    }
    Ok((claim.clone(), challenged))
}
