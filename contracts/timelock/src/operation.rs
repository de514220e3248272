//! Delayed-operation bookkeeping.

use soroban_sdk::{
    contracttype, symbol_short, xdr::ToXdr, Address, BytesN, Env, Symbol, Val, Vec,
};

const OPERATION: Symbol = symbol_short!("OP");

const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

/// Lifecycle of an operation id. Ids never return to `Unset`, so a
/// cancelled or executed operation cannot be scheduled or run again.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OperationState {
    Unset,
    /// Executable from the contained timestamp on.
    Pending(u64),
    Done,
    Cancelled,
}

/// `sha256(xdr((target, function, args, predecessor, salt)))`
pub fn hash(
    env: &Env,
    target: &Address,
    function: &Symbol,
    args: &Vec<Val>,
    predecessor: &BytesN<32>,
    salt: &BytesN<32>,
) -> BytesN<32> {
    let encoded = (
        target.clone(),
        function.clone(),
        args.clone(),
        predecessor.clone(),
        salt.clone(),
    )
        .to_xdr(env);
    env.crypto().sha256(&encoded).into()
}

/// The all-zero id marks "no predecessor".
pub fn is_none(id: &BytesN<32>) -> bool {
    id.to_array() == [0u8; 32]
}

pub fn load(env: &Env, id: &BytesN<32>) -> OperationState {
    env.storage()
        .persistent()
        .get(&(OPERATION, id.clone()))
        .unwrap_or(OperationState::Unset)
}

pub fn store(env: &Env, id: &BytesN<32>, state: &OperationState) {
    let key = (OPERATION, id.clone());
    env.storage().persistent().set(&key, state);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn is_ready(state: &OperationState, now: u64) -> bool {
    matches!(state, OperationState::Pending(ready_at) if *ready_at <= now)
}
