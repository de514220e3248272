#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

const PAUSED: Symbol = symbol_short!("PAUSED");

/// Sets the emergency pause flag.
///
/// Callers enforce their own admin authorization before invoking this; the
/// module keeps no notion of who may pause.
pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
}

/// Returns `true` while the emergency pause is active.
pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Guard for entry points that must honour the pause.
///
/// Returns `err` when paused so each contract can surface its own error
/// variant. View-only functions should **not** call this.
pub fn require_not_paused<E>(env: &Env, err: E) -> Result<(), E> {
    if is_paused(env) {
        return Err(err);
    }
    Ok(())
}

/// Sets the flag and emits `("PAUSED", caller) -> paused`.
pub fn set_paused_by(env: &Env, caller: &Address, paused: bool) {
    set_paused(env, paused);
    env.events().publish((PAUSED, caller.clone()), paused);
}
