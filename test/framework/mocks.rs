//! # Mock Collaborators
//!
//! Stand-ins for contracts outside this workspace. The swap router quotes a
//! fixed rate and pays out of its own pre-funded balance.

use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Bytes, Env, Symbol};

const RATE_BPS: Symbol = symbol_short!("RATE");
const REFUND_BPS: Symbol = symbol_short!("REFUND");

#[contract]
pub struct MockSwapRouter;

#[contractimpl]
impl MockSwapRouter {
    /// Output per unit of input, in basis points (10 000 = 1:1).
    pub fn set_rate(env: Env, rate_bps: i128) {
        env.storage().instance().set(&RATE_BPS, &rate_bps);
    }

    /// Portion of the input sent back to the recipient, simulating a router
    /// that does not consume everything it was given.
    pub fn set_refund(env: Env, refund_bps: i128) {
        env.storage().instance().set(&REFUND_BPS, &refund_bps);
    }

    pub fn exact_input(
        env: Env,
        recipient: Address,
        token_in: Address,
        token_out: Address,
        amount_in: i128,
        _min_amount_out: i128,
        _payload: Bytes,
    ) -> i128 {
        let this = env.current_contract_address();
        let rate: i128 = env.storage().instance().get(&RATE_BPS).unwrap_or(10_000);
        let refund_bps: i128 = env.storage().instance().get(&REFUND_BPS).unwrap_or(0);

        let refund = amount_in * refund_bps / 10_000;
        if refund > 0 {
            token::Client::new(&env, &token_in).transfer(&this, &recipient, &refund);
        }
        let amount_out = amount_in * rate / 10_000;
        token::Client::new(&env, &token_out).transfer(&this, &recipient, &amount_out);
        amount_out
    }
}
