//! # Property-Based Test Generators
//!
//! Composable `proptest` strategies for vault amounts, bounty parameters and
//! action sequences.
//!
//! Generators produce *semantic* values (amounts, percentages, action
//! sequences) rather than raw bytes so every case reaches contract logic
//! instead of failing at decoding. Roughly a fifth of scalar values are
//! boundary cases.

extern crate std;

use common::BountySplit;
use proptest::prelude::*;
use std::vec::Vec;

use crate::UNIT;

/// Asset balance minted to every explorer staker.
pub const STAKER_BALANCE: i128 = 1_000 * UNIT;

// ── Scalar Generators ────────────────────────────────────────────────────────

/// Deposit amounts a staker can afford, biased toward edge cases.
pub fn deposit_amount_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        1 => Just(1i128),
        1 => Just(100 * UNIT),
        8 => (1i128..=100 * UNIT),
    ]
}

/// Amounts `deposit` must reject.
pub fn invalid_amount_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        5 => Just(0i128),
        3 => (-1_000_000i128..=-1i128),
        2 => Just(i128::MIN),
    ]
}

/// Portion of a staker's shares to redeem, in basis points.
pub fn redeem_bps_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(10_000u32),
        9 => (1u32..=10_000u32),
    ]
}

/// Bounty percentages up to `max_bounty`.
pub fn bounty_percentage_strategy(max_bounty: u32) -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(0u32),
        1 => Just(max_bounty),
        8 => (0u32..=max_bounty),
    ]
}

/// Maximum bounties a vault may be created with.
pub fn max_bounty_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(9_000u32),
        9 => (100u32..=9_000u32),
    ]
}

/// Bounty splits that always sum to 10 000.
pub fn bounty_split_strategy() -> impl Strategy<Value = BountySplit> {
    (0u32..=10_000u32).prop_flat_map(|hacker| {
        (Just(hacker), 0u32..=(10_000 - hacker)).prop_map(|(hacker, hacker_vested)| BountySplit {
            hacker,
            hacker_vested,
            committee: 10_000 - hacker - hacker_vested,
        })
    })
}

/// Block steps small enough to keep test entries alive.
pub fn block_step_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(0u32),
        1 => Just(1u32),
        8 => (1u32..=500u32),
    ]
}

/// Time steps in seconds, up to a little over one safety cycle.
pub fn time_step_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        1 => Just(0u64),
        2 => (1u64..=3_600u64),
        7 => (1u64..=50_000u64),
    ]
}

// ── Action Generators ────────────────────────────────────────────────────────

/// Everything the state explorer can do to a single vault.
///
/// `user_index` selects from the explorer's pool of stakers (modular
/// indexing).
#[derive(Debug, Clone)]
pub enum VaultAction {
    Deposit { user_index: usize, amount: i128 },
    /// Redeem `bps` of the staker's current shares.
    Withdraw { user_index: usize, bps: u32 },
    ClaimReward { user_index: usize },
    AdvanceBlocks { blocks: u32 },
    AdvanceTime { delta: u64 },
    /// Committee submits a claim; the vault owner approves it at once.
    ApprovedClaim { percentage: u32 },
    /// Committee submits a claim; the arbitrator challenges and dismisses it.
    DismissedClaim,
    SetDepositPause { paused: bool },
}

/// Weights follow realistic usage: deposits and time passing are common,
/// claims and admin actions rare.
pub fn vault_action_strategy(
    num_users: usize,
    max_bounty: u32,
) -> impl Strategy<Value = VaultAction> {
    let user_idx = 0..num_users;

    prop_oneof![
        30 => (user_idx.clone(), deposit_amount_strategy())
            .prop_map(|(u, a)| VaultAction::Deposit { user_index: u, amount: a }),
        15 => (user_idx.clone(), redeem_bps_strategy())
            .prop_map(|(u, b)| VaultAction::Withdraw { user_index: u, bps: b }),
        10 => user_idx.clone().prop_map(|u| VaultAction::ClaimReward { user_index: u }),
        15 => block_step_strategy().prop_map(|b| VaultAction::AdvanceBlocks { blocks: b }),
        15 => time_step_strategy().prop_map(|d| VaultAction::AdvanceTime { delta: d }),
        5 => bounty_percentage_strategy(max_bounty)
            .prop_map(|p| VaultAction::ApprovedClaim { percentage: p }),
        3 => Just(VaultAction::DismissedClaim),
        2 => any::<bool>().prop_map(|p| VaultAction::SetDepositPause { paused: p }),
    ]
}

/// 1..=`max_len` vault actions.
pub fn vault_action_sequence(
    num_users: usize,
    max_bounty: u32,
    max_len: usize,
) -> impl Strategy<Value = Vec<VaultAction>> {
    prop::collection::vec(vault_action_strategy(num_users, max_bounty), 1..=max_len)
}

// ── Historical Pattern Generators ────────────────────────────────────────────

/// Recurring real-world usage shapes, replayed as fixed action sequences.
#[derive(Debug, Clone)]
pub enum VaultPattern {
    /// One staker deposits, earns, claims rewards and leaves.
    DepositEarnExit,
    /// Several stakers in, a bounty is paid, everyone leaves.
    PayoutThenExodus,
    /// Deposit and withdraw in consecutive blocks.
    FlashDeposit,
    /// A claim is challenged and dismissed between deposits.
    DisputedClaim,
}

pub fn pattern_to_actions(pattern: &VaultPattern, num_users: usize) -> Vec<VaultAction> {
    match pattern {
        VaultPattern::DepositEarnExit => std::vec![
            VaultAction::Deposit { user_index: 0, amount: 10 * UNIT },
            VaultAction::AdvanceBlocks { blocks: 100 },
            VaultAction::ClaimReward { user_index: 0 },
            VaultAction::Withdraw { user_index: 0, bps: 10_000 },
        ],
        VaultPattern::PayoutThenExodus => {
            let users = num_users.min(4);
            let mut actions = Vec::new();
            for i in 0..users {
                actions.push(VaultAction::Deposit {
                    user_index: i,
                    amount: (i as i128 + 1) * UNIT,
                });
            }
            actions.push(VaultAction::AdvanceBlocks { blocks: 50 });
            actions.push(VaultAction::ApprovedClaim { percentage: 5_000 });
            for i in 0..users {
                actions.push(VaultAction::Withdraw { user_index: i, bps: 10_000 });
            }
            actions
        }
        VaultPattern::FlashDeposit => std::vec![
            VaultAction::Deposit { user_index: 0, amount: 100 * UNIT },
            VaultAction::AdvanceBlocks { blocks: 1 },
            VaultAction::Withdraw { user_index: 0, bps: 10_000 },
            VaultAction::AdvanceBlocks { blocks: 1 },
            VaultAction::ClaimReward { user_index: 0 },
        ],
        VaultPattern::DisputedClaim => std::vec![
            VaultAction::Deposit { user_index: 0, amount: 5 * UNIT },
            VaultAction::DismissedClaim,
            VaultAction::Deposit { user_index: 1 % num_users.max(1), amount: 5 * UNIT },
            VaultAction::AdvanceBlocks { blocks: 20 },
            VaultAction::ClaimReward { user_index: 0 },
        ],
    }
}

pub fn vault_pattern_strategy() -> impl Strategy<Value = VaultPattern> {
    prop_oneof![
        Just(VaultPattern::DepositEarnExit),
        Just(VaultPattern::PayoutThenExodus),
        Just(VaultPattern::FlashDeposit),
        Just(VaultPattern::DisputedClaim),
    ]
}
