//! Bounty payout arithmetic.
//!
//! The HAT cuts come off the total bounty first, as plain fractions of it;
//! no price source is involved. The remainder is split by the vault's
//! bounty split, with the committee share absorbing rounding dust so the
//! parts always add up to the total.

use common::{bps_of, BountySplit, HatBountySplit};
use soroban_sdk::contracttype;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimPayout {
    /// Taken from the vault's assets.
    pub total: i128,
    pub hacker: i128,
    pub hacker_vested: i128,
    pub committee: i128,
    /// Credited to the governance pool for the vault asset.
    pub governance_hat: i128,
    /// Credited to the beneficiary's pool for the vault asset.
    pub hacker_hat_vested: i128,
    /// Lock holding `hacker_vested`, if any was created.
    pub hacker_lock: Option<u64>,
}

pub fn compute(
    total_assets: i128,
    bounty_percentage: u32,
    split: &BountySplit,
    hat_split: &HatBountySplit,
) -> Option<ClaimPayout> {
    let total = bps_of(total_assets, bounty_percentage)?;
    let governance_hat = bps_of(total, hat_split.governance)?;
    let hacker_hat_vested = bps_of(total, hat_split.hacker_vested)?;
    let rest = total
        .checked_sub(governance_hat)?
        .checked_sub(hacker_hat_vested)?;

    let hacker = bps_of(rest, split.hacker)?;
    let hacker_vested = bps_of(rest, split.hacker_vested)?;
    let committee = rest.checked_sub(hacker)?.checked_sub(hacker_vested)?;

    Some(ClaimPayout {
        total,
        hacker,
        hacker_vested,
        committee,
        governance_hat,
        hacker_hat_vested,
        hacker_lock: None,
    })
}
