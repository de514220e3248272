use soroban_sdk::{contracttype, Address, BytesN, String};

use crate::math::HUNDRED_PERCENT;

/// Basis-point partition of a claim payout.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BountySplit {
    /// Paid to the beneficiary immediately.
    pub hacker: u32,
    /// Paid to the beneficiary through a vesting lock.
    pub hacker_vested: u32,
    pub committee: u32,
}

impl BountySplit {
    /// The three shares must cover the payout exactly.
    pub fn is_valid(&self) -> bool {
        (self.hacker as u64) + (self.hacker_vested as u64) + (self.committee as u64)
            == HUNDRED_PERCENT as u64
    }
}

/// Portion of a bounty routed to the reward-token pools instead of the
/// beneficiary and committee.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HatBountySplit {
    pub governance: u32,
    pub hacker_vested: u32,
}

impl HatBountySplit {
    pub fn is_valid(&self) -> bool {
        (self.governance as u64) + (self.hacker_vested as u64) <= HUNDRED_PERCENT as u64
    }
}

/// A claim submitted by a vault committee.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claim {
    pub id: BytesN<32>,
    pub vault_id: u64,
    pub committee: Address,
    pub beneficiary: Address,
    pub bounty_percentage: u32,
    pub description_hash: String,
    pub created_at: u64,
    pub challenge_deadline: u64,
}

/// Per-vault claim slot. At most one claim is live at a time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClaimState {
    Open,
    Submitted(Claim),
    Challenged(Claim),
}

impl ClaimState {
    pub fn is_open(&self) -> bool {
        matches!(self, ClaimState::Open)
    }

    /// The live claim, whichever phase it is in.
    pub fn claim(&self) -> Option<&Claim> {
        match self {
            ClaimState::Open => None,
            ClaimState::Submitted(claim) | ClaimState::Challenged(claim) => Some(claim),
        }
    }
}

/// One transfer made by a reward-pool swap.
///
/// `token_lock` is set when the amount was placed in a vesting lock rather
/// than transferred outright.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SentReward {
    pub beneficiary: Address,
    pub token_lock: Option<u64>,
    pub amount_sent: i128,
}
