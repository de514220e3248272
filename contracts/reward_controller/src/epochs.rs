//! Block-based emission schedule.
//!
//! Emission starts at `start_block` and runs in fixed-length epochs. Each
//! epoch has its own reward-per-block rate; past the last configured epoch
//! nothing is emitted.

use soroban_sdk::{contracttype, Env, Vec};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EpochSchedule {
    pub start_block: u64,
    pub epoch_length: u64,
    pub reward_per_block: Vec<i128>,
}

impl EpochSchedule {
    pub fn is_valid(&self) -> bool {
        if self.epoch_length == 0 || self.reward_per_block.is_empty() {
            return false;
        }
        self.reward_per_block.iter().all(|rate| rate >= 0)
    }

    /// Total emission for all vaults over the block range `[from, to)`.
    ///
    /// Returns `None` on overflow.
    pub fn emission(&self, from: u64, to: u64) -> Option<i128> {
        let from = from.max(self.start_block);
        if to <= from {
            return Some(0);
        }

        let epochs = self.reward_per_block.len() as u64;
        let mut epoch = (from - self.start_block) / self.epoch_length;
        let mut cursor = from;
        let mut total: i128 = 0;

        while cursor < to && epoch < epochs {
            let epoch_end = self
                .start_block
                .checked_add(epoch.checked_add(1)?.checked_mul(self.epoch_length)?)?;
            let segment_end = to.min(epoch_end);
            let rate = self.reward_per_block.get(epoch as u32)?;
            let blocks = (segment_end - cursor) as i128;
            total = total.checked_add(blocks.checked_mul(rate)?)?;
            cursor = segment_end;
            epoch += 1;
        }

        Some(total)
    }
}

/// Reward owed to one vault for `[from, to)` given its share of the total
/// allocation. Zero when nothing is allocated.
pub fn reward_for_blocks_range(
    schedule: &EpochSchedule,
    from: u64,
    to: u64,
    alloc_point: u64,
    total_alloc_point: u64,
) -> Option<i128> {
    if alloc_point == 0 || total_alloc_point == 0 {
        return Some(0);
    }
    let emission = schedule.emission(from, to)?;
    common::mul_div(emission, alloc_point as i128, total_alloc_point as i128)
}

/// Rates for `epochs` epochs where every epoch emits half of the previous one.
pub fn halving_schedule(env: &Env, initial_reward_per_block: i128, epochs: u32) -> Vec<i128> {
    let mut rates = Vec::new(env);
    let mut rate = initial_reward_per_block;
    for _ in 0..epochs {
        rates.push_back(rate);
        rate /= 2;
    }
    rates
}
