use soroban_sdk::contracttype;

/// Recurring claim window: the last `safety_period` seconds of every
/// `cycle_length` seconds. Claims may only be submitted inside it and
/// withdrawals only outside it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SafetyConfig {
    pub cycle_length: u64,
    pub safety_period: u64,
}

impl SafetyConfig {
    pub fn is_valid(&self) -> bool {
        self.safety_period > 0 && self.safety_period < self.cycle_length
    }

    pub fn is_in_safety_period(&self, now: u64) -> bool {
        if self.cycle_length == 0 {
            return false;
        }
        now % self.cycle_length >= self.cycle_length - self.safety_period
    }

    /// First instant at or after `now` inside the window.
    pub fn next_window_start(&self, now: u64) -> u64 {
        if self.is_in_safety_period(now) || self.cycle_length == 0 {
            return now;
        }
        let cycle_start = now - now % self.cycle_length;
        cycle_start + self.cycle_length - self.safety_period
    }
}
