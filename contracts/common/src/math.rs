/// Basis-point denominator: 10 000 bps == 100 %.
pub const HUNDRED_PERCENT: u32 = 10_000;

/// Fixed-point scale for per-share reward accumulators.
pub const REWARD_PRECISION: i128 = 1_000_000_000_000;

/// `a * b / c` with overflow and zero-divisor detection.
pub fn mul_div(a: i128, b: i128, c: i128) -> Option<i128> {
    if c == 0 {
        return None;
    }
    a.checked_mul(b)?.checked_div(c)
}

/// `amount * bps / 10_000`, rounded down.
pub fn bps_of(amount: i128, bps: u32) -> Option<i128> {
    mul_div(amount, bps as i128, HUNDRED_PERCENT as i128)
}
