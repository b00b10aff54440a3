//! LP Strategy Constants
// AUDIT: The default thresholds are placeholders until the deployment values are agreed on.

use alloy_primitives::U256;

/// Denominator of every basis-point parameter
pub const MAX_BPS: u64 = 10_000;
pub fn max_bps() -> U256 {
    U256::from(MAX_BPS)
}

/// Default slippage tolerance, 99% of the quoted output must be received
pub const DEFAULT_SLIPPAGE_BPS: u64 = 9_900;

/// Default minimum quoted output of the compounding swap before `tend` executes it
const DEFAULT_MIN_REWARD_TO_HARVEST_RAW: u128 = 1_000_000_000_000_000_000; // 1 token at 18 decimals
pub fn default_min_reward_to_harvest() -> U256 {
    U256::from(DEFAULT_MIN_REWARD_TO_HARVEST_RAW)
}

/// Default idle balance floor, idle funds at or below this are left undeployed by `tend`
const DEFAULT_MIN_IDLE_TO_DEPLOY_RAW: u128 = 100_000_000_000_000_000_000; // 100 tokens at 18 decimals
pub fn default_min_idle_to_deploy() -> U256 {
    U256::from(DEFAULT_MIN_IDLE_TO_DEPLOY_RAW)
}

/// Number of coins in the liquidity pool
pub const POOL_COINS: usize = 2;

/// Max number of journal entries kept in memory before the oldest ones are pruned
pub const MAX_JOURNAL_ENTRIES: usize = 300;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slippage_is_within_bounds() {
        assert!(DEFAULT_SLIPPAGE_BPS <= MAX_BPS);
    }

    #[test]
    fn max_bps_matches_raw_value() {
        assert_eq!(max_bps(), U256::from(10_000u64));
    }

    #[test]
    fn idle_floor_is_scaled_to_18_decimals() {
        assert_eq!(
            default_min_idle_to_deploy(),
            U256::from(100u64) * U256::from(10u64).pow(U256::from(18u64))
        );
    }
}
