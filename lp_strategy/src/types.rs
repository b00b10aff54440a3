use alloy_sol_types::sol;
use candid::CandidType;
use serde::Deserialize;

use crate::utils::error::{StrategyError, StrategyResult};

/// Index of a coin inside a pool or swap venue
pub type CoinIndex = i128;

/// Pool amounts, one entry per pool coin
pub type PoolAmounts = [alloy_primitives::U256; crate::constants::POOL_COINS];

/// Construction arguments of a strategy.
/// Addresses and amounts are decimal or hex strings.
#[derive(CandidType, Clone, Debug, Deserialize)]
pub struct InitArgs {
    /// Address the strategy holds its positions under
    pub strategy: String,
    /// Management address allowed to change the configuration
    pub management: String,
    /// Deposit token
    pub asset: String,
    /// The pool's other coin, target of the harvest conversion
    pub counter_asset: String,
    /// Reward token claimed from the staking vault and swapped on harvest
    pub primary_reward: String,
    /// Reward token compounded into the primary reward by `tend`
    pub secondary_reward: String,
    /// Staking vault pool id of the pool-share token
    pub pool_id: String,
    /// Index of the deposit token in the pool, 0 or 1
    pub asset_index: u8,
    pub slippage_bps: Option<u64>,
    pub min_reward_to_harvest: Option<String>,
    pub min_idle_to_deploy: Option<String>,
}

impl InitArgs {
    /// Parses the construction arguments from a JSON document
    pub fn from_json(json: &str) -> StrategyResult<Self> {
        serde_json::from_str(json).map_err(|err| StrategyError::DecodingError(err.to_string()))
    }
}

sol!(
    // Two-coin liquidity pool
    interface ICurvePool {
        function calc_token_amount(uint256[2] amounts, bool is_deposit) external view returns (uint256);
        function add_liquidity(uint256[2] amounts, uint256 min_mint_amount) external returns (uint256);
        function calc_withdraw_one_coin(uint256 token_amount, int128 i) external view returns (uint256);
        function remove_liquidity_one_coin(uint256 token_amount, int128 i, uint256 min_amount) external returns (uint256);
    }

    // Reward swap pool
    interface ICurveSwap {
        function get_dy(int128 i, int128 j, uint256 dx) external view returns (uint256);
        function exchange(int128 i, int128 j, uint256 dx, uint256 min_dy, address receiver) external returns (uint256);
    }

    // Staking vault entry point
    interface IBooster {
        function deposit(uint256 pid, uint256 amount, bool stake) external returns (bool);
    }

    // Staking vault reward pool
    interface IRewardPool {
        function balanceOf(address account) external view returns (uint256);
        function getReward() external returns (bool);
        function withdrawAndUnwrap(uint256 amount, bool claim) external returns (bool);
    }
);

sol!(
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
    }
);
