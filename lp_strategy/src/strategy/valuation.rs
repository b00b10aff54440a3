//! Total asset valuation in units of the deposit token

use alloy_primitives::U256;

use crate::{
    collaborators::{LiquidityPool, StakingVault, TokenLedger},
    types::CoinIndex,
    utils::error::{arithmetic_err, StrategyResult},
};

use super::settings::StrategySettings;

/// Holdings of the strategy, always read fresh from the collaborators
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// Deposit token held directly by the strategy
    pub idle: U256,
    /// Pool shares staked in the staking vault
    pub staked_shares: U256,
}

/// Reads the current position of the strategy.
pub fn position<V: StakingVault, L: TokenLedger>(
    vault: &V,
    ledger: &L,
    settings: &StrategySettings,
) -> StrategyResult<Position> {
    Ok(Position {
        idle: ledger.balance_of(settings.asset, settings.strategy)?,
        staked_shares: vault.staked_balance_of(settings.strategy)?,
    })
}

/// Value of `shares` when withdrawn single-sided into the coin at `index`.
/// Some pools revert on a zero burn amount, so zero shares are valued without querying.
pub fn staked_value<P: LiquidityPool>(
    pool: &P,
    shares: U256,
    index: CoinIndex,
) -> StrategyResult<U256> {
    if shares.is_zero() {
        return Ok(U256::ZERO);
    }
    pool.estimate_withdraw_one_sided(shares, index)
}

/// Returns the idle balance plus the single-sided withdrawal value of every staked share.
/// Pending rewards are not counted until they are harvested.
pub fn total_assets<P: LiquidityPool, V: StakingVault, L: TokenLedger>(
    pool: &P,
    vault: &V,
    ledger: &L,
    settings: &StrategySettings,
) -> StrategyResult<U256> {
    let Position {
        idle,
        staked_shares,
    } = position(vault, ledger, settings)?;

    staked_value(pool, staked_shares, settings.asset_coin())?
        .checked_add(idle)
        .ok_or(arithmetic_err("Total assets overflowed."))
}
