//! Deployment of idle deposit token into the staked pool position

use alloy_primitives::U256;

use crate::{
    collaborators::{LiquidityPool, StakingVault},
    utils::error::StrategyResult,
};

use super::{settings::StrategySettings, slippage::ExchangeBound};

/// Result of a deployment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deployment {
    /// Quoted and minimum accepted pool shares of the provision
    pub bound: ExchangeBound,
    /// Pool shares minted and staked
    pub shares: U256,
}

/// Provides `amount` of the deposit token single-sided to the pool and stakes every minted share.
///
/// The provision floor is the pool's own quote reduced by `slippage_bps`. A zero amount is a no-op.
pub fn deploy<P: LiquidityPool, V: StakingVault>(
    pool: &P,
    vault: &V,
    settings: &StrategySettings,
    amount: U256,
) -> StrategyResult<Deployment> {
    if amount.is_zero() {
        return Ok(Deployment {
            bound: ExchangeBound::unbounded(U256::ZERO),
            shares: U256::ZERO,
        });
    }

    let amounts = settings.asset_amounts(amount)?;
    let expected = pool.estimate_provision(amounts, true)?;
    let bound = ExchangeBound::new(expected, settings.slippage_bps)?;

    let shares = pool.provide(amounts, bound.minimum)?;
    stake(vault, settings, shares)?;

    Ok(Deployment { bound, shares })
}

/// Stakes `shares` in the staking vault with auto-staking of the vault rewards enabled.
pub fn stake<V: StakingVault>(
    vault: &V,
    settings: &StrategySettings,
    shares: U256,
) -> StrategyResult<()> {
    if shares.is_zero() {
        return Ok(());
    }
    vault.deposit(settings.pool_id, shares, true)
}
