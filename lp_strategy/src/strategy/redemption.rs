//! Redemption of staked pool shares back into the deposit token

use alloy_primitives::U256;

use crate::{
    collaborators::{LiquidityPool, StakingVault},
    utils::error::{StrategyError, StrategyResult},
};

use super::{settings::StrategySettings, slippage::ExchangeBound};

/// Result of a redemption
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redemption {
    /// Pool shares handed back by the vault and burned
    pub shares: U256,
    /// Requested amount and the minimum accepted from the pool
    pub bound: ExchangeBound,
    /// Deposit token actually received
    pub freed: U256,
}

/// Frees up to `amount` of the deposit token from the staked position.
///
/// Never unstakes more shares than the vault reports for the strategy. Rewards are left
/// in the vault for the next harvest. Any shortfall against `amount` is the caller's loss.
pub fn redeem<P: LiquidityPool, V: StakingVault>(
    pool: &P,
    vault: &V,
    settings: &StrategySettings,
    amount: U256,
) -> StrategyResult<Redemption> {
    let needed = pool.estimate_provision(settings.asset_amounts(amount)?, false)?;
    let staked = vault.staked_balance_of(settings.strategy)?;

    let requested = needed.min(staked);
    if requested.is_zero() {
        return Err(StrategyError::ZeroLP);
    }

    let shares = vault.withdraw_and_unstake(requested, false)?;

    let bound = ExchangeBound::new(amount, settings.slippage_bps)?;
    let freed = pool.withdraw_one_sided(shares, settings.asset_coin(), bound.minimum)?;

    Ok(Redemption {
        shares,
        bound,
        freed,
    })
}
