//! Harvest cycle: claim, convert, reinvest, then value the position

use alloy_primitives::U256;

use crate::{
    collaborators::{Collaborators, LiquidityPool, StakingVault, SwapVenue, TokenLedger},
    utils::error::{StrategyError, StrategyResult},
};

use super::{deployment::stake, settings::StrategySettings, valuation::total_assets};

/// Outcome of one harvest report
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HarvestOutcome {
    /// Primary reward received by the claim
    pub rewards_claimed: U256,
    /// Primary reward swapped into the counter-asset
    pub rewards_converted: U256,
    /// Counter-asset received from the reward swap
    pub counter_asset_received: U256,
    /// Pool shares minted from the counter-asset and staked
    pub shares_staked: U256,
    /// Total assets after the harvest
    pub total_assets: U256,
    /// Increase of total assets since the previous report
    pub profit: U256,
    /// Decrease of total assets since the previous report
    pub loss: U256,
}

/// Claims the staking rewards, swaps the primary reward into the pool's counter-asset,
/// provides it single-sided and stakes the minted shares, then reports total assets.
///
/// A wound-down strategy skips everything but the valuation. The reward swap and the
/// reinvestment provision accept any output.
pub fn harvest_and_report<P, V, S, L>(
    collaborators: &Collaborators<P, V, S, L>,
    settings: &StrategySettings,
    is_active: bool,
    last_reported_assets: U256,
) -> StrategyResult<HarvestOutcome>
where
    P: LiquidityPool,
    V: StakingVault,
    S: SwapVenue,
    L: TokenLedger,
{
    let mut outcome = HarvestOutcome::default();

    if is_active {
        let Collaborators {
            pool,
            vault,
            reward_swap,
            ledger,
            ..
        } = collaborators;

        let rewards_before = ledger.balance_of(settings.primary_reward, settings.strategy)?;
        if !vault.claim_rewards()? {
            return Err(StrategyError::NoRewardsClaimed);
        }
        let rewards = ledger.balance_of(settings.primary_reward, settings.strategy)?;
        outcome.rewards_claimed = rewards.saturating_sub(rewards_before);

        if !rewards.is_zero() {
            outcome.counter_asset_received = reward_swap.swap(rewards, U256::ZERO, None)?;
            outcome.rewards_converted = rewards;
        }

        let counter_balance = ledger.balance_of(settings.counter_asset, settings.strategy)?;
        if !counter_balance.is_zero() {
            let shares = pool.provide(settings.counter_amounts(counter_balance)?, U256::ZERO)?;
            stake(vault, settings, shares)?;
            outcome.shares_staked = shares;
        }
    }

    outcome.total_assets = total_assets(
        &collaborators.pool,
        &collaborators.vault,
        &collaborators.ledger,
        settings,
    )?;
    outcome.profit = outcome.total_assets.saturating_sub(last_reported_assets);
    outcome.loss = last_reported_assets.saturating_sub(outcome.total_assets);

    Ok(outcome)
}
